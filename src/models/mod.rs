pub mod asr;
pub mod deepgram;
pub mod job;
pub mod segment;

pub use asr::*;
pub use deepgram::*;
pub use job::*;
pub use segment::*;
