pub mod orchestrator;
pub mod queue;

pub use orchestrator::*;
pub use queue::*;
