pub mod email;
pub mod upload;

pub use email::*;
pub use upload::*;
