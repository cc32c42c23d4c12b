pub mod group;
pub mod resolve;
pub mod summary;

pub use group::*;
pub use resolve::*;
pub use summary::*;
