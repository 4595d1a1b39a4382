pub mod error;
pub mod reference;

pub use error::*;
pub use reference::*;
