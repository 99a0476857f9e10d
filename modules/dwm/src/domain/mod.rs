pub mod error;
pub mod service;
pub mod signature;

pub use error::*;
pub use service::*;
pub use signature::*;
