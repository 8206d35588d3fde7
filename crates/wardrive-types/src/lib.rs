pub mod document;
pub mod domain;
pub mod error;
pub mod mac;

pub use document::*;
pub use domain::*;
pub use error::{Error, Result};
pub use mac::Mac;
