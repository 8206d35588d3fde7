pub mod config;
mod error;
pub mod ops;

pub use config::{expand_tilde, resolve_data_dir, Config};
pub use error::{Error, Result};
pub use ops::build::{BuildOptions, BuildOutcome, BuildProgress, BuildService};
