// Engine module - the algorithmic core of the pipeline.
// This layer sits between normalized observations (ingest) and the
// emitted document; it never touches the filesystem except to read a
// cached vendor registry it is pointed at.

mod emit;
mod error;
mod merge;
mod route;
pub mod vendor;

pub use emit::{emit_document, render_document};
pub use error::{Error, Result};
pub use merge::{apply_jitter, merge_observations};
pub use route::build_routes;
pub use vendor::{VendorDirectory, VENDOR_RANDOMIZED, VENDOR_UNKNOWN};
