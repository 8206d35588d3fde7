// Ingest layer: capture files in, normalized observations out.
// Nothing downstream of this crate ever sees a raw capture row.

mod error;
mod normalize;
mod parser;
mod report;
mod schema;
mod session;

pub use error::{Error, Result};
pub use normalize::normalize;
pub use parser::parse_capture;
pub use report::{DataError, DataErrorKind, FileReport};
pub use schema::{HeaderMap, RawRecord};
pub use session::{discover_captures, parse_capture_file, session_id_from_path, ParsedCapture};
