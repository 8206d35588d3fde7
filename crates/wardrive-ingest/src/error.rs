use std::fmt;
use std::path::PathBuf;

/// Result type for wardrive-ingest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the ingest layer.
///
/// These are file-level failures. Row-level problems are not errors at
/// this level; they are recorded as [`crate::DataError`] entries and the
/// file keeps parsing.
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// CSV reading failed at the file level
    Csv(csv::Error),

    /// No header row containing MAC and SSID columns was found
    NoHeader(PathBuf),

    /// Directory traversal failed
    WalkDir(walkdir::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Csv(err) => write!(f, "CSV error: {}", err),
            Error::NoHeader(path) => {
                write!(f, "No header row found in capture file: {}", path.display())
            }
            Error::WalkDir(err) => write!(f, "Directory traversal error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::NoHeader(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err)
    }
}
