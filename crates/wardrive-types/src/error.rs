use std::fmt;

/// Result type for wardrive-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// MAC address text did not match the 6-octet hex form
    InvalidMac(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidMac(text) => write!(f, "Invalid MAC address: {}", text),
        }
    }
}

impl std::error::Error for Error {}
