use std::fmt;

use serde::{Deserialize, Serialize};

/// Display server operation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Error {
    /// Window, seat or device ID did not resolve.
    NotFound,
    /// Out-of-range cursor code, malformed configuration or illegal
    /// resize offset.
    Invalid,
    /// The operation would remove the last remaining seat.
    Busy,
    /// Seat name collision.
    Exists,
    /// An ID space or queue limit was exhausted.
    NoSpace,
    /// An allocation limit was reached.
    LimitReached,
    /// Underlying graphics context or configuration I/O failed.
    ///
    /// The string is a debug description of the error, only suitable for
    /// logging.
    Io(String),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "object not found"),
            Error::Invalid => write!(f, "invalid argument"),
            Error::Busy => write!(f, "resource is busy"),
            Error::Exists => write!(f, "name already exists"),
            Error::NoSpace => write!(f, "id space exhausted"),
            Error::LimitReached => write!(f, "allocation limit reached"),
            Error::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}
impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
