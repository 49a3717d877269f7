use std::fmt;

/// Result type for turntrace operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading a runtime summary
#[derive(Debug)]
pub enum Error {
    /// The raw metrics payload did not match the expected summary shape
    Schema(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Schema(err) => write!(f, "Schema error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Schema(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Schema(err)
    }
}
