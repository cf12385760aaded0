use std::fmt;

/// Error type for every data-access operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The request never produced a response (connection, timeout, TLS).
    Transport(String),
    /// The proxy answered with a non-success status.
    Status { status: u16, message: String },
    /// No document exists at the requested path.
    NotFound(String),
    /// A response or stored document could not be deserialized.
    Decode(String),
    /// A query could not be serialized for transport.
    Encode(String),
    /// The query breaks a structural invariant.
    InvalidQuery(String),
    /// A pagination session was asked for pages smaller than one document.
    InvalidPageSize(usize),
    /// An in-memory lock was poisoned by a panicking writer.
    LockPoisoned(&'static str),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Transport(msg) => write!(f, "transport error: {}", msg),
            DataError::Status { status, message } => {
                write!(f, "proxy returned status {}: {}", status, message)
            }
            DataError::NotFound(path) => write!(f, "document not found: {}", path),
            DataError::Decode(msg) => write!(f, "decode error: {}", msg),
            DataError::Encode(msg) => write!(f, "encode error: {}", msg),
            DataError::InvalidQuery(msg) => write!(f, "invalid query: {}", msg),
            DataError::InvalidPageSize(size) => {
                write!(f, "page size must be at least 1 (got {})", size)
            }
            DataError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for DataError {}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Decode(err.to_string())
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DataError::Decode(err.to_string())
        } else {
            DataError::Transport(err.to_string())
        }
    }
}

impl DataError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            DataError::Transport(_) => 502,
            DataError::Status { status, .. } => *status,
            DataError::NotFound(_) => 404,
            DataError::Decode(_) => 400,
            DataError::Encode(_) => 500,
            DataError::InvalidQuery(_) => 400,
            DataError::InvalidPageSize(_) => 400,
            DataError::LockPoisoned(_) => 500,
        }
    }
}
