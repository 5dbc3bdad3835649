//! Error types for tooncache

use std::fmt;

/// Result type alias for tooncache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading cache configuration
///
/// Cache reads and writes never fail; only configuration does.
#[derive(Debug)]
pub enum Error {
    /// A configuration value could not be interpreted
    InvalidConfig {
        /// Setting name, e.g. the environment variable
        key: String,
        /// Raw value that was rejected
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Serialized configuration could not be decoded
    Deserialize(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig { key, value, reason } => {
                write!(f, "Invalid config {}={:?}: {}", key, value, reason)
            }
            Error::Deserialize(msg) => write!(f, "Config deserialize error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Deserialize(err.to_string())
    }
}
