//! Common error types used throughout vidasset.
//!
//! This module provides a unified error type covering the failure cases of the
//! asset lifecycle: missing configuration, absent records, rejected writes,
//! transport failures, and malformed input.

/// Common error type for vidasset.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required configuration field is missing or unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested asset record was not found.
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The remote store rejected a write.
    #[error("Failed to save asset {key}: store responded with status {status}")]
    StoreWrite {
        /// Storage key of the rejected record.
        key: String,
        /// HTTP status code returned by the store.
        status: u16,
    },

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("HTTP error: {0}")]
    Http(String),

    /// A record could not be serialized or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a new Configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new StoreWrite error.
    pub fn store_write<S: Into<String>>(key: S, status: u16) -> Self {
        Self::StoreWrite {
            key: key.into(),
            status,
        }
    }

    /// Create a new Http error from a transport failure message.
    pub fn http<S: Into<String>>(msg: S) -> Self {
        Self::Http(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::configuration("folder is not set");
        assert_eq!(err.to_string(), "Configuration error: folder is not set");

        let err = Error::not_found("videos/a.mp4.json");
        assert_eq!(err.to_string(), "Asset not found: videos/a.mp4.json");

        let err = Error::store_write("videos/a.mp4.json", 500);
        assert_eq!(
            err.to_string(),
            "Failed to save asset videos/a.mp4.json: store responded with status 500"
        );

        let err = Error::invalid_input("patch must be an object");
        assert_eq!(err.to_string(), "Invalid input: patch must be an object");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_store_write_carries_status() {
        match Error::store_write("k.json", 403) {
            Error::StoreWrite { key, status } => {
                assert_eq!(key, "k.json");
                assert_eq!(status, 403);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::not_found("x").is_not_found());
        assert!(!Error::http("refused").is_not_found());
    }
}
