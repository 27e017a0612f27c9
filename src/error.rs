//! Error types for the prismo client library.
//!
//! Every failure is terminal for the operation that raised it: the core
//! performs no retries and returns no partial results. Backend-reported
//! messages are carried verbatim so callers can diagnose failed statements.

use thiserror::Error;

/// Convenience alias for results with [`PrismoError`].
pub type Result<T> = std::result::Result<T, PrismoError>;

/// Errors that can occur in the prismo client.
#[derive(Debug, Error)]
pub enum PrismoError {
    /// Missing or malformed required input to a builder or client call
    /// (empty table name, missing filter/data map). Raised before any I/O.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid connection configuration (missing url/token, unparseable URL).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network or connection failure reaching the backend.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend accepted the call but the statement failed. Carries the
    /// backend-reported message verbatim.
    #[error("query error: {0}")]
    Query(String),

    /// Operation invoked against a backend that does not support it.
    #[error("operation not supported on this backend: {0}")]
    Unsupported(&'static str),

    /// Request or response (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem failure while writing generated artifacts.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for PrismoError {
    fn from(err: reqwest::Error) -> Self {
        PrismoError::Transport(err.to_string())
    }
}

impl From<rusqlite::Error> for PrismoError {
    fn from(err: rusqlite::Error) -> Self {
        PrismoError::Query(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrismoError::Validation("table name is required".into());
        assert_eq!(err.to_string(), "validation error: table name is required");

        let err = PrismoError::Unsupported("version");
        assert_eq!(
            err.to_string(),
            "operation not supported on this backend: version"
        );
    }

    #[test]
    fn test_driver_error_wraps_as_query() {
        let err: PrismoError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, PrismoError::Query(_)));
    }
}
