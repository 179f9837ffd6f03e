//! Error types for the sermonprep library.
//!
//! Every fallible operation in the crate returns [`Result`]. The variants map
//! onto JSON-RPC error codes so the backend can report failures to the front
//! end without string matching.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the sermonprep library.
#[derive(Debug, Error)]
pub enum SermonError {
    // Database errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Record errors
    #[error("Record not found: {id}")]
    RecordNotFound { id: i64 },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    // Date errors
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("Ambiguous date '{input}': cannot tell day, month and year apart")]
    AmbiguousDate { input: String },

    // Validation errors
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid params: {message}")]
    InvalidParams { message: String },

    // Import/export errors
    #[error("Import failed: {message}")]
    ImportFailed { message: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for sermonprep operations.
pub type Result<T> = std::result::Result<T, SermonError>;

impl From<std::io::Error> for SermonError {
    fn from(err: std::io::Error) -> Self {
        SermonError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for SermonError {
    fn from(err: serde_json::Error) -> Self {
        SermonError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<rusqlite::Error> for SermonError {
    fn from(err: rusqlite::Error) -> Self {
        SermonError::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl SermonError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        SermonError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Error for a poisoned or otherwise unavailable connection lock.
    pub(crate) fn lock_failed() -> Self {
        SermonError::Database {
            message: "Failed to acquire connection lock".to_string(),
            source: None,
        }
    }

    /// Convert to a JSON-RPC error code.
    ///
    /// Custom error codes (application-defined, -32000 to -32099):
    /// - -32001: Record not found
    /// - -32002: Import failed
    /// - -32005: Validation error (bad field, bad date)
    /// - -32602: Invalid params
    /// - -32603: Internal error
    pub fn to_rpc_error_code(&self) -> i32 {
        match self {
            SermonError::RecordNotFound { .. } => -32001,

            SermonError::ImportFailed { .. } => -32002,

            SermonError::Validation { .. }
            | SermonError::UnknownField(_)
            | SermonError::InvalidDate { .. }
            | SermonError::AmbiguousDate { .. } => -32005,

            SermonError::InvalidParams { .. } => -32602,

            _ => -32603,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SermonError::RecordNotFound { id: 42 };
        assert_eq!(err.to_string(), "Record not found: 42");

        let err = SermonError::AmbiguousDate {
            input: "05-04-20".into(),
        };
        assert!(err.to_string().contains("05-04-20"));
    }

    #[test]
    fn test_rpc_error_codes() {
        assert_eq!(SermonError::RecordNotFound { id: 1 }.to_rpc_error_code(), -32001);
        assert_eq!(
            SermonError::UnknownField("colour".into()).to_rpc_error_code(),
            -32005
        );
        assert_eq!(
            SermonError::InvalidParams {
                message: "missing id".into()
            }
            .to_rpc_error_code(),
            -32602
        );
        assert_eq!(SermonError::Other("boom".into()).to_rpc_error_code(), -32603);
    }

    #[test]
    fn test_rusqlite_conversion() {
        let err: SermonError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, SermonError::Database { source: Some(_), .. }));
    }
}
