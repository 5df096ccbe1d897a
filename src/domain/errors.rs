//! Domain error types
//!
//! This module defines the error hierarchy for batchkit. All errors are
//! domain-specific and don't expose third-party types; conversions from the
//! CSV, JSON, archive and TOML crates flatten the source error into a message.

use thiserror::Error;

/// Main batchkit error type
///
/// Every transform returns this error on failure. Callers decide how to surface
/// it (HTTP status, exit code) through [`BatchError::is_client_error`].
#[derive(Debug, Error)]
pub enum BatchError {
    /// Upload-level validation errors (missing file, empty file, wrong extension)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The configured content column is not present in the table header
    #[error("Column '{column}' not found. Available columns: {}", available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// A request parameter is missing or has the wrong shape
    #[error("Invalid parameter '{name}': {message}")]
    Parameter { name: String, message: String },

    /// Input bytes are not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// CSV reading or writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Json(String),

    /// Archive creation errors
    #[error("Archive error: {0}")]
    Archive(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl BatchError {
    /// Creates a parameter error for the named field
    pub fn parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Returns true when the failure was caused by the caller's input.
    ///
    /// Client errors map to 4xx-style responses; everything else is an
    /// internal failure carrying its message text.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::ColumnNotFound { .. }
                | Self::Parameter { .. }
                | Self::Encoding(_)
        )
    }
}

impl From<std::io::Error> for BatchError {
    fn from(err: std::io::Error) -> Self {
        BatchError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BatchError {
    fn from(err: serde_json::Error) -> Self {
        BatchError::Json(err.to_string())
    }
}

impl From<csv::Error> for BatchError {
    fn from(err: csv::Error) -> Self {
        BatchError::Csv(err.to_string())
    }
}

impl From<zip::result::ZipError> for BatchError {
    fn from(err: zip::result::ZipError) -> Self {
        BatchError::Archive(err.to_string())
    }
}

impl From<std::str::Utf8Error> for BatchError {
    fn from(err: std::str::Utf8Error) -> Self {
        BatchError::Encoding(format!("input is not valid UTF-8: {err}"))
    }
}

impl From<toml::de::Error> for BatchError {
    fn from(err: toml::de::Error) -> Self {
        BatchError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = BatchError::Validation("The file is empty".to_string());
        assert_eq!(err.to_string(), "Validation error: The file is empty");
    }

    #[test]
    fn test_column_not_found_lists_available_columns() {
        let err = BatchError::ColumnNotFound {
            column: "text".to_string(),
            available: vec!["id".to_string(), "body".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Column 'text' not found. Available columns: id, body"
        );
    }

    #[test]
    fn test_parameter_error_display() {
        let err = BatchError::parameter("max_tokens", "expected an integer, got 'abc'");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'max_tokens': expected an integer, got 'abc'"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(BatchError::Validation("x".into()).is_client_error());
        assert!(BatchError::parameter("split_number", "x").is_client_error());
        assert!(BatchError::Encoding("x".into()).is_client_error());
        assert!(BatchError::ColumnNotFound {
            column: "c".into(),
            available: vec![]
        }
        .is_client_error());

        assert!(!BatchError::Archive("x".into()).is_client_error());
        assert!(!BatchError::Io("x".into()).is_client_error());
        assert!(!BatchError::Csv("x".into()).is_client_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: BatchError = io_err.into();
        assert!(matches!(err, BatchError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: BatchError = json_err.into();
        assert!(matches!(err, BatchError::Json(_)));
    }

    #[test]
    fn test_utf8_error_conversion() {
        let bytes = [0xff, 0xfe, 0x00];
        let utf8_err = std::str::from_utf8(&bytes).unwrap_err();
        let err: BatchError = utf8_err.into();
        assert!(matches!(err, BatchError::Encoding(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: BatchError = toml_err.into();
        assert!(matches!(err, BatchError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_batch_error_implements_std_error() {
        let err = BatchError::Other("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
