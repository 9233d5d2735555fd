//! Error types for numsift.
//!
//! This module defines the error type used throughout the library. Errors derive
//! `thiserror::Error` and preserve their source chains with `#[source]`.
//!
//! # Error Handling Philosophy
//!
//! **Source read failures MUST always bubble up unchanged:**
//! - `NumsiftError::Io` (from `std::io::Error`) aborts an extraction on the first
//!   failed read. No partial token collection is returned and nothing is retried.
//!
//! **Application errors carry context:**
//! - `Validation` - Invalid configuration, digit sets, request payload fields
//! - `Serialization` - JSON/TOML/YAML encoding errors
//! - `Cancelled` - A run was stopped through its `CancellationToken`
//!
//! Malformed input rows are not errors: they are discarded during extraction.
//! An unparseable digit-sum target is not an error either: it is reported as a
//! [`ConfigIssue`](crate::filter::ConfigIssue) and the sum category is skipped.
//!
//! # Example
//!
//! ```rust
//! use numsift::{NumsiftError, Result};
//!
//! fn checked_batch_size(size: usize) -> Result<usize> {
//!     if size == 0 {
//!         return Err(NumsiftError::validation("batch_size must be greater than zero"));
//!     }
//!     Ok(size)
//! }
//!
//! assert!(checked_batch_size(0).is_err());
//! ```
use thiserror::Error;

/// Result type alias using `NumsiftError`.
pub type Result<T> = std::result::Result<T, NumsiftError>;

/// Main error type for all numsift operations.
#[derive(Debug, Error)]
pub enum NumsiftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Cancelled: {0}")]
    Cancelled(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for NumsiftError {
    fn from(err: serde_json::Error) -> Self {
        NumsiftError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl NumsiftError {
    error_constructor!(validation, Validation);
    error_constructor!(serialization, Serialization);

    /// Returns true when the error came from the underlying byte source.
    pub fn is_source_read(&self) -> bool {
        matches!(self, NumsiftError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: NumsiftError = io_err.into();
        assert!(matches!(err, NumsiftError::Io(_)));
        assert!(err.is_source_read());
        assert!(err.to_string().contains("IO error"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_validation_error() {
        let err = NumsiftError::validation("invalid input");
        assert_eq!(err.to_string(), "Validation error: invalid input");
        assert!(!err.is_source_read());
    }

    #[test]
    fn test_validation_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidInput, "bad param");
        let err = NumsiftError::validation_with_source("invalid input", source);
        assert_eq!(err.to_string(), "Validation error: invalid input");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_serialization_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad format");
        let err = NumsiftError::serialization_with_source("JSON parse error", source);
        assert_eq!(err.to_string(), "Serialization error: JSON parse error");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: NumsiftError = json_err.into();
        assert!(matches!(err, NumsiftError::Serialization { .. }));
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_cancelled_error() {
        let err = NumsiftError::Cancelled("filter run stopped after 2 of 5 batches".to_string());
        assert_eq!(err.to_string(), "Cancelled: filter run stopped after 2 of 5 batches");
    }

    #[test]
    fn test_io_error_bubbles_unchanged() {
        fn read_source() -> Result<Vec<u8>> {
            let content = std::fs::read("/nonexistent/numbers.csv")?;
            Ok(content)
        }

        let result = read_source();
        assert!(matches!(result.unwrap_err(), NumsiftError::Io(_)));
    }
}
