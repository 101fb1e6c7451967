//! Error Handling
//!
//! Application-wide error type extending the core pipeline taxonomy with
//! the variants that need heavier dependencies (I/O, JSON, config).
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

use taskmind_core::{PipelineError, StoreError};

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Pipeline errors (classification, extraction, persistence, ...)
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Task store errors outside the pipeline path
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bot channel errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a channel error
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Convert AppError to a string
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::config("missing extractor model");
        assert_eq!(err.to_string(), "Configuration error: missing extractor model");
    }

    #[test]
    fn test_pipeline_error_is_transparent() {
        let err: AppError = PipelineError::Unauthenticated.into();
        assert_eq!(err.to_string(), "User not authenticated");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }
}
