//! Pipeline Error Taxonomy
//!
//! Defines the error types shared across the Taskmind workspace. These are
//! dependency-free (only thiserror + std) to keep the core crate lightweight.
//!
//! The taxonomy distinguishes the one non-fatal failure mode (context
//! gathering, which degrades to an empty context) from the fatal ones that
//! consume retry budget, and from the two that must never be retried
//! (unauthenticated caller, invalid input).

use thiserror::Error;

/// Error type for a single pipeline attempt.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Reading the user's task history failed. Non-fatal: the orchestrator
    /// degrades to an empty `UserContext` instead of propagating this.
    #[error("Context gathering failed: {0}")]
    ContextGather(String),

    /// The intent classification capability failed. Fatal for the attempt.
    #[error("Classification failed: {0}")]
    Classification(String),

    /// The field extraction capability failed. Fatal for the attempt.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Reading or writing the task store failed. Fatal: no task is created
    /// and no partial state is surfaced to the caller.
    #[error("Task store error: {0}")]
    Persistence(String),

    /// No owning user identifier was supplied. Not retryable until the
    /// caller re-authenticates.
    #[error("User not authenticated")]
    Unauthenticated,

    /// The extraction capability returned a payload that parsed but matched
    /// no known shape.
    #[error("Unknown response type")]
    UnknownResponse,

    /// The submission itself was unusable (e.g. blank text). Rejected before
    /// the state machine is touched, so it never consumes retry budget.
    #[error("Invalid input: {0}")]
    Invalid(String),
}

/// Result type alias for pipeline errors
pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// Create a context-gather error
    pub fn context_gather(msg: impl Into<String>) -> Self {
        Self::ContextGather(msg.into())
    }

    /// Create a classification error
    pub fn classification(msg: impl Into<String>) -> Self {
        Self::Classification(msg.into())
    }

    /// Create an extraction error
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create an invalid-input error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// Whether a failed attempt with this error may be retried by
    /// resubmitting the same text.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Unauthenticated | Self::Invalid(_))
    }

    /// Short human-readable message for display to the end user.
    ///
    /// Callers key off the "timeout" and "authentication" substrings in the
    /// underlying message to pick the retry / re-auth prompt.
    pub fn user_message(&self) -> String {
        let raw = self.to_string();
        let lowered = raw.to_lowercase();
        if matches!(self, Self::Unauthenticated) || lowered.contains("authentication") {
            "Please sign in again before retrying.".to_string()
        } else if lowered.contains("timeout") {
            "The request timed out. Please try again.".to_string()
        } else if matches!(self, Self::Invalid(_)) {
            raw
        } else {
            "Something went wrong while processing your request.".to_string()
        }
    }
}

/// Convert PipelineError to a string
impl From<PipelineError> for String {
    fn from(err: PipelineError) -> String {
        err.to_string()
    }
}

/// Error type for task store operations.
///
/// Kept separate from `PipelineError` so call sites decide how a store
/// failure maps into the taxonomy: a failed history read degrades, a failed
/// insert is fatal.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend-level failure (connection, SQL, serialization of a row)
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// The addressed row does not exist for the owning user
    #[error("Row not found: {0}")]
    NotFound(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::classification("model unavailable");
        assert_eq!(err.to_string(), "Classification failed: model unavailable");
    }

    #[test]
    fn test_unauthenticated_message_is_fixed() {
        let err = PipelineError::Unauthenticated;
        assert_eq!(err.to_string(), "User not authenticated");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_unknown_response_message() {
        assert_eq!(
            PipelineError::UnknownResponse.to_string(),
            "Unknown response type"
        );
    }

    #[test]
    fn test_retryable_classification() {
        assert!(PipelineError::classification("boom").is_retryable());
        assert!(PipelineError::extraction("boom").is_retryable());
        assert!(PipelineError::persistence("boom").is_retryable());
        assert!(!PipelineError::invalid("empty text").is_retryable());
    }

    #[test]
    fn test_user_message_timeout_substring() {
        let err = PipelineError::extraction("request timeout after 30s");
        assert_eq!(
            err.user_message(),
            "The request timed out. Please try again."
        );
    }

    #[test]
    fn test_user_message_authentication_substring() {
        let err = PipelineError::classification("authentication failed: bad key");
        assert_eq!(err.user_message(), "Please sign in again before retrying.");
    }

    #[test]
    fn test_user_message_generic() {
        let err = PipelineError::persistence("disk full");
        assert_eq!(
            err.user_message(),
            "Something went wrong while processing your request."
        );
    }

    #[test]
    fn test_error_conversion() {
        let err = PipelineError::extraction("bad payload");
        let msg: String = err.into();
        assert!(msg.contains("Extraction failed"));
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::backend("connection refused");
        assert_eq!(err.to_string(), "Storage backend error: connection refused");
    }
}
