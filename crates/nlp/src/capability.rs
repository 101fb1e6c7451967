//! NLP Capability Traits
//!
//! Defines the interfaces the pipeline consumes: zero-shot classification,
//! field extraction, and chat-style completion. Each is a separate trait so
//! tests can mock exactly the capability under exercise.

use async_trait::async_trait;

use super::types::{Classification, ExtractionOutput, ExtractionRequest, NlpError, NlpResult};

/// Zero-shot text classification over caller-supplied candidate labels.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Rank `candidate_labels` against `text`. The returned labels are
    /// ordered by descending confidence.
    async fn classify(&self, text: &str, candidate_labels: &[String])
        -> NlpResult<Classification>;
}

/// Structured task-field extraction from free text.
#[async_trait]
pub trait TaskExtractor: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Derive task fields from the request text, optionally biased by the
    /// user context carried in the request.
    async fn extract(&self, request: ExtractionRequest) -> NlpResult<ExtractionOutput>;
}

/// Chat-style completion. Extension seam for conversational bot replies;
/// the shipped channels format replies from templates and do not consume
/// this yet.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Complete `user` under `system` instructions and return the raw text.
    async fn complete(&self, system: &str, user: &str) -> NlpResult<String>;
}

/// Helper function to create an error for a missing API key
pub fn missing_api_key_error(provider: &str) -> NlpError {
    NlpError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to map HTTP error status codes onto the taxonomy
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> NlpError {
    match status {
        401 => NlpError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => NlpError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => NlpError::ModelNotFound {
            model: body.to_string(),
        },
        408 | 504 => NlpError::Timeout {
            message: format!("{}: HTTP {}: {}", provider, status, body),
        },
        429 => NlpError::RateLimited {
            message: body.to_string(),
        },
        400 => NlpError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => NlpError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => NlpError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_error() {
        let err = missing_api_key_error("huggingface");
        match err {
            NlpError::AuthenticationFailed { message } => {
                assert!(message.contains("huggingface"));
            }
            _ => panic!("Expected AuthenticationFailed"),
        }
    }

    #[test]
    fn test_parse_http_error() {
        let err = parse_http_error(401, "unauthorized", "openai");
        assert!(matches!(err, NlpError::AuthenticationFailed { .. }));

        let err = parse_http_error(404, "bart-large-mnli", "huggingface");
        assert!(matches!(err, NlpError::ModelNotFound { .. }));

        let err = parse_http_error(429, "rate limited", "openai");
        assert!(matches!(err, NlpError::RateLimited { .. }));

        let err = parse_http_error(504, "gateway timeout", "openai");
        assert!(matches!(err, NlpError::Timeout { .. }));

        let err = parse_http_error(500, "internal error", "openai");
        assert!(matches!(err, NlpError::ServerError { .. }));
    }
}
