//! NLP Capability Types
//!
//! Typed request/response shapes for the external classification and
//! extraction capabilities, plus the provider configuration and error set.
//!
//! The extraction shapes deliberately model every model-supplied field as
//! optional: the upstream payloads are best-effort, and the aggregator in
//! the application crate centralizes default-filling so that the rest of
//! the pipeline never sees a hole.

use serde::{Deserialize, Serialize};

use chrono::{DateTime, Utc};
use taskmind_core::UserContext;

/// Configuration for an NLP provider endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key, if the endpoint requires one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Model name to use
    pub model: String,
    /// Sampling temperature for completion-style endpoints
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_temperature() -> f32 {
    0.2
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: String::new(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Result of a zero-shot classification call: candidate labels ranked by
/// descending confidence, with their scores aligned by index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub labels: Vec<String>,
    #[serde(default)]
    pub scores: Vec<f64>,
}

impl Classification {
    /// The top-ranked label, if the capability returned any
    pub fn top_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }
}

/// Input to the extraction capability.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// The raw user text
    pub text: String,
    /// The caller's notion of "now", used for relative date resolution
    pub current_time: DateTime<Utc>,
    /// Optional historical context used to bias suggestions
    pub context: Option<UserContext>,
}

/// A model-suggested value for one field, with optional confidence and
/// rationale. Everything is optional; defaults are filled downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFieldGuess {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl RawFieldGuess {
    /// Whether the model supplied anything at all for this field
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.confidence.is_none() && self.reason.is_none()
    }
}

/// Structured output of one extraction call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionOutput {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: RawFieldGuess,
    #[serde(default)]
    pub duration: RawFieldGuess,
    #[serde(default)]
    pub priority: RawFieldGuess,
    #[serde(default)]
    pub category: RawFieldGuess,
    #[serde(default)]
    pub related_keywords: Vec<String>,
    #[serde(default)]
    pub overall_confidence: Option<f64>,
}

/// Error types for NLP capability calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NlpError {
    /// Authentication failed (invalid API key)
    AuthenticationFailed { message: String },
    /// Rate limit exceeded
    RateLimited { message: String },
    /// Model not found or not available
    ModelNotFound { model: String },
    /// Invalid request (bad parameters)
    InvalidRequest { message: String },
    /// Server error from the provider
    ServerError {
        message: String,
        status: Option<u16>,
    },
    /// Network/connection error
    NetworkError { message: String },
    /// The request exceeded the client timeout
    Timeout { message: String },
    /// Response could not be parsed
    ParseError { message: String },
    /// Response parsed but matched no known shape
    UnknownResponse,
    /// Other error
    Other { message: String },
}

impl std::fmt::Display for NlpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NlpError::AuthenticationFailed { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            NlpError::RateLimited { message } => {
                write!(f, "Rate limited: {}", message)
            }
            NlpError::ModelNotFound { model } => {
                write!(f, "Model not found: {}", model)
            }
            NlpError::InvalidRequest { message } => {
                write!(f, "Invalid request: {}", message)
            }
            NlpError::ServerError { message, status } => {
                if let Some(s) = status {
                    write!(f, "Server error ({}): {}", s, message)
                } else {
                    write!(f, "Server error: {}", message)
                }
            }
            NlpError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            NlpError::Timeout { message } => {
                write!(f, "Request timeout: {}", message)
            }
            NlpError::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            NlpError::UnknownResponse => {
                write!(f, "Unknown response type")
            }
            NlpError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for NlpError {}

impl NlpError {
    /// Map a reqwest transport error onto the taxonomy
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            NlpError::Timeout {
                message: err.to_string(),
            }
        } else {
            NlpError::NetworkError {
                message: err.to_string(),
            }
        }
    }
}

/// Result type for NLP operations
pub type NlpResult<T> = Result<T, NlpError>;
