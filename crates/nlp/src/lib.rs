//! Taskmind NLP
//!
//! Provides the external-capability seam for the intent pipeline:
//! - zero-shot intent classification (Hugging Face inference API)
//! - structured task-field extraction (OpenAI-compatible chat completions)
//! - chat-style completion for bot-side conversational replies
//!
//! The traits in `capability` are what the pipeline depends on; the HTTP
//! providers here are the production implementations.

pub mod capability;
pub mod http_client;
pub mod openai;
pub mod types;
pub mod zero_shot;

// Re-export main types
pub use capability::{
    missing_api_key_error, parse_http_error, ChatCompletion, TaskExtractor, TextClassifier,
};
pub use http_client::build_http_client;
pub use openai::OpenAiExtractor;
pub use types::{
    Classification, ExtractionOutput, ExtractionRequest, NlpError, NlpResult, ProviderConfig,
    RawFieldGuess,
};
pub use zero_shot::HfZeroShotClassifier;
