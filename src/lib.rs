//! Taskmind - Natural-Language Task-Intent Pipeline
//!
//! Takes free-form user text, classifies it as a search query or a
//! task-creation request, extracts structured task fields via external
//! NLP capabilities biased by the user's task history, and either runs an
//! owner-scoped search or creates a confidence-scored task.
//!
//! - `pipeline` - the decision core (context, classification, extraction,
//!   aggregation, orchestration)
//! - `storage` - SQLite task store and chat-identity links
//! - `channels` - bot surfaces that feed text into the pipeline
//! - `config` - TOML + environment configuration
//! - `error` - application-wide error type

pub mod channels;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod storage;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use pipeline::{IntentPipeline, PipelineOutcome};
pub use storage::Database;
