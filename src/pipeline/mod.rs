//! Natural-Language Task-Intent Pipeline
//!
//! The decision core of Taskmind: frequency analysis over task history,
//! user-context construction, intent classification, field extraction with
//! default derivation, confidence aggregation, and the orchestrating state
//! machine.

pub mod aggregator;
pub mod context;
pub mod extractor;
pub mod frequency;
pub mod intent;
pub mod orchestrator;

pub use context::{build_user_context, RECENT_TASK_LIMIT};
pub use extractor::{extract_fields, ExtractedFields};
pub use frequency::{analyze, FrequencyProfile, TOP_CATEGORIES};
pub use intent::{is_search_intent, CREATE_LABEL, SEARCH_LABEL};
pub use orchestrator::{IntentPipeline, PipelineOutcome};
