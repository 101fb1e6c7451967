//! Taskmind Core
//!
//! Foundational types for the Taskmind workspace: the task domain model,
//! the pipeline error taxonomy, the per-session processing state machine,
//! and the task store trait. This crate has zero dependencies on
//! application-level code (HTTP providers, SQLite, channels).
//!
//! ## Module Organization
//!
//! - `error` - Pipeline and store error types (`PipelineError`, `StoreError`)
//! - `task` - Task entity, draft, patch, and the priority/status enums
//! - `context` - Ephemeral `UserContext` snapshot
//! - `analysis` - Confidence-scored `AnalysisResult` shapes
//! - `state` - `ProcessingState` machine with the retry budget
//! - `store` - Owner-scoped `TaskStore` trait

pub mod analysis;
pub mod context;
pub mod error;
pub mod state;
pub mod store;
pub mod task;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{PipelineError, PipelineResult, StoreError, StoreResult};

// ── Task Domain ────────────────────────────────────────────────────────
pub use task::{Priority, Status, Task, TaskDraft, TaskPatch};

// ── User Context ───────────────────────────────────────────────────────
pub use context::UserContext;

// ── Analysis Shapes ────────────────────────────────────────────────────
pub use analysis::{AnalysisResult, ContextSnapshot, FieldSuggestion, Suggestions};

// ── Processing State ───────────────────────────────────────────────────
pub use state::{PipelineStep, ProcessingState, MAX_RETRIES};

// ── Store Trait ────────────────────────────────────────────────────────
pub use store::TaskStore;
