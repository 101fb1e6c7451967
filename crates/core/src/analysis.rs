//! Analysis Result Types
//!
//! The confidence-scored breakdown returned alongside a created task.
//! Ephemeral and display-only; never persisted. Invariant: every
//! suggestion's `value` equals the field actually written to the task —
//! the analysis describes the decision just made, not a separate
//! recommendation.

use serde::{Deserialize, Serialize};

/// A single suggested field value with its confidence and rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSuggestion {
    /// The value written to the created task
    pub value: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Human-readable rationale for display
    pub reason: String,
}

impl FieldSuggestion {
    pub fn new(
        value: impl Into<String>,
        confidence: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            confidence: confidence.clamp(0.0, 1.0),
            reason: reason.into(),
        }
    }
}

/// The four tracked field suggestions. All present, always: the aggregator
/// substitutes documented defaults when the capability omitted a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub category: FieldSuggestion,
    pub priority: FieldSuggestion,
    pub due_date: FieldSuggestion,
    pub duration: FieldSuggestion,
}

/// Subset of the `UserContext` surfaced to the caller for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    /// Summaries of up to 3 historical tasks similar to the new one
    pub similar_tasks: Vec<String>,
    /// Common-category list from the user context
    pub common_categories: Vec<String>,
    /// Duration bucket from the user context
    pub average_duration: String,
    /// Display label of the user's most used priority
    pub priority_trend: String,
}

/// The full analysis returned on the creation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall confidence in [0, 1]
    pub overall_confidence: f64,
    /// Order-preserving, deduplicated keyword set
    pub related_keywords: Vec<String>,
    pub suggestions: Suggestions,
    pub context_used: ContextSnapshot,
}
