//! Confidence Aggregator
//!
//! Pure transformation from the extractor's output and the user context
//! into the `AnalysisResult` returned to the caller. Guarantees every one
//! of the four tracked fields carries a value/confidence/reason triple,
//! substituting conservative defaults when the capability omitted them.
//! Calling it twice on identical input yields an identical result.

use taskmind_core::{
    AnalysisResult, ContextSnapshot, FieldSuggestion, Suggestions, UserContext,
};
use taskmind_nlp::RawFieldGuess;

use super::extractor::ExtractedFields;

/// Default confidence for category and priority suggestions
const DEFAULT_LABEL_CONFIDENCE: f64 = 0.7;
/// Default confidence for due-date and duration suggestions
const DEFAULT_TEMPORAL_CONFIDENCE: f64 = 0.6;
/// Default overall confidence when the capability supplied none
const DEFAULT_OVERALL_CONFIDENCE: f64 = 0.8;

/// How many similar tasks the context snapshot surfaces
const SIMILAR_TASK_LIMIT: usize = 3;

/// Build the analysis for a creation decision.
pub fn aggregate(fields: &ExtractedFields, context: &UserContext) -> AnalysisResult {
    let suggestions = Suggestions {
        category: suggestion(
            &fields.category,
            &fields.raw.category,
            DEFAULT_LABEL_CONFIDENCE,
            "Default category",
        ),
        priority: suggestion(
            fields.priority.as_str(),
            &fields.raw.priority,
            DEFAULT_LABEL_CONFIDENCE,
            "Derived from the submitted text",
        ),
        due_date: suggestion(
            &fields.due_date,
            &fields.raw.due_date,
            DEFAULT_TEMPORAL_CONFIDENCE,
            "One week from submission",
        ),
        duration: suggestion(
            &fields.estimated_duration,
            &fields.raw.duration,
            DEFAULT_TEMPORAL_CONFIDENCE,
            "Based on your typical task duration",
        ),
    };

    AnalysisResult {
        overall_confidence: fields
            .raw
            .overall_confidence
            .unwrap_or(DEFAULT_OVERALL_CONFIDENCE)
            .clamp(0.0, 1.0),
        related_keywords: dedup_preserving_order(&fields.raw.related_keywords),
        suggestions,
        context_used: snapshot(fields, context),
    }
}

/// One suggestion triple. The value is always the field actually written;
/// confidence and reason fall back to the documented defaults.
fn suggestion(
    value: &str,
    raw: &RawFieldGuess,
    default_confidence: f64,
    default_reason: &str,
) -> FieldSuggestion {
    FieldSuggestion::new(
        value,
        raw.confidence.unwrap_or(default_confidence),
        raw.reason.clone().unwrap_or_else(|| default_reason.to_string()),
    )
}

fn snapshot(fields: &ExtractedFields, context: &UserContext) -> ContextSnapshot {
    let similar_tasks = context
        .recent_tasks
        .iter()
        .filter(|t| t.category == fields.category)
        .take(SIMILAR_TASK_LIMIT)
        .map(|t| t.summary.clone())
        .collect();

    ContextSnapshot {
        similar_tasks,
        common_categories: context.common_categories.clone(),
        average_duration: context.average_duration.clone(),
        priority_trend: context.most_used_priority.to_string(),
    }
}

fn dedup_preserving_order(keywords: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for keyword in keywords {
        if !seen.contains(keyword) {
            seen.push(keyword.clone());
        }
    }
    seen
}
