//! Field Extractor
//!
//! Invokes the external extraction capability and derives the concrete
//! task fields, filling the documented defaults wherever the capability
//! left a hole: first sentence as summary, a one-week due-date horizon,
//! urgency-marker priority, "General" category, and the context's typical
//! duration.

use chrono::{DateTime, Duration, Utc};

use taskmind_core::{PipelineError, PipelineResult, Priority, UserContext};
use taskmind_nlp::{ExtractionOutput, ExtractionRequest, NlpError, TaskExtractor};

/// Default due-date horizon when the capability supplies none
const DEFAULT_DUE_HORIZON_DAYS: i64 = 7;

/// Substrings that force the High priority default
const URGENCY_MARKERS: [&str; 2] = ["urgent", "high priority"];

/// Concrete field values for the task about to be created, alongside the
/// raw capability output the aggregator reads confidences from.
#[derive(Debug, Clone)]
pub struct ExtractedFields {
    pub summary: String,
    pub description: Option<String>,
    pub due_date: String,
    pub estimated_duration: String,
    pub priority: Priority,
    pub category: String,
    pub raw: ExtractionOutput,
}

/// Run the extraction capability and derive the concrete fields.
pub async fn extract_fields(
    extractor: &dyn TaskExtractor,
    text: &str,
    now: DateTime<Utc>,
    context: Option<&UserContext>,
) -> PipelineResult<ExtractedFields> {
    let request = ExtractionRequest {
        text: text.to_string(),
        current_time: now,
        context: context.cloned(),
    };

    let raw = extractor.extract(request).await.map_err(|e| match e {
        NlpError::UnknownResponse => PipelineError::UnknownResponse,
        other => PipelineError::extraction(other.to_string()),
    })?;

    Ok(derive_fields(text, now, context, raw))
}

/// Pure derivation step, split out for tests.
pub fn derive_fields(
    text: &str,
    now: DateTime<Utc>,
    context: Option<&UserContext>,
    raw: ExtractionOutput,
) -> ExtractedFields {
    let summary = raw
        .summary
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| first_sentence(text));

    let due_date = raw
        .due_date
        .value
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| (now + Duration::days(DEFAULT_DUE_HORIZON_DAYS)).to_rfc3339());

    let estimated_duration = raw
        .duration
        .value
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| {
            context
                .map(|c| c.average_duration.clone())
                .unwrap_or_else(|| "1h".to_string())
        });

    let priority = raw
        .priority
        .value
        .as_deref()
        .and_then(Priority::from_label)
        .unwrap_or_else(|| default_priority(text));

    let category = raw
        .category
        .value
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "General".to_string());

    ExtractedFields {
        summary,
        description: raw.description.clone(),
        due_date,
        estimated_duration,
        priority,
        category,
        raw,
    }
}

/// High when the text carries an urgency marker, else Medium.
fn default_priority(text: &str) -> Priority {
    let lowered = text.to_lowercase();
    if URGENCY_MARKERS.iter().any(|m| lowered.contains(m)) {
        Priority::High
    } else {
        Priority::Medium
    }
}

/// First sentence of the input, used as the summary fallback.
fn first_sentence(text: &str) -> String {
    let trimmed = text.trim();
    trimmed
        .split_inclusive(['.', '!', '?'])
        .next()
        .map(|s| s.trim_end_matches(['.', '!', '?']).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| trimmed.to_string())
}
