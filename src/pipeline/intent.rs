//! Intent Classification Glue
//!
//! Thin wrapper over the external zero-shot classification capability. The
//! two candidate labels are fixed; the pipeline only needs the boolean
//! search/create decision. Capability errors are fatal for the attempt —
//! there is deliberately no keyword fallback here, the `TextClassifier`
//! trait is the extension point for one.

use taskmind_core::{PipelineError, PipelineResult};
use taskmind_nlp::TextClassifier;

/// Candidate label for the search branch
pub const SEARCH_LABEL: &str = "search query";
/// Candidate label for the creation branch
pub const CREATE_LABEL: &str = "task creation";

/// Classify the input text. Returns true for a search intent.
pub async fn is_search_intent(
    classifier: &dyn TextClassifier,
    text: &str,
) -> PipelineResult<bool> {
    let labels = vec![SEARCH_LABEL.to_string(), CREATE_LABEL.to_string()];
    let classification = classifier
        .classify(text, &labels)
        .await
        .map_err(|e| PipelineError::classification(e.to_string()))?;

    Ok(classification.top_label() == Some(SEARCH_LABEL))
}
