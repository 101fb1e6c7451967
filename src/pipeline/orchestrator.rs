//! Pipeline Orchestrator
//!
//! Sequences context gathering, intent classification, and the search or
//! creation branch, driving the per-session `ProcessingState`. One
//! orchestrator exists per caller session; `&mut self` on the entry points
//! enforces at most one invocation in flight.
//!
//! Failure handling: context gathering never fails the pipeline (it
//! degrades to the empty context inside the builder); classification,
//! extraction, and store failures are fatal for the attempt, recorded in
//! the state, and counted against the retry budget.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use taskmind_core::{
    AnalysisResult, PipelineError, PipelineResult, PipelineStep, ProcessingState, Status, Task,
    TaskDraft, TaskStore,
};
use taskmind_nlp::{TaskExtractor, TextClassifier};

use super::aggregator;
use super::context::build_user_context;
use super::extractor::extract_fields;
use super::intent::is_search_intent;

/// Typed outcome of one successful pipeline invocation.
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    /// The input was a search query; the state machine returned to idle
    /// without passing through the creation steps.
    Search { results: Vec<Task> },
    /// A task was created and persisted. Every suggestion value in the
    /// analysis equals the corresponding field on the task.
    Create {
        task: Task,
        analysis: AnalysisResult,
    },
}

/// Per-session intent pipeline.
pub struct IntentPipeline {
    classifier: Arc<dyn TextClassifier>,
    extractor: Arc<dyn TaskExtractor>,
    store: Arc<dyn TaskStore>,
    state: ProcessingState,
}

impl IntentPipeline {
    pub fn new(
        classifier: Arc<dyn TextClassifier>,
        extractor: Arc<dyn TaskExtractor>,
        store: Arc<dyn TaskStore>,
    ) -> Self {
        Self {
            classifier,
            extractor,
            store,
            state: ProcessingState::new(),
        }
    }

    /// Current processing state, for display and for the caller's
    /// resubmission gating.
    pub fn state(&self) -> &ProcessingState {
        &self.state
    }

    /// Acknowledge a `Complete` state and return to idle for the next
    /// submission.
    pub fn acknowledge(&mut self) {
        self.state.reset();
    }

    /// Process a new submission.
    ///
    /// A blank owner or blank text is rejected up front without touching
    /// the state machine, so neither consumes retry budget. Resubmitting
    /// the text of the last submission is a retry and honors the same
    /// budget as `retry()`.
    pub async fn process(
        &mut self,
        owner: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> PipelineResult<PipelineOutcome> {
        if owner.trim().is_empty() {
            return Err(PipelineError::Unauthenticated);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(PipelineError::invalid("submission text is empty"));
        }
        if self.state.last_text.as_deref() == Some(text) && !self.state.can_retry() {
            return Err(PipelineError::invalid(
                "retry is not available for this submission",
            ));
        }

        self.state.begin(text);
        let text = text.to_string();
        self.run_attempt(owner, &text, now).await
    }

    /// Retry the last failed submission. Re-runs the full pipeline from
    /// context gathering; never attempts a fourth retry.
    pub async fn retry(
        &mut self,
        owner: &str,
        now: DateTime<Utc>,
    ) -> PipelineResult<PipelineOutcome> {
        if owner.trim().is_empty() {
            return Err(PipelineError::Unauthenticated);
        }
        let text = self.state.begin_retry().ok_or_else(|| {
            PipelineError::invalid("retry is not available for this submission")
        })?;
        self.run_attempt(owner, &text, now).await
    }

    async fn run_attempt(
        &mut self,
        owner: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> PipelineResult<PipelineOutcome> {
        match self.attempt(owner, text, now).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                tracing::error!(owner, error = %err, "pipeline attempt failed");
                self.state.fail(err.to_string());
                Err(err)
            }
        }
    }

    /// One full pass: context → classify → (search | extract → aggregate
    /// → persist). Steps execute strictly in this order.
    async fn attempt(
        &mut self,
        owner: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> PipelineResult<PipelineOutcome> {
        tracing::debug!(owner, "gathering user context");
        let context = build_user_context(self.store.as_ref(), owner).await;

        self.state.advance(PipelineStep::Analyzing);
        let search = is_search_intent(self.classifier.as_ref(), text).await?;

        if search {
            tracing::debug!(owner, "running search branch");
            let results = self
                .store
                .search(owner, text)
                .await
                .map_err(|e| PipelineError::persistence(e.to_string()))?;
            // Search is fire and forget: back to idle, never Complete.
            self.state.reset();
            return Ok(PipelineOutcome::Search { results });
        }

        tracing::debug!(owner, "running creation branch");
        self.state.advance(PipelineStep::Creating);
        let fields = extract_fields(self.extractor.as_ref(), text, now, Some(&context)).await?;
        let analysis = aggregator::aggregate(&fields, &context);

        let draft = TaskDraft {
            summary: fields.summary.clone(),
            description: fields.description.clone(),
            due_date: fields.due_date.clone(),
            estimated_duration: fields.estimated_duration.clone(),
            priority: fields.priority,
            status: Status::default(),
            category: fields.category.clone(),
            external_links: Vec::new(),
            folder_id: None,
        };

        let task = self
            .store
            .insert(owner, draft)
            .await
            .map_err(|e| PipelineError::persistence(e.to_string()))?;

        self.state.finish();
        tracing::debug!(owner, task_id = %task.id, "task created");
        Ok(PipelineOutcome::Create { task, analysis })
    }
}
