//! Processing State Machine
//!
//! One `ProcessingState` exists per caller session. It tracks the current
//! pipeline step, the last submitted text (retained so a failed attempt can
//! be retried), and the retry counter. Retry bookkeeping lives here and
//! nowhere else.
//!
//! Transitions: `Idle → GatheringContext → Analyzing → Creating → Complete`
//! on the creation path. The search path returns directly from `Analyzing`
//! to `Idle` without passing `Complete`. Any failure in a non-idle step
//! drops back to `Idle` with the error message recorded and the retry
//! counter incremented.

use serde::{Deserialize, Serialize};

/// Maximum number of failed attempts for one logical submission. Once
/// reached, retry is disabled until a new distinct submission arrives.
pub const MAX_RETRIES: u8 = 3;

/// The pipeline step currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineStep {
    Idle,
    GatheringContext,
    Analyzing,
    Creating,
    Complete,
}

/// Per-session processing state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingState {
    pub step: PipelineStep,
    /// Message from the most recent failed attempt, cleared on submission
    pub error: Option<String>,
    /// The most recently submitted text, retained for retry
    pub last_text: Option<String>,
    /// Failed attempts for the current logical submission, 0..=3
    pub retry_count: u8,
}

impl ProcessingState {
    pub fn new() -> Self {
        Self {
            step: PipelineStep::Idle,
            error: None,
            last_text: None,
            retry_count: 0,
        }
    }

    /// Begin a submission. A text distinct from the previous one resets the
    /// retry counter; resubmitting the same text (a retry) keeps it.
    pub fn begin(&mut self, text: &str) {
        if self.last_text.as_deref() != Some(text) {
            self.retry_count = 0;
        }
        self.last_text = Some(text.to_string());
        self.error = None;
        self.step = PipelineStep::GatheringContext;
    }

    /// Begin a retry of the last submission without resetting the counter.
    ///
    /// Returns the retained text, or None when there is nothing to retry or
    /// the retry budget is exhausted.
    pub fn begin_retry(&mut self) -> Option<String> {
        if !self.can_retry() {
            return None;
        }
        let text = self.last_text.clone()?;
        self.error = None;
        self.step = PipelineStep::GatheringContext;
        Some(text)
    }

    /// Move forward to the given step
    pub fn advance(&mut self, step: PipelineStep) {
        self.step = step;
    }

    /// Record a failed attempt: back to idle, error set, counter bumped.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.step = PipelineStep::Idle;
        self.error = Some(message.into());
        if self.retry_count < MAX_RETRIES {
            self.retry_count += 1;
        }
    }

    /// Creation path finished successfully. Held briefly at `Complete`
    /// until the caller resets for a new submission.
    pub fn finish(&mut self) {
        self.step = PipelineStep::Complete;
        self.error = None;
    }

    /// Return to idle. Used by the caller after `Complete`, and by the
    /// search path which never passes through `Complete`.
    pub fn reset(&mut self) {
        self.step = PipelineStep::Idle;
        self.error = None;
    }

    /// Whether a retry of the last submission is still allowed
    pub fn can_retry(&self) -> bool {
        self.retry_count < MAX_RETRIES && self.last_text.is_some()
    }

    /// Whether the session is accepting a new submission
    pub fn is_settled(&self) -> bool {
        matches!(self.step, PipelineStep::Idle | PipelineStep::Complete)
    }
}

impl Default for ProcessingState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ProcessingState::new();
        assert_eq!(state.step, PipelineStep::Idle);
        assert!(state.error.is_none());
        assert_eq!(state.retry_count, 0);
        assert!(!state.can_retry());
        assert!(state.is_settled());
    }

    #[test]
    fn test_begin_enters_gathering_context() {
        let mut state = ProcessingState::new();
        state.begin("buy milk tomorrow");
        assert_eq!(state.step, PipelineStep::GatheringContext);
        assert_eq!(state.last_text.as_deref(), Some("buy milk tomorrow"));
        assert!(!state.is_settled());
    }

    #[test]
    fn test_fail_returns_to_idle_and_counts() {
        let mut state = ProcessingState::new();
        state.begin("text");
        state.advance(PipelineStep::Analyzing);
        state.fail("network error");
        assert_eq!(state.step, PipelineStep::Idle);
        assert_eq!(state.error.as_deref(), Some("network error"));
        assert_eq!(state.retry_count, 1);
        assert!(state.can_retry());
    }

    #[test]
    fn test_retry_budget_exhausted_after_three_failures() {
        let mut state = ProcessingState::new();
        state.begin("text");
        for _ in 0..3 {
            state.fail("boom");
            if state.can_retry() {
                assert!(state.begin_retry().is_some());
            }
        }
        assert_eq!(state.retry_count, 3);
        assert!(!state.can_retry());
        assert!(state.begin_retry().is_none());
    }

    #[test]
    fn test_distinct_submission_resets_counter() {
        let mut state = ProcessingState::new();
        state.begin("first");
        state.fail("boom");
        state.fail("boom again");
        assert_eq!(state.retry_count, 2);

        // Resubmitting the same text keeps the count
        state.begin("first");
        assert_eq!(state.retry_count, 2);

        // A new distinct submission resets it
        state.begin("second");
        assert_eq!(state.retry_count, 0);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_finish_and_reset() {
        let mut state = ProcessingState::new();
        state.begin("text");
        state.advance(PipelineStep::Creating);
        state.finish();
        assert_eq!(state.step, PipelineStep::Complete);
        assert!(state.is_settled());
        state.reset();
        assert_eq!(state.step, PipelineStep::Idle);
    }

    #[test]
    fn test_step_serialization_kebab_case() {
        assert_eq!(
            serde_json::to_string(&PipelineStep::GatheringContext).unwrap(),
            "\"gathering-context\""
        );
        assert_eq!(
            serde_json::to_string(&PipelineStep::Analyzing).unwrap(),
            "\"analyzing\""
        );
    }
}
