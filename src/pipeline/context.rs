//! User Context Builder
//!
//! Fetches a bounded window of the user's most recent tasks and derives
//! the frequency statistics that bias extraction. A storage failure here
//! must never abort the pipeline: the builder degrades to the empty
//! default context and logs a warning.

use taskmind_core::{TaskStore, UserContext};

use super::frequency;

/// Size of the recent-task window read from storage
pub const RECENT_TASK_LIMIT: usize = 20;

/// Build the user context for one pipeline invocation.
pub async fn build_user_context(store: &dyn TaskStore, owner: &str) -> UserContext {
    let recent = match store.recent(owner, RECENT_TASK_LIMIT).await {
        Ok(tasks) => tasks,
        Err(err) => {
            tracing::warn!(
                owner,
                error = %err,
                "context gathering degraded to empty default"
            );
            return UserContext::default();
        }
    };

    let profile = frequency::analyze(&recent);
    UserContext {
        recent_tasks: recent,
        common_categories: profile.common_categories,
        most_used_priority: profile.most_used_priority,
        average_duration: profile.average_duration,
    }
}
