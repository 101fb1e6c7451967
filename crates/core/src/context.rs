//! User Context Snapshot
//!
//! Ephemeral snapshot of a user's historical task patterns, rebuilt from a
//! live read of the task history at the start of each pipeline invocation
//! and discarded when the request completes. Never persisted.

use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task};

/// Snapshot of the user's recent tasks and frequency statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    /// Most-recent-first window of the user's tasks, at most 20
    pub recent_tasks: Vec<Task>,
    /// Top 5 categories by occurrence count, first-seen order breaks ties
    pub common_categories: Vec<String>,
    /// Single highest-frequency priority, Medium when there is no history
    pub most_used_priority: Priority,
    /// Coarse duration bucket: "2h" if any historical duration exists,
    /// else "1h". Not a true average; kept as observed product behavior.
    pub average_duration: String,
}

impl UserContext {
    /// Whether the snapshot carries any history at all
    pub fn is_empty(&self) -> bool {
        self.recent_tasks.is_empty()
    }
}

impl Default for UserContext {
    fn default() -> Self {
        Self {
            recent_tasks: Vec::new(),
            common_categories: Vec::new(),
            most_used_priority: Priority::Medium,
            average_duration: "1h".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let ctx = UserContext::default();
        assert!(ctx.is_empty());
        assert_eq!(ctx.most_used_priority, Priority::Medium);
        assert_eq!(ctx.average_duration, "1h");
        assert!(ctx.common_categories.is_empty());
    }
}
