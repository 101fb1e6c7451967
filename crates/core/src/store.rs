//! Task Store Trait
//!
//! The seam between the pipeline and whatever backs task persistence.
//! Every operation is scoped by the owning user identifier, passed
//! explicitly by the caller — core logic never fetches an ambient session.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::task::{Task, TaskDraft, TaskPatch};

/// Owner-scoped task persistence.
///
/// Implementations must guarantee that no operation reads or mutates rows
/// belonging to a different owner.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a draft and return the stored task with its assigned id.
    async fn insert(&self, owner: &str, draft: TaskDraft) -> StoreResult<Task>;

    /// Apply a partial update to an existing task.
    async fn update(&self, owner: &str, id: &str, patch: TaskPatch) -> StoreResult<Task>;

    /// Delete a task.
    async fn delete(&self, owner: &str, id: &str) -> StoreResult<()>;

    /// The owner's most recently created tasks, most-recent-first,
    /// truncated to `limit`.
    async fn recent(&self, owner: &str, limit: usize) -> StoreResult<Vec<Task>>;

    /// Full-text search over the owner's tasks.
    async fn search(&self, owner: &str, text: &str) -> StoreResult<Vec<Task>>;
}
