//! Repository port for task persistence and lookup.

use crate::task::domain::{Task, TaskId, TaskState};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Listing and name-lookup operations return tasks newest-first (descending
/// creation time); the resolver and listing surfaces rely on that order.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (state, timestamps).
    ///
    /// The write replaces the whole record without a version check;
    /// concurrent updates of the same task resolve last-writer-wins.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns tasks, optionally restricted to one lifecycle state,
    /// newest-first.
    async fn find_all(&self, state: Option<TaskState>) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks whose name equals `name` ignoring letter case,
    /// newest-first.
    ///
    /// Names are not unique, so more than one task may match.
    async fn find_by_name_exact(&self, name: &str) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks whose name contains `fragment` ignoring letter case,
    /// newest-first.
    async fn find_by_name_fragment(&self, fragment: &str) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task by identifier, returning the removed record.
    ///
    /// Returns `None` when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
