//! Service layer for resolving user-supplied task names to stored records.

use crate::task::{
    domain::{Task, TaskId, TaskState},
    ports::{TaskRepository, TaskRepositoryError},
};
use serde::Serialize;
use std::sync::Arc;

/// Summary of one candidate record in an ambiguous resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCandidate {
    /// Candidate task identifier.
    pub id: TaskId,
    /// Candidate task name.
    pub name: String,
    /// Candidate lifecycle state.
    pub state: TaskState,
}

impl TaskCandidate {
    /// Builds a candidate summary from a task record.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id(),
            name: task.name().as_str().to_owned(),
            state: task.state(),
        }
    }
}

/// Outcome of resolving a name reference against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameResolution {
    /// Exactly one record matched.
    Resolved(Task),
    /// No record matched either phase.
    NotFound,
    /// More than one record matched; candidates are in match order.
    Ambiguous(Vec<TaskCandidate>),
}

/// Resolves fuzzy task name references to exactly one stored record.
///
/// Resolution runs two phases in order and stops at the first that yields
/// candidates: a case-insensitive whole-string match, then a
/// case-insensitive substring match over all records newest-first. A phase
/// yielding several candidates reports them rather than guessing; names
/// are not unique, so even whole-string matches can be ambiguous. Ties
/// within a phase are ordered by recency alone.
#[derive(Clone)]
pub struct TaskNameResolver<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> TaskNameResolver<R>
where
    R: TaskRepository,
{
    /// Creates a new resolver over the given repository.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolves `query` to at most one task.
    ///
    /// The query is trimmed before matching. An empty query resolves to
    /// [`NameResolution::NotFound`] without touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError`] when a lookup fails.
    pub async fn resolve(&self, query: &str) -> Result<NameResolution, TaskRepositoryError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(NameResolution::NotFound);
        }

        let exact = self.repository.find_by_name_exact(trimmed).await?;
        if !exact.is_empty() {
            return Ok(to_resolution(exact));
        }

        let partial = self.repository.find_by_name_fragment(trimmed).await?;
        Ok(to_resolution(partial))
    }
}

/// Maps a candidate list onto the resolution triad.
fn to_resolution(mut matches: Vec<Task>) -> NameResolution {
    if matches.len() > 1 {
        return NameResolution::Ambiguous(matches.iter().map(TaskCandidate::from_task).collect());
    }
    matches
        .pop()
        .map_or(NameResolution::NotFound, NameResolution::Resolved)
}
