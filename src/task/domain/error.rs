//! Error types for task domain validation and parsing.

use super::{TaskId, TaskState};
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The task name exceeds the persisted maximum length.
    #[error("task name must be at most {max} characters, got {actual}")]
    TaskNameTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Length of the rejected value.
        actual: usize,
    },
}

/// Error returned while parsing task states from untrusted text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);

/// Error returned when a lifecycle transition is not permitted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid state transition for task {task_id}: {from} -> {to}")]
pub struct InvalidTransitionError {
    /// Identifier of the task whose transition was denied.
    pub task_id: TaskId,
    /// State the task currently holds.
    pub from: TaskState,
    /// State the transition requested.
    pub to: TaskState,
}
