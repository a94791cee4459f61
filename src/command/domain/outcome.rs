//! Typed success outcomes of command dispatch.

use super::Intent;
use crate::task::domain::{Task, TaskState};

/// Successful result of dispatching a command.
///
/// Each variant carries the records a caller needs to render a response;
/// the user-facing message texts live in the report rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A task was created in the not-started state.
    Created {
        /// The newly persisted task.
        task: Task,
    },

    /// A task moved to a new lifecycle state.
    Transitioned {
        /// The task after the transition.
        task: Task,
        /// State the task held before the transition.
        previous_state: TaskState,
    },

    /// The task was already in the requested state; nothing was written.
    AlreadyInState {
        /// The unchanged task.
        task: Task,
    },

    /// A task was deleted.
    Deleted {
        /// The removed record.
        task: Task,
    },

    /// A task was fetched by identifier.
    Retrieved {
        /// The fetched task.
        task: Task,
    },

    /// Tasks were listed, optionally filtered by state.
    Listing {
        /// Matching tasks, newest-first.
        tasks: Vec<Task>,
        /// The state filter applied, if any.
        filter: Option<TaskState>,
    },

    /// The command did not map to an operation.
    ///
    /// This is a non-error outcome: out-of-domain text and interpreter
    /// failures both land here so callers always receive a well-formed
    /// response. `reason` is set when interpretation itself failed.
    NotUnderstood {
        /// The intent as interpreted, echoed for transparency.
        intent: Intent,
        /// Description of the interpreter failure, when there was one.
        reason: Option<String>,
    },
}
