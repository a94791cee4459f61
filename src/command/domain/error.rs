//! Error taxonomy for command dispatch.

use crate::task::domain::TaskState;
use crate::task::ports::TaskRepositoryError;
use crate::task::services::TaskCandidate;
use thiserror::Error;

/// Errors produced while dispatching a command.
///
/// Every variant carries structured fields; callers discriminate on the
/// variant (or on [`CommandError::category`]), never on message text. The
/// `Display` strings are the user-facing messages rendered into reports.
#[derive(Debug, Clone, Error)]
pub enum CommandError {
    /// A required field was absent or a field value failed validation.
    #[error("{reason}")]
    Validation {
        /// Intent field the failure concerns, in wire-format spelling.
        field: &'static str,
        /// User-facing description of the failure.
        reason: String,
    },

    /// No task matched the name reference.
    #[error("No task found matching \"{search_text}\"")]
    NotFound {
        /// The name reference that failed to resolve.
        search_text: String,
    },

    /// Several tasks matched the name reference.
    #[error("Found {} tasks matching \"{search_text}\"", .candidates.len())]
    Ambiguous {
        /// The name reference that matched more than once.
        search_text: String,
        /// Matching records in match order.
        candidates: Vec<TaskCandidate>,
    },

    /// The lifecycle table denied the requested transition.
    #[error(
        "Invalid state transition: Cannot move from \"{current}\" to \"{requested}\". \
         Valid next state(s) from \"{current}\": {}",
        format_allowed(.allowed)
    )]
    InvalidTransition {
        /// State the task currently holds.
        current: TaskState,
        /// State the command requested.
        requested: TaskState,
        /// States the table permits from `current`, excluding `current`.
        allowed: &'static [TaskState],
    },

    /// The task store failed.
    #[error("storage failure: {0}")]
    Repository(#[from] TaskRepositoryError),
}

/// Coarse classification of command errors.
///
/// A transport maps categories to response classes: validation, ambiguity,
/// and denied transitions are caller mistakes (400-class), missing tasks
/// are 404-class, and internal faults are 500-class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Absent or invalid field values.
    Validation,
    /// The name reference resolved to nothing.
    NotFound,
    /// The name reference resolved to several records.
    Ambiguous,
    /// The lifecycle table denied the move.
    InvalidTransition,
    /// Store or infrastructure fault.
    Internal,
}

impl CommandError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Ambiguous { .. } => ErrorCategory::Ambiguous,
            Self::InvalidTransition { .. } => ErrorCategory::InvalidTransition,
            Self::Repository(_) => ErrorCategory::Internal,
        }
    }
}

/// Formats an allowed-targets slice for the invalid-transition message.
fn format_allowed(states: &[TaskState]) -> String {
    if states.is_empty() {
        return "None (task is completed)".to_owned();
    }
    states
        .iter()
        .map(|state| state.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
