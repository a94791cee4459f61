//! Uniform report envelope rendered from dispatch results.

use super::{CommandError, CommandOutcome, Intent};
use crate::task::domain::Task;
use crate::task::services::TaskCandidate;
use serde::Serialize;

/// Suggestion attached when a name reference resolves to nothing.
const SUGGEST_CHECK_NAME: &str = "Check the task name and try again";

/// Suggestion attached when a name reference resolves to several records.
const SUGGEST_BE_SPECIFIC: &str = "Please be more specific with the task name";

/// Suggestion attached when a command maps to no operation.
const SUGGEST_EXAMPLES: &str = "Try commands like: \"Create a task\", \"Mark [task] as done\", \
                                \"Show completed tasks\", \"Delete [task]\"";

/// Task payload carried by a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReportData {
    /// A single task record.
    Task(Task),
    /// A list of task records.
    Tasks(Vec<Task>),
}

/// Uniform response envelope for command dispatch.
///
/// Every dispatch terminates in one of these, success or not, so callers
/// and transports handle a single shape. Optional fields are omitted from
/// serialized output when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandReport {
    /// Whether the command took effect.
    pub success: bool,
    /// User-facing description of what happened.
    pub message: String,
    /// Task record(s) involved, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ReportData>,
    /// Number of records in a listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Candidate records of an ambiguous name reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<TaskCandidate>>,
    /// Guidance on how to make the command succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// The interpreted intent, echoed for transparency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

impl CommandReport {
    /// Renders a success outcome.
    #[must_use]
    pub fn from_outcome(outcome: CommandOutcome) -> Self {
        match outcome {
            CommandOutcome::Created { task } => Self::success(
                format!("Task \"{}\" created successfully", task.name()),
                task,
            ),
            CommandOutcome::Transitioned {
                task,
                previous_state,
            } => Self::success(
                format!(
                    "Task state updated from \"{previous_state}\" to \"{}\"",
                    task.state()
                ),
                task,
            ),
            CommandOutcome::AlreadyInState { task } => Self::success(
                format!("Task is already in state: {}", task.state()),
                task,
            ),
            CommandOutcome::Deleted { task } => Self::success(
                format!("Task \"{}\" deleted successfully", task.name()),
                task,
            ),
            CommandOutcome::Retrieved { task } => Self::success("Task retrieved".to_owned(), task),
            CommandOutcome::Listing { tasks, filter } => {
                let message = filter.map_or_else(
                    || "All tasks retrieved".to_owned(),
                    |state| format!("Tasks filtered by state: {state}"),
                );
                Self {
                    success: true,
                    message,
                    count: Some(tasks.len()),
                    data: Some(ReportData::Tasks(tasks)),
                    matches: None,
                    suggestion: None,
                    intent: None,
                }
            }
            CommandOutcome::NotUnderstood { intent, reason } => {
                let (message, suggestion) = reason.map_or_else(
                    || {
                        (
                            "Could not determine what you want to do".to_owned(),
                            Some(SUGGEST_EXAMPLES.to_owned()),
                        )
                    },
                    |_| ("Could not understand the command".to_owned(), None),
                );
                Self {
                    success: false,
                    message,
                    data: None,
                    count: None,
                    matches: None,
                    suggestion,
                    intent: Some(intent),
                }
            }
        }
    }

    /// Renders an error.
    ///
    /// Store faults render with a generic message; internal detail never
    /// reaches the caller.
    #[must_use]
    pub fn from_error(error: CommandError) -> Self {
        let message = match &error {
            CommandError::Repository(_) => "An unexpected error occurred".to_owned(),
            other => other.to_string(),
        };
        let mut report = Self {
            success: false,
            message,
            data: None,
            count: None,
            matches: None,
            suggestion: None,
            intent: None,
        };
        match error {
            CommandError::NotFound { .. } => {
                report.suggestion = Some(SUGGEST_CHECK_NAME.to_owned());
            }
            CommandError::Ambiguous { candidates, .. } => {
                report.matches = Some(candidates);
                report.suggestion = Some(SUGGEST_BE_SPECIFIC.to_owned());
            }
            CommandError::Validation { .. }
            | CommandError::InvalidTransition { .. }
            | CommandError::Repository(_) => {}
        }
        report
    }

    /// Renders either side of a dispatch result.
    #[must_use]
    pub fn from_result(result: Result<CommandOutcome, CommandError>) -> Self {
        result.map_or_else(Self::from_error, Self::from_outcome)
    }

    /// Attaches the interpreted intent to the report.
    #[must_use]
    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    const fn success(message: String, task: Task) -> Self {
        Self {
            success: true,
            message,
            data: Some(ReportData::Task(task)),
            count: None,
            matches: None,
            suggestion: None,
            intent: None,
        }
    }
}
