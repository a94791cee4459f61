//! Structured intent contract produced by command interpretation.

use crate::task::domain::TaskState;
use serde::{Deserialize, Serialize};

/// Operation a free-text command was interpreted as requesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentAction {
    /// Create a new task.
    Create,
    /// Move an existing task to another lifecycle state.
    UpdateState,
    /// Delete an existing task.
    Delete,
    /// List tasks, optionally filtered by state.
    List,
    /// The command could not be mapped to an operation. Unrecognised
    /// action strings also deserialize to this variant.
    #[serde(other)]
    Unknown,
}

/// Interpreter's self-assessed confidence in an intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// The command mapped cleanly onto one operation.
    High,
    /// The mapping required some guesswork.
    Medium,
    /// The mapping is doubtful. Absent values default here.
    #[default]
    Low,
}

/// Structured guess at what operation a free-text command requests.
///
/// Field values other than `action` arrive as untrusted text; the
/// dispatcher validates presence and parses state names before acting.
/// `confidence` and `ambiguity` are advisory annotations, never branched
/// on for control flow. A payload without an `action` field fails
/// deserialization; the interpreter adapter reports that as a malformed
/// response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    /// Requested operation.
    pub action: IntentAction,
    /// Task name reference for operations targeting an existing task, or
    /// the name to create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    /// Requested lifecycle state for state updates, as raw text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_state: Option<String>,
    /// Lifecycle state filter for listings, as raw text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_state: Option<String>,
    /// Interpreter confidence annotation.
    #[serde(default)]
    pub confidence: Confidence,
    /// Interpreter note on what was ambiguous about the command, if
    /// anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambiguity: Option<String>,
}

impl Intent {
    /// Builds a create intent for a task name.
    #[must_use]
    pub fn create(task_name: impl Into<String>) -> Self {
        Self {
            action: IntentAction::Create,
            task_name: Some(task_name.into()),
            target_state: None,
            filter_state: None,
            confidence: Confidence::High,
            ambiguity: None,
        }
    }

    /// Builds a state-update intent for a task name and target state.
    #[must_use]
    pub fn update_state(task_name: impl Into<String>, target: TaskState) -> Self {
        Self {
            action: IntentAction::UpdateState,
            task_name: Some(task_name.into()),
            target_state: Some(target.as_str().to_owned()),
            filter_state: None,
            confidence: Confidence::High,
            ambiguity: None,
        }
    }

    /// Builds a delete intent for a task name.
    #[must_use]
    pub fn delete(task_name: impl Into<String>) -> Self {
        Self {
            action: IntentAction::Delete,
            task_name: Some(task_name.into()),
            target_state: None,
            filter_state: None,
            confidence: Confidence::High,
            ambiguity: None,
        }
    }

    /// Builds an unfiltered list intent.
    #[must_use]
    pub const fn list() -> Self {
        Self {
            action: IntentAction::List,
            task_name: None,
            target_state: None,
            filter_state: None,
            confidence: Confidence::High,
            ambiguity: None,
        }
    }

    /// Builds a list intent filtered to one lifecycle state.
    #[must_use]
    pub fn list_filtered(filter: TaskState) -> Self {
        Self {
            action: IntentAction::List,
            task_name: None,
            target_state: None,
            filter_state: Some(filter.as_str().to_owned()),
            confidence: Confidence::High,
            ambiguity: None,
        }
    }

    /// Builds an unknown intent with no annotation.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            action: IntentAction::Unknown,
            task_name: None,
            target_state: None,
            filter_state: None,
            confidence: Confidence::Low,
            ambiguity: None,
        }
    }

    /// Builds an unknown intent annotated with what went wrong.
    #[must_use]
    pub fn unknown_with_ambiguity(reason: impl Into<String>) -> Self {
        Self {
            ambiguity: Some(reason.into()),
            ..Self::unknown()
        }
    }
}
