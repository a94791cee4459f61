//! Task aggregate root and lifecycle state machine.

use super::{InvalidTransitionError, ParseTaskStateError, TaskId, TaskName};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle state.
///
/// Tasks advance along a single path: not started, in progress, completed.
/// Serialized and displayed using the human-readable forms (`"Not Started"`,
/// `"In Progress"`, `"Completed"`), which are also the persisted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskState {
    /// Task has been created but work has not started.
    #[serde(rename = "Not Started")]
    NotStarted,
    /// Task is being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Task work has finished. Terminal.
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskState {
    /// Every lifecycle state, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::NotStarted, Self::InProgress, Self::Completed];

    /// Returns the canonical storage and display representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Reports whether a transition from `self` to `target` is permitted.
    ///
    /// A transition to the current state is always permitted and treated as
    /// an idempotent no-op by [`Task::transition_to`]. Otherwise only the
    /// single forward step is allowed; stages cannot be skipped and
    /// completed tasks cannot move.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::NotStarted, Self::NotStarted | Self::InProgress)
                | (Self::InProgress, Self::InProgress | Self::Completed)
                | (Self::Completed, Self::Completed)
        )
    }

    /// Returns the states reachable from `self`, excluding `self`.
    #[must_use]
    pub const fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::NotStarted => &[Self::InProgress],
            Self::InProgress => &[Self::Completed],
            Self::Completed => &[],
        }
    }

    /// Reports whether no further state change is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    /// Parses a state from untrusted text.
    ///
    /// Matching is case-insensitive, tolerates surrounding whitespace, and
    /// accepts `_` or `-` in place of spaces, so interpreter output such as
    /// `"in_progress"` parses to [`TaskState::InProgress`].
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "not started" => Ok(Self::NotStarted),
            "in progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStateError(value.to_owned())),
        }
    }
}

/// Result of applying a lifecycle transition to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The state changed and `updated_at` was refreshed.
    Changed {
        /// State the task held before the transition.
        from: TaskState,
    },
    /// The task was already in the requested state; nothing was modified.
    Unchanged,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    name: TaskName,
    state: TaskState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task name.
    pub name: TaskName,
    /// Persisted lifecycle state.
    pub state: TaskState,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the [`TaskState::NotStarted`] state.
    #[must_use]
    pub fn new(name: TaskName, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            name,
            state: TaskState::NotStarted,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            state: data.state,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the task lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `target` after validating the transition.
    ///
    /// A request for the current state succeeds without modifying the task;
    /// `updated_at` is refreshed only when the state actually changes.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransitionError`] when the lifecycle table does not
    /// permit the move.
    pub fn transition_to(
        &mut self,
        target: TaskState,
        clock: &impl Clock,
    ) -> Result<TransitionOutcome, InvalidTransitionError> {
        if !self.state.can_transition_to(target) {
            return Err(InvalidTransitionError {
                task_id: self.id,
                from: self.state,
                to: target,
            });
        }
        if self.state == target {
            return Ok(TransitionOutcome::Unchanged);
        }
        let from = self.state;
        self.state = target;
        self.touch(clock);
        Ok(TransitionOutcome::Changed { from })
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
