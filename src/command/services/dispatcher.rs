//! Service layer dispatching structured intents against the task store.

use crate::command::domain::{CommandError, CommandOutcome, CommandReport, Intent, IntentAction};
use crate::command::ports::IntentInterpreter;
use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskName, TaskState, TransitionOutcome},
    ports::TaskRepository,
    services::{NameResolution, TaskNameResolver},
};
use mockable::Clock;
use std::sync::Arc;

/// Result type for typed dispatch operations.
pub type DispatchResult = Result<CommandOutcome, CommandError>;

/// Orchestrates command execution: interpretation, field validation, name
/// resolution, transition validation, and persistence.
///
/// The free-text entry point never fails outward; interpreter faults are
/// downgraded to unknown intents and every invocation terminates in a
/// rendered [`CommandReport`]. The typed operation methods return
/// [`DispatchResult`] for callers that want to branch on outcomes.
#[derive(Clone)]
pub struct CommandDispatcher<R, I, C>
where
    R: TaskRepository,
    I: IntentInterpreter,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    resolver: TaskNameResolver<R>,
    interpreter: Arc<I>,
    clock: Arc<C>,
}

impl<R, I, C> CommandDispatcher<R, I, C>
where
    R: TaskRepository,
    I: IntentInterpreter,
    C: Clock + Send + Sync,
{
    /// Creates a new command dispatcher.
    #[must_use]
    pub fn new(repository: Arc<R>, interpreter: Arc<I>, clock: Arc<C>) -> Self {
        let resolver = TaskNameResolver::new(Arc::clone(&repository));
        Self {
            repository,
            resolver,
            interpreter,
            clock,
        }
    }

    /// Executes a free-text command end to end.
    ///
    /// The command is interpreted once; any interpreter failure becomes an
    /// unknown intent annotated with the failure, so out-of-service models
    /// degrade to a not-understood report rather than an error.
    pub async fn execute_text(&self, command: &str) -> CommandReport {
        if command.trim().is_empty() {
            return CommandReport::from_error(CommandError::Validation {
                field: "command",
                reason: "Command is required and must be a non-empty string".to_owned(),
            });
        }

        match self.interpreter.interpret(command).await {
            Ok(intent) => self.dispatch(intent).await,
            Err(err) => {
                tracing::warn!(error = %err, "command interpretation failed");
                let fallback =
                    Intent::unknown_with_ambiguity(format!("Error processing command: {err}"));
                CommandReport::from_outcome(CommandOutcome::NotUnderstood {
                    intent: fallback,
                    reason: Some(err.to_string()),
                })
            }
        }
    }

    /// Dispatches a structured intent and renders the uniform report.
    ///
    /// The interpreted intent is echoed on every report for transparency.
    pub async fn dispatch(&self, intent: Intent) -> CommandReport {
        let echo = intent.clone();
        let result = self.dispatch_intent(intent).await;
        CommandReport::from_result(result).with_intent(echo)
    }

    async fn dispatch_intent(&self, intent: Intent) -> DispatchResult {
        match intent.action {
            IntentAction::Create => {
                let name = required_field(
                    intent.task_name.as_deref(),
                    "taskName",
                    "Could not determine task name",
                )?;
                self.create_task(name).await
            }
            IntentAction::UpdateState => {
                let name = required_field(
                    intent.task_name.as_deref(),
                    "taskName",
                    "Could not determine which task to update",
                )?;
                let target = required_field(
                    intent.target_state.as_deref(),
                    "targetState",
                    "Could not determine target state",
                )?;
                let target_state = parse_target_state(target)?;
                self.transition_task(name, target_state).await
            }
            IntentAction::Delete => {
                let name = required_field(
                    intent.task_name.as_deref(),
                    "taskName",
                    "Could not determine which task to delete",
                )?;
                self.delete_task(name).await
            }
            IntentAction::List => {
                let filter = intent
                    .filter_state
                    .as_deref()
                    .map(parse_filter_state)
                    .transpose()?;
                self.list_tasks(filter).await
            }
            IntentAction::Unknown => Ok(CommandOutcome::NotUnderstood {
                intent,
                reason: None,
            }),
        }
    }

    /// Creates a task in the not-started state.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Validation`] for an empty or oversized name
    /// and [`CommandError::Repository`] when persistence fails.
    pub async fn create_task(&self, name: &str) -> DispatchResult {
        let task_name = TaskName::new(name).map_err(|err| CommandError::Validation {
            field: "taskName",
            reason: name_validation_reason(&err),
        })?;
        let task = Task::new(task_name, &*self.clock);
        self.repository.store(&task).await?;
        tracing::debug!(task_id = %task.id(), "task created");
        Ok(CommandOutcome::Created { task })
    }

    /// Moves the referenced task to `target`.
    ///
    /// A request for the task's current state succeeds as
    /// [`CommandOutcome::AlreadyInState`] without a store write.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NotFound`] or [`CommandError::Ambiguous`]
    /// when the reference does not resolve to exactly one task,
    /// [`CommandError::InvalidTransition`] when the lifecycle table denies
    /// the move, and [`CommandError::Repository`] when persistence fails.
    pub async fn transition_task(&self, reference: &str, target: TaskState) -> DispatchResult {
        let mut task = self.resolve_unique(reference).await?;
        match task.transition_to(target, &*self.clock) {
            Ok(TransitionOutcome::Changed { from }) => {
                self.repository.update(&task).await?;
                tracing::debug!(
                    task_id = %task.id(),
                    from = %from,
                    to = %task.state(),
                    "task state updated"
                );
                Ok(CommandOutcome::Transitioned {
                    task,
                    previous_state: from,
                })
            }
            Ok(TransitionOutcome::Unchanged) => Ok(CommandOutcome::AlreadyInState { task }),
            Err(err) => Err(CommandError::InvalidTransition {
                current: err.from,
                requested: err.to,
                allowed: err.from.allowed_targets(),
            }),
        }
    }

    /// Deletes the referenced task.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NotFound`] or [`CommandError::Ambiguous`]
    /// when the reference does not resolve to exactly one task, and
    /// [`CommandError::Repository`] when persistence fails.
    pub async fn delete_task(&self, reference: &str) -> DispatchResult {
        let task = self.resolve_unique(reference).await?;
        let removed = self.repository.delete(task.id()).await?;
        removed.map_or_else(
            || {
                Err(CommandError::NotFound {
                    search_text: reference.to_owned(),
                })
            },
            |deleted| {
                tracing::debug!(task_id = %deleted.id(), "task deleted");
                Ok(CommandOutcome::Deleted { task: deleted })
            },
        )
    }

    /// Lists tasks newest-first, optionally filtered by state.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Repository`] when the lookup fails.
    pub async fn list_tasks(&self, filter: Option<TaskState>) -> DispatchResult {
        let tasks = self.repository.find_all(filter).await?;
        Ok(CommandOutcome::Listing { tasks, filter })
    }

    /// Fetches one task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NotFound`] when no task has the identifier
    /// and [`CommandError::Repository`] when the lookup fails.
    pub async fn get_task(&self, id: TaskId) -> DispatchResult {
        let found = self.repository.find_by_id(id).await?;
        found
            .map(|task| CommandOutcome::Retrieved { task })
            .ok_or_else(|| CommandError::NotFound {
                search_text: id.to_string(),
            })
    }

    async fn resolve_unique(&self, reference: &str) -> Result<Task, CommandError> {
        match self.resolver.resolve(reference).await? {
            NameResolution::Resolved(task) => Ok(task),
            NameResolution::NotFound => Err(CommandError::NotFound {
                search_text: reference.to_owned(),
            }),
            NameResolution::Ambiguous(candidates) => Err(CommandError::Ambiguous {
                search_text: reference.to_owned(),
                candidates,
            }),
        }
    }
}

/// Extracts a required intent field, treating blank values as absent.
fn required_field<'a>(
    value: Option<&'a str>,
    field: &'static str,
    message: &'static str,
) -> Result<&'a str, CommandError> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| CommandError::Validation {
            field,
            reason: message.to_owned(),
        })
}

fn parse_target_state(raw: &str) -> Result<TaskState, CommandError> {
    TaskState::try_from(raw).map_err(|_| CommandError::Validation {
        field: "targetState",
        reason: format!(
            "Invalid target state: {raw}. Must be one of: {}",
            valid_states_list()
        ),
    })
}

fn parse_filter_state(raw: &str) -> Result<TaskState, CommandError> {
    TaskState::try_from(raw).map_err(|_| CommandError::Validation {
        field: "filterState",
        reason: format!("Invalid state: {raw}. Must be one of: {}", valid_states_list()),
    })
}

fn valid_states_list() -> String {
    TaskState::ALL
        .iter()
        .map(|state| state.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn name_validation_reason(err: &TaskDomainError) -> String {
    match err {
        TaskDomainError::EmptyTaskName => {
            "Task name is required and must be a non-empty string".to_owned()
        }
        TaskDomainError::TaskNameTooLong { .. } => {
            "Task name cannot exceed 200 characters".to_owned()
        }
    }
}
