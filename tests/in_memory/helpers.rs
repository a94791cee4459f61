//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use gantt::command::adapters::ScriptedInterpreter;
use gantt::command::services::CommandDispatcher;
use gantt::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskName},
    ports::TaskRepository,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Dispatcher type used by the integration tests.
pub type TestDispatcher =
    CommandDispatcher<InMemoryTaskRepository, ScriptedInterpreter, DefaultClock>;

/// Provides a fresh shared in-memory repository for each test.
#[fixture]
pub fn repository() -> Arc<InMemoryTaskRepository> {
    Arc::new(InMemoryTaskRepository::new())
}

/// Builds a dispatcher over `repository` replaying the scripted responses.
pub fn dispatcher_over(
    repository: &Arc<InMemoryTaskRepository>,
    interpreter: ScriptedInterpreter,
) -> TestDispatcher {
    CommandDispatcher::new(
        Arc::clone(repository),
        Arc::new(interpreter),
        Arc::new(DefaultClock),
    )
}

/// Builds a dispatcher over `repository` with an empty interpreter script.
pub fn dispatcher(repository: &Arc<InMemoryTaskRepository>) -> TestDispatcher {
    dispatcher_over(repository, ScriptedInterpreter::default())
}

/// Stores a fresh task directly in the repository.
///
/// # Errors
///
/// Returns an error when the name is invalid or the store rejects the task.
pub async fn seed_task(
    repository: &InMemoryTaskRepository,
    name: &str,
) -> Result<Task, eyre::Report> {
    let task = Task::new(TaskName::new(name)?, &DefaultClock);
    repository.store(&task).await?;
    Ok(task)
}
