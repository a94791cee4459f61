//! Shared world state for command dispatch BDD scenarios.

use std::sync::Arc;

use gantt::command::adapters::ScriptedInterpreter;
use gantt::command::domain::CommandReport;
use gantt::command::services::CommandDispatcher;
use gantt::task::adapters::memory::InMemoryTaskRepository;
use mockable::DefaultClock;
use rstest::fixture;

/// Dispatcher type used by the BDD world.
pub type TestCommandDispatcher =
    CommandDispatcher<InMemoryTaskRepository, ScriptedInterpreter, DefaultClock>;

/// Scenario world for command dispatch behaviour tests.
pub struct CommandWorld {
    pub repository: Arc<InMemoryTaskRepository>,
    pub interpreter: Arc<ScriptedInterpreter>,
    pub dispatcher: TestCommandDispatcher,
    pub last_report: Option<CommandReport>,
}

impl CommandWorld {
    /// Creates a world with an empty store and an empty interpreter script.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let interpreter = Arc::new(ScriptedInterpreter::default());
        let dispatcher = CommandDispatcher::new(
            Arc::clone(&repository),
            Arc::clone(&interpreter),
            Arc::new(DefaultClock),
        );

        Self {
            repository,
            interpreter,
            dispatcher,
            last_report: None,
        }
    }
}

impl Default for CommandWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CommandWorld {
    CommandWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
