//! In-memory integration tests for free-text command dispatch.
//!
//! Drives the dispatcher through scripted interpreter responses and checks
//! the rendered report envelope, including the degraded paths.

use std::sync::Arc;

use crate::in_memory::helpers::{dispatcher_over, repository, seed_task};
use eyre::{bail, ensure};
use gantt::command::adapters::ScriptedInterpreter;
use gantt::command::domain::{Intent, IntentAction};
use gantt::command::ports::InterpreterError;
use gantt::task::{
    adapters::memory::InMemoryTaskRepository, domain::TaskState, ports::TaskRepository,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn scripted_session_manages_a_task_end_to_end(
    repository: Arc<InMemoryTaskRepository>,
) -> eyre::Result<()> {
    let interpreter = ScriptedInterpreter::with_intents([
        Intent::create("Plan the offsite"),
        Intent::update_state("offsite", TaskState::InProgress),
        Intent::update_state("offsite", TaskState::Completed),
        Intent::list_filtered(TaskState::Completed),
        Intent::delete("Plan the offsite"),
    ]);
    let dispatcher = dispatcher_over(&repository, interpreter);

    let created = dispatcher.execute_text("plan the offsite please").await;
    ensure!(created.success);
    ensure!(created.message == "Task \"Plan the offsite\" created successfully");

    let started = dispatcher.execute_text("get going on the offsite").await;
    ensure!(started.message == "Task state updated from \"Not Started\" to \"In Progress\"");

    let finished = dispatcher.execute_text("offsite is done").await;
    ensure!(finished.message == "Task state updated from \"In Progress\" to \"Completed\"");

    let listed = dispatcher.execute_text("what have we finished?").await;
    ensure!(listed.message == "Tasks filtered by state: Completed");
    ensure!(listed.count == Some(1));

    let deleted = dispatcher.execute_text("remove the offsite task").await;
    ensure!(deleted.message == "Task \"Plan the offsite\" deleted successfully");
    ensure!(repository.find_all(None).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn interpreter_outage_degrades_to_a_not_understood_report(
    repository: Arc<InMemoryTaskRepository>,
) -> eyre::Result<()> {
    let interpreter = ScriptedInterpreter::new([Err(InterpreterError::request(
        std::io::Error::other("connection refused"),
    ))]);
    let dispatcher = dispatcher_over(&repository, interpreter);

    let report = dispatcher.execute_text("add milk to the list").await;

    ensure!(!report.success);
    ensure!(report.message == "Could not understand the command");
    let Some(intent) = report.intent else {
        bail!("expected the fallback intent to be echoed");
    };
    ensure!(intent.action == IntentAction::Unknown);
    ensure!(
        intent
            .ambiguity
            .is_some_and(|note| note.starts_with("Error processing command:"))
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn out_of_domain_command_suggests_examples(
    repository: Arc<InMemoryTaskRepository>,
) -> eyre::Result<()> {
    let interpreter = ScriptedInterpreter::with_intents([Intent::unknown_with_ambiguity(
        "Not a task management command",
    )]);
    let dispatcher = dispatcher_over(&repository, interpreter);

    let report = dispatcher.execute_text("what's the weather like?").await;

    ensure!(!report.success);
    ensure!(report.message == "Could not determine what you want to do");
    ensure!(
        report
            .suggestion
            .is_some_and(|text| text.starts_with("Try commands like:"))
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ambiguous_reference_reports_candidates_and_guidance(
    repository: Arc<InMemoryTaskRepository>,
) -> eyre::Result<()> {
    seed_task(&repository, "Call the plumber").await?;
    seed_task(&repository, "Call the electrician").await?;
    let interpreter = ScriptedInterpreter::with_intents([Intent::update_state(
        "call the",
        TaskState::InProgress,
    )]);
    let dispatcher = dispatcher_over(&repository, interpreter);

    let report = dispatcher.execute_text("start the call task").await;

    ensure!(!report.success);
    ensure!(report.message == "Found 2 tasks matching \"call the\"");
    ensure!(report.matches.as_ref().is_some_and(|found| found.len() == 2));
    ensure!(report.suggestion.as_deref() == Some("Please be more specific with the task name"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn report_serializes_with_wire_field_names(
    repository: Arc<InMemoryTaskRepository>,
) -> eyre::Result<()> {
    let interpreter = ScriptedInterpreter::with_intents([Intent::create("Buy groceries")]);
    let dispatcher = dispatcher_over(&repository, interpreter);

    let report = dispatcher.execute_text("add buy groceries").await;
    let value = serde_json::to_value(report)?;

    ensure!(value.get("success") == Some(&serde_json::json!(true)));
    let Some(data) = value.get("data") else {
        bail!("expected a data payload, got {value}");
    };
    ensure!(data.get("name") == Some(&serde_json::json!("Buy groceries")));
    ensure!(data.get("state") == Some(&serde_json::json!("Not Started")));
    ensure!(data.get("createdAt").is_some());
    ensure!(data.get("updatedAt").is_some());
    let Some(intent) = value.get("intent") else {
        bail!("expected the intent echo, got {value}");
    };
    ensure!(intent.get("action") == Some(&serde_json::json!("create")));
    ensure!(intent.get("taskName") == Some(&serde_json::json!("Buy groceries")));
    Ok(())
}
