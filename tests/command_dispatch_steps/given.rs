//! Given steps for command dispatch BDD scenarios.

use super::world::{CommandWorld, run_async};
use eyre::WrapErr;
use gantt::command::domain::Intent;
use gantt::command::ports::InterpreterError;
use gantt::task::domain::TaskState;
use rstest_bdd_macros::given;

#[given(r#"a stored task named "{name}""#)]
fn stored_task(world: &mut CommandWorld, name: String) -> Result<(), eyre::Report> {
    run_async(world.dispatcher.create_task(&name)).wrap_err("create stored task for scenario")?;
    Ok(())
}

#[given(r#"the stored task "{name}" has been started"#)]
fn stored_task_started(world: &mut CommandWorld, name: String) -> Result<(), eyre::Report> {
    run_async(world.dispatcher.transition_task(&name, TaskState::InProgress))
        .wrap_err("start stored task for scenario")?;
    Ok(())
}

#[given(r#"the stored task "{name}" has been completed"#)]
fn stored_task_completed(world: &mut CommandWorld, name: String) -> Result<(), eyre::Report> {
    run_async(world.dispatcher.transition_task(&name, TaskState::Completed))
        .wrap_err("complete stored task for scenario")?;
    Ok(())
}

#[given(r#"the interpreter maps the next command to creating "{name}""#)]
fn interpreter_maps_create(world: &mut CommandWorld, name: String) -> Result<(), eyre::Report> {
    world.interpreter.push(Ok(Intent::create(name)))?;
    Ok(())
}

#[given(r#"the interpreter maps the next command to marking "{name}" as "{state}""#)]
fn interpreter_maps_update(
    world: &mut CommandWorld,
    name: String,
    state: String,
) -> Result<(), eyre::Report> {
    let target = TaskState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid state in scenario: {err}"))?;
    world
        .interpreter
        .push(Ok(Intent::update_state(name, target)))?;
    Ok(())
}

#[given(r#"the interpreter maps the next command to listing "{state}" tasks"#)]
fn interpreter_maps_list(world: &mut CommandWorld, state: String) -> Result<(), eyre::Report> {
    let filter = TaskState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid state in scenario: {err}"))?;
    world.interpreter.push(Ok(Intent::list_filtered(filter)))?;
    Ok(())
}

#[given("the interpreter is unavailable")]
fn interpreter_unavailable(world: &mut CommandWorld) -> Result<(), eyre::Report> {
    world
        .interpreter
        .push(Err(InterpreterError::request(std::io::Error::other(
            "interpreter unavailable",
        ))))?;
    Ok(())
}
