//! When steps for command dispatch BDD scenarios.

use super::world::{CommandWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"the user says "{command}""#)]
fn user_says(world: &mut CommandWorld, command: String) {
    let report = run_async(world.dispatcher.execute_text(&command));
    world.last_report = Some(report);
}
