//! Scripted intent interpreter for tests and offline use.

use crate::command::domain::Intent;
use crate::command::ports::{IntentInterpreter, InterpreterError, InterpreterResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Interpreter that replays a fixed sequence of responses.
///
/// Each [`interpret`](IntentInterpreter::interpret) call consumes the next
/// scripted response in order, which makes behaviour suites deterministic
/// and allows injecting interpreter failures without a live model.
#[derive(Debug, Default)]
pub struct ScriptedInterpreter {
    responses: Mutex<VecDeque<InterpreterResult<Intent>>>,
}

impl ScriptedInterpreter {
    /// Creates an interpreter replaying `responses` in order.
    #[must_use]
    pub fn new(responses: impl IntoIterator<Item = InterpreterResult<Intent>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }

    /// Creates an interpreter replaying successful intents in order.
    #[must_use]
    pub fn with_intents(intents: impl IntoIterator<Item = Intent>) -> Self {
        Self::new(intents.into_iter().map(Ok))
    }

    /// Appends a response to the script.
    ///
    /// # Errors
    ///
    /// Returns [`InterpreterError::Request`] when the script lock is
    /// poisoned.
    pub fn push(&self, response: InterpreterResult<Intent>) -> InterpreterResult<()> {
        let mut responses = self
            .responses
            .lock()
            .map_err(|err| InterpreterError::request(std::io::Error::other(err.to_string())))?;
        responses.push_back(response);
        Ok(())
    }
}

#[async_trait]
impl IntentInterpreter for ScriptedInterpreter {
    async fn interpret(&self, _command: &str) -> InterpreterResult<Intent> {
        let mut responses = self
            .responses
            .lock()
            .map_err(|err| InterpreterError::request(std::io::Error::other(err.to_string())))?;
        responses.pop_front().unwrap_or_else(|| {
            Err(InterpreterError::Configuration(
                "scripted interpreter has no response left".to_owned(),
            ))
        })
    }
}
