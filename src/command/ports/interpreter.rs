//! Interpreter port translating free-form text into structured intents.

use crate::command::domain::Intent;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for interpreter operations.
pub type InterpreterResult<T> = Result<T, InterpreterError>;

/// Contract for translating a free-text command into an [`Intent`].
///
/// Implementations perform at most one interpretation attempt per call; the
/// dispatcher owns the policy of degrading failures to unknown intents, so
/// adapters report faults honestly rather than guessing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntentInterpreter: Send + Sync {
    /// Interprets one command.
    ///
    /// # Errors
    ///
    /// Returns [`InterpreterError`] when the interpretation attempt fails
    /// for any reason, including timeouts and unparseable output.
    async fn interpret(&self, command: &str) -> InterpreterResult<Intent>;
}

/// Errors returned by interpreter implementations.
#[derive(Debug, Clone, Error)]
pub enum InterpreterError {
    /// The interpreter is not usable as configured.
    #[error("interpreter configuration error: {0}")]
    Configuration(String),

    /// The interpretation request failed in transport.
    #[error("interpreter request failed: {0}")]
    Request(Arc<dyn std::error::Error + Send + Sync>),

    /// The interpretation attempt exceeded its hard deadline.
    #[error("interpreter timed out after {0:?}")]
    Timeout(Duration),

    /// The interpreter produced output that does not satisfy the intent
    /// contract.
    #[error("interpreter returned a malformed response: {0}")]
    MalformedResponse(String),
}

impl InterpreterError {
    /// Wraps a transport error.
    pub fn request(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Request(Arc::new(err))
    }
}
