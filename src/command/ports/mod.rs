//! Port contracts for command interpretation.
//!
//! Ports define infrastructure-agnostic interfaces used by command services.

pub mod interpreter;

pub use interpreter::{IntentInterpreter, InterpreterError, InterpreterResult};

#[cfg(test)]
pub use interpreter::MockIntentInterpreter;
