//! Adapter implementations for command interpretation ports.

mod gemini;
mod scripted;

pub use gemini::GeminiInterpreter;
pub use scripted::ScriptedInterpreter;
