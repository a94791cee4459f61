//! Natural-language command dispatch for Gantt.
//!
//! This module implements the command side of the system: a structured
//! intent contract for external interpreters, an interpreter port with a
//! Gemini HTTP adapter and a scripted adapter, and the dispatcher that
//! validates intents, resolves task name references, and executes
//! operations against the task store. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
