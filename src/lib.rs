//! Gantt: task lifecycle management with natural-language command dispatch.
//!
//! This crate provides the core functionality for managing short-lived task
//! records through a fixed lifecycle and for resolving free-form natural
//! language commands into validated operations against those records.
//!
//! # Architecture
//!
//! Gantt follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`task`]: Task records, the lifecycle state machine, and name
//!   resolution
//! - [`command`]: Intent interpretation and command dispatch

pub mod command;
pub mod task;
