//! Task lifecycle management for Gantt.
//!
//! This module implements the task side of the system: creating named task
//! records, enforcing validated lifecycle state transitions, listing with
//! state filters, and resolving fuzzy name references to exactly one stored
//! record. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
