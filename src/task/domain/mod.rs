//! Domain model for task lifecycle management.
//!
//! The task domain models named task records, the lifecycle state machine
//! that governs how they advance, and the validation rules for task values,
//! while keeping all infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod name;
mod task;

pub use error::{InvalidTransitionError, ParseTaskStateError, TaskDomainError};
pub use ids::TaskId;
pub use name::TaskName;
pub use task::{PersistedTaskData, Task, TaskState, TransitionOutcome};
