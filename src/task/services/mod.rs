//! Application services for task name resolution.

mod resolver;

pub use resolver::{NameResolution, TaskCandidate, TaskNameResolver};
