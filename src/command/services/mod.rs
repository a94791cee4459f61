//! Application services for command dispatch.

mod dispatcher;

pub use dispatcher::{CommandDispatcher, DispatchResult};
