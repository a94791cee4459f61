//! Domain model for command interpretation and dispatch.
//!
//! Defines the structured intent contract produced by interpreters, the
//! typed outcomes and error taxonomy of dispatch, and the uniform report
//! envelope rendered from either.

mod error;
mod intent;
mod outcome;
mod report;

pub use error::{CommandError, ErrorCategory};
pub use intent::{Confidence, Intent, IntentAction};
pub use outcome::CommandOutcome;
pub use report::{CommandReport, ReportData};
