//! Run reporting: per-row outcomes, JSON reports and progress display.

mod json_envelope;
pub mod progress;
mod types;

pub use json_envelope::{EventType, JsonEnvelope, SPEC_VERSION, write_report};
pub use types::{FailureKind, RowOutcome, RowStatus, RunReport, SkipReason};
