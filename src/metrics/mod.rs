//! Per-call outcomes and the run-level statistics they fold into.
mod aggregator;
mod types;


pub use aggregator::fold;
pub use types::{CallErrorKind, CallOutcome, RunResult, StatusBucket};
