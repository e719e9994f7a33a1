//! Use cases

mod validate_response;
mod validate_run;

pub use validate_response::{ResponseValidator, ValidationReport};
pub use validate_run::{ResponseOutcome, RunEntry, RunResult, RunSummary, ValidationRun};
