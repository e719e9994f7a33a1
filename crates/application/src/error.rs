//! Application error types

use checkpost_domain::{DecodeError, DomainError, TestResults};
use thiserror::Error;

/// Errors that end the validation of one response early.
///
/// Failed checks are not errors; they are recorded as
/// [`checkpost_domain::TestOutcome::Fail`]. Only conditions that leave later
/// steps with nothing to work on cross the validator boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The body is not valid JSON.
    #[error("{0}")]
    Decode(#[from] DecodeError),

    /// `results` is absent or not an array, so it has no length.
    #[error("cannot count results: 'results' is {found}, expected an array")]
    ResultsNotList {
        /// What was found instead ("missing" or a JSON kind).
        found: String,
        /// Checks that had already run when validation stopped.
        partial: TestResults,
    },

    /// Writing the derived value to the environment failed.
    #[error("environment update failed: {0}")]
    Environment(#[from] DomainError),
}

impl ValidationError {
    /// Short machine-friendly kind, used in run summaries.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::ResultsNotList { .. } => "results_not_list",
            Self::Environment(_) => "environment",
        }
    }

    /// Checks recorded before the error, if any.
    #[must_use]
    pub const fn partial_results(&self) -> Option<&TestResults> {
        match self {
            Self::ResultsNotList { partial, .. } => Some(partial),
            _ => None,
        }
    }
}
