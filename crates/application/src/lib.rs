//! Checkpost Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (clock, log sink, environment persistence)
//! - The named check catalogue
//! - Use cases validating one response or a whole run of responses

pub mod checks;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::ValidationError;
pub use ports::{Clock, EnvironmentError, EnvironmentRepository, LogSink};
pub use use_cases::{
    ResponseOutcome, ResponseValidator, RunEntry, RunResult, RunSummary, ValidationReport,
    ValidationRun,
};
