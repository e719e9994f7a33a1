//! Checkpost Domain - Core types
//!
//! This crate defines the domain model for validating HTTP responses:
//! responses and headers, decoded bodies, the run-scoped environment store
//! and named test results. All types here are pure Rust with no I/O.

pub mod body;
pub mod config;
pub mod environment;
pub mod error;
pub mod response;
pub mod testing;
pub mod timestamp;

pub use body::{DecodeError, DecodedBody, JsonKind};
pub use config::ValidatorConfig;
pub use environment::{Environment, Variable, VariableMap};
pub use error::{DomainError, DomainResult};
pub use response::{Header, Headers, ResponseSpec, StatusCode};
pub use testing::{TestOutcome, TestResult, TestResults};
pub use timestamp::parse_timestamp;
