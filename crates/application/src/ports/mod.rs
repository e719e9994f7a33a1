//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod environment_repository;
mod log_sink;

pub use clock::Clock;
pub use environment_repository::{EnvironmentError, EnvironmentRepository};
pub use log_sink::LogSink;
