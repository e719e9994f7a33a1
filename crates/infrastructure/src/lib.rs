//! Checkpost Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus file formats for
//! configuration and recorded responses.

pub mod adapters;
pub mod config;
pub mod fixtures;
pub mod persistence;
pub mod serialization;

pub use adapters::{SystemClock, TracingLogSink};
pub use config::{ConfigError, ConfigLoader};
pub use fixtures::{FixtureError, ResponseFixture, load_fixture};
pub use persistence::FileEnvironmentRepository;
pub use serialization::{
    SerializationError, from_json, from_json_bytes, to_json_stable, to_json_stable_bytes,
};
