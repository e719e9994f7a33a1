//! Serialization helpers for files written by Checkpost.

mod json;

pub use json::{SerializationError, from_json, from_json_bytes, to_json_stable, to_json_stable_bytes};
