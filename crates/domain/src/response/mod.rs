//! HTTP response types

mod header;
mod spec;

pub use header::{Header, Headers};
pub use spec::{ResponseSpec, StatusCode};
