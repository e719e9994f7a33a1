//! Response fixture file format.
//!
//! A fixture is a JSON snapshot of a completed exchange:
//!
//! ```json
//! {
//!   "status": 200,
//!   "headers": { "Content-Type": "application/json" },
//!   "body": { "version": "1.2.3", "count": 5, "results": ["a", "b"] },
//!   "elapsed_ms": 120.5
//! }
//! ```
//!
//! `body` may be any JSON value (stored compactly) or a string (stored as
//! raw text, so invalid JSON can be recorded too). `body_base64` carries an
//! exact byte payload instead.

use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use checkpost_domain::{Headers, ResponseSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serialization::{SerializationError, from_json_bytes};

/// Errors raised while reading a fixture.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The file could not be read.
    #[error("cannot read fixture {path}: {source}")]
    Io {
        /// Fixture path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not a valid fixture document.
    #[error("invalid fixture {path}: {source}")]
    Parse {
        /// Fixture path.
        path: PathBuf,
        /// Underlying error.
        source: SerializationError,
    },

    /// `body_base64` is not valid base64.
    #[error("invalid body_base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Both `body` and `body_base64` were given.
    #[error("fixture sets both 'body' and 'body_base64'")]
    AmbiguousBody,

    /// The stored body value could not be re-encoded.
    #[error("cannot encode body: {0}")]
    Encode(#[from] serde_json::Error),

    /// `elapsed_ms` is negative or not finite.
    #[error("invalid elapsed_ms: {0}")]
    InvalidElapsed(f64),
}

/// A recorded response as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFixture {
    /// HTTP status code.
    pub status: u16,
    /// Headers in recorded order.
    #[serde(default)]
    pub headers: Headers,
    /// Body as JSON value or raw text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Body as base64-encoded bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_base64: Option<String>,
    /// Elapsed time in milliseconds, integer or fractional.
    #[serde(default)]
    pub elapsed_ms: f64,
}

impl ResponseFixture {
    /// Returns the raw body bytes described by the fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if both body forms are present or base64 is invalid.
    pub fn body_bytes(&self) -> Result<Vec<u8>, FixtureError> {
        match (&self.body, &self.body_base64) {
            (Some(_), Some(_)) => Err(FixtureError::AmbiguousBody),
            (None, Some(encoded)) => Ok(STANDARD.decode(encoded.trim())?),
            (Some(Value::String(text)), None) => Ok(text.clone().into_bytes()),
            (Some(value), None) => Ok(serde_json::to_vec(value)?),
            (None, None) => Ok(Vec::new()),
        }
    }

    /// Returns the recorded elapsed time.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidElapsed`] for negative or non-finite values.
    pub fn elapsed(&self) -> Result<Duration, FixtureError> {
        let ms = self.elapsed_ms;
        if !ms.is_finite() || ms < 0.0 {
            return Err(FixtureError::InvalidElapsed(ms));
        }
        Duration::try_from_secs_f64(ms / 1000.0).map_err(|_| FixtureError::InvalidElapsed(ms))
    }

    /// Converts the fixture into a response ready for validation.
    ///
    /// # Errors
    ///
    /// See [`ResponseFixture::body_bytes`] and [`ResponseFixture::elapsed`].
    pub fn into_response(self) -> Result<ResponseSpec, FixtureError> {
        let body = self.body_bytes()?;
        let elapsed = self.elapsed()?;
        Ok(ResponseSpec::new(self.status, self.headers, body, elapsed))
    }
}

/// Reads and parses a fixture file.
///
/// # Errors
///
/// Returns [`FixtureError::Io`] or [`FixtureError::Parse`].
pub async fn load_fixture(path: &Path) -> Result<ResponseFixture, FixtureError> {
    let content = tokio::fs::read(path).await.map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json_bytes(&content).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
