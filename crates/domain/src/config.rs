//! Validator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::response::StatusCode;

/// Thresholds and environment keys used by the response validator.
///
/// Every field has a default, so a partial configuration file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Status code the response must have.
    pub expected_status: u16,
    /// Responses must arrive strictly faster than this.
    pub max_response_time_ms: u64,
    /// Status that triggers the `Retry-After` diagnostic.
    pub rate_limit_status: u16,
    /// Environment key holding the request start timestamp.
    pub start_time_key: String,
    /// Environment key receiving the number of results.
    pub result_count_key: String,
}

impl ValidatorConfig {
    /// Default environment key read for the request start time.
    pub const DEFAULT_START_TIME_KEY: &'static str = "requestStartTime";
    /// Default environment key written with the result count.
    pub const DEFAULT_RESULT_COUNT_KEY: &'static str = "lastResultCount";

    /// The latency limit as a `Duration`.
    #[must_use]
    pub const fn max_response_time(&self) -> Duration {
        Duration::from_millis(self.max_response_time_ms)
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            expected_status: 200,
            max_response_time_ms: 200,
            rate_limit_status: StatusCode::TOO_MANY_REQUESTS.as_u16(),
            start_time_key: Self::DEFAULT_START_TIME_KEY.to_string(),
            result_count_key: Self::DEFAULT_RESULT_COUNT_KEY.to_string(),
        }
    }
}
