//! Validate response use case
//!
//! Runs the diagnostics and named checks against a single completed response.

use checkpost_domain::{
    DecodedBody, Environment, JsonKind, ResponseSpec, TestResults, ValidatorConfig,
    parse_timestamp,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::checks;
use crate::error::ValidationError;
use crate::ports::{Clock, LogSink};

/// Outcome of validating one response whose body could be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Every named check, in execution order.
    pub results: TestResults,
    /// Length of the `results` array, as written to the environment.
    pub result_count: usize,
}

/// Validates completed responses against the search API contract.
///
/// For each response the validator:
/// 1. logs every header and the whole header collection,
/// 2. logs the status code,
/// 3. logs `Retry-After` on rate-limited responses,
/// 4. logs the time since the stored request start,
/// 5. decodes the body (failure ends validation),
/// 6. runs the named checks, storing the result count in the environment.
pub struct ResponseValidator<C> {
    config: ValidatorConfig,
    clock: C,
}

impl<C: Clock> ResponseValidator<C> {
    /// Creates a validator with the given configuration and clock.
    pub const fn new(config: ValidatorConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// Creates a validator with the default thresholds.
    pub fn with_defaults(clock: C) -> Self {
        Self::new(ValidatorConfig::default(), clock)
    }

    /// Returns the active configuration.
    pub const fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates one response.
    ///
    /// Failed checks are recorded in the report and never stop sibling
    /// checks. The environment receives exactly one write (the result count),
    /// and only once the body has decoded.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::Decode`] if the body is not valid JSON; no named
    ///   check runs.
    /// - [`ValidationError::ResultsNotList`] if `results` has no length; the
    ///   checks already run are carried in the error.
    /// - [`ValidationError::Environment`] if the configured count key is blank.
    pub fn validate(
        &self,
        response: &ResponseSpec,
        environment: &mut Environment,
        log: &mut dyn LogSink,
    ) -> Result<ValidationReport, ValidationError> {
        debug!(
            status = response.status,
            headers = response.headers.len(),
            body_len = response.body.len(),
            "validating response"
        );

        Self::log_headers(response, log);
        log.log(format!("Status code: {}", response.status));
        self.log_rate_limit(response, log);
        self.log_time_since_start(environment, log);

        let body = DecodedBody::decode(&response.body).inspect_err(|e| {
            warn!(line = e.line, column = e.column, "response body did not decode");
        })?;

        let mut results = TestResults::new();
        results.record(checks::has_results(&body));

        let result_count = match body.property("results") {
            Some(Value::Array(items)) => items.len(),
            other => {
                let found = other.map_or_else(
                    || "missing".to_string(),
                    |value| JsonKind::of(value).to_string(),
                );
                warn!(%found, "'results' has no length");
                return Err(ValidationError::ResultsNotList {
                    found,
                    partial: results,
                });
            }
        };
        log.log(format!("Result count: {result_count}"));
        environment.set(self.config.result_count_key.as_str(), result_count)?;

        results.record(checks::status_is(response, self.config.expected_status));
        results.record(checks::response_time_below(
            response,
            self.config.max_response_time(),
        ));
        results.record(checks::required_fields(&body));
        results.record(checks::version_is_non_empty_string(&body));
        results.record(checks::count_is_non_negative(&body));

        debug!(
            passed = results.passed,
            failed = results.failed,
            result_count,
            "response validated"
        );

        Ok(ValidationReport {
            results,
            result_count,
        })
    }

    fn log_headers(response: &ResponseSpec, log: &mut dyn LogSink) {
        for header in &response.headers {
            log.log(header.to_string());
        }
        log.log(response.headers.to_flat_json());
    }

    fn log_rate_limit(&self, response: &ResponseSpec, log: &mut dyn LogSink) {
        if response.status != self.config.rate_limit_status {
            return;
        }
        if let Some(retry_after) = response.get_header("Retry-After") {
            log.log(format!("Rate limit reached. Retry-After: {retry_after}"));
        }
    }

    fn log_time_since_start(&self, environment: &Environment, log: &mut dyn LogSink) {
        let key = self.config.start_time_key.as_str();
        let Some(raw) = environment.get(key) else {
            return;
        };
        match parse_timestamp(raw) {
            Ok(started) => {
                let elapsed = self.clock.now().signed_duration_since(started);
                log.log(format!(
                    "Time since request start: {} ms",
                    elapsed.num_milliseconds()
                ));
            }
            Err(e) => debug!(key, error = %e, "skipping elapsed-time diagnostic"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use checkpost_domain::Headers;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.timestamp_millis_opt(1_700_000_000_500).unwrap())
    }

    fn response(status: u16, headers: &[(&str, &str)], body: &str) -> ResponseSpec {
        ResponseSpec::new(
            status,
            headers.iter().copied().collect::<Headers>(),
            body.as_bytes().to_vec(),
            Duration::from_millis(120),
        )
    }

    const GOOD_BODY: &str = r#"{"version":"1.2.3","count":5,"results":[1,2,3]}"#;

    #[test]
    fn test_log_lines_in_order() {
        let validator = ResponseValidator::with_defaults(clock());
        let mut env = Environment::new("test");
        let mut log: Vec<String> = Vec::new();

        validator
            .validate(
                &response(
                    200,
                    &[("Content-Type", "application/json"), ("X-Request-Id", "abc")],
                    GOOD_BODY,
                ),
                &mut env,
                &mut log,
            )
            .expect("body decodes");

        assert_eq!(
            log,
            vec![
                "Content-Type: application/json".to_string(),
                "X-Request-Id: abc".to_string(),
                r#"{"Content-Type":"application/json","X-Request-Id":"abc"}"#.to_string(),
                "Status code: 200".to_string(),
                "Result count: 3".to_string(),
            ]
        );
    }

    #[test]
    fn test_retry_after_logged_for_429() {
        let validator = ResponseValidator::with_defaults(clock());
        let mut env = Environment::new("test");
        let mut log: Vec<String> = Vec::new();

        let _ = validator.validate(
            &response(429, &[("retry-after", "30")], GOOD_BODY),
            &mut env,
            &mut log,
        );

        assert!(log.contains(&"Rate limit reached. Retry-After: 30".to_string()));
    }

    #[test]
    fn test_429_without_retry_after_logs_nothing_extra() {
        let validator = ResponseValidator::with_defaults(clock());
        let mut env = Environment::new("test");
        let mut log: Vec<String> = Vec::new();

        let _ = validator.validate(&response(429, &[], GOOD_BODY), &mut env, &mut log);

        assert!(!log.iter().any(|line| line.starts_with("Rate limit reached")));
    }

    #[test]
    fn test_retry_after_ignored_for_other_status() {
        let validator = ResponseValidator::with_defaults(clock());
        let mut env = Environment::new("test");
        let mut log: Vec<String> = Vec::new();

        let _ = validator.validate(
            &response(503, &[("Retry-After", "30")], GOOD_BODY),
            &mut env,
            &mut log,
        );

        assert!(!log.iter().any(|line| line.contains("Retry-After: 30")));
    }

    #[test]
    fn test_time_since_start_logged() {
        let validator = ResponseValidator::with_defaults(clock());
        let mut env = Environment::new("test");
        env.set("requestStartTime", "1700000000000").unwrap();
        let mut log: Vec<String> = Vec::new();

        validator
            .validate(&response(200, &[], GOOD_BODY), &mut env, &mut log)
            .unwrap();

        assert!(log.contains(&"Time since request start: 500 ms".to_string()));
    }

    #[test]
    fn test_unparseable_start_time_skipped() {
        let validator = ResponseValidator::with_defaults(clock());
        let mut env = Environment::new("test");
        env.set("requestStartTime", "soon").unwrap();
        let mut log: Vec<String> = Vec::new();

        let report = validator
            .validate(&response(200, &[], GOOD_BODY), &mut env, &mut log)
            .unwrap();

        assert!(!log.iter().any(|line| line.starts_with("Time since")));
        assert!(report.results.all_passed());
    }

    #[test]
    fn test_missing_results_stops_with_partial() {
        let validator = ResponseValidator::with_defaults(clock());
        let mut env = Environment::new("test");
        let mut log: Vec<String> = Vec::new();

        let err = validator
            .validate(
                &response(200, &[], r#"{"version":"1","count":1}"#),
                &mut env,
                &mut log,
            )
            .unwrap_err();

        match err {
            ValidationError::ResultsNotList { found, partial } => {
                assert_eq!(found, "missing");
                assert_eq!(partial.total(), 1);
                assert!(!partial.results[0].passed());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(env.get("lastResultCount"), None);
    }

    #[test]
    fn test_results_object_has_no_length() {
        let validator = ResponseValidator::with_defaults(clock());
        let mut env = Environment::new("test");
        let mut log: Vec<String> = Vec::new();

        let err = validator
            .validate(&response(200, &[], r#"{"results":{}}"#), &mut env, &mut log)
            .unwrap_err();

        assert_eq!(err.kind(), "results_not_list");
        assert!(err.to_string().contains("'results' is object"));
    }

    #[test]
    fn test_custom_config_names_checks() {
        let config = ValidatorConfig {
            expected_status: 201,
            max_response_time_ms: 100,
            result_count_key: "count".to_string(),
            ..ValidatorConfig::default()
        };
        let validator = ResponseValidator::new(config, clock());
        let mut env = Environment::new("test");
        let mut log: Vec<String> = Vec::new();

        let report = validator
            .validate(&response(201, &[], GOOD_BODY), &mut env, &mut log)
            .unwrap();

        assert!(report.results.get("Status code is 201").unwrap().passed());
        assert!(
            !report
                .results
                .get("Response time is less than 100ms")
                .unwrap()
                .passed()
        );
        assert_eq!(env.get("count"), Some("3"));
    }

    #[test]
    fn test_blank_count_key_is_an_error() {
        let config = ValidatorConfig {
            result_count_key: String::new(),
            ..ValidatorConfig::default()
        };
        let validator = ResponseValidator::new(config, clock());
        let mut env = Environment::new("test");
        let mut log: Vec<String> = Vec::new();

        let err = validator
            .validate(&response(200, &[], GOOD_BODY), &mut env, &mut log)
            .unwrap_err();
        assert_eq!(err.kind(), "environment");
    }
}
