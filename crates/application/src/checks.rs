//! Named checks run against a response.
//!
//! Each check is a pure function returning a [`TestResult`]. Checks never
//! short-circuit one another; the validator runs all of them and records
//! every outcome.

use std::time::Duration;

use checkpost_domain::{DecodedBody, JsonKind, ResponseSpec, TestOutcome, TestResult};
use serde_json::Value;

/// Name of the `results` presence check.
pub const HAS_RESULTS: &str = "Response has results";
/// Name of the required-fields check.
pub const REQUIRED_FIELDS: &str = "Response has required fields";
/// Name of the `version` type check.
pub const VERSION_IS_NON_EMPTY_STRING: &str = "Version is a non-empty string";
/// Name of the `count` type check.
pub const COUNT_IS_NON_NEGATIVE_NUMBER: &str = "Count is a non-negative number";

/// Top-level fields every body must carry.
pub const REQUIRED_FIELD_NAMES: [&str; 3] = ["version", "count", "results"];

/// Name of the status check for an expected code.
#[must_use]
pub fn status_check_name(expected: u16) -> String {
    format!("Status code is {expected}")
}

/// Name of the latency check for a limit in milliseconds.
#[must_use]
pub fn response_time_check_name(max_ms: u64) -> String {
    format!("Response time is less than {max_ms}ms")
}

/// The body has a `results` property.
#[must_use]
pub fn has_results(body: &DecodedBody) -> TestResult {
    let outcome = TestOutcome::check(body.has_property("results"), || {
        if body.is_object() {
            "expected property 'results' in body".to_string()
        } else {
            format!("expected an object body with 'results', got {}", body.kind())
        }
    });
    TestResult::new(HAS_RESULTS, outcome)
}

/// The status code equals `expected`.
#[must_use]
pub fn status_is(response: &ResponseSpec, expected: u16) -> TestResult {
    let actual = response.status_code();
    let outcome = TestOutcome::check(actual.as_u16() == expected, || {
        format!("expected status {expected}, got {actual}")
    });
    TestResult::new(status_check_name(expected), outcome)
}

/// The response arrived strictly faster than `limit`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn response_time_below(response: &ResponseSpec, limit: Duration) -> TestResult {
    let limit_ms = limit.as_millis() as u64;
    let outcome = TestOutcome::check(response.elapsed < limit, || {
        format!(
            "expected response time below {limit_ms}ms, took {}ms",
            response.elapsed_millis()
        )
    });
    TestResult::new(response_time_check_name(limit_ms), outcome)
}

/// The body is an object with `version`, `count` and `results`.
#[must_use]
pub fn required_fields(body: &DecodedBody) -> TestResult {
    let outcome = if body.is_object() {
        let missing = body.missing_properties(&REQUIRED_FIELD_NAMES);
        TestOutcome::check(missing.is_empty(), || {
            format!("missing required fields: {}", missing.join(", "))
        })
    } else {
        TestOutcome::Fail {
            message: format!("expected an object body, got {}", body.kind()),
        }
    };
    TestResult::new(REQUIRED_FIELDS, outcome)
}

/// `version` is a string of at least one character.
#[must_use]
pub fn version_is_non_empty_string(body: &DecodedBody) -> TestResult {
    let outcome = match body.property("version") {
        Some(Value::String(version)) => TestOutcome::check(!version.is_empty(), || {
            "expected 'version' to be non-empty".to_string()
        }),
        Some(other) => TestOutcome::Fail {
            message: format!("expected 'version' to be a string, got {}", JsonKind::of(other)),
        },
        None => TestOutcome::Fail {
            message: "expected property 'version' in body".to_string(),
        },
    };
    TestResult::new(VERSION_IS_NON_EMPTY_STRING, outcome)
}

/// `count` exists, is a number, and is at least zero.
#[must_use]
pub fn count_is_non_negative(body: &DecodedBody) -> TestResult {
    let outcome = match body.property("count") {
        Some(Value::Number(count)) => {
            let non_negative = count.as_f64().is_some_and(|n| n >= 0.0);
            TestOutcome::check(non_negative, || {
                format!("expected 'count' to be at least 0, got {count}")
            })
        }
        Some(other) => TestOutcome::Fail {
            message: format!("expected 'count' to be a number, got {}", JsonKind::of(other)),
        },
        None => TestOutcome::Fail {
            message: "expected property 'count' in body".to_string(),
        },
    };
    TestResult::new(COUNT_IS_NON_NEGATIVE_NUMBER, outcome)
}
