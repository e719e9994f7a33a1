//! Timestamp parsing for values stored in an environment.

use chrono::{DateTime, Utc};

use crate::error::{DomainError, DomainResult};

/// Parses a stored timestamp.
///
/// Accepts Unix epoch milliseconds (integer or fractional, as written by
/// `Date.now()`-style producers) and RFC 3339 strings.
///
/// # Errors
///
/// Returns [`DomainError::InvalidTimestamp`] if the value matches neither form.
pub fn parse_timestamp(raw: &str) -> DomainResult<DateTime<Utc>> {
    let trimmed = raw.trim();

    if let Ok(millis) = trimmed.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| DomainError::InvalidTimestamp(raw.to_string()));
    }

    if let Ok(millis) = trimmed.parse::<f64>() {
        if millis.is_finite() {
            #[allow(clippy::cast_possible_truncation)]
            let micros = (millis * 1000.0).round() as i64;
            return DateTime::from_timestamp_micros(micros)
                .ok_or_else(|| DomainError::InvalidTimestamp(raw.to_string()));
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DomainError::InvalidTimestamp(raw.to_string()))
}
