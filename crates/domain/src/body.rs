//! Decoded response bodies.
//!
//! A response body is decoded once into a [`DecodedBody`], a tagged JSON
//! value with explicit field-presence queries. Bodies that are not valid JSON
//! produce a [`DecodeError`] instead of a value.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The body could not be decoded as JSON.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("response body is not valid JSON: {message}")]
pub struct DecodeError {
    /// Parser message, including position information.
    pub message: String,
    /// 1-based line where decoding stopped.
    pub line: usize,
    /// 1-based column where decoding stopped.
    pub column: usize,
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// The variant of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonKind {
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
    /// `"..."`
    String,
    /// Integer or floating point number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// `null`
    Null,
}

impl JsonKind {
    /// Classifies a JSON value.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
            Value::Null => Self::Null,
        }
    }

    /// Lowercase name used in messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A response body decoded as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBody {
    value: Value,
}

impl DecodedBody {
    /// Decodes raw body bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the bytes are not a single valid JSON document.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let value = serde_json::from_slice(bytes)?;
        Ok(Self { value })
    }

    /// Wraps an already decoded value.
    #[must_use]
    pub const fn from_value(value: Value) -> Self {
        Self { value }
    }

    /// Returns the underlying JSON value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the variant of the top-level value.
    #[must_use]
    pub const fn kind(&self) -> JsonKind {
        JsonKind::of(&self.value)
    }

    /// Returns true if the top-level value is an object.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self.value, Value::Object(_))
    }

    /// Returns true if the body is an object with the given key.
    ///
    /// A key whose value is `null` still counts as present.
    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.value
            .as_object()
            .is_some_and(|object| object.contains_key(name))
    }

    /// Returns the value of a top-level property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.value.as_object().and_then(|object| object.get(name))
    }

    /// Returns the names from `names` that are missing from the body.
    #[must_use]
    pub fn missing_properties<'a>(&self, names: &[&'a str]) -> Vec<&'a str> {
        names
            .iter()
            .copied()
            .filter(|name| !self.has_property(name))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_object() {
        let body = DecodedBody::decode(br#"{"version":"1.0","results":[]}"#).expect("valid JSON");
        assert_eq!(body.kind(), JsonKind::Object);
        assert!(body.is_object());
        assert!(body.has_property("version"));
        assert!(body.has_property("results"));
        assert!(!body.has_property("count"));
        assert_eq!(body.property("version"), Some(&json!("1.0")));
    }

    #[test]
    fn test_decode_failure_carries_position() {
        let err = DecodedBody::decode(b"not json").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.column >= 1);
        assert!(err.to_string().starts_with("response body is not valid JSON"));
    }

    #[test]
    fn test_decode_empty_body_fails() {
        assert!(DecodedBody::decode(b"").is_err());
    }

    #[test]
    fn test_null_property_is_present() {
        let body = DecodedBody::from_value(json!({"results": null}));
        assert!(body.has_property("results"));
    }

    #[test]
    fn test_non_object_has_no_properties() {
        let body = DecodedBody::from_value(json!([1, 2, 3]));
        assert_eq!(body.kind(), JsonKind::Array);
        assert!(!body.is_object());
        assert!(!body.has_property("results"));
        assert_eq!(body.property("0"), None);
    }

    #[test]
    fn test_missing_properties() {
        let body = DecodedBody::from_value(json!({"version": "1", "results": []}));
        assert_eq!(
            body.missing_properties(&["version", "count", "results"]),
            vec!["count"]
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(JsonKind::of(&json!(true)).to_string(), "boolean");
        assert_eq!(JsonKind::of(&json!(null)).to_string(), "null");
        assert_eq!(JsonKind::of(&json!(1.5)).to_string(), "number");
    }
}
