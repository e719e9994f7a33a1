//! JSON helpers producing diff-friendly files.
//!
//! Environment files are rewritten after every run, so output must be
//! byte-stable: two-space indentation, a trailing newline, and key order
//! taken from the source types (`BTreeMap` for variables).

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// Output was not UTF-8.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to pretty, stable JSON with a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Same as [`to_json_stable`], returning bytes for direct file writing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    to_json_stable(value).map(String::into_bytes)
}

/// Deserializes JSON from a string.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use checkpost_domain::Environment;

    #[test]
    fn test_environment_output_is_stable() {
        let mut env = Environment::new("local");
        env.set("lastResultCount", 3).unwrap();
        env.set("requestStartTime", "1700000000000").unwrap();

        let first = to_json_stable(&env).unwrap();
        let second = to_json_stable(&env.clone()).unwrap();
        assert_eq!(first, second);
        assert!(first.ends_with("}\n"));
        assert!(first.contains("\n  \"name\": \"local\""));
        assert!(first.find("lastResultCount").unwrap() < first.find("requestStartTime").unwrap());
    }

    #[test]
    fn test_roundtrip_through_bytes() {
        let mut env = Environment::new("local");
        env.set("k", "v").unwrap();

        let bytes = to_json_stable_bytes(&env).unwrap();
        let back: Environment = from_json_bytes(&bytes).unwrap();
        assert_eq!(back, env);
    }

    #[test]
    fn test_invalid_json_is_deserialize_error() {
        let err = from_json::<Environment>("{").unwrap_err();
        assert!(matches!(err, SerializationError::Deserialize(_)));
    }
}
