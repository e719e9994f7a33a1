//! Environment variable types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// A single stored value.
///
/// Reads either the full `{ "value": ..., "enabled": ... }` form or a bare
/// string or number, which is stored as an enabled variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "VariableRepr")]
pub struct Variable {
    /// The variable value.
    pub value: String,

    /// Whether this variable is visible to lookups.
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(Number),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VariableRepr {
    Full {
        value: Scalar,
        #[serde(default = "default_enabled")]
        enabled: bool,
    },
    Bare(Scalar),
}

impl From<VariableRepr> for Variable {
    fn from(repr: VariableRepr) -> Self {
        match repr {
            VariableRepr::Full { value, enabled } => Self {
                value: value.into(),
                enabled,
            },
            VariableRepr::Bare(value) => Self::new(value),
        }
    }
}

impl Variable {
    /// Creates a new enabled variable.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            enabled: true,
        }
    }

    /// Returns the value if the variable is enabled.
    #[must_use]
    pub fn enabled_value(&self) -> Option<&str> {
        if self.enabled {
            Some(&self.value)
        } else {
            None
        }
    }
}

/// Variables keyed by name, sorted for stable persistence.
pub type VariableMap = BTreeMap<String, Variable>;

/// A named key-value store shared by every validation in a run.
///
/// Validators read values stored by earlier steps of the run (such as a
/// request start time) and write derived values for later ones. The store is
/// passed explicitly; nothing about it is global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique identifier, generated when a hand-written file omits it.
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    /// Environment name (e.g., "local", "staging")
    pub name: String,
    /// Schema version for migration support.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Variables in this environment.
    #[serde(default)]
    pub variables: VariableMap,
}

const fn default_schema_version() -> u32 {
    1
}

impl Environment {
    /// Creates a new empty environment with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            schema_version: 1,
            variables: VariableMap::new(),
        }
    }

    /// Returns the value stored under `key`, if present and enabled.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).and_then(Variable::enabled_value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidVariableName`] if `key` is blank.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) -> DomainResult<()> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(DomainError::InvalidVariableName(key));
        }
        self.variables.insert(key, Variable::new(value.to_string()));
        Ok(())
    }

    /// Returns the number of variables in this environment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if the environment holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new("default")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut env = Environment::new("local");
        env.set("lastResultCount", 3).expect("valid key");
        assert_eq!(env.get("lastResultCount"), Some("3"));
    }

    #[test]
    fn test_set_overwrites() {
        let mut env = Environment::new("local");
        env.set("lastResultCount", 3).unwrap();
        env.set("lastResultCount", 0).unwrap();
        assert_eq!(env.get("lastResultCount"), Some("0"));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_missing_key_is_absent() {
        let env = Environment::new("local");
        assert_eq!(env.get("requestStartTime"), None);
    }

    #[test]
    fn test_blank_key_rejected() {
        let mut env = Environment::new("local");
        assert_eq!(
            env.set("  ", 1),
            Err(DomainError::InvalidVariableName("  ".to_string()))
        );
        assert!(env.is_empty());
    }

    #[test]
    fn test_serde_roundtrip_keeps_values() {
        let mut env = Environment::new("staging");
        env.set("b", "2").unwrap();
        env.set("a", "1").unwrap();

        let json = serde_json::to_string(&env).unwrap();
        assert!(json.find("\"a\"").unwrap() < json.find("\"b\"").unwrap());

        let back: Environment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, env);
    }

    #[test]
    fn test_bare_values_and_missing_id() {
        let env: Environment = serde_json::from_str(
            r#"{
                "name": "local",
                "variables": {
                    "requestStartTime": 1700000000000,
                    "region": "eu",
                    "lastResultCount": {"value": 4},
                    "token": {"value": "t", "enabled": false}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(env.get("requestStartTime"), Some("1700000000000"));
        assert_eq!(env.get("region"), Some("eu"));
        assert_eq!(env.get("lastResultCount"), Some("4"));
        assert_eq!(env.get("token"), None);
        assert_eq!(env.schema_version, 1);
    }
}
