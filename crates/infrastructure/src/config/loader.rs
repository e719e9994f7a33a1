//! Loads [`ValidatorConfig`] from an optional JSON file plus environment
//! variable overrides.
//!
//! Precedence, lowest first: built-in defaults, the config file, then
//! `CHECKPOST_*` variables.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use checkpost_domain::ValidatorConfig;
use tracing::debug;

use crate::serialization::{SerializationError, from_json_bytes};

/// Overrides the expected status code.
pub const ENV_EXPECTED_STATUS: &str = "CHECKPOST_EXPECTED_STATUS";
/// Overrides the response-time limit in milliseconds.
pub const ENV_MAX_RESPONSE_TIME_MS: &str = "CHECKPOST_MAX_RESPONSE_TIME_MS";
/// Overrides the status that triggers the `Retry-After` diagnostic.
pub const ENV_RATE_LIMIT_STATUS: &str = "CHECKPOST_RATE_LIMIT_STATUS";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid.
    #[error("invalid config {path}: {source}")]
    Parse {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        source: SerializationError,
    },

    /// An override variable does not hold a valid number.
    #[error("invalid value for {var}: {value:?}")]
    InvalidOverride {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Builds the validator configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    overrides: HashMap<String, String>,
}

impl ConfigLoader {
    /// Creates a loader reading overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_overrides(
            std::env::vars().filter(|(key, _)| key.starts_with("CHECKPOST_")),
        )
    }

    /// Creates a loader with explicit override variables.
    #[must_use]
    pub fn with_overrides<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            overrides: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Loads the configuration.
    ///
    /// Without a path the defaults are used as the base.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an
    /// override is not a valid number.
    pub async fn load(&self, path: Option<&Path>) -> Result<ValidatorConfig, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let content = tokio::fs::read(path).await.map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                from_json_bytes(&content).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => ValidatorConfig::default(),
        };

        self.apply_overrides(&mut config)?;
        debug!(?config, "validator configuration loaded");
        Ok(config)
    }

    /// Applies `CHECKPOST_*` overrides to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] for unparseable values.
    pub fn apply_overrides(&self, config: &mut ValidatorConfig) -> Result<(), ConfigError> {
        if let Some(status) = self.parse(ENV_EXPECTED_STATUS)? {
            config.expected_status = status;
        }
        if let Some(max_ms) = self.parse(ENV_MAX_RESPONSE_TIME_MS)? {
            config.max_response_time_ms = max_ms;
        }
        if let Some(status) = self.parse(ENV_RATE_LIMIT_STATUS)? {
            config.rate_limit_status = status;
        }
        Ok(())
    }

    fn parse<T: std::str::FromStr>(&self, var: &'static str) -> Result<Option<T>, ConfigError> {
        self.overrides
            .get(var)
            .map(|value| {
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidOverride {
                        var,
                        value: value.clone(),
                    })
            })
            .transpose()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_defaults_without_file() {
        let config = ConfigLoader::default().load(None).await.unwrap();
        assert_eq!(config, ValidatorConfig::default());
    }

    #[tokio::test]
    async fn test_file_then_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("checkpost.json");
        std::fs::write(
            &path,
            r#"{"expected_status": 201, "max_response_time_ms": 500}"#,
        )
        .unwrap();

        let loader = ConfigLoader::with_overrides([(ENV_MAX_RESPONSE_TIME_MS, " 750 ")]);
        let config = loader.load(Some(&path)).await.unwrap();

        assert_eq!(config.expected_status, 201);
        assert_eq!(config.max_response_time_ms, 750);
        assert_eq!(config.rate_limit_status, 429);
    }

    #[tokio::test]
    async fn test_invalid_override() {
        let loader = ConfigLoader::with_overrides([(ENV_EXPECTED_STATUS, "ok")]);
        let err = loader.load(None).await.unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOverride { var: ENV_EXPECTED_STATUS, .. }
        ));
    }

    #[tokio::test]
    async fn test_bad_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("checkpost.json");
        std::fs::write(&path, r#"{"expected_status": "two hundred"}"#).unwrap();

        let err = ConfigLoader::default().load(Some(&path)).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
