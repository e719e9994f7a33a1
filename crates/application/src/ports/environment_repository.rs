//! Environment repository port
//!
//! Defines the interface for environment persistence.

use std::path::Path;

use async_trait::async_trait;
use checkpost_domain::Environment;

/// Errors that can occur during environment operations.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    /// Environment file not found.
    #[error("Environment not found: {0}")]
    NotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Repository trait for environment persistence.
#[async_trait]
pub trait EnvironmentRepository: Send + Sync {
    /// Loads an environment from `path`.
    ///
    /// # Errors
    /// Returns `EnvironmentError::NotFound` if the file doesn't exist.
    async fn load(&self, path: &Path) -> Result<Environment, EnvironmentError>;

    /// Saves an environment to `path`, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    async fn save(&self, path: &Path, environment: &Environment) -> Result<(), EnvironmentError>;

    /// Loads an environment, or returns a new empty one named `name` if the
    /// file does not exist yet.
    ///
    /// # Errors
    /// Returns any error other than `NotFound`.
    async fn load_or_create(
        &self,
        path: &Path,
        name: &str,
    ) -> Result<Environment, EnvironmentError> {
        match self.load(path).await {
            Ok(environment) => Ok(environment),
            Err(EnvironmentError::NotFound(_)) => Ok(Environment::new(name)),
            Err(e) => Err(e),
        }
    }
}
