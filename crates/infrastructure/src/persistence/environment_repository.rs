//! File-based environment repository implementation.
//!
//! An environment is one pretty-printed JSON file. The file is read before a
//! run and rewritten after it so values like `lastResultCount` carry over to
//! the next run.

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use checkpost_application::ports::{EnvironmentError, EnvironmentRepository};
use checkpost_domain::Environment;
use tokio::fs;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// Stores environments as JSON files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileEnvironmentRepository;

impl FileEnvironmentRepository {
    /// Creates a new file-based environment repository.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EnvironmentRepository for FileEnvironmentRepository {
    async fn load(&self, path: &Path) -> Result<Environment, EnvironmentError> {
        let content = match fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(EnvironmentError::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(EnvironmentError::Io(e)),
        };

        let environment: Environment = from_json_bytes(&content)
            .map_err(|e| EnvironmentError::Serialization(e.to_string()))?;

        debug!(
            path = %path.display(),
            variables = environment.len(),
            "environment loaded"
        );
        Ok(environment)
    }

    async fn save(&self, path: &Path, environment: &Environment) -> Result<(), EnvironmentError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let content = to_json_stable_bytes(environment)
            .map_err(|e| EnvironmentError::Serialization(e.to_string()))?;
        fs::write(path, content).await?;

        debug!(path = %path.display(), "environment saved");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("envs").join("local.json");
        let repo = FileEnvironmentRepository::new();

        let mut env = Environment::new("local");
        env.set("requestStartTime", "1700000000000").unwrap();
        repo.save(&path, &env).await.expect("save");

        let loaded = repo.load(&path).await.expect("load");
        assert_eq!(loaded, env);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempdir().expect("temp dir");
        let repo = FileEnvironmentRepository::new();

        let err = repo.load(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, EnvironmentError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_load_or_create_missing_file() {
        let dir = tempdir().expect("temp dir");
        let repo = FileEnvironmentRepository::new();

        let env = repo
            .load_or_create(&dir.path().join("fresh.json"), "fresh")
            .await
            .expect("new environment");
        assert_eq!(env.name, "fresh");
        assert!(env.is_empty());
    }

    #[tokio::test]
    async fn test_load_hand_written_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("local.json");
        std::fs::write(
            &path,
            r#"{"name":"local","variables":{"requestStartTime":{"value":"1700000000000"},"retries":3}}"#,
        )
        .unwrap();
        let repo = FileEnvironmentRepository::new();

        let env = repo.load(&path).await.expect("load");
        assert_eq!(env.name, "local");
        assert_eq!(env.get("requestStartTime"), Some("1700000000000"));
        assert_eq!(env.get("retries"), Some("3"));

        repo.save(&path, &env).await.expect("save");
        assert_eq!(repo.load(&path).await.expect("reload"), env);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let repo = FileEnvironmentRepository::new();

        let err = repo.load_or_create(&path, "bad").await.unwrap_err();
        assert!(matches!(err, EnvironmentError::Serialization(_)));
    }
}
