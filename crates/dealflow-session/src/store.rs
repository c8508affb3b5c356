//! Persisted session state.
//!
//! A store holds one text record per storage key. The authority writes the
//! serialized [`Session`](dealflow_models::Session) under its key on login,
//! reads it once at startup and removes it on logout. A missing key is a
//! normal state, so `read` returns `Ok(None)` and `remove` succeeds.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use crate::error::StoreError;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// One JSON file per key under a directory: `<dir>/<key>.json`.
///
/// Writes go to a sibling temp file that is renamed into place, so a reader
/// never sees a half-written record.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys become file names, so only `[A-Za-z0-9_-.]` is accepted and a key
    /// may not start with a dot.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    #[instrument(skip(self))]
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value))]
    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(path = %path.display(), "Session state written");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_lifecycle() {
        let store = MemorySessionStore::new();
        assert_eq!(store.read("user").await.unwrap(), None);

        store.write("user", "{}").await.unwrap();
        assert!(store.contains("user"));
        assert_eq!(store.read("user").await.unwrap().as_deref(), Some("{}"));

        store.remove("user").await.unwrap();
        store.remove("user").await.unwrap();
        assert!(!store.contains("user"));
    }

    #[test]
    fn test_path_for_rejects_traversal() {
        let store = FileSessionStore::new("/tmp/sessions");
        assert!(store.path_for("user").is_ok());
        assert!(store.path_for("user.v2").is_ok());
        assert!(store.path_for("").is_err());
        assert!(store.path_for("../etc/passwd").is_err());
        assert!(store.path_for(".hidden").is_err());
        assert!(store.path_for("a/b").is_err());
    }

    #[tokio::test]
    async fn test_file_store_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested"));

        assert_eq!(store.read("user").await.unwrap(), None);

        store.write("user", r#"{"id":"1"}"#).await.unwrap();
        assert_eq!(
            store.read("user").await.unwrap().as_deref(),
            Some(r#"{"id":"1"}"#)
        );
        assert!(dir.path().join("nested/user.json").exists());
        assert!(!dir.path().join("nested/user.json.tmp").exists());

        store.write("user", r#"{"id":"2"}"#).await.unwrap();
        assert_eq!(
            store.read("user").await.unwrap().as_deref(),
            Some(r#"{"id":"2"}"#)
        );

        store.remove("user").await.unwrap();
        assert_eq!(store.read("user").await.unwrap(), None);
        store.remove("user").await.unwrap();
    }
}
