use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use async_trait::async_trait;
use tokio::fs as async_fs;
use crate::models::errors::AppError;
use crate::services::key_value::KeyValueStore;
use crate::utils::security::sanitize_filename;

/// Key-value store keeping one JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let data_dir = data_dir.into();

        // Create the data directory if it doesn't exist
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)
                .map_err(|e| AppError::storage_failed(format!("Failed to create data directory: {}", e)))?;
        }

        Ok(Self { data_dir })
    }

    /// Get the file backing a key. Only keys that are already safe file names
    /// are accepted, so two distinct keys never share a file.
    pub fn path_for_key(&self, key: &str) -> Result<PathBuf, AppError> {
        if key.is_empty() || key.chars().all(|c| c == '.') || sanitize_filename(key) != key {
            return Err(AppError::storage_failed(format!("Invalid storage key: {:?}", key)));
        }

        Ok(self.data_dir.join(format!("{}.json", key)))
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let file_path = self.path_for_key(key)?;

        match async_fs::read_to_string(&file_path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage_failed(format!("Failed to read {}: {}", key, e))),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        let file_path = self.path_for_key(key)?;
        let tmp_path = file_path.with_extension("json.tmp");

        // Write to a sibling file, then rename over the old value
        async_fs::write(&tmp_path, value.as_bytes())
            .await
            .map_err(|e| AppError::storage_failed(format!("Failed to write {}: {}", key, e)))?;
        async_fs::rename(&tmp_path, &file_path)
            .await
            .map_err(|e| AppError::storage_failed(format!("Failed to replace {}: {}", key, e)))?;

        tracing::debug!("Stored key {} at {}", key, file_path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let file_path = self.path_for_key(key)?;

        match async_fs::remove_file(&file_path).await {
            Ok(()) => {
                tracing::debug!("Deleted key {} at {}", key, file_path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage_failed(format!("Failed to delete {}: {}", key, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        assert_eq!(store.get("mockGallery").await.unwrap(), None);
        store.set("mockGallery", "[]".to_string()).await.unwrap();
        assert_eq!(store.get("mockGallery").await.unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("mockGallery.json").exists());

        store.remove("mockGallery").await.unwrap();
        assert_eq!(store.get("mockGallery").await.unwrap(), None);
        store.remove("mockGallery").await.unwrap();
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("site").join("data");

        let store = FileStore::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.data_dir(), nested.as_path());
    }

    #[test]
    fn test_keys_stay_inside_data_dir() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        assert!(store.path_for_key("../../etc/passwd").is_err());
        assert!(store.path_for_key("..").is_err());
        assert!(store.path_for_key("").is_err());

        let path = store.path_for_key("mockGallery").unwrap();
        assert_eq!(path.parent().unwrap(), dir.path());
    }

    #[tokio::test]
    async fn test_distinct_keys_never_share_a_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        // "mock/User" would sanitize to "mock_User"
        assert!(store.path_for_key("mock/User").is_err());
        assert!(store.set("mock/User", "a".to_string()).await.is_err());

        store.set("mock_User", "b".to_string()).await.unwrap();
        assert_eq!(store.get("mock_User").await.unwrap().as_deref(), Some("b"));
        assert!(store.get("mock/User").await.is_err());
    }
}
