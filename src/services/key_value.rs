use crate::models::errors::AppError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// String key-value persistence the services write through.
///
/// Writes are last-write-wins per key. Two processes sharing one backend can
/// lose each other's updates; nothing here versions the values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never set
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Replaces the value stored under `key`
    async fn set(&self, key: &str, value: String) -> Result<(), AppError>;

    /// Deletes `key`; deleting a missing key succeeds
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// In-process store, lost when the process exits
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("mockGallery").await.unwrap(), None);

        store.set("mockGallery", "[]".to_string()).await.unwrap();
        assert_eq!(store.get("mockGallery").await.unwrap().as_deref(), Some("[]"));

        store.set("mockGallery", "[1]".to_string()).await.unwrap();
        assert_eq!(store.get("mockGallery").await.unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_remove_missing_key() {
        let store = MemoryStore::new();
        assert!(store.remove("mockUser").await.is_ok());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("csrf_token", "abc".to_string()).await.unwrap();
        assert_eq!(other.get("csrf_token").await.unwrap().as_deref(), Some("abc"));
    }
}
