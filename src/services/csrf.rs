use crate::models::errors::AppError;
use crate::services::key_value::KeyValueStore;
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_CSRF_KEY: &str = "csrf_token";

/// Per-session anti-forgery token kept in session storage
pub struct CsrfGuard {
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
}

impl CsrfGuard {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_CSRF_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, storage_key: impl Into<String>) -> Self {
        Self {
            store,
            storage_key: storage_key.into(),
        }
    }

    /// Generates a fresh token, replacing any previous one
    pub async fn issue(&self) -> Result<String, AppError> {
        let token = Uuid::new_v4().simple().to_string();
        self.store.set(&self.storage_key, token.clone()).await?;
        tracing::debug!("Issued new CSRF token");
        Ok(token)
    }

    pub async fn current(&self) -> Result<Option<String>, AppError> {
        self.store.get(&self.storage_key).await
    }

    /// False when no token has been issued yet
    pub async fn verify(&self, token: &str) -> Result<bool, AppError> {
        Ok(matches!(self.current().await?, Some(stored) if !token.is_empty() && stored == token))
    }

    /// Like [`CsrfGuard::verify`], for call sites that bail out on mismatch
    pub async fn require(&self, token: &str) -> Result<(), AppError> {
        if self.verify(token).await? {
            Ok(())
        } else {
            tracing::warn!("CSRF token mismatch");
            Err(AppError::session_error("Form token is missing or expired"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::key_value::MemoryStore;

    #[tokio::test]
    async fn test_issue_and_verify() {
        let guard = CsrfGuard::new(Arc::new(MemoryStore::new()));
        assert!(!guard.verify("anything").await.unwrap());

        let token = guard.issue().await.unwrap();
        assert_eq!(token.len(), 32);
        assert_eq!(guard.current().await.unwrap().as_deref(), Some(token.as_str()));
        assert!(guard.verify(&token).await.unwrap());
        assert!(!guard.verify("forged").await.unwrap());
        assert!(!guard.verify("").await.unwrap());
    }

    #[tokio::test]
    async fn test_reissue_invalidates_old_token() {
        let guard = CsrfGuard::new(Arc::new(MemoryStore::new()));
        let old = guard.issue().await.unwrap();
        let new = guard.issue().await.unwrap();

        assert_ne!(old, new);
        assert!(matches!(
            guard.require(&old).await,
            Err(AppError::SessionError { .. })
        ));
        assert!(guard.require(&new).await.is_ok());
    }
}
