use crate::models::admin::AdminUser;
use crate::models::errors::AppError;
use crate::services::key_value::KeyValueStore;
use crate::services::rate_limiter::RateLimiter;
use crate::utils::security::is_valid_redirect_url;
use std::sync::Arc;

/// Storage key of the signed-in admin record
pub const DEFAULT_SESSION_KEY: &str = "mockUser";

/// Where an admin lands after signing in when no safe target was given
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

/// Mock admin sign-in. There are no credentials: signing in stores the fixed
/// [`AdminUser`] record, signing out deletes it.
pub struct AdminAuth {
    store: Arc<dyn KeyValueStore>,
    session_key: String,
    login_limiter: RateLimiter,
    site_origin: String,
}

impl AdminAuth {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        login_limiter: RateLimiter,
        site_origin: impl Into<String>,
    ) -> Self {
        Self {
            store,
            session_key: DEFAULT_SESSION_KEY.to_string(),
            login_limiter,
            site_origin: site_origin.into(),
        }
    }

    pub fn with_session_key(mut self, session_key: impl Into<String>) -> Self {
        self.session_key = session_key.into();
        self
    }

    /// Signs in, subject to the login rate limit for `client_key`
    pub async fn login(&self, client_key: &str) -> Result<AdminUser, AppError> {
        self.login_limiter.check_rate_limit(client_key).await?;

        let user = AdminUser::default();
        let json = serde_json::to_string(&user)
            .map_err(|e| AppError::storage_failed(format!("Failed to encode admin session: {}", e)))?;
        self.store.set(&self.session_key, json).await?;

        tracing::info!("Admin {} signed in", user.email);
        Ok(user)
    }

    /// The signed-in admin, if any. An unreadable record counts as signed out.
    pub async fn current_user(&self) -> Result<Option<AdminUser>, AppError> {
        let Some(json) = self.store.get(&self.session_key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!("Discarding unreadable admin session: {}", e);
                Ok(None)
            }
        }
    }

    /// Guard for dashboard actions
    pub async fn require_admin(&self) -> Result<AdminUser, AppError> {
        self.current_user()
            .await?
            .ok_or_else(|| AppError::session_error("Admin session not found"))
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.store.remove(&self.session_key).await?;
        tracing::info!("Admin signed out");
        Ok(())
    }

    /// Returns `target` if it stays on the site, otherwise the dashboard
    pub fn post_login_redirect<'a>(&self, target: Option<&'a str>) -> &'a str {
        match target {
            Some(url) if is_valid_redirect_url(url, &self.site_origin) => url,
            Some(url) => {
                tracing::warn!("Ignoring off-site redirect target {}", url);
                DASHBOARD_PATH
            }
            None => DASHBOARD_PATH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::key_value::MemoryStore;
    use crate::services::rate_limiter::RateLimitConfig;

    fn auth() -> AdminAuth {
        AdminAuth::new(
            Arc::new(MemoryStore::new()),
            RateLimiter::with_config(RateLimitConfig::admin_login()),
            "https://sandhoratailor.com",
        )
    }

    #[tokio::test]
    async fn test_login_logout_cycle() {
        let auth = auth();
        assert_eq!(auth.current_user().await.unwrap(), None);
        assert!(matches!(
            auth.require_admin().await,
            Err(AppError::SessionError { .. })
        ));

        let user = auth.login("127.0.0.1").await.unwrap();
        assert_eq!(user.id, "admin-001");
        assert_eq!(auth.require_admin().await.unwrap(), user);

        auth.logout().await.unwrap();
        assert_eq!(auth.current_user().await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_is_rate_limited() {
        let auth = auth();

        for _ in 0..5 {
            auth.login("10.0.0.7").await.unwrap();
        }
        assert!(matches!(
            auth.login("10.0.0.7").await,
            Err(AppError::RateLimitError { .. })
        ));
        assert!(auth.login("10.0.0.8").await.is_ok());
    }

    #[tokio::test]
    async fn test_unreadable_session_counts_as_signed_out() {
        let store = Arc::new(MemoryStore::new());
        store.set(DEFAULT_SESSION_KEY, "garbage".to_string()).await.unwrap();
        let auth = AdminAuth::new(store, RateLimiter::new(), "https://sandhoratailor.com");

        assert_eq!(auth.current_user().await.unwrap(), None);
    }

    #[test]
    fn test_post_login_redirect() {
        let auth = auth();

        assert_eq!(auth.post_login_redirect(Some("/gallery")), "/gallery");
        assert_eq!(
            auth.post_login_redirect(Some("https://evil.example/admin")),
            DASHBOARD_PATH
        );
        assert_eq!(auth.post_login_redirect(None), DASHBOARD_PATH);
    }
}
