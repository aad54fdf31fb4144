use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::services::rate_limiter::RateLimitConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub site_origin: String,
    /// Directory for the file-backed store; in-memory storage when unset
    pub data_dir: Option<PathBuf>,
    pub max_upload_mb: u64,
    pub gallery_page_size: usize,
    pub contact_max_attempts: usize,
    pub contact_window_seconds: u64,
    pub login_max_attempts: usize,
    pub login_window_seconds: u64,
    pub gallery_key: String,
    pub session_key: String,
    pub csrf_key: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_origin: "http://localhost:3000".to_string(),
            data_dir: None,
            max_upload_mb: 10,
            gallery_page_size: 6,
            contact_max_attempts: 3,
            contact_window_seconds: 60,
            login_max_attempts: 5,
            login_window_seconds: 300,
            gallery_key: "mockGallery".to_string(),
            session_key: "mockUser".to_string(),
            csrf_key: "csrf_token".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(origin) = env::var("SITE_ORIGIN") {
            config.site_origin = origin.trim_end_matches('/').to_string();
        }

        if let Ok(dir) = env::var("DATA_DIR") {
            if !dir.trim().is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(size) = parse_var::<u64>("MAX_UPLOAD_MB") {
            config.max_upload_mb = size;
        }

        if let Some(size) = parse_var::<usize>("GALLERY_PAGE_SIZE").filter(|&s| s > 0) {
            config.gallery_page_size = size;
        }

        if let Some(attempts) = parse_var::<usize>("CONTACT_MAX_ATTEMPTS").filter(|&a| a > 0) {
            config.contact_max_attempts = attempts;
        }

        if let Some(seconds) = parse_var::<u64>("CONTACT_WINDOW_SECONDS").filter(|&s| s > 0) {
            config.contact_window_seconds = seconds;
        }

        if let Some(attempts) = parse_var::<usize>("LOGIN_MAX_ATTEMPTS").filter(|&a| a > 0) {
            config.login_max_attempts = attempts;
        }

        if let Some(seconds) = parse_var::<u64>("LOGIN_WINDOW_SECONDS").filter(|&s| s > 0) {
            config.login_window_seconds = seconds;
        }

        config
    }

    pub fn contact_rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig {
            max_attempts: self.contact_max_attempts,
            window_duration: Duration::from_secs(self.contact_window_seconds),
        }
    }

    pub fn login_rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig {
            max_attempts: self.login_max_attempts,
            window_duration: Duration::from_secs(self.login_window_seconds),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies() {
        let config = SiteConfig::default();
        assert_eq!(config.contact_rate_limit(), RateLimitConfig::contact_form());
        assert_eq!(config.login_rate_limit(), RateLimitConfig::admin_login());
        assert_eq!(config.gallery_page_size, 6);
    }

    // Env vars are process-wide, so everything env-related lives in one test.
    #[test]
    fn test_from_env_overrides() {
        env::set_var("SITE_ORIGIN", "https://sandhoratailor.com/");
        env::set_var("GALLERY_PAGE_SIZE", "9");
        env::set_var("LOGIN_MAX_ATTEMPTS", "zero");
        env::set_var("CONTACT_WINDOW_SECONDS", "0");

        let config = SiteConfig::from_env();

        env::remove_var("SITE_ORIGIN");
        env::remove_var("GALLERY_PAGE_SIZE");
        env::remove_var("LOGIN_MAX_ATTEMPTS");
        env::remove_var("CONTACT_WINDOW_SECONDS");

        assert_eq!(config.site_origin, "https://sandhoratailor.com");
        assert_eq!(config.gallery_page_size, 9);
        assert_eq!(config.login_max_attempts, 5);
        assert_eq!(config.contact_window_seconds, 60);
    }
}
