use crate::models::errors::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Rate limit policy
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    /// Maximum number of accepted attempts in the time window
    pub max_attempts: usize,
    /// Length of the sliding window
    pub window_duration: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_duration: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    /// Creates a policy, rejecting a zero attempt count or an empty window
    pub fn new(max_attempts: usize, window_duration: Duration) -> Result<Self, AppError> {
        if max_attempts == 0 {
            return Err(AppError::validation_failed("max_attempts must be greater than zero"));
        }

        if window_duration.is_zero() {
            return Err(AppError::validation_failed("window_duration must be greater than zero"));
        }

        Ok(Self {
            max_attempts,
            window_duration,
        })
    }

    /// 3 submissions per minute
    pub fn contact_form() -> Self {
        Self {
            max_attempts: 3,
            window_duration: Duration::from_secs(60),
        }
    }

    /// 5 sign-in attempts per 5 minutes
    pub fn admin_login() -> Self {
        Self {
            max_attempts: 5,
            window_duration: Duration::from_secs(300),
        }
    }
}

/// Accepted attempts for one key, oldest first
#[derive(Debug, Clone, Default)]
struct AttemptLog {
    timestamps: Vec<Instant>,
}

impl AttemptLog {
    /// Drops timestamps that have left the window
    fn prune(&mut self, now: Instant, window_duration: Duration) {
        self.timestamps
            .retain(|&timestamp| now.saturating_duration_since(timestamp) < window_duration);
    }

    fn attempt_count(&self) -> usize {
        self.timestamps.len()
    }

    /// Time until the oldest attempt leaves the window
    fn time_until_free(&self, now: Instant, window_duration: Duration) -> Duration {
        self.timestamps
            .first()
            .map(|&oldest| (oldest + window_duration).saturating_duration_since(now))
            .unwrap_or_default()
    }
}

/// Sliding-window rate limiter keyed by an arbitrary identifier.
///
/// Only accepted attempts are logged, so hammering a limited key does not push
/// its lockout further out. Clones share state; separate instances don't.
#[derive(Clone)]
pub struct RateLimiter {
    records: Arc<RwLock<HashMap<String, AttemptLog>>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Creates a new rate limiter with default configuration
    pub fn new() -> Self {
        Self::with_config(RateLimitConfig::default())
    }

    /// Creates a new rate limiter with custom configuration
    pub fn with_config(config: RateLimitConfig) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Records an attempt for `key` if it is under the limit.
    /// Returns false without recording anything when the limit is reached.
    pub async fn is_allowed(&self, key: &str) -> bool {
        self.try_acquire(key).await.is_ok()
    }

    /// Like [`RateLimiter::is_allowed`], but a rejection carries the wait time
    pub async fn check_rate_limit(&self, key: &str) -> Result<(), AppError> {
        self.try_acquire(key).await.map_err(|wait| {
            tracing::warn!("Rate limit hit for {}, retry in {:?}", key, wait);
            AppError::rate_limited(
                format!(
                    "{} attempts per {} seconds",
                    self.config.max_attempts,
                    self.config.window_duration.as_secs()
                ),
                wait.as_secs_f64().ceil().max(1.0) as u64,
            )
        })
    }

    async fn try_acquire(&self, key: &str) -> Result<(), Duration> {
        let now = Instant::now();
        let mut records = self.records.write().await;

        let record = records.entry(key.to_string()).or_default();
        record.prune(now, self.config.window_duration);

        if record.attempt_count() >= self.config.max_attempts {
            return Err(record.time_until_free(now, self.config.window_duration));
        }

        record.timestamps.push(now);
        Ok(())
    }

    /// Gets the number of accepted attempts still inside the window
    pub async fn request_count(&self, key: &str) -> usize {
        let now = Instant::now();
        let mut records = self.records.write().await;

        if let Some(record) = records.get_mut(key) {
            record.prune(now, self.config.window_duration);
            record.attempt_count()
        } else {
            0
        }
    }

    /// Gets the attempts left before `key` is limited
    pub async fn remaining(&self, key: &str) -> usize {
        let count = self.request_count(key).await;
        self.config.max_attempts.saturating_sub(count)
    }

    /// Forgets every attempt recorded for `key`
    pub async fn reset(&self, key: &str) {
        let mut records = self.records.write().await;
        records.remove(key);
    }

    /// Drops keys with no attempts left in the window
    pub async fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut records = self.records.write().await;
        let initial_count = records.len();

        for record in records.values_mut() {
            record.prune(now, self.config.window_duration);
        }

        records.retain(|_, record| record.attempt_count() > 0);

        let removed_count = initial_count - records.len();

        if removed_count > 0 {
            tracing::debug!("Cleaned up {} expired rate limit records", removed_count);
        }

        removed_count
    }

    /// Gets rate limiter statistics
    pub async fn stats(&self) -> RateLimiterStats {
        let now = Instant::now();
        let mut records = self.records.write().await;

        for record in records.values_mut() {
            record.prune(now, self.config.window_duration);
        }

        RateLimiterStats {
            tracked_keys: records.len(),
            total_attempts: records.values().map(|r| r.attempt_count()).sum(),
            max_attempts: self.config.max_attempts,
            window_duration_seconds: self.config.window_duration.as_secs(),
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Rate limiter statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RateLimiterStats {
    pub tracked_keys: usize,
    pub total_attempts: usize,
    pub max_attempts: usize,
    pub window_duration_seconds: u64,
}
