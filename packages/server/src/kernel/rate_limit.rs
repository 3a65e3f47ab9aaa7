//! Fixed-window rate limiter for public submissions.
//!
//! Counts requests per identifier (usually the client IP) inside a window
//! that starts on the first request. Entries live in process memory and are
//! lost on restart; the global `tower_governor` layer in `server::app` is the
//! backstop for raw request floods.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Store is cleared when it grows past this many identifiers.
pub const MAX_ENTRIES: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Snapshot of an identifier's quota, used for response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimitStatus {
    /// `X-RateLimit-*` header pairs. `X-RateLimit-Reset` is omitted when no
    /// window is active.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("x-ratelimit-limit", self.limit.to_string()),
            ("x-ratelimit-remaining", self.remaining.to_string()),
        ];
        if let Some(reset_at) = self.reset_at {
            // Round up so clients never retry a second early
            let secs = (reset_at.timestamp_millis() + 999).div_euclid(1000);
            headers.push(("x-ratelimit-reset", secs.to_string()));
        }
        headers
    }
}

pub struct RateLimiter {
    limit: u32,
    window: Duration,
    entries: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Record an attempt. Returns false if the identifier is over its quota.
    pub async fn check(&self, identifier: &str) -> bool {
        self.check_at(identifier, Utc::now()).await
    }

    pub async fn check_at(&self, identifier: &str, now: DateTime<Utc>) -> bool {
        let mut entries = self.entries.lock().await;

        if entries.len() > MAX_ENTRIES {
            tracing::warn!(entries = entries.len(), "Rate limit store full, clearing");
            entries.clear();
        }

        match entries.get_mut(identifier) {
            Some(window) if window.reset_at >= now => {
                if window.count >= self.limit {
                    return false;
                }
                window.count += 1;
                true
            }
            _ if self.limit == 0 => false,
            _ => {
                entries.insert(
                    identifier.to_string(),
                    Window {
                        count: 1,
                        reset_at: now
                            .checked_add_signed(self.window)
                            .unwrap_or(DateTime::<Utc>::MAX_UTC),
                    },
                );
                true
            }
        }
    }

    /// Current quota for an identifier without recording an attempt.
    pub async fn status(&self, identifier: &str) -> RateLimitStatus {
        self.status_at(identifier, Utc::now()).await
    }

    pub async fn status_at(&self, identifier: &str, now: DateTime<Utc>) -> RateLimitStatus {
        let entries = self.entries.lock().await;
        match entries.get(identifier) {
            Some(window) if window.reset_at >= now => RateLimitStatus {
                limit: self.limit,
                remaining: self.limit.saturating_sub(window.count),
                reset_at: Some(window.reset_at),
            },
            _ => RateLimitStatus {
                limit: self.limit,
                remaining: self.limit,
                reset_at: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> RateLimiter {
        RateLimiter::new(3, Duration::hours(1))
    }

    #[tokio::test]
    async fn allows_up_to_limit_then_blocks() {
        let limiter = limiter();
        let now = Utc::now();

        for _ in 0..3 {
            assert!(limiter.check_at("1.2.3.4", now).await);
        }
        assert!(!limiter.check_at("1.2.3.4", now).await);
        assert_eq!(limiter.status_at("1.2.3.4", now).await.remaining, 0);
    }

    #[tokio::test]
    async fn identifiers_are_independent() {
        let limiter = limiter();
        let now = Utc::now();

        for _ in 0..3 {
            limiter.check_at("a", now).await;
        }
        assert!(!limiter.check_at("a", now).await);
        assert!(limiter.check_at("b", now).await);
    }

    #[tokio::test]
    async fn window_resets_after_expiry() {
        let limiter = limiter();
        let now = Utc::now();

        for _ in 0..3 {
            limiter.check_at("a", now).await;
        }
        assert!(!limiter.check_at("a", now).await);

        let later = now + Duration::hours(1) + Duration::seconds(1);
        assert!(limiter.check_at("a", later).await);
        assert_eq!(limiter.status_at("a", later).await.remaining, 2);
    }

    #[tokio::test]
    async fn status_for_unknown_identifier_has_full_quota() {
        let limiter = limiter();
        let status = limiter.status("nobody").await;
        assert_eq!(status.remaining, 3);
        assert!(status.reset_at.is_none());
        assert_eq!(status.headers().len(), 2);
    }

    #[tokio::test]
    async fn headers_include_reset_when_window_active() {
        let limiter = limiter();
        let now = Utc::now();
        limiter.check_at("a", now).await;

        let headers = limiter.status_at("a", now).await.headers();
        assert_eq!(headers[0], ("x-ratelimit-limit", "3".to_string()));
        assert_eq!(headers[1], ("x-ratelimit-remaining", "2".to_string()));
        assert_eq!(headers[2].0, "x-ratelimit-reset");
        let reset: i64 = headers[2].1.parse().unwrap();
        assert!(reset >= (now + Duration::hours(1)).timestamp());
    }

    #[tokio::test]
    async fn zero_limit_blocks_everything() {
        let limiter = RateLimiter::new(0, Duration::hours(1));
        assert!(!limiter.check("a").await);
        assert_eq!(limiter.status("a").await.remaining, 0);
    }

    #[tokio::test]
    async fn huge_window_saturates_instead_of_overflowing() {
        let limiter = RateLimiter::new(1, Duration::seconds(9_000_000_000_000));
        let now = Utc::now();

        assert!(limiter.check_at("1.2.3.4", now).await);
        assert!(!limiter.check_at("1.2.3.4", now).await);

        let status = limiter.status_at("1.2.3.4", now).await;
        assert_eq!(status.reset_at, Some(DateTime::<Utc>::MAX_UTC));
        assert_eq!(status.headers().len(), 3);
    }

    #[tokio::test]
    async fn store_is_cleared_when_full() {
        let limiter = RateLimiter::new(1, Duration::hours(1));
        let now = Utc::now();

        assert!(limiter.check_at("first", now).await);
        assert!(!limiter.check_at("first", now).await);

        for i in 0..MAX_ENTRIES {
            limiter.check_at(&format!("ip-{i}"), now).await;
        }

        // The next call sees more than MAX_ENTRIES and wipes the store
        assert!(limiter.check_at("first", now).await);
    }
}
