use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Quota reported by the `x-ratelimit-*` headers of the last response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}

impl RateLimitStatus {
    /// Parse the rate limit headers, if GitHub sent all of them
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Option<Self> {
        let read = |name: &str| -> Option<i64> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse().ok())
        };

        let limit = u32::try_from(read("x-ratelimit-limit")?).ok()?;
        let remaining = u32::try_from(read("x-ratelimit-remaining")?).ok()?;
        let reset_at = DateTime::from_timestamp(read("x-ratelimit-reset")?, 0)?;

        Some(Self {
            limit,
            remaining,
            reset_at,
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Remembers the most recent quota seen by a client.
///
/// Purely informational: requests are never delayed based on it.
#[derive(Clone, Default)]
pub struct RateLimitTracker {
    last: Arc<RwLock<Option<RateLimitStatus>>>,
}

impl RateLimitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from GitHub API response headers
    pub async fn update_from_headers(&self, headers: &reqwest::header::HeaderMap) {
        if let Some(status) = RateLimitStatus::from_headers(headers) {
            debug!(
                "Rate limit updated: {}/{} (resets at {})",
                status.remaining, status.limit, status.reset_at
            );
            *self.last.write().await = Some(status);
        }
    }

    pub async fn status(&self) -> Option<RateLimitStatus> {
        *self.last.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};

    fn headers(limit: &'static str, remaining: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", HeaderValue::from_static(limit));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static(remaining));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1700000000"));
        headers
    }

    #[test]
    fn test_parse_headers() {
        let status = RateLimitStatus::from_headers(&headers("60", "0")).unwrap();
        assert_eq!(status.limit, 60);
        assert!(status.is_exhausted());
        assert_eq!(status.reset_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_missing_headers() {
        assert!(RateLimitStatus::from_headers(&HeaderMap::new()).is_none());
    }

    #[tokio::test]
    async fn test_tracker_keeps_last_status() {
        let tracker = RateLimitTracker::new();
        assert!(tracker.status().await.is_none());

        tracker.update_from_headers(&headers("60", "59")).await;
        tracker.update_from_headers(&HeaderMap::new()).await;

        let status = tracker.status().await.unwrap();
        assert_eq!(status.remaining, 59);
    }
}
