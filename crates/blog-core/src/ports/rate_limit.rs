//! Rate limiting port.

use std::time::Duration;

/// Rate limiter trait - abstraction over rate limiting backends.
pub trait RateLimiter: Send + Sync {
    /// Record a request for `key` and report whether it may proceed.
    fn check(&self, key: &str) -> RateLimitResult;
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    /// Time until the next request for this key would be allowed.
    pub retry_after: Duration,
}

impl RateLimitResult {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            retry_after: Duration::ZERO,
        }
    }

    pub fn limited(retry_after: Duration) -> Self {
        Self {
            allowed: false,
            retry_after,
        }
    }
}
