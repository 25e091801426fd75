//! In-memory rate limiter using governor crate.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota};

use blog_core::ports::{RateLimitResult, RateLimiter};

/// In-memory rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    fn quota(&self) -> Result<Quota, RateLimitConfigError> {
        let burst = NonZeroU32::new(self.max_requests).ok_or(RateLimitConfigError::ZeroRequests)?;
        Quota::with_period(self.window / self.max_requests)
            .map(|q| q.allow_burst(burst))
            .ok_or(RateLimitConfigError::ZeroWindow)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RateLimitConfigError {
    #[error("max_requests must be greater than zero")]
    ZeroRequests,

    #[error("window must be longer than max_requests nanoseconds")]
    ZeroWindow,
}

/// Per-key in-memory rate limiter using the GCRA algorithm.
///
/// Limits are per-process, not distributed across instances.
pub struct InMemoryRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Result<Self, RateLimitConfigError> {
        let quota = config.quota()?;
        tracing::debug!(
            max_requests = config.max_requests,
            window_secs = config.window.as_secs(),
            "Rate limiter configured"
        );

        Ok(Self {
            limiter: DefaultKeyedRateLimiter::keyed(quota),
            clock: DefaultClock::default(),
        })
    }

    /// Drop state for keys whose quota has fully replenished.
    pub fn purge_idle(&self) {
        self.limiter.retain_recent();
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.limiter.len()
    }
}

impl RateLimiter for InMemoryRateLimiter {
    fn check(&self, key: &str) -> RateLimitResult {
        match self.limiter.check_key(&key.to_owned()) {
            Ok(()) => RateLimitResult::allowed(),
            Err(not_until) => {
                RateLimitResult::limited(not_until.wait_time_from(self.clock.now()))
            }
        }
    }
}
