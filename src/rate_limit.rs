//! Self-imposed request throttling.
//!
//! Scryfall publishes no client-side rate-limit feedback, so every outbound
//! request waits a fixed delay first. There is no backoff and no header tracking.

use std::thread;
use std::time::Duration;

use tracing::warn;

/// Fixed-delay limiter applied before every outbound request.
#[derive(Debug, Clone, Copy)]
pub struct RateLimiter {
    delay: Duration,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Block the calling thread for the configured delay.
    ///
    /// A zero delay returns immediately without logging.
    pub fn wait(&self, method: &str, url: &str) {
        if self.delay.is_zero() {
            return;
        }
        warn!(
            delay_ms = self.delay.as_millis() as u64,
            method,
            url,
            "Self rate limiting before request"
        );
        thread::sleep(self.delay);
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_RATE_LIMIT)
    }
}
