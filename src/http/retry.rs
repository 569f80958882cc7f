//! Retry policies for CoinGecko requests.
//!
//! Every endpoint is a GET, so every request is safe to repeat. The client
//! still defaults to [`RetryPolicy::None`]: the dashboard keeps last-good data
//! on failure and decides itself when to ask again.

use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Fail on the first error.
    #[default]
    None,
    /// Retry transport failures, 429 and 502/503/504 with backoff.
    Idempotent,
    /// Caller-provided backoff.
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// The backoff this policy runs with, `None` for no retries.
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::idempotent()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Initial delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Whether to add ±25% jitter to the delay.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
    /// Upper bound on a server-sent `Retry-After` wait. Longer waits fail
    /// the request instead of stalling the caller.
    pub max_retry_after: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![502, 503, 504],
            max_retry_after: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Backoff tuned for the public API tier, which rate-limits per minute:
    /// fewer attempts, longer initial wait, 429 included.
    pub fn idempotent() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(1_000),
            max_delay: Duration::from_secs(15),
            retryable_statuses: vec![429, 502, 503, 504],
            ..Self::default()
        }
    }

    /// Calculate delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base =
            self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }

    /// Wait before retrying a 429. A server hint wins over the backoff curve
    /// unless it exceeds `max_retry_after`, in which case `None` (give up).
    pub fn delay_for_rate_limit(
        &self,
        attempt: u32,
        retry_after_ms: Option<u64>,
    ) -> Option<Duration> {
        match retry_after_ms.map(Duration::from_millis) {
            Some(hint) if hint > self.max_retry_after => None,
            Some(hint) => Some(hint),
            None => Some(self.delay_for_attempt(attempt)),
        }
    }
}
