// ── Bounded retry with exponential backoff ──
//
// Wraps flaky Dashboard calls (the per-device clients endpoint above all).
// Only transient errors are retried; everything else returns immediately.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::Error;

/// Exponential backoff configuration for retried API calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay before the first retry. Default: 2s.
    pub initial_delay: Duration,

    /// Upper bound on backoff delay. Default: 30s.
    pub max_delay: Duration,

    /// Total attempts, including the first one. Default: 5.
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
            max_attempts: 5,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based).
    ///
    /// `delay = min(initial * 2^attempt, max)`
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1_u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }

    /// Delay before retry number `attempt` (0-based) after `err`.
    ///
    /// A `Retry-After` hint raises the delay, but never past `max_delay`.
    pub fn delay_after(&self, attempt: u32, err: &Error) -> Duration {
        let delay = self.backoff(attempt);
        match err {
            Error::RateLimited { retry_after_secs } => delay
                .max(Duration::from_secs(*retry_after_secs))
                .min(self.max_delay),
            _ => delay,
        }
    }

    /// Run `op` until it succeeds, fails with a non-transient error, or
    /// the attempt budget is spent.
    ///
    /// Rate-limit responses wait as long as the Dashboard asked, up to
    /// `max_delay`.
    pub async fn run<T, F, Fut>(&self, endpoint: &str, mut op: F) -> Result<T, Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            let err = match op().await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_transient() => return Err(err),
                Err(err) => err,
            };

            attempt += 1;
            if attempt >= max_attempts {
                return Err(if max_attempts == 1 {
                    err
                } else {
                    Error::RetriesExhausted {
                        endpoint: endpoint.to_owned(),
                        attempts: attempt,
                        source: Box::new(err),
                    }
                });
            }

            let delay = self.delay_after(attempt - 1, &err);

            warn!(
                endpoint,
                attempt,
                max_attempts,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "API error, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
