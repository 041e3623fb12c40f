//! Bounded retry with back-off.
//!
//! Two policies are in use:
//!
//! - [`RetryPolicy::rate_limited`]: applied to every request, retries only
//!   HTTP 429 with exponential back-off, capped at
//!   [`RATE_LIMIT_MAX_DELAY_MS`] and jittered by ±25 %.
//! - [`RetryPolicy::linear`]: used for the snapshot document, retries any
//!   failure with `step × attempt` back-off and no jitter.
//!
//! Both have an explicit attempt ceiling; after the last attempt the most
//! recent error is returned.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Ceiling for a single rate-limit back-off sleep.
pub const RATE_LIMIT_MAX_DELAY_MS: u64 = 4_000;

/// Delay schedule between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// `step_ms × n` after the n-th failed attempt.
    Linear { step_ms: u64 },
    /// `base_ms × 2^(n-1)` after the n-th failed attempt, capped at `max_delay_ms`.
    Exponential { base_ms: u64, max_delay_ms: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Never below 1.
    pub max_attempts: u32,
    pub backoff: Backoff,
    /// Scale each delay by a random factor in `[0.75, 1.25)`.
    pub jitter: bool,
}

impl RetryPolicy {
    /// Policy for HTTP 429: `max_retries` extra attempts, first wait `base_ms`.
    ///
    /// | Retry | Sleep before it (`base_ms = 500`) |
    /// |-------|-----------------------------------|
    /// | 1     | 500 ms ± 25 %                     |
    /// | 2     | 1 000 ms ± 25 %                   |
    /// | 3     | 2 000 ms ± 25 %                   |
    #[must_use]
    pub fn rate_limited(max_retries: u32, base_ms: u64) -> Self {
        Self {
            max_attempts: max_retries.saturating_add(1),
            backoff: Backoff::Exponential {
                base_ms,
                max_delay_ms: RATE_LIMIT_MAX_DELAY_MS.max(base_ms),
            },
            jitter: true,
        }
    }

    /// Policy retrying any failure: `max_attempts` total, `step_ms × attempt` between them.
    #[must_use]
    pub fn linear(max_attempts: u32, step_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Backoff::Linear { step_ms },
            jitter: false,
        }
    }

    /// Single attempt, no retry.
    #[must_use]
    pub fn none() -> Self {
        Self::linear(1, 0)
    }

    /// Un-jittered delay after the `attempt`-th failure (1-based).
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let ms = match self.backoff {
            Backoff::Linear { step_ms } => step_ms.saturating_mul(u64::from(attempt)),
            Backoff::Exponential {
                base_ms,
                max_delay_ms,
            } => {
                let shift = attempt.saturating_sub(1).min(32);
                base_ms.saturating_mul(1u64 << shift).min(max_delay_ms)
            }
        };
        Duration::from_millis(ms)
    }

    fn sleep_for(&self, attempt: u32) -> Duration {
        let delay = self.delay_after(attempt);
        if !self.jitter {
            return delay;
        }
        delay.mul_f64(rand::random::<f64>() * 0.5 + 0.75)
    }
}

/// Runs `operation` until it succeeds, `should_retry` rejects the error, or
/// `policy.max_attempts` is reached.
///
/// Returns the last error when attempts are exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut, P>(
    policy: &RetryPolicy,
    should_retry: P,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
    P: Fn(&FetchError) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= max_attempts || !should_retry(&err) {
                    return Err(err);
                }
                let delay = policy.sleep_for(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "fetch failed, retrying after back-off"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
