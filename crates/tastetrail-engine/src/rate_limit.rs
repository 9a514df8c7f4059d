//! Retry and pacing utilities for provider calls.
//!
//! [`retry_with_backoff`] retries transient HTTP failures (429, 5xx, network
//! errors) with exponential backoff. [`Pacer`] spaces out enrichment dispatches
//! so a burst of candidates does not trip the review provider's rate limit.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Interval, MissedTickBehavior};

use crate::error::ProviderError;

const MAX_BACKOFF_MS: u64 = 30_000;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable:
/// - [`ProviderError::RateLimited`]: HTTP 429.
/// - [`ProviderError::Http`]: timeout, connection failure or 5xx.
/// - [`ProviderError::UnexpectedStatus`] with a 5xx status.
///
/// Everything else (4xx, malformed bodies, bad configuration) is returned
/// immediately.
pub(crate) fn is_retriable(err: &ProviderError) -> bool {
    match err {
        ProviderError::RateLimited { .. } => true,
        ProviderError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ProviderError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        ProviderError::Deserialize { .. }
        | ProviderError::InvalidBaseUrl { .. }
        | ProviderError::Timeout { .. } => false,
    }
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// On a retriable error the function sleeps for `backoff_base_ms * 2^attempt`
/// milliseconds (capped at 30 s) and tries again, up to `max_retries`
/// additional attempts after the first try. The last error is returned once
/// retries are exhausted.
///
/// | Attempt | Sleep before next attempt (`backoff_base_ms = 500`) |
/// |---------|------------------------------------------------------|
/// | 0 (initial) | none |
/// | 1 | 500 ms |
/// | 2 | 1 000 ms |
/// | 3 | 2 000 ms |
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_ms = backoff_base_ms
            .saturating_mul(1u64 << attempt.min(62))
            .min(MAX_BACKOFF_MS);
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms,
            error = %err,
            "transient provider error; retrying after backoff"
        );
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        attempt += 1;
    }
}

/// Spaces out calls to a rate-limited provider.
///
/// Every [`Pacer::ready`] waits for the next tick of a shared interval, so
/// concurrent callers are released one per `spacing`. The first call is
/// released immediately. A zero spacing disables pacing.
#[derive(Debug)]
pub struct Pacer {
    interval: Option<Mutex<Interval>>,
}

impl Pacer {
    /// Must be called from within a Tokio runtime when `spacing` is non-zero.
    #[must_use]
    pub fn new(spacing: Duration) -> Self {
        if spacing.is_zero() {
            return Self::unpaced();
        }
        let mut interval = tokio::time::interval(spacing);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval: Some(Mutex::new(interval)),
        }
    }

    #[must_use]
    pub fn unpaced() -> Self {
        Self { interval: None }
    }

    pub async fn ready(&self) {
        if let Some(interval) = &self.interval {
            interval.lock().await.tick().await;
        }
    }
}
