//! Backoff policy for registry requests.
//!
//! A run makes at most three kinds of request, and a lost connection to the
//! registry mid-run would otherwise fail every remaining file. Requests that
//! never reached the registry (connect failures, timeouts) are retried with
//! doubling delays; anything the registry actually answered is final.

use std::future::Future;
use std::time::Duration;

/// How often, and how patiently, a registry request is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// Fail on the first error.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (0-based).
    pub fn delay(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(retry))
    }
}

/// Whether a failed registry request is worth repeating.
pub(crate) fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

/// Run `attempt` until it succeeds, fails with an error `retryable` rejects,
/// or `policy` runs out of retries.
pub(crate) async fn with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    endpoint: &str,
    retryable: impl Fn(&E) -> bool,
    attempt: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut retry = 0;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if retry < policy.max_retries && retryable(&e) => {
                let delay = policy.delay(retry);
                retry += 1;
                tracing::warn!(
                    endpoint,
                    retry,
                    max_retries = policy.max_retries,
                    "registry unreachable, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
