//! Bounded exponential-backoff retry built on tokio-retry2.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use taleweaver_error::RetryableError;
use tokio_retry2::strategy::jitter;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};

/// Retry settings for a single backend call.
///
/// `max_attempts` counts the first call, so the default of 3 means one call
/// plus two retries, waiting 1s and then 2s.
///
/// # Example
///
/// ```toml
/// [retry]
/// max_attempts = 3
/// initial_delay_ms = 1000
/// max_delay_secs = 60
/// jitter = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first call
    max_attempts: u32,
    /// Delay before the first retry, doubled for each later retry
    initial_delay_ms: u64,
    /// Upper bound on any single delay
    max_delay_secs: u64,
    /// Randomise each delay to spread out concurrent callers
    jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            max_delay_secs: 60,
            jitter: false,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given attempt bound and first delay.
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay_ms: initial_delay.as_millis() as u64,
            ..Self::default()
        }
    }

    /// Builder method to enable or disable jitter.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Builder method to cap individual delays.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay_secs = max_delay.as_secs();
        self
    }

    /// Delays slept between attempts, before jitter.
    ///
    /// There is one entry per retry, so `max_attempts - 1` entries in total.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use taleweaver_rate_limit::RetryPolicy;
    ///
    /// let policy = RetryPolicy::new(3, Duration::from_secs(1));
    /// assert_eq!(
    ///     policy.delays(),
    ///     vec![Duration::from_secs(1), Duration::from_secs(2)]
    /// );
    /// ```
    pub fn delays(&self) -> Vec<Duration> {
        let cap = Duration::from_secs(self.max_delay_secs);
        (0..self.max_attempts.saturating_sub(1))
            .map(|retry| {
                let factor = 2u64.saturating_pow(retry);
                Duration::from_millis(self.initial_delay_ms.saturating_mul(factor)).min(cap)
            })
            .collect()
    }

    /// Run `operation`, retrying transient failures with backoff.
    ///
    /// Errors for which [`RetryableError::is_retryable`] is false are returned
    /// immediately. When every attempt fails transiently the last error is
    /// returned.
    #[instrument(skip_all, fields(max_attempts = self.max_attempts))]
    pub async fn execute<F, Fut, R, E>(&self, mut operation: F) -> Result<R, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: RetryableError + std::fmt::Display,
    {
        let schedule: Vec<Duration> = if self.jitter {
            self.delays().into_iter().map(jitter).collect()
        } else {
            self.delays()
        };

        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0u32;

        Retry::spawn(schedule, || {
            attempt += 1;
            let current = attempt;
            let call = operation();
            async move {
                match call.await {
                    Ok(value) => Ok(value),
                    Err(e) if e.is_retryable() => {
                        warn!(
                            attempt = current,
                            max_attempts,
                            error = %e,
                            "Transient backend error"
                        );
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => {
                        debug!(attempt = current, error = %e, "Permanent backend error, not retrying");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await
    }
}
