//! Exponential backoff for calls to the translation provider.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Backoff schedule: `initial_delay * backoff_multiplier^(n-1)` before the
/// n-th retry, capped at `max_delay`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts, the first call included
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }

    pub fn with_max_delay(self, max_delay: Duration) -> Self {
        Self { max_delay, ..self }
    }

    pub fn with_backoff_multiplier(self, backoff_multiplier: f64) -> Self {
        Self {
            backoff_multiplier,
            ..self
        }
    }

    /// Translation API preset: 3 attempts, waiting 1s then 2s.
    pub fn api_call() -> Self {
        Self::new(3, Duration::from_secs(1)).with_max_delay(Duration::from_secs(5))
    }

    /// Wait before the given 0-indexed attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match attempt {
            0 => Duration::ZERO,
            n => {
                let factor = self.backoff_multiplier.powi(n as i32 - 1);
                let millis = (self.initial_delay.as_millis() as f64 * factor) as u64;
                Duration::from_millis(millis).min(self.max_delay)
            }
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::api_call()
    }
}

/// Run `operation` until it succeeds, fails with an error `should_retry`
/// rejects, or runs out of attempts. The last error is returned on failure.
///
/// # Panics
/// Panics if `config.max_attempts` is 0
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    P: Fn(&E) -> bool,
{
    assert!(
        config.max_attempts >= 1,
        "RetryConfig.max_attempts must be >= 1, got {}",
        config.max_attempts
    );

    let mut attempt = 0;
    loop {
        let delay = config.delay_for_attempt(attempt);
        if !delay.is_zero() {
            debug!("{}: waiting {:?} before attempt {}", operation_name, delay, attempt + 1);
            sleep(delay).await;
        }

        let error = match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("{}: recovered on attempt {}", operation_name, attempt + 1);
                }
                return Ok(value);
            }
            Err(error) => error,
        };

        attempt += 1;

        if !should_retry(&error) {
            debug!("{}: giving up on non-retryable error: {}", operation_name, error);
            return Err(error);
        }

        if attempt >= config.max_attempts {
            warn!(
                "{}: failed after {} attempts: {}",
                operation_name, config.max_attempts, error
            );
            return Err(error);
        }

        warn!(
            "{}: attempt {}/{} failed: {}",
            operation_name, attempt, config.max_attempts, error
        );
    }
}
