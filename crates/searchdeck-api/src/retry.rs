// Retry logic with linear backoff
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub attempt_timeout: Duration,
    pub backoff_step: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            attempt_timeout: Duration::from_millis(10_000),
            backoff_step: Duration::from_millis(1_000), // 1s, 2s, 3s, ...
        }
    }
}

/// Execute a function with retry logic
///
/// Uses linear backoff: after the n-th failed attempt we wait n times the
/// backoff step before trying again. This is polite to the backend and helps
/// when there are temporary network issues.
///
/// Only transport-level failures should reach this as errors. A response that
/// arrived with a non-2xx status is still a response; callers resolve those
/// as `Ok` and inspect the status afterwards, so they never trigger a retry.
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!("Request succeeded after {} retries", attempt);
                }
                return Ok(result);
            }
            Err(err) => {
                attempt += 1;

                if attempt > config.max_retries {
                    warn!("Request failed after {} attempts: {}", attempt, err);
                    return Err(err);
                }

                let delay = config.backoff_step * attempt;
                warn!(
                    "Request failed (attempt {}/{}): {}. Retrying in {}ms...",
                    attempt,
                    config.max_retries,
                    err,
                    delay.as_millis()
                );

                sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            attempt_timeout: Duration::from_millis(100),
            backoff_step: Duration::from_millis(1_000),
        }
    }

    #[tokio::test]
    async fn test_retry_succeeds_immediately() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let config = RetryConfig::default();
        let call_count = AtomicU32::new(0);

        let result = with_retry(&config, || async {
            call_count.fetch_add(1, Ordering::SeqCst);
            Ok::<_, &str>(42)
        })
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_succeeds_after_one_failure() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let config = fast_config(3);
        let call_count = AtomicU32::new(0);

        let result = with_retry(&config, || async {
            let count = call_count.fetch_add(1, Ordering::SeqCst) + 1;
            if count < 2 {
                Err("temporary failure")
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_gives_up_after_max_attempts() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let config = fast_config(2);
        let call_count = AtomicU32::new(0);

        let result = with_retry(&config, || async {
            call_count.fetch_add(1, Ordering::SeqCst);
            Err::<i32, _>("permanent failure")
        })
        .await;

        assert_eq!(result, Err("permanent failure"));
        assert_eq!(call_count.load(Ordering::SeqCst), 3); // Initial attempt + 2 retries
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_means_single_attempt() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let config = fast_config(0);
        let call_count = AtomicU32::new(0);

        let result = with_retry(&config, || async {
            call_count.fetch_add(1, Ordering::SeqCst);
            Err::<i32, _>("nope")
        })
        .await;

        assert_eq!(result, Err("nope"));
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_delays_are_linear() {
        // With paused time the sleeps auto-advance the clock, so elapsed
        // virtual time is exactly the sum of backoff delays: 1s + 2s + 3s.
        let config = fast_config(3);
        let start = tokio::time::Instant::now();

        let result = with_retry(&config, || async { Err::<i32, _>("down") }).await;

        assert_eq!(result, Err("down"));
        assert_eq!(start.elapsed(), Duration::from_millis(6_000));
    }
}
