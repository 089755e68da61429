//! Retrying text fetch on top of a single-attempt [`Transport`].

use async_trait::async_trait;
use tokio::time::sleep;

use super::config::RetryPolicy;
use super::error::{EdgarError, Result};

/// A single GET attempt returning the response body as text.
///
/// Implementations report connection-level failures as
/// [`EdgarError::TransientNetwork`]; every other error is treated as final.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_text(&self, url: &str) -> Result<String>;
}

/// Wraps a [`Transport`] with bounded retries and linear backoff.
#[derive(Debug, Clone)]
pub struct ResilientFetcher<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> ResilientFetcher<T> {
    /// Fails with `ConfigError` when the policy allows no attempts at all.
    pub fn new(transport: T, policy: RetryPolicy) -> Result<Self> {
        if policy.max_attempts == 0 {
            return Err(EdgarError::ConfigError(
                "Retry policy must allow at least one attempt".to_string(),
            ));
        }
        Ok(Self { transport, policy })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetches `url`, retrying connection failures.
    ///
    /// The wait before each retry grows by one backoff step, starting at zero.
    /// Once the attempt budget is spent the last connection error is returned.
    /// Non-transient errors are returned immediately.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            tracing::debug!("GET {} (attempt {}/{})", url, attempt, self.policy.max_attempts);

            match self.transport.get_text(url).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_transient() => {
                    if attempt >= self.policy.max_attempts {
                        tracing::warn!(
                            "Giving up on {} after {} attempts: {}",
                            url,
                            attempt,
                            err
                        );
                        return Err(err);
                    }
                    let wait = self.policy.delay_for(attempt - 1);
                    tracing::warn!(
                        "{}. Attempt {}/{}. Retrying in {:?}.",
                        err,
                        attempt,
                        self.policy.max_attempts,
                        wait
                    );
                    sleep(wait).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    /// Fails with a connection error `failures` times, then succeeds.
    struct Flaky {
        failures: u32,
        calls: AtomicU32,
    }

    impl Flaky {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for Flaky {
        async fn get_text(&self, url: &str) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(EdgarError::TransientNetwork {
                    url: url.to_string(),
                    message: "connection reset".to_string(),
                })
            } else {
                Ok("<html></html>".to_string())
            }
        }
    }

    struct Missing;

    #[async_trait]
    impl Transport for Missing {
        async fn get_text(&self, _url: &str) -> Result<String> {
            Err(EdgarError::NotFound)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_four_connection_failures() {
        let fetcher = ResilientFetcher::new(Flaky::new(4), RetryPolicy::default()).unwrap();
        let started = Instant::now();

        let body = fetcher.fetch("https://www.sec.gov/").await.unwrap();

        assert_eq!(body, "<html></html>");
        assert_eq!(fetcher.transport().calls(), 5);
        // 0s + 1s + 2s + 3s of backoff
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(6));
        assert!(elapsed < Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn first_retry_is_immediate() {
        let fetcher = ResilientFetcher::new(Flaky::new(1), RetryPolicy::default()).unwrap();
        let started = Instant::now();

        fetcher.fetch("https://www.sec.gov/").await.unwrap();

        assert_eq!(fetcher.transport().calls(), 2);
        assert!(started.elapsed() < Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn five_connection_failures_surface_the_error() {
        let fetcher = ResilientFetcher::new(Flaky::new(5), RetryPolicy::default()).unwrap();

        let result = fetcher.fetch("https://www.sec.gov/").await;

        assert!(matches!(result, Err(EdgarError::TransientNetwork { .. })));
        assert_eq!(fetcher.transport().calls(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn attempt_cap_follows_the_policy() {
        let policy = RetryPolicy {
            max_attempts: 2,
            backoff_step: Duration::from_millis(10),
        };
        let fetcher = ResilientFetcher::new(Flaky::new(3), policy).unwrap();

        assert!(fetcher.fetch("https://www.sec.gov/").await.is_err());
        assert_eq!(fetcher.transport().calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_step_follows_the_policy() {
        let policy = RetryPolicy {
            max_attempts: 5,
            backoff_step: Duration::from_secs(3),
        };
        let fetcher = ResilientFetcher::new(Flaky::new(3), policy).unwrap();
        let started = Instant::now();

        fetcher.fetch("https://www.sec.gov/").await.unwrap();

        let expected: Duration = (0..3).map(|retry| policy.delay_for(retry)).sum();
        assert_eq!(expected, Duration::from_secs(9));
        let elapsed = started.elapsed();
        assert!(elapsed >= expected);
        assert!(elapsed < expected + Duration::from_secs(1));
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let fetcher = ResilientFetcher::new(Missing, RetryPolicy::default()).unwrap();
        let result = fetcher.fetch("https://www.sec.gov/missing").await;
        assert!(matches!(result, Err(EdgarError::NotFound)));
    }

    #[test]
    fn zero_attempts_is_a_config_error() {
        let policy = RetryPolicy {
            max_attempts: 0,
            backoff_step: Duration::from_secs(1),
        };
        let result = ResilientFetcher::new(Missing, policy);
        assert!(matches!(result, Err(EdgarError::ConfigError(_))));
    }
}
