//! Bounded retry with an injectable backoff policy.
//!
//! The pipeline default mirrors the upstream contract exactly: 3 retries
//! (4 total attempts) with a constant 1 second delay and no exponential
//! growth. The constant delay is a deliberate simplification, not a bug.
//! An exponential policy is available for callers that want one.

use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchError;
use crate::http_client::{HttpClient, HttpRequest};

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Fixed delay between retries.
    Fixed { delay: Duration },
    /// Exponential delay: `base * (factor ^ attempt)`, capped at `max`,
    /// optionally with +/- 50% random jitter.
    Exponential {
        base: Duration,
        factor: f64,
        max: Duration,
        jitter: bool,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Fixed {
            delay: Duration::from_millis(1_000),
        }
    }
}

impl Backoff {
    /// Delay before retry number `attempt` (0-based).
    pub fn delay(self, attempt: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let scale = factor.powi(attempt as i32);
                let seconds = (base.as_secs_f64() * scale).min(max.as_secs_f64());
                let mut delay = Duration::from_secs_f64(seconds);

                if jitter {
                    let jitter_ms = (delay.as_millis() as f64 * 0.5) as u64;
                    let offset = fastrand::u64(0..=(jitter_ms * 2));
                    let total_ms = delay.as_millis() as i64 + (offset as i64 - jitter_ms as i64);
                    delay = Duration::from_millis(total_ms.max(0) as u64);
                }

                delay
            }
        }
    }
}

/// Retry policy: attempt bound plus backoff.
///
/// Total attempts = `max_retries + 1`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: Backoff::default(),
        }
    }
}

impl RetryConfig {
    pub fn fixed(delay: Duration, max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: Backoff::Fixed { delay },
        }
    }

    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }
}

/// Issues GET requests through an [`HttpClient`], retrying transport
/// failures and non-success statuses up to the configured bound.
///
/// The retry loop is iterative and the attempt counter explicit; once a
/// fetch sequence starts it runs to completion (success or exhaustion);
/// there is no cancellation hook. The delay wait is a non-blocking
/// `tokio::time::sleep`, so concurrent tasks keep making progress.
#[derive(Clone)]
pub struct RetryingFetcher {
    client: Arc<dyn HttpClient>,
    config: RetryConfig,
}

impl RetryingFetcher {
    pub fn new(client: Arc<dyn HttpClient>, config: RetryConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    pub fn client(&self) -> Arc<dyn HttpClient> {
        Arc::clone(&self.client)
    }

    /// Fetch `url`, returning the decoded body of the first successful
    /// attempt, or the last error once retries are exhausted.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt: u32 = 0;

        loop {
            let outcome = self.client.execute(HttpRequest::get(url)).await;

            let error = match outcome {
                Ok(response) if response.is_success() => return Ok(response.body),
                Ok(response) => FetchError::HttpStatus {
                    status: response.status,
                },
                Err(error) => FetchError::Network(error.message().to_owned()),
            };

            if attempt >= self.config.max_retries {
                return Err(error);
            }

            let delay = self.config.delay_for_attempt(attempt);
            attempt += 1;
            // The URL carries the API key as a query parameter; log the
            // attempt and cause, never the target.
            tracing::warn!(attempt, %error, "request failed, retrying after backoff");
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::{future::Future, pin::Pin};

    use super::*;
    use crate::http_client::{HttpError, HttpResponse};

    #[test]
    fn fixed_backoff_is_constant() {
        let backoff = Backoff::Fixed {
            delay: Duration::from_millis(100),
        };
        assert_eq!(backoff.delay(0), Duration::from_millis(100));
        assert_eq!(backoff.delay(7), Duration::from_millis(100));
    }

    #[test]
    fn exponential_backoff_grows_and_caps() {
        let backoff = Backoff::Exponential {
            base: Duration::from_millis(100),
            factor: 2.0,
            max: Duration::from_secs(1),
            jitter: false,
        };
        assert_eq!(backoff.delay(0), Duration::from_millis(100));
        assert_eq!(backoff.delay(2), Duration::from_millis(400));
        assert_eq!(backoff.delay(5), Duration::from_secs(1));
    }

    #[test]
    fn default_policy_is_three_fixed_one_second_retries() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(1_000));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(1_000));
    }

    /// Fails the first `failures` attempts, then succeeds.
    struct FlakyClient {
        failures: usize,
        attempts: AtomicUsize,
    }

    impl FlakyClient {
        fn new(failures: usize) -> Self {
            Self {
                failures,
                attempts: AtomicUsize::new(0),
            }
        }

        fn attempt_count(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    impl HttpClient for FlakyClient {
        fn execute<'a>(
            &'a self,
            _request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            let failures = self.failures;
            Box::pin(async move {
                if attempt < failures {
                    Err(HttpError::new("connection refused"))
                } else {
                    Ok(HttpResponse::ok_json(r#"{"ok":true}"#))
                }
            })
        }
    }

    fn fast_config() -> RetryConfig {
        RetryConfig::fixed(Duration::from_millis(1), 3)
    }

    #[tokio::test]
    async fn succeeds_on_first_attempt_without_retrying() {
        let client = Arc::new(FlakyClient::new(0));
        let fetcher = RetryingFetcher::new(client.clone(), fast_config());

        let body = fetcher.fetch("https://example.test/query").await;

        assert!(body.is_ok());
        assert_eq!(client.attempt_count(), 1);
    }

    #[tokio::test]
    async fn retries_transient_failures_then_succeeds() {
        let client = Arc::new(FlakyClient::new(2));
        let fetcher = RetryingFetcher::new(client.clone(), fast_config());

        let body = fetcher
            .fetch("https://example.test/query")
            .await
            .expect("third attempt succeeds");

        assert_eq!(body, r#"{"ok":true}"#);
        assert_eq!(client.attempt_count(), 3);
    }

    #[tokio::test]
    async fn exhausts_retries_after_four_attempts() {
        let client = Arc::new(FlakyClient::new(usize::MAX));
        let fetcher = RetryingFetcher::new(client.clone(), fast_config());

        let error = fetcher
            .fetch("https://example.test/query")
            .await
            .expect_err("never succeeds");

        assert!(matches!(error, FetchError::Network(_)));
        assert_eq!(client.attempt_count(), 4);
    }

    /// Always answers with a fixed non-success status.
    struct StatusClient {
        status: u16,
        attempts: AtomicUsize,
    }

    impl HttpClient for StatusClient {
        fn execute<'a>(
            &'a self,
            _request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            let status = self.status;
            Box::pin(async move {
                Ok(HttpResponse {
                    status,
                    body: String::new(),
                })
            })
        }
    }

    #[tokio::test]
    async fn non_success_status_is_retried_and_surfaced() {
        let client = Arc::new(StatusClient {
            status: 503,
            attempts: AtomicUsize::new(0),
        });
        let fetcher = RetryingFetcher::new(client.clone(), fast_config());

        let error = fetcher
            .fetch("https://example.test/query")
            .await
            .expect_err("status never improves");

        assert!(matches!(error, FetchError::HttpStatus { status: 503 }));
        assert_eq!(client.attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn default_policy_waits_one_second_between_attempts() {
        let client = Arc::new(FlakyClient::new(1));
        let fetcher = RetryingFetcher::new(client.clone(), RetryConfig::default());

        let started = tokio::time::Instant::now();
        fetcher
            .fetch("https://example.test/query")
            .await
            .expect("second attempt succeeds");

        assert_eq!(client.attempt_count(), 2);
        assert!(started.elapsed() >= Duration::from_millis(1_000));
    }
}
