//! Rate-limit retry wrapper for text generation.
//!
//! Only [`RemoteError::RateLimited`] is retried. Every other error is handed
//! back after the attempt that produced it, and running out of attempts is
//! reported as [`RetryOutcome::Exhausted`] instead of an error.

use crate::config::RetryConfig;
use crate::error::{RemoteError, RemoteResult};
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Attempt count and backoff schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    multiplier: u32,
}

impl RetryPolicy {
    /// Zero attempts or a zero multiplier are raised to 1.
    pub fn new(max_attempts: u32, initial_delay: Duration, multiplier: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            multiplier: multiplier.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pause before retry `retry` (1-indexed): `initial_delay * multiplier^(retry-1)`.
    pub fn delay_before_retry(&self, retry: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(retry.saturating_sub(1));
        self.initial_delay.saturating_mul(factor)
    }

    /// Total time spent sleeping when every attempt is rate limited.
    pub fn worst_case_wait(&self) -> Duration {
        (1..self.max_attempts)
            .map(|retry| self.delay_before_retry(retry))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.initial_delay_ms),
            config.multiplier,
        )
    }
}

/// How a retried call ended, when it did not end in a non-retryable error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    Success { value: T, attempts: u32 },

    /// Every attempt was rate limited.
    Exhausted { attempts: u32 },
}

/// Progress report handed to a [`RetryObserver`] before each pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryNotice {
    /// The attempt that was just rate limited (1-indexed)
    pub attempt: u32,
    pub max_attempts: u32,
    pub delay: Duration,
}

impl fmt::Display for RetryNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rate limit hit (attempt {}/{}). Retrying in {} seconds...",
            self.attempt,
            self.max_attempts,
            self.delay.as_secs()
        )
    }
}

/// Receives retry progress. Cannot influence control flow.
pub trait RetryObserver: Send + Sync {
    fn on_retry(&self, notice: &RetryNotice);
}

impl<F> RetryObserver for F
where
    F: Fn(&RetryNotice) + Send + Sync,
{
    fn on_retry(&self, notice: &RetryNotice) {
        self(notice)
    }
}

/// Observer that ignores every notice.
pub struct SilentObserver;

impl RetryObserver for SilentObserver {
    fn on_retry(&self, _notice: &RetryNotice) {}
}

/// Suspends the current task between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Non-blocking pause on the tokio timer, so other requests keep running.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Run `call` until it succeeds, fails with a non-rate-limit error, or the
/// policy runs out of attempts.
pub async fn call_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    observer: &dyn RetryObserver,
    mut call: F,
) -> Result<RetryOutcome<T>, RemoteError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RemoteResult<T>>,
{
    let max_attempts = policy.max_attempts();

    for attempt in 1..=max_attempts {
        match call().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!("Succeeded on attempt {attempt}/{max_attempts}");
                }
                return Ok(RetryOutcome::Success {
                    value,
                    attempts: attempt,
                });
            }
            Err(e) if e.is_rate_limited() => {
                if attempt == max_attempts {
                    tracing::error!("Giving up after {attempt} rate-limited attempts: {e}");
                    return Ok(RetryOutcome::Exhausted { attempts: attempt });
                }
                let notice = RetryNotice {
                    attempt,
                    max_attempts,
                    delay: policy.delay_before_retry(attempt),
                };
                tracing::warn!("{notice}");
                observer.on_retry(&notice);
                sleeper.sleep(notice.delay).await;
            }
            Err(e) => {
                tracing::debug!("Not retrying {} error: {e}", e.service());
                return Err(e);
            }
        }
    }

    // max_attempts is at least 1, so the loop always returns.
    Ok(RetryOutcome::Exhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    /// Sleeper that records requested pauses and returns immediately.
    #[derive(Default, Clone)]
    pub(crate) struct RecordingSleeper {
        pub(crate) pauses: Arc<Mutex<Vec<Duration>>>,
    }

    impl RecordingSleeper {
        pub(crate) fn pauses(&self) -> Vec<Duration> {
            self.pauses.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.pauses.lock().unwrap().push(duration);
        }
    }

    fn rate_limited() -> RemoteError {
        RemoteError::RateLimited {
            service: "mock".into(),
            message: "HTTP 429".into(),
        }
    }

    fn bad_request() -> RemoteError {
        RemoteError::Request {
            service: "mock".into(),
            message: "bad request".into(),
            status_code: Some(400),
        }
    }

    /// Replays a fixed sequence of outcomes and counts calls.
    struct Script {
        outcomes: Mutex<VecDeque<RemoteResult<String>>>,
        calls: AtomicU32,
    }

    impl Script {
        fn new(outcomes: Vec<RemoteResult<String>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: AtomicU32::new(0),
            }
        }

        async fn next(&self) -> RemoteResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("script ran out of outcomes")
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(100), 2)
    }

    #[test]
    fn test_delay_sequence_doubles() {
        let policy = policy();
        assert_eq!(policy.delay_before_retry(1), Duration::from_millis(100));
        assert_eq!(policy.delay_before_retry(2), Duration::from_millis(200));
        assert_eq!(policy.delay_before_retry(3), Duration::from_millis(400));
    }

    #[test]
    fn test_worst_case_wait() {
        // 100 * (2^(3-1) - 1)
        assert_eq!(policy().worst_case_wait(), Duration::from_millis(300));
        assert_eq!(
            RetryPolicy::new(1, Duration::from_millis(100), 2).worst_case_wait(),
            Duration::ZERO
        );
    }

    #[test]
    fn test_custom_multiplier() {
        let policy = RetryPolicy::new(4, Duration::from_millis(10), 3);
        assert_eq!(policy.delay_before_retry(3), Duration::from_millis(90));
    }

    #[test]
    fn test_new_clamps_zero_values() {
        let policy = RetryPolicy::new(0, Duration::from_millis(5), 0);
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.delay_before_retry(2), Duration::from_millis(5));
    }

    #[test]
    fn test_default_policy_matches_config_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.delay_before_retry(1), Duration::from_secs(100));
        assert_eq!(policy.worst_case_wait(), Duration::from_secs(300));
    }

    #[test]
    fn test_notice_message() {
        let notice = RetryNotice {
            attempt: 1,
            max_attempts: 3,
            delay: Duration::from_secs(100),
        };
        assert_eq!(
            notice.to_string(),
            "Rate limit hit (attempt 1/3). Retrying in 100 seconds..."
        );
    }

    #[tokio::test]
    async fn test_success_on_attempt_k_after_rate_limits() {
        for k in 1..=3u32 {
            let mut outcomes: Vec<RemoteResult<String>> =
                (1..k).map(|_| Err(rate_limited())).collect();
            outcomes.push(Ok("ok".into()));
            let script = Script::new(outcomes);
            let sleeper = RecordingSleeper::default();

            let outcome = call_with_retry(&policy(), &sleeper, &SilentObserver, || script.next())
                .await
                .unwrap();

            assert_eq!(
                outcome,
                RetryOutcome::Success {
                    value: "ok".into(),
                    attempts: k
                }
            );
            assert_eq!(script.calls(), k);
            assert_eq!(sleeper.pauses().len() as u32, k - 1);
        }
    }

    #[tokio::test]
    async fn test_two_rate_limits_then_success() {
        let script = Script::new(vec![
            Err(rate_limited()),
            Err(rate_limited()),
            Ok("ok".into()),
        ]);
        let sleeper = RecordingSleeper::default();

        let outcome = call_with_retry(&policy(), &sleeper, &SilentObserver, || script.next())
            .await
            .unwrap();

        assert!(matches!(outcome, RetryOutcome::Success { ref value, attempts: 3 } if value == "ok"));
        assert_eq!(script.calls(), 3);
        assert_eq!(
            sleeper.pauses(),
            vec![Duration::from_millis(100), Duration::from_millis(200)]
        );
    }

    #[tokio::test]
    async fn test_exhausted_returns_sentinel() {
        let script = Script::new(vec![
            Err(rate_limited()),
            Err(rate_limited()),
            Err(rate_limited()),
        ]);
        let sleeper = RecordingSleeper::default();

        let outcome = call_with_retry(&policy(), &sleeper, &SilentObserver, || script.next())
            .await
            .unwrap();

        assert_eq!(outcome, RetryOutcome::Exhausted { attempts: 3 });
        assert_eq!(script.calls(), 3);
        assert_eq!(
            sleeper.pauses(),
            vec![Duration::from_millis(100), Duration::from_millis(200)]
        );
    }

    #[tokio::test]
    async fn test_non_rate_limit_error_is_not_retried() {
        let script = Script::new(vec![Err(bad_request())]);
        let sleeper = RecordingSleeper::default();

        let err = call_with_retry(&policy(), &sleeper, &SilentObserver, || script.next())
            .await
            .unwrap_err();

        assert_eq!(err, bad_request());
        assert_eq!(script.calls(), 1);
        assert!(sleeper.pauses().is_empty());
    }

    #[tokio::test]
    async fn test_other_error_after_rate_limit_stops_retrying() {
        let script = Script::new(vec![Err(rate_limited()), Err(bad_request())]);
        let sleeper = RecordingSleeper::default();

        let err = call_with_retry(&policy(), &sleeper, &SilentObserver, || script.next())
            .await
            .unwrap_err();

        assert_eq!(err, bad_request());
        assert_eq!(script.calls(), 2);
        assert_eq!(sleeper.pauses(), vec![Duration::from_millis(100)]);
    }

    #[tokio::test]
    async fn test_single_attempt_policy_never_sleeps() {
        let script = Script::new(vec![Err(rate_limited())]);
        let sleeper = RecordingSleeper::default();
        let policy = RetryPolicy::new(1, Duration::from_millis(100), 2);

        let outcome = call_with_retry(&policy, &sleeper, &SilentObserver, || script.next())
            .await
            .unwrap();

        assert_eq!(outcome, RetryOutcome::Exhausted { attempts: 1 });
        assert!(sleeper.pauses().is_empty());
    }

    #[tokio::test]
    async fn test_observer_sees_each_retry() {
        let script = Script::new(vec![
            Err(rate_limited()),
            Err(rate_limited()),
            Err(rate_limited()),
        ]);
        let sleeper = RecordingSleeper::default();
        let seen = Mutex::new(Vec::new());
        let observer = |notice: &RetryNotice| seen.lock().unwrap().push(*notice);

        call_with_retry(&policy(), &sleeper, &observer, || script.next())
            .await
            .unwrap();

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].attempt, 1);
        assert_eq!(seen[1].delay, Duration::from_millis(200));
    }
}
