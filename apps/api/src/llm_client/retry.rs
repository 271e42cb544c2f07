//! Retry with exponential backoff for transient upstream failures.
//!
//! Wraps exactly one remote call. Classification is deliberately narrow:
//! only rate-limit / overload / timeout conditions are worth resending, and a
//! reply the extractor could not parse will not improve on resend.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::llm_client::LlmError;

/// Backoff configuration for retrying transient model-call failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first try; total tries = `max_retries + 1`.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub factor: f64,
    /// Fraction of the computed delay added as uniform random jitter.
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(500),
            factor: 2.0,
            jitter: 0.2,
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry that follows failed attempt `attempt` (1-based):
    /// `initial_delay * factor^(attempt - 1)` plus jitter in `[0, jitter * base]`.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_secs_f64() * self.factor.powi(attempt as i32 - 1);
        let jitter = if self.jitter > 0.0 {
            rand::thread_rng().gen_range(0.0..self.jitter) * base
        } else {
            0.0
        };
        Duration::from_secs_f64(base + jitter)
    }
}

/// Message fragments that mark an upstream failure as transient.
const TRANSIENT_MARKERS: &[&str] = &[
    "overloaded",
    "rate limit",
    "timed out",
    "timeout",
    "unavailable",
];

/// Whether an error is worth retrying.
///
/// Status 429 and 503 are transient, as is any error whose message mentions
/// an overload / rate-limit / timeout condition (case-insensitive). Extraction
/// and parse failures are never transient.
pub fn is_transient(error: &LlmError) -> bool {
    match error {
        LlmError::Api { status, message } => {
            *status == 429 || *status == 503 || message_is_transient(message)
        }
        LlmError::Http(e) => e.is_timeout() || message_is_transient(&e.to_string()),
        LlmError::NoJson
        | LlmError::Parse(_)
        | LlmError::EmptyContent
        | LlmError::DeadlineExceeded(_) => false,
    }
}

fn message_is_transient(message: &str) -> bool {
    let message = message.to_lowercase();
    TRANSIENT_MARKERS.iter().any(|m| message.contains(m))
}

/// Runs `operation` up to `max_retries + 1` times, backing off between
/// transient failures.
///
/// Non-transient errors and the final transient error propagate unmodified —
/// the caller sees the original status and message.
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, mut operation: F) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut attempt: u32 = 1;
    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("call succeeded on attempt {attempt}");
                }
                return Ok(result);
            }
            Err(error) if is_transient(&error) && attempt <= policy.max_retries => {
                let delay = policy.backoff_delay(attempt);
                warn!(
                    "transient error on attempt {attempt}: {error}; retrying in {}ms",
                    delay.as_millis()
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use tokio::time::Instant;

    use super::*;

    fn api_error(status: u16, message: &str) -> LlmError {
        LlmError::Api {
            status,
            message: message.to_string(),
        }
    }

    fn no_jitter_policy() -> RetryPolicy {
        RetryPolicy {
            jitter: 0.0,
            ..RetryPolicy::default()
        }
    }

    #[test]
    fn status_429_and_503_are_transient() {
        assert!(is_transient(&api_error(429, "Too Many Requests")));
        assert!(is_transient(&api_error(503, "Service Unavailable")));
    }

    #[test]
    fn other_statuses_are_fatal_without_marker() {
        assert!(!is_transient(&api_error(400, "Bad Request")));
        assert!(!is_transient(&api_error(401, "invalid api key")));
        assert!(!is_transient(&api_error(500, "internal error")));
    }

    #[test]
    fn transient_markers_match_case_insensitively() {
        assert!(is_transient(&api_error(500, "The model is overloaded")));
        assert!(is_transient(&api_error(500, "Rate Limit exceeded")));
        assert!(is_transient(&api_error(500, "request Timed Out")));
        assert!(is_transient(&api_error(500, "backend UNAVAILABLE")));
    }

    #[test]
    fn extraction_failures_are_never_transient() {
        assert!(!is_transient(&LlmError::NoJson));
        let parse = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(!is_transient(&LlmError::Parse(parse)));
        assert!(!is_transient(&LlmError::EmptyContent));
    }

    #[tokio::test(start_paused = true)]
    async fn two_transient_failures_then_success() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result = with_retry(&no_jitter_policy(), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n <= 2 {
                    Err(api_error(503, "Service Unavailable"))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 500ms after attempt 1, 1000ms after attempt 2.
        assert_eq!(start.elapsed(), Duration::from_millis(1_500));
    }

    #[tokio::test(start_paused = true)]
    async fn jittered_delays_are_non_decreasing_and_at_least_base() {
        let attempt_times = std::sync::Mutex::new(Vec::new());
        let calls = AtomicU32::new(0);

        let result = with_retry(&RetryPolicy::default(), || {
            attempt_times.lock().unwrap().push(Instant::now());
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n <= 3 {
                    Err(api_error(429, "Too Many Requests"))
                } else {
                    Ok(())
                }
            }
        })
        .await;
        assert!(result.is_ok());

        let times = attempt_times.lock().unwrap();
        assert_eq!(times.len(), 4);

        let mut previous = Duration::ZERO;
        for (i, pair) in times.windows(2).enumerate() {
            let delay = pair[1].duration_since(pair[0]);
            let base = Duration::from_millis(500 * (1 << i));
            assert!(delay >= base, "delay {i} below base backoff");
            assert!(delay >= previous, "delay {i} decreased");
            previous = delay;
        }
    }

    #[tokio::test]
    async fn fatal_error_propagates_immediately() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&no_jitter_policy(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(api_error(400, "Bad Request")) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        match result.unwrap_err() {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Bad Request");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_retries_then_propagates_last_error() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&no_jitter_policy(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(api_error(503, "Service Unavailable")) }
        })
        .await;

        // First try plus max_retries retries, then the last error surfaces.
        assert_eq!(calls.load(Ordering::SeqCst), 6);
        match result.unwrap_err() {
            LlmError::Api { status, .. } => assert_eq!(status, 503),
            other => panic!("unexpected error: {other}"),
        }
    }
}
