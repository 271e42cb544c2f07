//! Sliding-window rate limiter for outbound model calls.
//!
//! One limiter instance is constructed at startup and handed to every call
//! path through `AppState` — there is no ambient global. Callers pass it
//! explicitly into `GeminiClient::safe_call`.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Bounds outbound call frequency to `max_requests` per trailing `window`.
///
/// Timestamps of admitted calls are purged lazily on each check. The mutex is
/// required because the tokio runtime schedules callers across OS threads;
/// it is never held across a sleep.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    requests: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: Mutex::new(VecDeque::new()),
        }
    }

    /// Suspends until recording one more call keeps the trailing window at or
    /// under `max_requests`, then records the call and returns.
    ///
    /// Each iteration purges expired timestamps, and either admits the call or
    /// sleeps until the oldest entry leaves the window and re-checks. There is
    /// no fairness guarantee across concurrent waiters; admission order is
    /// scheduler wake order.
    pub async fn wait_if_needed(&self) {
        loop {
            let wait = {
                let mut requests = self.requests.lock().await;
                let now = Instant::now();

                while let Some(&oldest) = requests.front() {
                    if now.duration_since(oldest) >= self.window {
                        requests.pop_front();
                    } else {
                        break;
                    }
                }

                if requests.len() < self.max_requests {
                    requests.push_back(now);
                    return;
                }

                match requests.front() {
                    Some(&oldest) => self.window.saturating_sub(now.duration_since(oldest)),
                    None => self.window,
                }
            };

            debug!("Rate limit reached, waiting {}ms", wait.as_millis());
            tokio::time::sleep(wait).await;
        }
    }
}
