//! Rate Limiting and Retry
//!
//! Outbound calls are wrapped in a fixed order: rate-limit outermost, then
//! retry with exponential backoff, then the cache, then the raw fetch. This
//! module provides the first two layers.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::Result;

struct Window {
    calls: u32,
    window_start: Instant,
}

/// Per-endpoint sliding-window call budget.
///
/// When the budget for a window is exhausted, `acquire` blocks until the
/// window resets (synchronous backpressure); it never rejects.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Consume one unit of budget for `endpoint`, sleeping through window
    /// resets as needed.
    pub async fn acquire(&self, endpoint: &str, max_calls: u32, period: Duration) {
        loop {
            // The lock must not be held across the sleep below.
            let wait = {
                let mut windows = match self.windows.lock() {
                    Ok(w) => w,
                    Err(_) => return,
                };
                let now = Instant::now();
                let window = windows.entry(endpoint.to_string()).or_insert(Window {
                    calls: 0,
                    window_start: now,
                });

                if now.duration_since(window.window_start) >= period {
                    window.calls = 0;
                    window.window_start = now;
                }

                if window.calls < max_calls {
                    window.calls += 1;
                    None
                } else {
                    Some(period - now.duration_since(window.window_start))
                }
            };

            match wait {
                None => return,
                Some(delay) => {
                    tracing::info!(
                        endpoint,
                        wait_secs = delay.as_secs_f64(),
                        "rate limit reached, waiting for window reset"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Calls consumed in the current window for an endpoint
    pub fn calls_in_window(&self, endpoint: &str) -> u32 {
        self.windows
            .lock()
            .ok()
            .and_then(|w| w.get(endpoint).map(|win| win.calls))
            .unwrap_or(0)
    }
}

/// Retry with exponential backoff.
///
/// Only errors reporting `is_retryable()` are retried; a 404 surfaces
/// immediately. After `max_retries` retries the last error is returned to
/// the caller, which decides whether to degrade gracefully.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        let exp = self.base_delay.as_secs_f64() * 2f64.powi(attempt as i32);
        Duration::from_secs_f64(exp.min(self.max_delay.as_secs_f64()))
    }

    /// Run `op`, retrying transient failures with backoff.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0u32;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    let delay = self.delay_for(attempt);
                    attempt += 1;
                    tracing::warn!(
                        label,
                        attempt,
                        max = self.max_retries,
                        delay_secs = delay.as_secs_f64(),
                        error = %err,
                        "retrying after failure"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    if attempt > 0 {
                        tracing::error!(label, attempts = attempt + 1, error = %err, "retries exhausted");
                    }
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntelError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transient() -> IntelError {
        IntelError::Status {
            status: 503,
            endpoint: "test".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_budget_blocks_until_window_reset() {
        let limiter = RateLimiter::new();
        let period = Duration::from_secs(60);

        for _ in 0..3 {
            limiter.acquire("api", 3, period).await;
        }
        assert_eq!(limiter.calls_in_window("api"), 3);

        // the 4th call must wait out the remainder of the window
        let before = Instant::now();
        limiter.acquire("api", 3, period).await;
        assert!(Instant::now().duration_since(before) >= period);
        assert_eq!(limiter.calls_in_window("api"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_resets_after_period() {
        let limiter = RateLimiter::new();
        let period = Duration::from_secs(60);

        limiter.acquire("api", 2, period).await;
        limiter.acquire("api", 2, period).await;

        tokio::time::advance(period).await;

        // fresh window: proceeds immediately
        let before = Instant::now();
        limiter.acquire("api", 2, period).await;
        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_succeeds_after_transient_failures() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1), Duration::from_secs(60));
        let calls = AtomicU32::new(0);

        let started = Instant::now();
        let result = policy
            .run("test", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 3 {
                        Err(transient())
                    } else {
                        Ok(7u32)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        // exactly three backoff delays: 1s + 2s + 4s
        assert_eq!(
            Instant::now().duration_since(started),
            Duration::from_secs(7)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_exhaustion_surfaces_last_error() {
        let policy = RetryPolicy::new(2, Duration::from_secs(1), Duration::from_secs(60));
        let calls = AtomicU32::new(0);

        let result: Result<u32> = policy
            .run("test", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(transient()) }
            })
            .await;

        assert!(result.is_err());
        // initial attempt + 2 retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_is_not_retried() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);

        let result: Result<u32> = policy
            .run("test", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(IntelError::NotFound("wat".into())) }
            })
            .await;

        assert!(matches!(result, Err(IntelError::NotFound(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy::new(10, Duration::from_secs(1), Duration::from_secs(8));
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(6), Duration::from_secs(8));
    }
}
