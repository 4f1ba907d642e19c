use std::future::Future;
use std::time::Duration;

const MAX_RETRY_ATTEMPTS: u32 = 3;
const BASE_RETRY_DELAY: Duration = Duration::from_secs(1);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(8);

/// Exponential backoff schedule for retried calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRY_ATTEMPTS,
            base_delay: BASE_RETRY_DELAY,
            max_delay: MAX_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Delay before the next attempt once `attempts` have failed, or `None`
    /// when the attempt budget is spent.
    pub fn next_retry_delay(&self, attempts: u32) -> Option<Duration> {
        if attempts >= self.max_attempts {
            return None;
        }
        let mut delay = self.base_delay;
        for _ in 1..attempts {
            delay = delay.saturating_mul(2);
            if delay >= self.max_delay {
                break;
            }
        }
        Some(delay.min(self.max_delay))
    }
}

/// Runs `operation` until it succeeds, fails with an error `is_retryable`
/// rejects, or the attempt budget is spent. The attempt number (1-based) is
/// passed to each call. No delay precedes the first attempt.
pub async fn retry<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    is_retryable: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let mut attempts = 0;

    loop {
        attempts += 1;
        let err = match operation(attempts).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let delay = match policy.next_retry_delay(attempts) {
            Some(delay) if is_retryable(&err) => delay,
            _ => return Err(err),
        };

        tracing::debug!(
            attempt = attempts,
            max_attempts = policy.max_attempts,
            delay_ms = delay.as_millis() as u64,
            "Retrying after backoff"
        );
        tokio::time::sleep(delay).await;
    }
}
