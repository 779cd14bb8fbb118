//! Bounded retry with exponential backoff.
//!
//! The delay policy is a pure function of the error and the attempt number,
//! separated from the async loop so it can be tested without a clock.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};

/// Default attempt budget for [`retry_with_backoff`]
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Error codes that are deterministic: retrying cannot change the outcome.
const NON_RETRYABLE_CODES: &[&str] =
    &["VALIDATION_ERROR", "CAPTCHA_REQUIRED", "ORIGIN_NOT_ALLOWED"];

/// Delay before the next attempt, or `None` when the error is not retryable.
///
/// Rate-limited errors honor the server-declared `retryAfter`; everything
/// else backs off exponentially at `2^attempt` seconds.
pub fn retry_delay(error: &Error, attempt: u32) -> Option<Duration> {
    if NON_RETRYABLE_CODES.contains(&error.code()) {
        return None;
    }
    let backoff = 1u64 << attempt;
    if error.is_rate_limited() {
        return Some(Duration::from_secs(error.retry_after().unwrap_or(backoff)));
    }
    Some(Duration::from_secs(backoff))
}

/// Run `op` up to `max_retries` times total, sleeping per [`retry_delay`]
/// between attempts. Never sleeps after the final attempt; the last error is
/// returned as-is. At least one attempt is always made.
pub async fn retry_with_backoff<T, F, Fut>(max_retries: u32, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let budget = max_retries.max(1);
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                attempt += 1;
                if attempt >= budget {
                    return Err(error);
                }
                let Some(delay) = retry_delay(&error, attempt - 1) else {
                    return Err(error);
                };
                debug!(
                    attempt,
                    delay_secs = delay.as_secs(),
                    code = error.code(),
                    "retrying after error"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
