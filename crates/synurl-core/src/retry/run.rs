//! Retry loop: run a closure until success or the policy says stop.

use std::fmt::Display;

use super::policy::{RetryDecision, RetryPolicy};

/// Runs `f` until it succeeds or the retry budget is spent; returns the last
/// error in that case. `f` receives the 1-based attempt number. Sleeps for the
/// backoff delay between attempts.
pub fn run_with_retry<T, E, F>(policy: &RetryPolicy, mut f: F) -> Result<T, E>
where
    F: FnMut(u32) -> Result<T, E>,
    E: Display,
{
    let mut attempt = 1u32;
    loop {
        match f(attempt) {
            Ok(value) => return Ok(value),
            Err(e) => match policy.decide(attempt) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(d) => {
                    tracing::debug!(attempt, delay_ms = d.as_millis() as u64, "retrying: {}", e);
                    if !d.is_zero() {
                        std::thread::sleep(d);
                    }
                    attempt += 1;
                }
            },
        }
    }
}
