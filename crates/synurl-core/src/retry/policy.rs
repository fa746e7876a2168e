use std::time::Duration;

use crate::config::RetryConfig;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Give up; the retry budget is spent.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Exponential backoff with a fixed attempt budget.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Base delay for backoff.
    pub base_delay: Duration,
    /// Upper bound on backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(0, &RetryConfig::default())
    }
}

impl RetryPolicy {
    /// Policy allowing `retries` attempts after the first one.
    pub fn with_retries(retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: retries.saturating_add(1),
            base_delay,
            max_delay,
        }
    }

    pub fn from_config(retries: u32, cfg: &RetryConfig) -> Self {
        Self::with_retries(
            retries,
            Duration::from_secs_f64(cfg.base_delay_secs.max(0.0)),
            Duration::from_secs(cfg.max_delay_secs),
        )
    }

    /// Same budget, no waiting between attempts.
    pub fn immediate(retries: u32) -> Self {
        Self::with_retries(retries, Duration::ZERO, Duration::ZERO)
    }

    /// Decide what to do after attempt number `attempt` (1-based) failed.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }
        // base * 2^(attempt-1), capped.
        let exp = 1u32 << attempt.saturating_sub(1).min(8);
        let delay = self.base_delay.saturating_mul(exp).min(self.max_delay);
        RetryDecision::RetryAfter(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_retries_means_one_attempt() {
        let p = RetryPolicy::immediate(0);
        assert_eq!(p.max_attempts, 1);
        assert_eq!(p.decide(1), RetryDecision::NoRetry);
    }

    #[test]
    fn exponential_backoff_grows_and_is_capped() {
        let p = RetryPolicy::with_retries(20, Duration::from_millis(250), Duration::from_secs(30));
        let delay = |attempt| match p.decide(attempt) {
            RetryDecision::RetryAfter(d) => d,
            RetryDecision::NoRetry => panic!("expected retry"),
        };
        assert_eq!(delay(1), Duration::from_millis(250));
        assert_eq!(delay(2), Duration::from_millis(500));
        assert!(delay(3) >= delay(2));
        assert_eq!(delay(15), Duration::from_secs(30));
    }

    #[test]
    fn respects_retry_budget() {
        let p = RetryPolicy::immediate(2);
        assert_eq!(p.max_attempts, 3);
        assert_eq!(p.decide(1), RetryDecision::RetryAfter(Duration::ZERO));
        assert_eq!(p.decide(2), RetryDecision::RetryAfter(Duration::ZERO));
        assert_eq!(p.decide(3), RetryDecision::NoRetry);
    }

    #[test]
    fn built_from_config() {
        let cfg = RetryConfig {
            base_delay_secs: 0.5,
            max_delay_secs: 4,
        };
        let p = RetryPolicy::from_config(3, &cfg);
        assert_eq!(p.max_attempts, 4);
        assert_eq!(p.base_delay, Duration::from_millis(500));
        assert_eq!(p.max_delay, Duration::from_secs(4));
    }
}
