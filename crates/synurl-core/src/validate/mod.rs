//! Reduction validation: re-fetch reduced URLs and look for the original hash.
//!
//! Per synonym set the validator first fetches an original member (the
//! sanity check). If even that does not reproduce the set's hash, none of the
//! set's reduced URLs are fetched and all of them are marked failed. Otherwise
//! each reduced URL is fetched in turn and classified as matched, no match or
//! failed. Every URL goes through the result cache first unless a refetch is
//! forced; a cached result is final for that URL. Only results the fetcher
//! actually produced are cached; fetcher errors are retried but never stored.

mod tally;

pub use tally::ValidationTally;

use std::fmt;
use std::time::Duration;

use crate::cache::ResultCache;
use crate::config::SynurlConfig;
use crate::fetch::{FetchResult, Fetcher};
use crate::retry::{run_with_retry, RetryPolicy};
use crate::synonym::SynonymSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Every attempt failed to fetch.
    Exhausted,
    /// The set's sanity check failed, so the URL was not fetched.
    Sanity,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Exhausted => f.write_str("fetch failed"),
            FailureReason::Sanity => f.write_str("sanity fail"),
        }
    }
}

/// Final state of one validated URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// A fetched resource carried the expected hash; `url` is that resource's URL.
    Matched { url: String },
    /// Fetched fine, but no resource carried the expected hash.
    NoMatch,
    Failed { reason: FailureReason },
}

impl ValidationOutcome {
    fn classify(result: &FetchResult, hash: &str) -> Self {
        if !result.is_success() {
            return ValidationOutcome::Failed {
                reason: FailureReason::Exhausted,
            };
        }
        match result.find_hash(hash) {
            Some(resource) => ValidationOutcome::Matched {
                url: resource.url.clone(),
            },
            None => ValidationOutcome::NoMatch,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, ValidationOutcome::Matched { .. })
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationOutcome::Matched { url } => write!(f, "matched {}", url),
            ValidationOutcome::NoMatch => f.write_str("no match"),
            ValidationOutcome::Failed { reason } => write!(f, "failed ({})", reason),
        }
    }
}

/// Retry budgets and cache behavior.
#[derive(Debug, Clone, Copy)]
pub struct ValidatorSettings {
    pub sanity_retry_count: u32,
    pub reduced_retry_count: u32,
    pub force_refetch: bool,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self::from_config(&SynurlConfig::default())
    }
}

impl ValidatorSettings {
    pub fn from_config(cfg: &SynurlConfig) -> Self {
        let policy = RetryPolicy::from_config(0, &cfg.retry_or_default());
        Self {
            sanity_retry_count: cfg.sanity_retry_count,
            reduced_retry_count: cfg.reduced_retry_count,
            force_refetch: cfg.force_refetch,
            base_delay: policy.base_delay,
            max_delay: policy.max_delay,
        }
    }

    fn policy(&self, retries: u32) -> RetryPolicy {
        RetryPolicy::with_retries(retries, self.base_delay, self.max_delay)
    }
}

/// Validation of one synonym set's reduced URLs.
#[derive(Debug, Clone)]
pub struct SetValidation {
    pub hash: String,
    pub sanity_url: String,
    pub sanity: ValidationOutcome,
    /// `(reduced url, outcome)` in the order the URLs were given.
    pub outcomes: Vec<(String, ValidationOutcome)>,
}

impl SetValidation {
    pub fn sanity_passed(&self) -> bool {
        self.sanity.is_matched()
    }
}

/// A fetch attempt that did not produce a successful result.
#[derive(Debug, thiserror::Error)]
enum FetchFailure {
    #[error("fetch status {status:?}")]
    Status { status: String },
    /// The fetcher could not run at all (missing tool, I/O, transport).
    #[error("fetch error: {message}")]
    Error { message: String },
}

pub struct Validator<F, C> {
    fetcher: F,
    cache: C,
    settings: ValidatorSettings,
    fetches: usize,
}

impl<F: Fetcher, C: ResultCache> Validator<F, C> {
    pub fn new(fetcher: F, cache: C, settings: ValidatorSettings) -> Self {
        Self {
            fetcher,
            cache,
            settings,
            fetches: 0,
        }
    }

    /// Number of times the fetcher has been invoked.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    pub fn settings(&self) -> &ValidatorSettings {
        &self.settings
    }

    pub fn into_parts(self) -> (F, C) {
        (self.fetcher, self.cache)
    }

    /// Sanity-checks `set` and, if that passes, validates each reduced URL.
    pub fn validate_set(&mut self, set: &SynonymSet, reduced: &[String]) -> SetValidation {
        let sanity_url = set.first_url().unwrap_or_default().to_string();
        tracing::debug!(hash = %set.hash, url = %sanity_url, "sanity check");
        let sanity = if sanity_url.is_empty() {
            ValidationOutcome::Failed {
                reason: FailureReason::Exhausted,
            }
        } else {
            self.check(&sanity_url, &set.hash, self.settings.sanity_retry_count)
        };

        let outcomes = if sanity.is_matched() {
            reduced
                .iter()
                .map(|url| {
                    let outcome = self.check(url, &set.hash, self.settings.reduced_retry_count);
                    tracing::info!(hash = %set.hash, url = %url, "reduced url: {}", outcome);
                    (url.clone(), outcome)
                })
                .collect()
        } else {
            tracing::info!(
                hash = %set.hash,
                url = %sanity_url,
                untested = reduced.len(),
                "sanity check failed ({}); skipping reduced urls",
                sanity
            );
            reduced
                .iter()
                .map(|url| {
                    (
                        url.clone(),
                        ValidationOutcome::Failed {
                            reason: FailureReason::Sanity,
                        },
                    )
                })
                .collect()
        };

        SetValidation {
            hash: set.hash.clone(),
            sanity_url,
            sanity,
            outcomes,
        }
    }

    /// Fetches `url` (cache first) with up to `retries` retries and looks for
    /// a resource whose hash is `hash`.
    pub fn check(&mut self, url: &str, hash: &str, retries: u32) -> ValidationOutcome {
        if !self.settings.force_refetch {
            if let Some(cached) = self.cache.get(url) {
                tracing::debug!(url, "using cached fetch result");
                return ValidationOutcome::classify(&cached, hash);
            }
        }

        let policy = self.settings.policy(retries);
        match run_with_retry(&policy, |attempt| self.fetch_fresh(url, attempt)) {
            Ok(result) => ValidationOutcome::classify(&result, hash),
            Err(e) => {
                tracing::warn!(url, attempts = policy.max_attempts, "giving up: {}", e);
                ValidationOutcome::Failed {
                    reason: FailureReason::Exhausted,
                }
            }
        }
    }

    fn fetch_fresh(&mut self, url: &str, attempt: u32) -> Result<FetchResult, FetchFailure> {
        self.fetches += 1;
        tracing::debug!(url, attempt, "fetching");
        let result = match self.fetcher.fetch(url) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(url, attempt, "fetch error: {:#}", e);
                return Err(FetchFailure::Error {
                    message: format!("{:#}", e),
                });
            }
        };
        if let Err(e) = self.cache.put(url, &result) {
            tracing::warn!(url, "could not cache fetch result: {:#}", e);
        }
        if result.is_success() {
            Ok(result)
        } else {
            Err(FetchFailure::Status {
                status: result.status,
            })
        }
    }
}
