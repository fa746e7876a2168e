//! Bounded retry with backoff.
//!
//! Fetch failures are retried a fixed number of times; the delay between
//! attempts grows exponentially up to a cap. Retries are bounded by count,
//! never by wall-clock time.

mod policy;
mod run;

pub use policy::{RetryDecision, RetryPolicy};
pub use run::run_with_retry;
