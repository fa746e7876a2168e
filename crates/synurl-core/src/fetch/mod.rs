//! Fetch backends.
//!
//! The validator only depends on the [`Fetcher`] trait. Backends either run
//! an external tool that writes a JSON result file, or GET the URL directly
//! with libcurl and hash the body.

mod command;
mod direct;
mod result;

pub use command::CommandFetcher;
pub use direct::DirectFetcher;
pub use result::{FetchResult, Resource, STATUS_FAIL, STATUS_SUCCESS};

use anyhow::Result;
use std::time::Duration;

use crate::config::{FetchBackend, FetchConfig};

/// Fetches one URL and reports the resources it retrieved.
///
/// An `Err` and a result whose status is not `success` are both transport
/// failures to the caller.
pub trait Fetcher {
    fn fetch(&mut self, url: &str) -> Result<FetchResult>;
}

impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    fn fetch(&mut self, url: &str) -> Result<FetchResult> {
        (**self).fetch(url)
    }
}

/// Builds the backend selected in the configuration.
pub fn from_config(cfg: &FetchConfig) -> Box<dyn Fetcher> {
    match cfg.backend {
        FetchBackend::Command => Box::new(CommandFetcher::new(&cfg.command, cfg.args.clone())),
        FetchBackend::Direct => Box::new(DirectFetcher::new(
            Duration::from_secs(cfg.connect_timeout_secs),
            Duration::from_secs(cfg.timeout_secs),
        )),
    }
}
