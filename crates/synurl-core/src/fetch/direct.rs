//! Direct fetch backend: one GET through libcurl.
//!
//! Reports a single resource, the final (post-redirect) URL with the SHA-256
//! of the body. Suited to reduced URLs that point at a resource rather than
//! at a page that loads it.

use anyhow::{Context, Result};
use std::time::Duration;

use super::{FetchResult, Fetcher, Resource};
use crate::checksum::ContentHasher;

#[derive(Debug, Clone)]
pub struct DirectFetcher {
    connect_timeout: Duration,
    timeout: Duration,
}

impl DirectFetcher {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            connect_timeout,
            timeout,
        }
    }
}

impl Default for DirectFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(15), Duration::from_secs(60))
    }
}

impl Fetcher for DirectFetcher {
    /// Non-2xx responses come back as a failed result; curl errors as `Err`.
    fn fetch(&mut self, url: &str) -> Result<FetchResult> {
        let mut hasher = ContentHasher::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                hasher.update(data);
                Ok(data.len())
            })?;
            transfer
                .perform()
                .with_context(|| format!("GET {} failed", url))?;
        }

        let code = easy.response_code().context("no response code")?;
        if !(200..300).contains(&code) {
            tracing::debug!(url, code, "direct fetch returned non-success status");
            return Ok(FetchResult::failed());
        }

        let final_url = easy
            .effective_url()
            .ok()
            .flatten()
            .map(str::to_string)
            .unwrap_or_else(|| url.to_string());
        let (hash, size) = hasher.finish();
        Ok(FetchResult::success(vec![Resource {
            url: final_url,
            hash,
            size,
        }]))
    }
}
