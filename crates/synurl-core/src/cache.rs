//! Fetch result cache.
//!
//! The validator consults a [`ResultCache`] before fetching so repeated runs
//! can skip URLs that were already fetched. [`FileCache`] keeps one JSON file
//! per URL (the same format the fetch tool writes) and persists across runs;
//! [`MemoryCache`] lives for one process.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::fetch::FetchResult;

/// Characters of the sanitized URL used for a cache file name.
const KEY_LEN: usize = 64;

/// Key used when a URL has no alphanumeric characters at all.
const EMPTY_KEY: &str = "_";

pub trait ResultCache {
    fn get(&self, url: &str) -> Option<FetchResult>;
    fn put(&mut self, url: &str, result: &FetchResult) -> Result<()>;
}

/// File-name-safe key for a URL: alphanumeric characters only, first 64.
///
/// Distinct URLs that agree on those 64 characters share a file; the file
/// records which URL it holds.
pub fn cache_key(url: &str) -> String {
    let key: String = url
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(KEY_LEN)
        .collect();
    if key.is_empty() {
        EMPTY_KEY.to_string()
    } else {
        key
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: HashMap<String, FetchResult>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResultCache for MemoryCache {
    fn get(&self, url: &str) -> Option<FetchResult> {
        self.entries.get(url).cloned()
    }

    fn put(&mut self, url: &str, result: &FetchResult) -> Result<()> {
        self.entries.insert(url.to_string(), result.clone());
        Ok(())
    }
}

/// On-disk record: the fetch result plus the URL it was fetched for.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    #[serde(flatten)]
    result: FetchResult,
}

/// One `<key>.json` file per URL under `dir`.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default cache directory for a host: `~/.local/state/synurl/fetched/<host>`.
    pub fn default_dir(host: &str) -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("synurl")?;
        Ok(xdg_dirs
            .get_state_home()
            .join("synurl")
            .join("fetched")
            .join(cache_key(host)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(url)))
    }
}

impl ResultCache for FileCache {
    /// Missing or corrupt files are cache misses, and so is a file holding
    /// another URL that shares the key.
    fn get(&self, url: &str) -> Option<FetchResult> {
        let path = self.path_for(url);
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), "cannot read cached fetch result: {}", e);
                return None;
            }
        };
        match serde_json::from_slice::<CacheEntry>(&bytes) {
            Ok(entry) if entry.url == url => Some(entry.result),
            Ok(entry) => {
                tracing::debug!(
                    path = %path.display(),
                    cached = %entry.url,
                    url,
                    "cache file belongs to another url"
                );
                None
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring corrupt cached fetch result: {}", e);
                None
            }
        }
    }

    fn put(&mut self, url: &str, result: &FetchResult) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create dir: {}", self.dir.display()))?;
        let path = self.path_for(url);
        let entry = CacheEntry {
            url: url.to_string(),
            result: result.clone(),
        };
        let json = serde_json::to_string_pretty(&entry).context("serialize fetch result")?;
        fs::write(&path, json).with_context(|| format!("write fetch result: {}", path.display()))?;
        Ok(())
    }
}
