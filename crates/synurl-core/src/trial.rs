//! Trial files: one page load of a host, with every resource it retrieved.
//!
//! A trial is the fetch JSON plus the host it was taken for:
//! `{"url": "<host>", "status": "success", "resources": [{url, hash, size}]}`.
//! [`TrialIndex`] folds many trials of one host into hash -> URL and
//! URL -> hash occurrence maps; synonym sets come out of the former.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fetch::FetchResult;
use crate::synonym::SynonymSet;

#[derive(Debug, Error)]
pub enum TrialError {
    /// The file was recorded for a different host. Mixing hosts would
    /// corrupt the index, so this aborts the run.
    #[error("trial {path} was recorded for {found:?}, expected {expected:?}")]
    HostMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
    #[error("read trial {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse trial {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Host the trial was taken for.
    pub url: String,
    #[serde(flatten)]
    pub result: FetchResult,
}

/// Reads one trial file and checks it belongs to `expected_host`.
pub fn load_trial(path: &Path, expected_host: &str) -> Result<TrialResult, TrialError> {
    let bytes = fs::read(path).map_err(|source| TrialError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let trial: TrialResult = serde_json::from_slice(&bytes).map_err(|source| TrialError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if trial.url != expected_host {
        return Err(TrialError::HostMismatch {
            path: path.to_path_buf(),
            expected: expected_host.to_string(),
            found: trial.url,
        });
    }
    Ok(trial)
}

/// Occurrence maps over all successful trials of one host.
#[derive(Debug, Clone, Default)]
pub struct TrialIndex {
    pub host: String,
    /// hash -> url -> occurrences
    pub hash_urls: BTreeMap<String, BTreeMap<String, usize>>,
    /// url -> hash -> occurrences
    pub url_hashes: BTreeMap<String, BTreeMap<String, usize>>,
    /// Trials folded in, failed ones included.
    pub trials: usize,
    pub failed: usize,
}

impl TrialIndex {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Loads and indexes every file; the first bad file aborts.
    pub fn from_files<P: AsRef<Path>>(host: &str, paths: &[P]) -> Result<Self, TrialError> {
        let mut index = Self::new(host);
        for path in paths {
            let trial = load_trial(path.as_ref(), host)?;
            index.add(&trial);
        }
        tracing::debug!(
            host,
            trials = index.trials,
            failed = index.failed,
            hashes = index.hash_urls.len(),
            "indexed trials"
        );
        Ok(index)
    }

    /// Failed trials are counted but contribute no resources.
    pub fn add(&mut self, trial: &TrialResult) {
        self.trials += 1;
        if !trial.result.is_success() {
            self.failed += 1;
            return;
        }
        for resource in &trial.result.resources {
            *self
                .hash_urls
                .entry(resource.hash.clone())
                .or_default()
                .entry(resource.url.clone())
                .or_insert(0) += 1;
            *self
                .url_hashes
                .entry(resource.url.clone())
                .or_default()
                .entry(resource.hash.clone())
                .or_insert(0) += 1;
        }
    }

    /// Hashes observed under more than one distinct URL, in hash order.
    pub fn synonym_sets(&self) -> Vec<SynonymSet> {
        self.hash_urls
            .iter()
            .filter(|(_, urls)| urls.len() > 1)
            .map(|(hash, urls)| SynonymSet {
                hash: hash.clone(),
                members: urls.clone(),
            })
            .collect()
    }
}
