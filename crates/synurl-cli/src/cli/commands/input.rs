//! Shared input and output plumbing for the commands.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use synurl_core::report;
use synurl_core::synonym::{reduce_all, ReducedSet};
use synurl_core::trial::TrialIndex;

/// Non-empty, trimmed lines of `path`. Lines starting with `#` are comments.
pub fn read_urls(path: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read url list: {}", path.display()))?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Optional summary files, appended to once per host.
#[derive(Debug, Clone, Default)]
pub struct ReportPaths {
    pub text_out: Option<PathBuf>,
    pub csv_out: Option<PathBuf>,
}

impl ReportPaths {
    pub fn append(&self, text: &str, csv_row: &str) -> Result<()> {
        if let Some(path) = &self.text_out {
            report::append_text(path, text)?;
        }
        if let Some(path) = &self.csv_out {
            report::append_csv_row(path, csv_row)?;
        }
        Ok(())
    }
}

/// Indexes the host's trials and reduces every synonym set.
pub fn load_reduced(host: &str, trials: &[PathBuf], threshold: f64) -> Result<Vec<ReducedSet>> {
    let index = TrialIndex::from_files(host, trials)?;
    tracing::info!(
        host,
        trials = index.trials,
        failed = index.failed,
        "loaded trials"
    );
    let sets = index.synonym_sets();
    Ok(reduce_all(sets, threshold)?)
}
