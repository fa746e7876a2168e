//! Per-host summaries appended to shared text and CSV files.
//!
//! Several hosts are usually processed one after another into the same pair
//! of files, so every write appends. Reduction summaries are written for
//! every host; validation skips hosts with no synonym sets, so those never
//! get a validation row.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::synonym::ReducedSet;
use crate::validate::ValidationTally;

/// Number of synonym sets and reduced URLs found for one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReductionSummary {
    pub host: String,
    pub synonym_sets: usize,
    pub reduced_urls: usize,
}

impl ReductionSummary {
    pub fn from_sets(host: &str, sets: &[ReducedSet]) -> Self {
        Self {
            host: host.to_string(),
            synonym_sets: sets.len(),
            reduced_urls: sets.iter().map(|s| s.reduced.len()).sum(),
        }
    }

    /// `host,synonym_sets,reduced_urls`
    pub fn to_csv_row(&self) -> String {
        csv_row(&[
            self.host.clone(),
            self.synonym_sets.to_string(),
            self.reduced_urls.to_string(),
        ])
    }

    /// Text block; with `sets`, each hash is listed with its reduced URLs.
    pub fn write_text(&self, sets: Option<&[ReducedSet]>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Host: {}", self.host);
        let _ = writeln!(out, "Number of synonym url sets: {}", self.synonym_sets);
        for set in sets.unwrap_or_default() {
            let _ = writeln!(out, "{}:", set.set.hash);
            for url in &set.reduced {
                let _ = writeln!(out, "\t{}", url);
            }
        }
        let _ = writeln!(out, "Number of reduced URLs: {}", self.reduced_urls);
        let _ = writeln!(out, "{}", "-".repeat(60));
        out
    }
}

/// Validation counters for one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSummary {
    pub host: String,
    pub tally: ValidationTally,
}

impl ValidationSummary {
    /// `host,failed,sanity_untested,no_match,matched`
    pub fn to_csv_row(&self) -> String {
        csv_row(&[
            self.host.clone(),
            self.tally.failed.to_string(),
            self.tally.sanity_untested.to_string(),
            self.tally.no_match.to_string(),
            self.tally.matched.to_string(),
        ])
    }

    pub fn write_text(&self) -> String {
        let t = &self.tally;
        let mut out = String::new();
        let _ = writeln!(out, "Host: {}", self.host);
        let _ = writeln!(out, "Fails: {}", t.failed);
        let _ = writeln!(out, "Untested due to sanity fail: {}", t.sanity_untested);
        let _ = writeln!(out, "Succs no match: {}", t.no_match);
        let _ = writeln!(out, "Succs w/ match: {}", t.matched);
        let _ = writeln!(out, "{}", "-".repeat(38));
        out
    }
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_row(fields: &[String]) -> String {
    let mut row = fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    row
}

/// Appends one CSV row (already newline-terminated) to `path`.
pub fn append_csv_row(path: &Path, row: &str) -> Result<()> {
    append_text(path, row)
}

/// Appends `text` to `path` in a single write, creating the file if needed.
pub fn append_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir: {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open report: {}", path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("write report: {}", path.display()))?;
    Ok(())
}
