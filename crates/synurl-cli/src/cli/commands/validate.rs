//! `synurl validate` – fetch reduced URLs and check they still match.

use anyhow::Result;
use std::path::PathBuf;
use synurl_core::cache::FileCache;
use synurl_core::config::{FetchBackend, SynurlConfig};
use synurl_core::fetch;
use synurl_core::report::ValidationSummary;
use synurl_core::validate::{ValidationTally, Validator, ValidatorSettings};

use super::input::{load_reduced, ReportPaths};

#[derive(Debug, Clone)]
pub struct ValidateArgs {
    pub threshold: f64,
    pub force_refetch: bool,
    pub cache_dir: Option<PathBuf>,
    pub direct: bool,
    pub sanity_retries: Option<u32>,
    pub reduced_retries: Option<u32>,
    pub report: ReportPaths,
}

pub fn run_validate(
    cfg: &SynurlConfig,
    host: &str,
    trials: &[PathBuf],
    args: &ValidateArgs,
) -> Result<()> {
    let reduced = load_reduced(host, trials, args.threshold)?;
    if reduced.is_empty() {
        // Hosts without synonym sets would only dilute the summaries.
        tracing::info!(host, "no synonym url sets; nothing to validate");
        println!("{}: no synonym url sets", host);
        return Ok(());
    }

    let mut fetch_cfg = cfg.fetch_or_default();
    if args.direct {
        fetch_cfg.backend = FetchBackend::Direct;
    }
    let cache_dir = match &args.cache_dir {
        Some(dir) => dir.clone(),
        None => FileCache::default_dir(host)?,
    };
    tracing::debug!(host, cache = %cache_dir.display(), backend = ?fetch_cfg.backend, "validating");

    let mut settings = ValidatorSettings::from_config(cfg);
    settings.force_refetch = args.force_refetch;
    if let Some(n) = args.sanity_retries {
        settings.sanity_retry_count = n;
    }
    if let Some(n) = args.reduced_retries {
        settings.reduced_retry_count = n;
    }

    let mut validator = Validator::new(
        fetch::from_config(&fetch_cfg),
        FileCache::new(cache_dir),
        settings,
    );
    let mut tally = ValidationTally::default();
    for r in &reduced {
        let result = validator.validate_set(&r.set, &r.reduced);
        println!("{}: sanity {} ({})", result.hash, result.sanity, result.sanity_url);
        for (url, outcome) in &result.outcomes {
            println!("\t{}: {}", url, outcome);
        }
        tally.record_set(&result);
    }

    let summary = ValidationSummary {
        host: host.to_string(),
        tally,
    };
    tracing::info!(
        host,
        fetches = validator.fetch_count(),
        matched = tally.matched,
        no_match = tally.no_match,
        failed = tally.failed,
        sanity_untested = tally.sanity_untested,
        "validation done"
    );
    args.report.append(&summary.write_text(), &summary.to_csv_row())?;
    print!("{}", summary.write_text());
    Ok(())
}
