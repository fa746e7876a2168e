//! `synurl reduce` – extract and reduce a host's synonym URL sets.

use anyhow::Result;
use std::path::PathBuf;
use synurl_core::report::ReductionSummary;

use super::input::{load_reduced, ReportPaths};

#[derive(Debug, Clone)]
pub struct ReduceArgs {
    pub threshold: f64,
    pub show_sets: bool,
    pub report: ReportPaths,
}

pub fn run_reduce(host: &str, trials: &[PathBuf], args: &ReduceArgs) -> Result<()> {
    let reduced = load_reduced(host, trials, args.threshold)?;

    for r in &reduced {
        println!("{}:", r.set.hash);
        for url in &r.reduced {
            println!("\t{}", url);
        }
        if args.show_sets {
            for url in r.set.urls() {
                println!("\t\t{}", url);
            }
        }
    }

    let summary = ReductionSummary::from_sets(host, &reduced);
    tracing::info!(
        host,
        sets = summary.synonym_sets,
        reduced = summary.reduced_urls,
        "reduction done"
    );
    let text = summary.write_text(args.show_sets.then_some(reduced.as_slice()));
    args.report.append(&text, &summary.to_csv_row())?;
    println!(
        "{}: {} synonym url set(s), {} reduced url(s)",
        host, summary.synonym_sets, summary.reduced_urls
    );
    Ok(())
}
