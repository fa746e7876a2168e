//! `synurl cluster` – build and print a similarity table.

use anyhow::Result;
use std::path::Path;
use synurl_core::table::{render_table, SimilarityTable};

use super::input::read_urls;

/// Malformed URLs are reported and left out; the rest are clustered.
pub fn run_cluster(path: &Path, threshold: f64) -> Result<()> {
    let urls = read_urls(path)?;
    let mut table = SimilarityTable::new();
    let mut rejected = 0usize;
    for url in &urls {
        if let Err(e) = table.insert(url, threshold) {
            tracing::warn!("rejected: {}", e);
            eprintln!("rejected: {}", e);
            rejected += 1;
        }
    }
    tracing::info!(
        urls = urls.len(),
        rejected,
        templates = table.len(),
        threshold,
        "clustered urls"
    );
    print!("{}", render_table(&table));
    println!(
        "{} url(s) in {} template(s), {} rejected",
        urls.len() - rejected,
        table.len(),
        rejected
    );
    Ok(())
}
