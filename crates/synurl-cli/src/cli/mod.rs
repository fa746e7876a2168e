//! CLI for synurl.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use synurl_core::config::{self, SynurlConfig};

use commands::{
    run_cluster, run_reduce, run_segment, run_trie, run_validate, ReduceArgs, ReportPaths,
    ValidateArgs,
};

/// Top-level CLI for synurl.
#[derive(Debug, Parser)]
#[command(name = "synurl")]
#[command(
    about = "synurl: find URLs that serve identical content and reduce them to generalized forms",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the typed segments of a URL.
    Segment {
        /// Absolute URL to segment.
        url: String,
    },

    /// Cluster URLs (one per line) into a similarity table.
    Cluster {
        /// File with one URL per line.
        path: PathBuf,
        /// Similarity threshold in [0, 1]; defaults to the configured value.
        #[arg(long, value_name = "T")]
        threshold: Option<f64>,
    },

    /// Extract synonym URL sets from a host's trial files and reduce them.
    Reduce {
        /// Host the trials were recorded for.
        host: String,
        /// Trial result files (JSON).
        #[arg(required = true)]
        trials: Vec<PathBuf>,
        #[arg(long, value_name = "T")]
        threshold: Option<f64>,
        /// Also print the original members of each synonym set.
        #[arg(long)]
        show_sets: bool,
        /// Append a text summary to this file.
        #[arg(long, value_name = "FILE")]
        text_out: Option<PathBuf>,
        /// Append a CSV summary row to this file.
        #[arg(long, value_name = "FILE")]
        csv_out: Option<PathBuf>,
    },

    /// Reduce synonym sets, then fetch the reduced URLs to check they still
    /// serve the same content.
    Validate {
        host: String,
        #[arg(required = true)]
        trials: Vec<PathBuf>,
        #[arg(long, value_name = "T")]
        threshold: Option<f64>,
        /// Ignore cached fetch results.
        #[arg(long)]
        force_refetch: bool,
        /// Fetch result cache directory (default: ~/.local/state/synurl/fetched/<host>).
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,
        /// Fetch with a direct GET instead of the configured command.
        #[arg(long)]
        direct: bool,
        #[arg(long, value_name = "N")]
        sanity_retries: Option<u32>,
        #[arg(long, value_name = "N")]
        reduced_retries: Option<u32>,
        #[arg(long, value_name = "FILE")]
        text_out: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        csv_out: Option<PathBuf>,
    },

    /// Build a URL trie from a file of URLs (one per line) and print it.
    Trie {
        path: PathBuf,
        /// Collapse levels below this depth into counts.
        #[arg(long, value_name = "N")]
        depth: Option<usize>,
    },
}

/// Command-line threshold if given, else the configured one.
fn threshold_or(cfg: &SynurlConfig, threshold: Option<f64>) -> Result<f64> {
    let t = threshold.unwrap_or(cfg.similarity_threshold);
    config::check_threshold(t)?;
    Ok(t)
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        cli.command.run(&cfg)
    }

    pub fn run(self, cfg: &SynurlConfig) -> Result<()> {
        match self {
            CliCommand::Segment { url } => run_segment(&url)?,
            CliCommand::Cluster { path, threshold } => {
                run_cluster(&path, threshold_or(cfg, threshold)?)?;
            }
            CliCommand::Reduce {
                host,
                trials,
                threshold,
                show_sets,
                text_out,
                csv_out,
            } => {
                let args = ReduceArgs {
                    threshold: threshold_or(cfg, threshold)?,
                    show_sets,
                    report: ReportPaths { text_out, csv_out },
                };
                run_reduce(&host, &trials, &args)?;
            }
            CliCommand::Validate {
                host,
                trials,
                threshold,
                force_refetch,
                cache_dir,
                direct,
                sanity_retries,
                reduced_retries,
                text_out,
                csv_out,
            } => {
                let args = ValidateArgs {
                    threshold: threshold_or(cfg, threshold)?,
                    force_refetch: force_refetch || cfg.force_refetch,
                    cache_dir,
                    direct,
                    sanity_retries,
                    reduced_retries,
                    report: ReportPaths { text_out, csv_out },
                };
                run_validate(cfg, &host, &trials, &args)?;
            }
            CliCommand::Trie { path, depth } => run_trie(&path, depth)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
