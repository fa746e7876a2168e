//! Integration test: trial files -> synonym sets -> reduction -> validation
//! over an on-disk result cache, with a scripted fetcher standing in for the
//! browser tool.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use synurl_core::cache::{FileCache, ResultCache};
use synurl_core::fetch::{CommandFetcher, FetchResult, Fetcher, Resource};
use synurl_core::report::{append_csv_row, ValidationSummary};
use synurl_core::synonym::{reduce, reduce_all, SynonymSet};
use synurl_core::trial::TrialIndex;
use synurl_core::validate::{
    FailureReason, ValidationOutcome, ValidationTally, Validator, ValidatorSettings,
};
use tempfile::tempdir;

/// Answers from a fixed table; unknown URLs fail.
struct TableFetcher {
    answers: HashMap<String, FetchResult>,
    calls: usize,
}

impl Fetcher for TableFetcher {
    fn fetch(&mut self, url: &str) -> anyhow::Result<FetchResult> {
        self.calls += 1;
        Ok(self
            .answers
            .get(url)
            .cloned()
            .unwrap_or_else(FetchResult::failed))
    }
}

fn hit(url: &str, hash: &str) -> FetchResult {
    FetchResult::success(vec![Resource {
        url: url.to_string(),
        hash: hash.to_string(),
        size: 10,
    }])
}

fn write_trial(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, json).unwrap();
    path
}

fn trials(dir: &Path) -> Vec<PathBuf> {
    vec![
        write_trial(
            dir,
            "x.com.0.json",
            r#"{"url":"x.com","status":"success","resources":[
                {"url":"http://x.com/a?id=1","hash":"H1","size":10},
                {"url":"http://cdn.y.com/p.js","hash":"H2","size":10},
                {"url":"http://x.com/static.css","hash":"H3","size":10}]}"#,
        ),
        write_trial(
            dir,
            "x.com.1.json",
            r#"{"url":"x.com","status":"success","resources":[
                {"url":"http://x.com/a?id=2","hash":"H1","size":10},
                {"url":"http://cdn.z.com/p.js","hash":"H2","size":10},
                {"url":"http://x.com/static.css","hash":"H3","size":10}]}"#,
        ),
        write_trial(dir, "x.com.2.json", r#"{"url":"x.com","status":"fail"}"#),
    ]
}

fn settings() -> ValidatorSettings {
    ValidatorSettings {
        sanity_retry_count: 2,
        reduced_retry_count: 1,
        force_refetch: false,
        base_delay: Duration::ZERO,
        max_delay: Duration::ZERO,
    }
}

fn fetcher() -> TableFetcher {
    let answers = [
        ("http://x.com/a?id=1", hit("http://x.com/a?id=1", "H1")),
        ("http://x.com/a", hit("http://x.com/a?id=0", "H1")),
        ("http://cdn.y.com/p.js", hit("http://cdn.y.com/p.js", "other")),
    ]
    .into_iter()
    .map(|(u, r)| (u.to_string(), r))
    .collect();
    TableFetcher { answers, calls: 0 }
}

fn run(cache: FileCache, fetcher: TableFetcher, paths: &[PathBuf]) -> (ValidationTally, Vec<Vec<ValidationOutcome>>, usize) {
    let index = TrialIndex::from_files("x.com", paths).unwrap();
    assert_eq!(index.trials, 3);
    assert_eq!(index.failed, 1);
    let reduced = reduce_all(index.synonym_sets(), 0.6).unwrap();
    let mut validator = Validator::new(fetcher, cache, settings());
    let mut tally = ValidationTally::default();
    let mut outcomes = Vec::new();
    for r in &reduced {
        let v = validator.validate_set(&r.set, &r.reduced);
        tally.record_set(&v);
        outcomes.push(v.outcomes.into_iter().map(|(_, o)| o).collect());
    }
    (tally, outcomes, validator.fetch_count())
}

#[test]
fn first_run_fetches_second_run_reads_cache() {
    let dir = tempdir().unwrap();
    let paths = trials(dir.path());
    let cache_dir = dir.path().join("fetched").join("x.com");

    let (tally, outcomes, fetches) = run(FileCache::new(&cache_dir), fetcher(), &paths);
    // H1 reduces to one URL and matches; H2's hosts differ so both cdn URLs
    // stay, and the sanity fetch finds no match so both are untested.
    assert_eq!(
        tally,
        ValidationTally {
            matched: 1,
            no_match: 0,
            failed: 0,
            sanity_untested: 2,
        }
    );
    assert_eq!(
        outcomes[1],
        vec![
            ValidationOutcome::Failed {
                reason: FailureReason::Sanity
            };
            2
        ]
    );
    // H1: sanity + reduced; H2: sanity only.
    assert_eq!(fetches, 3);

    let cache = FileCache::new(&cache_dir);
    assert!(cache.get("http://x.com/a").is_some());

    let (tally2, outcomes2, fetches2) = run(FileCache::new(&cache_dir), fetcher(), &paths);
    assert_eq!(tally2, tally);
    assert_eq!(outcomes2, outcomes);
    assert_eq!(fetches2, 0);
}

#[test]
fn cached_failure_is_not_retried() {
    let dir = tempdir().unwrap();
    let paths = trials(dir.path());
    let cache_dir = dir.path().join("fetched");
    let mut cache = FileCache::new(&cache_dir);
    cache.put("http://x.com/a", &FetchResult::failed()).unwrap();

    let (tally, _, fetches) = run(cache, fetcher(), &paths);
    assert_eq!(tally.failed, 1);
    assert_eq!(tally.matched, 0);
    // Two sanity fetches only.
    assert_eq!(fetches, 2);
}

#[test]
fn summary_rows_append_per_host() {
    let dir = tempdir().unwrap();
    let paths = trials(dir.path());
    let (tally, _, _) = run(FileCache::new(dir.path().join("c")), fetcher(), &paths);
    let csv = dir.path().join("validate.csv");
    for host in ["x.com", "x.com"] {
        let summary = ValidationSummary {
            host: host.to_string(),
            tally,
        };
        append_csv_row(&csv, &summary.to_csv_row()).unwrap();
    }
    assert_eq!(fs::read_to_string(&csv).unwrap(), "x.com,0,2,0,1\nx.com,0,2,0,1\n");
}

#[test]
fn reduced_url_sharing_cache_key_with_member_is_fetched() {
    let base = "https://static.examplecdn.com/assets/javascripts/vendor/application-bundle.js?v=1";
    let members = [format!("{}&cb=100", base), format!("{}&cb=200", base)];
    let set = SynonymSet::from_urls("H", members.clone());
    let reduced = reduce(&set, 0.6).unwrap();
    assert_eq!(reduced, vec![base.to_string()]);

    // Only the cache-busted URLs serve the content.
    let answers = members
        .iter()
        .map(|u| (u.clone(), hit(u, "H")))
        .chain([(base.to_string(), hit(base, "other"))])
        .collect();
    let fetcher = TableFetcher { answers, calls: 0 };
    let dir = tempdir().unwrap();
    let mut validator = Validator::new(fetcher, FileCache::new(dir.path()), settings());
    let result = validator.validate_set(&set, &reduced);

    assert!(result.sanity_passed());
    assert_eq!(result.outcomes[0].1, ValidationOutcome::NoMatch);
    assert_eq!(validator.fetch_count(), 2);
}

#[cfg(unix)]
#[test]
fn missing_fetch_tool_does_not_poison_cache() {
    let dir = tempdir().unwrap();
    let paths = trials(dir.path());
    let cache_dir = dir.path().join("fetched");

    let index = TrialIndex::from_files("x.com", &paths).unwrap();
    let reduced = reduce_all(index.synonym_sets(), 0.6).unwrap();
    let broken = CommandFetcher::new("/nonexistent/slimerjs", Vec::new());
    let mut validator = Validator::new(broken, FileCache::new(&cache_dir), settings());
    let first = validator.validate_set(&reduced[0].set, &reduced[0].reduced);
    assert_eq!(
        first.sanity,
        ValidationOutcome::Failed {
            reason: FailureReason::Exhausted
        }
    );
    assert!(FileCache::new(&cache_dir)
        .get("http://x.com/a?id=1")
        .is_none());

    let (tally, _, fetches) = run(FileCache::new(&cache_dir), fetcher(), &paths);
    assert_eq!(tally.matched, 1);
    assert_eq!(fetches, 3);
}
