//! Integration test: direct fetch backend against a local HTTP server, then
//! validation of a synonym set through it.

mod common;

use common::http_server::{self, Route};
use synurl_core::cache::MemoryCache;
use synurl_core::checksum::sha256_hex;
use synurl_core::fetch::{DirectFetcher, Fetcher};
use synurl_core::synonym::{reduce, SynonymSet};
use synurl_core::validate::{ValidationOutcome, Validator, ValidatorSettings};
use std::time::Duration;

const BODY: &[u8] = b"body of the shared resource";

fn settings() -> ValidatorSettings {
    ValidatorSettings {
        sanity_retry_count: 1,
        reduced_retry_count: 1,
        force_refetch: false,
        base_delay: Duration::ZERO,
        max_delay: Duration::ZERO,
    }
}

#[test]
fn direct_fetch_hashes_body() {
    let base = http_server::start(vec![("/logo.png", Route::ok(BODY))]);
    let url = format!("{}/logo.png", base);
    let result = DirectFetcher::default().fetch(&url).unwrap();
    assert!(result.is_success());
    assert_eq!(result.resources.len(), 1);
    assert_eq!(result.resources[0].url, url);
    assert_eq!(result.resources[0].hash, sha256_hex(BODY));
    assert_eq!(result.resources[0].size, BODY.len() as u64);
}

#[test]
fn direct_fetch_reports_redirect_target() {
    let base = http_server::start(vec![
        (
            "/old",
            Route::Redirect {
                location: "/new".to_string(),
            },
        ),
        ("/new", Route::ok(BODY)),
    ]);
    let result = DirectFetcher::default()
        .fetch(&format!("{}/old", base))
        .unwrap();
    assert_eq!(result.resources[0].url, format!("{}/new", base));
}

#[test]
fn non_success_status_is_a_failed_result() {
    let base = http_server::start(vec![(
        "/gone",
        Route::Body {
            status: 500,
            body: b"oops".to_vec(),
        },
    )]);
    let result = DirectFetcher::default()
        .fetch(&format!("{}/gone", base))
        .unwrap();
    assert!(!result.is_success());
    let missing = DirectFetcher::default()
        .fetch(&format!("{}/missing", base))
        .unwrap();
    assert!(!missing.is_success());
}

#[test]
fn reduced_url_validates_against_live_server() {
    let base = http_server::start(vec![
        ("/img?v=1&cb=100", Route::ok(BODY)),
        ("/img?v=1&cb=200", Route::ok(BODY)),
        ("/img?v=1", Route::ok(BODY)),
    ]);
    let set = SynonymSet::from_urls(
        sha256_hex(BODY),
        [
            format!("{}/img?v=1&cb=100", base),
            format!("{}/img?v=1&cb=200", base),
        ],
    );
    let reduced = reduce(&set, 0.6).unwrap();
    assert_eq!(reduced, vec![format!("{}/img?v=1", base)]);

    let mut validator = Validator::new(DirectFetcher::default(), MemoryCache::new(), settings());
    let validation = validator.validate_set(&set, &reduced);
    assert!(validation.sanity_passed());
    assert!(matches!(
        validation.outcomes[0].1,
        ValidationOutcome::Matched { .. }
    ));
    assert_eq!(validator.fetch_count(), 2);
}
