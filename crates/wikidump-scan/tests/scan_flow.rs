use std::path::PathBuf;

use tempfile::TempDir;
use wikidump_core::traits::DocumentResolver;
use wikidump_core::{Error, Query, ResolvedDocument};
use wikidump_scan::{scan, select, HeuristicScan, NaiveScan, ScanOptions};

fn fixture() -> PathBuf {
    // crates/wikidump-scan -> crates -> repo root
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().to_path_buf();
    root.join("test_data/wikipedia_test_set.xml")
}

fn queries() -> Vec<Query> {
    vec![
        Query::new("Heat", Some(1995)),
        Query::new("The Cookout", None),
        Query::new("Jumanji", None),
        Query::new("Toy Story", None),
        Query::new("Deadfall", Some(1968)),
    ]
}

#[test]
fn heat_resolves_with_score_three_in_one_batch() {
    let batches = scan(&fixture(), &[Query::new("Heat", Some(1995))], &ScanOptions::default()).unwrap();
    assert_eq!(batches.len(), 1);
    let best = select(&[Query::new("Heat", Some(1995))], batches).remove(0);
    assert_eq!(best.score, 3);
    assert_eq!(best.title.as_deref(), Some("Heat (1995 film)"));
    assert_eq!(best.url.as_deref(), Some("https://en.wikipedia.org/wiki/Heat_(1995_film)"));
}

#[test]
fn toy_story_only_matches_bare_name() {
    for lines in [5, 7, 10_000] {
        let opts = ScanOptions::default().with_batch_line_count(lines);
        let batches = scan(&fixture(), &[Query::new("Toy Story", None)], &opts).unwrap();
        assert!(batches.iter().all(|b| b[0].score <= 1), "batch size {lines}");
        let best = select(&[Query::new("Toy Story", None)], batches).remove(0);
        assert_eq!(best.score, 1);
    }
}

#[test]
fn equal_scores_resolve_to_earliest_record() {
    // 7-line batches put Heat Lightning and Heat (1995 film) in different batches
    let opts = ScanOptions::default().with_batch_line_count(7);
    let q = [Query::new("Heat", None)];
    let batches = scan(&fixture(), &q, &opts).unwrap();
    let film_hits = batches.iter().filter(|b| b[0].score == 2).count();
    assert_eq!(film_hits, 2);
    let best = select(&q, batches).remove(0);
    assert_eq!(best.title.as_deref(), Some("Heat Lightning (film)"));
}

#[test]
fn heuristic_and_naive_agree_and_skip_abstracts() {
    let opts = ScanOptions::default().with_batch_line_count(11);
    let heuristic = HeuristicScan::new(fixture(), opts.clone()).resolve(&queries()).unwrap();
    let naive = NaiveScan::new(fixture(), opts).resolve(&queries()).unwrap();
    assert_eq!(heuristic, naive);
    assert_eq!(heuristic.len(), 5);
    assert_eq!(heuristic[1], ResolvedDocument::not_found());
    assert!(heuristic.iter().all(|d| d.abstract_text.is_none()));
    assert_eq!(heuristic[2].title.as_deref(), Some("Jumanji"));
    assert_eq!(heuristic[4].score, Some(3));
}

#[test]
fn progress_hint_does_not_change_results() {
    let q = [Query::new("Heat", Some(1995)), Query::new("Heat", None), Query::new("Toy Story", None)];
    let plain = ScanOptions::default().with_batch_line_count(7);
    let hinted = ScanOptions { progress_hint: Some(52), ..plain.clone() };
    let without = HeuristicScan::new(fixture(), plain).resolve(&q).unwrap();
    let with = HeuristicScan::new(fixture(), hinted).resolve(&q).unwrap();
    assert_eq!(without, with);
    let got: Vec<_> = with.iter().map(|d| (d.title.as_deref(), d.score)).collect();
    assert_eq!(got, [
        (Some("Heat (1995 film)"), Some(3)),
        (Some("Heat Lightning (film)"), Some(2)),
        (Some("Toy Story"), Some(1)),
    ]);
}

#[test]
fn repeated_resolution_is_identical() {
    let mut resolver = HeuristicScan::new(fixture(), ScanOptions::default().with_batch_line_count(5));
    let first = resolver.resolve(&queries()).unwrap();
    let second = resolver.resolve(&queries()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn naive_refuses_dumps_over_the_limit() {
    let mut resolver = NaiveScan::new(fixture(), ScanOptions::default()).with_max_bytes(Some(16));
    let err = resolver.resolve(&queries()).unwrap_err();
    assert!(matches!(err, Error::NaiveThresholdExceeded { limit: 16, .. }));
}

#[test]
fn invalid_query_fails_before_reading() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing.xml");
    let err = scan(&fixture(), &[Query::new("", None)], &ScanOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidQuery(_)));
    let err = scan(&missing, &[Query::new("Heat", None)], &ScanOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
