use std::path::PathBuf;

use tempfile::TempDir;
use wikidump_core::config::StrategyConfig;
use wikidump_core::{Error, Query, ResolvedDocument};
use wikidump_index::HashIndex;
use wikidump_resolve::{resolve, Strategy};

fn fixture() -> PathBuf {
    // crates/wikidump-resolve -> crates -> repo root
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().to_path_buf();
    root.join("test_data/wikipedia_test_set.xml")
}

fn queries() -> Vec<Query> {
    vec![
        Query::new("Heat", Some(1995)),
        Query::new("The Cookout", None),
        Query::new("Jumanji 2", None),
        Query::new("Jumanji", None),
        Query::new("Toy Story", None),
        Query::new("Toy Story 3", None),
        Query::new("Deadfall", Some(1968)),
        Query::new("Never Talk to Strangers", None),
    ]
}

fn config() -> StrategyConfig {
    StrategyConfig::default().with_batch_line_count(100)
}

#[test]
fn heat_example_via_hash_and_heuristic() {
    let dump = fixture();
    let index = HashIndex::build(&dump).expect("build");
    let q = [Query::new("Heat", Some(1995))];
    for strategy in [Strategy::Hash, Strategy::Heuristic] {
        let doc = &resolve(&dump, &q, strategy, Some(&index), &config()).expect("resolve")[0];
        assert_eq!(doc.score, Some(3), "{strategy}");
        assert_eq!(doc.url.as_deref(), Some("https://en.wikipedia.org/wiki/Heat_(1995_film)"), "{strategy}");
    }
}

#[test]
fn strategies_agree_on_titles() {
    let dump = fixture();
    let index = HashIndex::build(&dump).expect("build");
    let hash = resolve(&dump, &queries(), Strategy::Hash, Some(&index), &config()).unwrap();
    let heuristic = resolve(&dump, &queries(), Strategy::Heuristic, None, &config()).unwrap();
    let naive = resolve(&dump, &queries(), Strategy::Naive, None, &config()).unwrap();

    assert_eq!(heuristic, naive);
    for (i, (h, s)) in hash.iter().zip(&heuristic).enumerate() {
        if h.is_found() && s.is_found() {
            assert_eq!(h.title, s.title, "query {i}");
            assert_eq!(h.score, s.score, "query {i}");
        }
    }
    let found: Vec<bool> = hash.iter().map(ResolvedDocument::is_found).collect();
    assert_eq!(found, vec![true, false, false, true, true, false, true, true]);
    assert_eq!(found, heuristic.iter().map(ResolvedDocument::is_found).collect::<Vec<_>>());
}

#[test]
fn only_hash_fills_abstracts() {
    let dump = fixture();
    let index = HashIndex::build(&dump).expect("build");
    let hash = resolve(&dump, &queries(), Strategy::Hash, Some(&index), &config()).unwrap();
    assert_eq!(hash[0].abstract_text.as_deref(), Some("| writer = Michael Mann"));
    let heuristic = resolve(&dump, &queries(), Strategy::Heuristic, None, &config()).unwrap();
    assert!(heuristic.iter().all(|d| d.abstract_text.is_none()));
}

#[test]
fn resolving_twice_gives_identical_results() {
    let dump = fixture();
    let index = HashIndex::build(&dump).expect("build");
    for strategy in Strategy::ALL {
        let a = resolve(&dump, &queries(), strategy, Some(&index), &config()).unwrap();
        let b = resolve(&dump, &queries(), strategy, Some(&index), &config()).unwrap();
        assert_eq!(a, b, "{strategy}");
    }
}

#[test]
fn empty_dump_resolves_everything_to_not_found() {
    let tmp = TempDir::new().unwrap();
    let dump = tmp.path().join("empty.xml");
    std::fs::write(&dump, "").unwrap();
    let index = HashIndex::build(&dump).expect("build");
    for strategy in Strategy::ALL {
        let docs = resolve(&dump, &queries(), strategy, Some(&index), &config()).unwrap();
        assert_eq!(docs.len(), queries().len());
        assert!(docs.iter().all(|d| *d == ResolvedDocument::not_found()), "{strategy}");
    }
}

#[test]
fn persisted_index_serves_lookups() {
    let tmp = TempDir::new().unwrap();
    let dump = fixture();
    let path = tmp.path().join("index.json");
    HashIndex::build(&dump).expect("build").save(&path).expect("save");
    let index = HashIndex::load(&path).expect("load");
    let docs = resolve(&dump, &queries(), Strategy::Hash, Some(&index), &config()).unwrap();
    assert_eq!(docs[4].url.as_deref(), Some("https://en.wikipedia.org/wiki/Toy_Story"));
}

#[test]
fn naive_limit_from_config_is_enforced() {
    let cfg = StrategyConfig { naive_max_bytes: Some(16), ..config() };
    let err = resolve(&fixture(), &queries(), Strategy::Naive, None, &cfg).unwrap_err();
    assert!(matches!(err, Error::NaiveThresholdExceeded { limit: 16, .. }));
    let heuristic = resolve(&fixture(), &queries(), Strategy::Heuristic, None, &cfg).unwrap();
    assert_eq!(heuristic.len(), queries().len());
}
