//! wikidump-resolve
//!
//! One entry point over the three resolution strategies. The caller picks
//! the strategy; nothing here chooses one automatically.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use wikidump_core::config::StrategyConfig;
use wikidump_core::error::{Error, Result};
use wikidump_core::traits::DocumentResolver;
use wikidump_core::{Query, Resolution, ResolvedDocument};
use wikidump_index::{HashIndex, HashLookup, RecordReader};
use wikidump_scan::{HeuristicScan, NaiveScan, ScanOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Point lookups through a prebuilt index; the only strategy that reads abstracts.
    Hash,
    /// One streaming pass for all queries.
    Heuristic,
    /// One streaming pass per query.
    Naive,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Naive, Strategy::Heuristic, Strategy::Hash];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strategy::Hash => "hash",
            Strategy::Heuristic => "heuristic",
            Strategy::Naive => "naive",
        };
        f.write_str(s)
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hash" => Ok(Strategy::Hash),
            "heuristic" | "single-pass" => Ok(Strategy::Heuristic),
            "naive" => Ok(Strategy::Naive),
            other => Err(format!("unknown strategy '{other}' (expected hash, heuristic or naive)")),
        }
    }
}

/// Resolves `queries` against `dump` with the chosen strategy.
///
/// Returns one document per query in the same order. `index` is required
/// for [`Strategy::Hash`] and ignored otherwise. Queries and configuration
/// are validated before the dump is touched.
pub fn resolve(
    dump: &Path,
    queries: &[Query],
    strategy: Strategy,
    index: Option<&HashIndex>,
    config: &StrategyConfig,
) -> Result<Vec<ResolvedDocument>> {
    config.validate()?;
    queries.iter().try_for_each(Query::validate)?;

    let started = Instant::now();
    let docs = match strategy {
        Strategy::Hash => {
            let index = index.ok_or(Error::IndexUnavailable)?;
            let reader = RecordReader::open(dump)?.with_max_abstract_lines(config.max_abstract_lines);
            HashLookup::new(index, reader).resolve(queries)?
        }
        Strategy::Heuristic => HeuristicScan::new(dump, ScanOptions::from(config)).resolve(queries)?,
        Strategy::Naive => NaiveScan::from_config(dump, config).resolve(queries)?,
    };

    let summary = Resolution::of(&docs);
    info!(
        %strategy,
        resolved = summary.resolved,
        total = summary.total,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "resolution finished"
    );
    Ok(docs)
}
