use std::path::{Path, PathBuf};

use tracing::{info, warn};

use wikidump_core::config::StrategyConfig;
use wikidump_core::error::{Error, Result};
use wikidump_core::traits::DocumentResolver;
use wikidump_core::{Query, ResolvedDocument};

use crate::scanner::{scan, ScanOptions};
use crate::select::select;

/// Single pass over the dump: every batch is read once and all queries are
/// tried against it.
///
/// Only title and url are reported; `abstract_text` stays `None`.
pub struct HeuristicScan {
    dump: PathBuf,
    opts: ScanOptions,
}

impl HeuristicScan {
    pub fn new(dump: impl Into<PathBuf>, opts: ScanOptions) -> Self {
        Self { dump: dump.into(), opts }
    }
}

impl DocumentResolver for HeuristicScan {
    fn resolve(&mut self, queries: &[Query]) -> Result<Vec<ResolvedDocument>> {
        let batches = scan(&self.dump, queries, &self.opts)?;
        info!(batches = batches.len(), "selecting candidates");
        Ok(select(queries, batches).into_iter().map(ResolvedDocument::from).collect())
    }
}

/// Re-streams the whole dump once per query.
///
/// Exists as a baseline for timing comparisons. Refuses dumps above the
/// configured `naive_max_bytes`.
pub struct NaiveScan {
    dump: PathBuf,
    opts: ScanOptions,
    max_bytes: Option<u64>,
}

impl NaiveScan {
    pub fn new(dump: impl Into<PathBuf>, opts: ScanOptions) -> Self {
        Self { dump: dump.into(), opts, max_bytes: None }
    }

    pub fn from_config(dump: impl Into<PathBuf>, cfg: &StrategyConfig) -> Self {
        Self { dump: dump.into(), opts: ScanOptions::from(cfg), max_bytes: cfg.naive_max_bytes }
    }

    pub fn with_max_bytes(mut self, limit: Option<u64>) -> Self {
        self.max_bytes = limit;
        self
    }

    fn check_size(&self) -> Result<()> {
        let Some(limit) = self.max_bytes else {
            return Ok(());
        };
        let dump_bytes = dump_len(&self.dump)?;
        if dump_bytes > limit {
            warn!(dump_bytes, limit, "dump too large for naive scan");
            return Err(Error::NaiveThresholdExceeded { dump_bytes, limit });
        }
        Ok(())
    }
}

impl DocumentResolver for NaiveScan {
    fn resolve(&mut self, queries: &[Query]) -> Result<Vec<ResolvedDocument>> {
        self.check_size()?;
        let mut docs = Vec::with_capacity(queries.len());
        for query in queries {
            let single = std::slice::from_ref(query);
            let batches = scan(&self.dump, single, &self.opts)?;
            let best = select(single, batches).pop().unwrap_or_default();
            docs.push(ResolvedDocument::from(best));
        }
        Ok(docs)
    }
}

fn dump_len(path: &Path) -> Result<u64> {
    Ok(std::fs::metadata(path).map_err(|e| Error::io(path, e))?.len())
}
