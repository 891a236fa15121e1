//! Streaming batch scan over the dump.
//!
//! The dump is read as consecutive blocks of `batch_line_count` lines (the
//! last block may be shorter). Every query's patterns are tried against each
//! block, most specific first, and the first match in the block is kept. A
//! block holding several records that match equally well therefore only
//! reports the earliest of them.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use wikidump_core::config::StrategyConfig;
use wikidump_core::error::{Error, Result};
use wikidump_core::patterns::{generate, Pattern};
use wikidump_core::{Candidate, Query};

/// Per-batch candidates, outer index = batch, inner index = query.
pub type BatchResults = Vec<Vec<Candidate>>;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub batch_line_count: usize,
    /// Expected total line count; only used to size the progress bar.
    pub progress_hint: Option<u64>,
    /// Checked after every completed batch.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from(&StrategyConfig::default())
    }
}

impl From<&StrategyConfig> for ScanOptions {
    fn from(cfg: &StrategyConfig) -> Self {
        Self { batch_line_count: cfg.batch_line_count, progress_hint: cfg.progress_hint, cancel: None }
    }
}

impl ScanOptions {
    pub fn with_batch_line_count(mut self, n: usize) -> Self {
        self.batch_line_count = n;
        self
    }

    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn progress_bar(&self) -> ProgressBar {
        let Some(total) = self.progress_hint else {
            return ProgressBar::hidden();
        };
        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines ({percent}%) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Querying dump");
        pb
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|c| c.load(Ordering::Relaxed))
    }
}

/// Best candidate for one query within one text block.
pub fn search_block(text: &str, patterns: &[Pattern]) -> Candidate {
    for p in patterns {
        if let Some(caps) = p.matcher.captures(text) {
            let title = caps.get(1).map_or("", |m| m.as_str()).to_string();
            let url = caps.get(2).map_or("", |m| m.as_str()).to_string();
            return Candidate::matched(p.specificity, title, url);
        }
    }
    Candidate::none()
}

/// Candidates for every query within one text block, in query order.
pub fn search_block_all(text: &str, compiled: &[Vec<Pattern>]) -> Vec<Candidate> {
    compiled.iter().map(|patterns| search_block(text, patterns)).collect()
}

/// Scans the dump at `path` once, evaluating all queries on every batch.
pub fn scan(path: &Path, queries: &[Query], opts: &ScanOptions) -> Result<BatchResults> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    info!(dump = %path.display(), queries = queries.len(), batch_lines = opts.batch_line_count, "streaming scan");
    scan_reader(BufReader::new(file), queries, opts).map_err(|e| match e {
        Error::Io { source, .. } => Error::io(path, source),
        other => other,
    })
}

/// Same as [`scan`] over any buffered reader.
pub fn scan_reader<R: BufRead>(mut reader: R, queries: &[Query], opts: &ScanOptions) -> Result<BatchResults> {
    if opts.batch_line_count == 0 {
        return Err(Error::InvalidConfig("batch_line_count must be at least 1".to_string()));
    }
    let compiled = queries.iter().map(generate).collect::<Result<Vec<_>>>()?;
    let pb = opts.progress_bar();
    let mut results = Vec::new();
    let mut block = String::new();
    loop {
        let lines = read_batch(&mut reader, opts.batch_line_count, &mut block)
            .map_err(|e| Error::io("<dump>", e))?;
        if lines == 0 {
            break;
        }
        let candidates = search_block_all(&block, &compiled);
        debug!(
            batch = results.len(),
            lines,
            matched = candidates.iter().filter(|c| c.is_match()).count(),
            "batch scanned"
        );
        results.push(candidates);
        pb.inc(lines as u64);
        if opts.cancelled() {
            pb.abandon_with_message("cancelled");
            return Err(Error::Cancelled { batches: results.len() });
        }
    }
    pb.finish_with_message("done");
    Ok(results)
}

/// Fills `block` with up to `max_lines` lines and returns how many were read.
fn read_batch<R: BufRead>(reader: &mut R, max_lines: usize, block: &mut String) -> std::io::Result<usize> {
    block.clear();
    let mut buf = Vec::new();
    let mut lines = 0;
    while lines < max_lines {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        block.push_str(&String::from_utf8_lossy(&buf));
        lines += 1;
    }
    Ok(lines)
}
