//! wikidump-scan
//!
//! Streaming resolvers: a batched regex scan over the dump, the candidate
//! selector that merges per-batch results, and the single-pass and naive
//! strategies built from them.

pub mod resolver;
pub mod scanner;
pub mod select;

pub use resolver::{HeuristicScan, NaiveScan};
pub use scanner::{scan, scan_reader, BatchResults, ScanOptions};
pub use select::select;
