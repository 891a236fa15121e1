use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The offset points past the end of the dump, usually because the index
    /// was built against a different revision of it.
    #[error("Offset {offset} is beyond the end of the dump ({len} bytes)")]
    Seek { offset: u64, len: u64 },

    #[error("Hash strategy requested but no index is loaded")]
    IndexUnavailable,

    #[error("Malformed index file {path}: {reason}")]
    IndexFormat { path: PathBuf, reason: String },

    #[error("Naive scan refused: dump is {dump_bytes} bytes, limit is {limit} bytes")]
    NaiveThresholdExceeded { dump_bytes: u64, limit: u64 },

    #[error("Scan cancelled after {batches} batches")]
    Cancelled { batches: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
