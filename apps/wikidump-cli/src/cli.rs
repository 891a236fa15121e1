use std::path::PathBuf;

use clap::{Parser, Subcommand};

use wikidump_resolve::Strategy;

#[derive(Parser)]
#[command(
    name = "wikidump",
    about = "Resolve film titles against a Wikipedia abstract dump",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve queries and print the documents as JSON
    Resolve {
        /// Queries such as "Heat (1995)" or "Toy Story"
        queries: Vec<String>,

        /// JSON file with [{"name": .., "year": ..}] queries, appended after positional ones
        #[arg(long)]
        queries_file: Option<PathBuf>,

        /// hash, heuristic or naive
        #[arg(short, long, default_value = "hash")]
        strategy: Strategy,

        /// Dump file (defaults to [dump].path)
        #[arg(long)]
        dump: Option<PathBuf>,

        /// Persisted index for the hash strategy (defaults to [index].path)
        #[arg(long)]
        index: Option<PathBuf>,

        /// Lines per batch for the streaming strategies
        #[arg(long)]
        batch_lines: Option<usize>,

        /// Total line count of the dump, to show scan progress
        #[arg(long)]
        total_lines: Option<u64>,
    },

    /// Build the byte-offset hash index for a dump and store it on disk.
    /// This reads the whole dump once and can take several minutes.
    BuildIndex {
        /// Dump file (defaults to [dump].path)
        #[arg(long)]
        dump: Option<PathBuf>,

        /// Where to write the index (defaults to [index].path)
        #[arg(long)]
        index: Option<PathBuf>,
    },

    /// Time the naive, single-pass and hash strategies on 1, 5 and 10 query workloads
    Compare {
        /// Dump file (defaults to [dump].path)
        #[arg(long)]
        dump: Option<PathBuf>,

        /// Lines per batch for the streaming strategies
        #[arg(long, default_value_t = 20_000)]
        batch_lines: usize,
    },
}
