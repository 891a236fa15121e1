//! Shared plumbing for the `wikidump` binary: argument parsing, logging,
//! settings and query parsing.

pub mod cli;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use wikidump_core::config::{Config, Settings};
use wikidump_core::Query;

/// Installs the fmt subscriber, honouring `RUST_LOG` (default `info`).
/// Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    config.settings()
}

/// Picks the flag value if given, else the configured path, else fails naming `what`.
pub fn pick_path(flag: Option<PathBuf>, configured: Option<PathBuf>, what: &str) -> anyhow::Result<PathBuf> {
    flag.or(configured)
        .with_context(|| format!("no {what} path given; pass it as a flag or set it in config.toml"))
}

pub fn base_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Parses `"Heat (1995)"` into name + year; anything else is a bare name.
pub fn parse_query(arg: &str) -> Query {
    let arg = arg.trim();
    if let Some(open) = arg.rfind(" (") {
        let inner = &arg[open + 2..];
        if let Some(digits) = inner.strip_suffix(')') {
            if !digits.is_empty() && digits.len() <= 4 && digits.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(year) = digits.parse() {
                    return Query::new(&arg[..open], Some(year));
                }
            }
        }
    }
    Query::new(arg, None)
}

/// Reads queries from a JSON file holding `[{"name": .., "year": ..}, ..]`.
pub fn read_queries(path: &Path) -> anyhow::Result<Vec<Query>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing queries in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_year_is_split_off() {
        assert_eq!(parse_query("Heat (1995)"), Query::new("Heat", Some(1995)));
        assert_eq!(parse_query("  Toy Story "), Query::new("Toy Story", None));
        assert_eq!(parse_query("Heat (film)"), Query::new("Heat (film)", None));
        assert_eq!(parse_query("Mission: Impossible (1996)"), Query::new("Mission: Impossible", Some(1996)));
    }

    #[test]
    fn flag_beats_config() {
        let p = pick_path(Some("a".into()), Some("b".into()), "dump").unwrap();
        assert_eq!(p, PathBuf::from("a"));
        assert!(pick_path(None, None, "dump").is_err());
    }
}
