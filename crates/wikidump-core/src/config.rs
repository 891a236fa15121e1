//! Configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Typed sections are extracted with [`Config::settings`]; the search section
//! becomes a [`StrategyConfig`] handed explicitly to the resolvers.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub const DEFAULT_BATCH_LINE_COUNT: usize = 10_000;
pub const DEFAULT_MAX_ABSTRACT_LINES: usize = 64;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.settings()?.validate()?;
        Ok(config)
    }

    /// All typed sections, with defaults for anything left unset.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dump: DumpSettings,
    pub index: IndexSettings,
    pub search: StrategyConfig,
}

impl Settings {
    pub fn validate(&self) -> crate::error::Result<()> {
        self.search.validate()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpSettings {
    pub path: Option<String>,
}

impl DumpSettings {
    pub fn resolved_path(&self, base: &Path) -> Option<PathBuf> {
        self.path.as_deref().map(|p| resolve_with_base(base, p))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexSettings {
    pub path: Option<String>,
}

impl IndexSettings {
    pub fn resolved_path(&self, base: &Path) -> Option<PathBuf> {
        self.path.as_deref().map(|p| resolve_with_base(base, p))
    }
}

/// Knobs for the streaming strategies and the record reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Lines per batch for the streaming scanner.
    pub batch_line_count: usize,
    /// Expected total line count of the dump. Only drives progress display.
    pub progress_hint: Option<u64>,
    /// Naive mode is refused for dumps larger than this many bytes.
    pub naive_max_bytes: Option<u64>,
    /// Upper bound on lines read while collecting an abstract.
    pub max_abstract_lines: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            batch_line_count: DEFAULT_BATCH_LINE_COUNT,
            progress_hint: None,
            naive_max_bytes: None,
            max_abstract_lines: DEFAULT_MAX_ABSTRACT_LINES,
        }
    }
}

impl StrategyConfig {
    pub fn with_batch_line_count(mut self, n: usize) -> Self {
        self.batch_line_count = n;
        self
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        if self.batch_line_count == 0 {
            return Err(Error::InvalidConfig("search.batch_line_count must be at least 1".to_string()));
        }
        if self.max_abstract_lines == 0 {
            return Err(Error::InvalidConfig("search.max_abstract_lines must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
