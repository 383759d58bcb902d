//! # Configuration
//!
//! Settings live in a TOML file (`rowop.toml` by default). Every field has a
//! default, so a missing file or an empty one gives a playable 3x3 puzzle.
//!
//! ```toml
//! [puzzle]
//! rows = 3
//! cols = 3
//! # seed = 1748801234567   # omit for a fresh seed from the clock
//! source = "sine"           # or "chacha"
//!
//! [storage]
//! data_dir = "data"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Command line flags override the file; the file overrides the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generator::SourceKind;

pub const MIN_ROWS: usize = 2;
pub const MAX_ROWS: usize = 9;
pub const MIN_COLS: usize = 1;
pub const MAX_COLS: usize = 9;

/// Largest seed the sine source can step through exactly (`2^53 - 1`).
pub const MAX_SEED: u64 = (1 << 53) - 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rows must be between 2 and 9, got {0}")]
    Rows(usize),

    #[error("cols must be between 1 and 9, got {0}")]
    Cols(usize),

    #[error("seed must be between 1 and 9007199254740991, got {0}")]
    Seed(u64),
}

/// Everything needed to generate one puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub rows: usize,
    pub cols: usize,
    pub seed: u64,
    pub source: SourceKind,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_ROWS..=MAX_ROWS).contains(&self.rows) {
            return Err(ConfigError::Rows(self.rows));
        }
        if !(MIN_COLS..=MAX_COLS).contains(&self.cols) {
            return Err(ConfigError::Cols(self.cols));
        }
        if !(1..=MAX_SEED).contains(&self.seed) {
            return Err(ConfigError::Seed(self.seed));
        }
        Ok(())
    }

    pub fn matrix_size(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    /// Fixed seed; a fresh one is taken from the clock when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub source: SourceKind,
}

fn default_rows() -> usize {
    3
}

fn default_cols() -> usize {
    3
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        PuzzleConfig {
            rows: default_rows(),
            cols: default_cols(),
            seed: None,
            source: SourceKind::default(),
        }
    }
}

impl PuzzleConfig {
    /// Resolves to concrete settings, using `fallback_seed` when no seed is configured.
    pub fn settings(&self, fallback_seed: u64) -> Settings {
        Settings {
            rows: self.rows,
            cols: self.cols,
            seed: self.seed.unwrap_or(fallback_seed),
            source: self.source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the saved stats.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`; `-v` on the command line wins.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub puzzle: PuzzleConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("parsing configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("in {}", path.display()))
    }

    /// Like [`Config::load`], but a missing file means defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(&Self::default())?;
        fs::write(path, contents)
            .with_context(|| format!("writing config file {}", path.display()))?;
        Ok(())
    }

    /// Checks the configured shape (and seed, if fixed).
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.puzzle.settings(1).validate()
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.logging
            .level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}
