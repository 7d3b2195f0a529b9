//! Application configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/outlay/config.toml), if the file exists
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Missing keys in an override file keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::cache::DEFAULT_CACHE_ENTRIES;
use crate::db::DEFAULT_POOL_SIZE;
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/outlay.toml");

/// Resolved application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite database file
    pub db_path: PathBuf,
    pub pool_size: u32,
    /// Where report artifacts are written; None means print only
    pub output_dir: Option<PathBuf>,
    /// Snapshots kept by the aggregate cache
    pub cache_entries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("outlay.db"),
            pool_size: DEFAULT_POOL_SIZE,
            output_dir: None,
            cache_entries: DEFAULT_CACHE_ENTRIES,
        }
    }
}

impl Config {
    /// Load from `path` if given, else from the default override location,
    /// else the embedded defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let override_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        let content = match override_path {
            Some(p) if p.exists() => {
                debug!(path = %p.display(), "Loading config override");
                fs::read_to_string(&p)
                    .map_err(|e| Error::Config(format!("Failed to read {}: {}", p.display(), e)))?
            }
            _ => DEFAULT_CONFIG.to_string(),
        };

        parse_config(&content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("outlay").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    storage: Option<RawStorage>,
    reports: Option<RawReports>,
}

#[derive(Debug, Deserialize)]
struct RawStorage {
    db_path: Option<PathBuf>,
    pool_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawReports {
    output_dir: Option<PathBuf>,
    cache_entries: Option<usize>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(storage) = raw.storage {
        if let Some(db_path) = storage.db_path {
            config.db_path = db_path;
        }
        if let Some(pool_size) = storage.pool_size {
            if pool_size == 0 {
                return Err(Error::Config("storage.pool_size must be at least 1".into()));
            }
            config.pool_size = pool_size;
        }
    }

    if let Some(reports) = raw.reports {
        config.output_dir = reports.output_dir;
        if let Some(entries) = reports.cache_entries {
            config.cache_entries = entries.max(1);
        }
    }

    Ok(config)
}
