//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `load_config` - Resolve config file plus CLI overrides
//! - `open_db` - Shared utility to open the database
//! - `parse_date` / `parse_month` - Argument parsing with friendly errors
//! - `cmd_init` - Initialize the database

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use outlay_core::{Config, Database, Month};

/// Load the config file, then apply `--db` / `--out-dir` overrides
pub fn load_config(
    config_path: Option<&std::path::Path>,
    db: Option<PathBuf>,
    out_dir: Option<PathBuf>,
) -> Result<Config> {
    let mut config = Config::load(config_path).context("Failed to load config")?;
    if let Some(db) = db {
        config.db_path = db;
    }
    if out_dir.is_some() {
        config.output_dir = out_dir;
    }
    Ok(config)
}

/// Open the configured database, creating it if needed
pub fn open_db(config: &Config) -> Result<Database> {
    let path = config
        .db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::with_pool_size(path, config.pool_size)
        .with_context(|| format!("Failed to open database at {}", path))
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", s))
}

pub fn parse_month(s: &str) -> Result<Month> {
    Ok(s.parse::<Month>()?)
}

pub fn cmd_init(config: &Config) -> Result<()> {
    println!(
        "🔧 Initializing database at {}...",
        config.db_path.display()
    );

    let db = open_db(config)?;
    let count = db.count_expenses()?;

    println!("✅ Database ready ({} expenses)", count);
    println!();
    println!("Next steps:");
    println!("  1. Add an expense: outlay add -d 2025-01-15 -a 250 -c Food -p UPI");
    println!("  2. Set a budget:   outlay budget set 2025-01 5000 --savings 1000");
    println!("  3. Check progress: outlay progress 2025-01");

    Ok(())
}
