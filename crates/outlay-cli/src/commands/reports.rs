//! Report command implementations
//!
//! Aggregates come from the shared [`AggregateCache`]. When an output
//! directory is configured, each report is also written there as JSON.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use outlay_core::analytics::monthly_summary;
use outlay_core::{AggregateCache, Config, Database, Month, Snapshot};
use serde::Serialize;
use tracing::info;

use super::parse_month;

/// Load the ledger, optionally narrowed to one month
fn load_snapshot(db: &Database, month: Option<&str>) -> Result<(Snapshot, Option<Month>)> {
    let snapshot = Snapshot::load(db)?;
    match month {
        Some(m) => {
            let month = parse_month(m)?;
            Ok((monthly_summary(&snapshot, month), Some(month)))
        }
        None => Ok((snapshot, None)),
    }
}

/// Write `data` as `<dir>/<name>.json`, returning the path written
pub fn write_artifact<T: Serialize + ?Sized>(
    dir: &Path,
    name: &str,
    data: &T,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = dir.join(format!("{}.json", name));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    info!(path = %path.display(), "Report artifact written");
    Ok(path)
}

/// `<kind>` or `<kind>_<YYYY-MM>`, using the normalized month key
pub fn artifact_name(kind: &str, month: Option<Month>) -> String {
    match month {
        Some(m) => format!("{}_{}", kind, m),
        None => kind.to_string(),
    }
}

pub fn cmd_report_category(
    db: &Database,
    config: &Config,
    cache: &mut AggregateCache,
    month: Option<&str>,
) -> Result<()> {
    let (snapshot, month) = load_snapshot(db, month)?;
    let aggregates = cache.get_or_compute(&snapshot);

    println!();
    match month {
        Some(m) => println!("🏷️  Spending by Category ({})", m),
        None => println!("🏷️  Spending by Category"),
    }
    println!("   ─────────────────────────────────────────────");

    if aggregates.categories.is_empty() {
        println!("   No expenses found.");
    } else {
        println!(
            "   {:13} │ {:>10} │ {:>6} │ {:>5}",
            "Category", "Amount", "Share", "Count"
        );
        println!("   ──────────────┼────────────┼────────┼──────");
        for c in &aggregates.categories {
            println!(
                "   {:13} │ {:>10.2} │ {:>5.1}% │ {:>5}",
                c.category.as_str(),
                c.amount,
                c.percentage,
                c.count
            );
        }
        println!("   ──────────────┼────────────┼────────┼──────");
        println!("   {:13} │ {:>10.2} │", "Total", snapshot.total());
    }

    if let Some(dir) = &config.output_dir {
        let path = write_artifact(
            dir,
            &artifact_name("category", month),
            &aggregates.categories,
        )?;
        println!();
        println!("   📄 Saved to {}", path.display());
    }
    Ok(())
}

pub fn cmd_report_daily(
    db: &Database,
    config: &Config,
    cache: &mut AggregateCache,
    month: Option<&str>,
) -> Result<()> {
    let (snapshot, month) = load_snapshot(db, month)?;
    let aggregates = cache.get_or_compute(&snapshot);

    println!();
    match month {
        Some(m) => println!("📅 Daily Spending ({})", m),
        None => println!("📅 Daily Spending"),
    }
    println!("   ─────────────────────────────────────");

    if aggregates.daily.is_empty() {
        println!("   No expenses found.");
    } else {
        println!("   {:10} │ {:>10} │ {:>5}", "Date", "Amount", "Count");
        println!("   ───────────┼────────────┼──────");
        for d in &aggregates.daily {
            println!("   {:10} │ {:>10.2} │ {:>5}", d.date, d.amount, d.count);
        }
    }

    if let Some(dir) = &config.output_dir {
        let path = write_artifact(dir, &artifact_name("daily", month), &aggregates.daily)?;
        println!();
        println!("   📄 Saved to {}", path.display());
    }
    Ok(())
}

pub fn cmd_report_monthly(
    db: &Database,
    config: &Config,
    cache: &mut AggregateCache,
) -> Result<()> {
    let (snapshot, _) = load_snapshot(db, None)?;
    let aggregates = cache.get_or_compute(&snapshot);

    println!();
    println!("📈 Monthly Spending");
    println!("   ─────────────────────────────────────");

    if aggregates.monthly.is_empty() {
        println!("   No expenses found.");
    } else {
        let max = aggregates
            .monthly
            .iter()
            .map(|m| m.amount)
            .fold(0.0_f64, f64::max);

        println!("   {:8} │ {:>10} │ {:>5} │", "Month", "Amount", "Count");
        println!("   ─────────┼────────────┼───────┼──────────────────────");
        for m in &aggregates.monthly {
            let width = if max > 0.0 {
                ((m.amount / max) * 20.0).round() as usize
            } else {
                0
            };
            println!(
                "   {:8} │ {:>10.2} │ {:>5} │ {}",
                m.month.to_string(),
                m.amount,
                m.count,
                "█".repeat(width)
            );
        }
    }

    if let Some(dir) = &config.output_dir {
        let path = write_artifact(dir, "monthly", &aggregates.monthly)?;
        println!();
        println!("   📄 Saved to {}", path.display());
    }
    Ok(())
}
