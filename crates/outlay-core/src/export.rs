//! Date-range extraction and serialization of expense records
//!
//! Supports:
//! - Inclusive date-range filtering of a snapshot
//! - CSV export with a fixed header row
//! - JSON export as a pretty-printed array

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::snapshot::Snapshot;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {} (valid: csv, json)", s)),
        }
    }
}

/// One CSV row; labels instead of enum names
#[derive(Debug, Serialize)]
struct ExpenseCsvRow<'a> {
    id: i64,
    date: String,
    amount: f64,
    category: &'static str,
    payment_method: &'static str,
    notes: &'a str,
}

/// Records dated within `[start, end]`, both ends inclusive
///
/// An inverted range (`start > end`) yields an empty snapshot.
pub fn export_range(snapshot: &Snapshot, start: NaiveDate, end: NaiveDate) -> Snapshot {
    snapshot.filter(|r| start <= r.date && r.date <= end)
}

/// Serialize a snapshot to `writer` in the given format
pub fn write<W: Write>(snapshot: &Snapshot, format: ExportFormat, writer: W) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(snapshot, writer)?,
        ExportFormat::Json => write_json(snapshot, writer)?,
    }
    info!(
        records = snapshot.len(),
        format = format.as_str(),
        "Expenses exported"
    );
    Ok(())
}

fn write_csv<W: Write>(snapshot: &Snapshot, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if snapshot.is_empty() {
        // serde only emits the header alongside the first row
        wtr.write_record([
            "id",
            "date",
            "amount",
            "category",
            "payment_method",
            "notes",
        ])?;
    }
    for r in snapshot {
        wtr.serialize(ExpenseCsvRow {
            id: r.id,
            date: r.date.to_string(),
            amount: r.amount,
            category: r.category.as_str(),
            payment_method: r.payment_method.as_str(),
            notes: &r.notes,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_json<W: Write>(snapshot: &Snapshot, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writeln!(writer)?;
    Ok(())
}
