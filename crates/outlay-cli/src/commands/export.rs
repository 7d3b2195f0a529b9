//! Export command implementation

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use outlay_core::export::{export_range, write};
use outlay_core::{Database, ExportFormat, Snapshot};
use tracing::warn;

use super::parse_date;

/// Export expenses dated within `[from, to]`, returning the number written
pub fn cmd_export(
    db: &Database,
    from: &str,
    to: &str,
    format: &str,
    output: Option<&Path>,
) -> Result<usize> {
    let start = parse_date(from)?;
    let end = parse_date(to)?;
    if start > end {
        warn!(%start, %end, "Export range is inverted, nothing will match");
    }
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow!(e))?;

    let extract = export_range(&Snapshot::load(db)?, start, end);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write(&extract, format, &mut writer)?;
            writer.flush()?;
            eprintln!(
                "✅ Exported {} expenses ({} to {}) to {}",
                extract.len(),
                start,
                end,
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write(&extract, format, &mut handle)?;
            handle.flush()?;
        }
    }

    Ok(extract.len())
}
