use crate::domain::models::OutputRow;
use anyhow::Context;
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::{Path, PathBuf};

/// `output_HHMMSS.csv`, from the local time of day.
pub fn output_file_name(now: DateTime<Local>) -> String {
    format!("output_{}.csv", now.format("%H%M%S"))
}

pub fn write_csv<W: Write>(out: W, headers: &[&str], rows: &[OutputRow]) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(out);
    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes into a timestamped file under `dir`, or to stdout without one.
/// Returns the file path when a file was written.
pub fn write_output(
    dir: Option<&Path>,
    headers: &[&str],
    rows: &[OutputRow],
) -> anyhow::Result<Option<PathBuf>> {
    match dir {
        Some(dir) => {
            let path = dir.join(output_file_name(Local::now()));
            tracing::info!("Writing CSV to {}", path.display());
            let file = std::fs::File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_csv(file, headers, rows)
                .with_context(|| format!("failed to write {}", path.display()))?;
            Ok(Some(path))
        }
        None => {
            tracing::info!("Writing CSV to stdout");
            write_csv(std::io::stdout().lock(), headers, rows)?;
            Ok(None)
        }
    }
}
