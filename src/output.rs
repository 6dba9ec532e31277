//! Output persistence: cleaned CSV files and run summaries.
//!
//! Supports writing one cleaned file, pretty-printing a run summary, and
//! appending the summary to a CSV log.

use anyhow::Result;
use tracing::{debug, info};

use crate::cleaning::types::Row;
use crate::error::CleanError;
use crate::stats::RunStats;
use csv::WriterBuilder;
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Writes the expanded header followed by the combined rows to `path`,
/// creating parent directories as needed.
pub fn write_cleaned(path: &Path, header: &[String], rows: &[Row]) -> Result<(), CleanError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = rows.len(), "Cleaned CSV written");
    Ok(())
}

/// Logs a run summary as pretty-printed JSON.
pub fn print_json(stats: &RunStats) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}

/// Appends a [`RunStats`] record as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, stats: &RunStats) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending run summary");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // header only on a fresh file
        .from_writer(file);

    writer.serialize(stats)?;
    writer.flush()?;

    Ok(())
}
