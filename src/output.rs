//! Output formatting and persistence.
//!
//! GeoJSON file writes and CSV append of category counts.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing::debug;

use crate::calls::CategoryCount;

/// Writes `value` as pretty JSON with a trailing newline, creating parent
/// directories as needed.
pub fn write_json(path: &str, value: &impl Serialize) -> Result<()> {
    if let Some(dir) = Path::new(path).parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("failed to write {path}"))?;
    debug!(path, "Wrote JSON");
    Ok(())
}

/// One row of the call count CSV.
#[derive(Debug, Serialize)]
pub struct CountRecord<'a> {
    pub generated_at: DateTime<Utc>,
    pub dimension: &'a str,
    pub label: &'a str,
    pub count: usize,
    pub filter: Option<&'a str>,
}

/// Appends one row per count to a CSV file.
///
/// Writes headers first when the file is missing or empty.
pub fn append_counts(
    path: &str,
    dimension: &str,
    counts: &[CategoryCount],
    filter: Option<&str>,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    let has_rows = fs::metadata(path).is_ok_and(|m| m.len() > 0);
    debug!(path, has_rows, rows = counts.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!has_rows) // IMPORTANT when appending
        .from_writer(file);

    for c in counts {
        writer.serialize(CountRecord {
            generated_at,
            dimension,
            label: &c.label,
            count: c.count,
            filter,
        })?;
    }
    writer.flush()?;

    Ok(())
}
