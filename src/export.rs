use crate::flatten::FlatRow;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

pub const ARTIFACT_PREFIX: &str = "daily-usage";

/// Run timestamp used in artifact names, e.g. `16-10-2026_09:05:00`.
pub fn run_stamp(at: DateTime<Local>) -> String {
    at.format("%d-%m-%Y_%H:%M:%S").to_string()
}

pub fn artifact_path(dir: &Path, stamp: &str, ext: &str) -> PathBuf {
    dir.join(format!("{}-{}.{}", ARTIFACT_PREFIX, stamp, ext))
}

/// Write the table as CSV: a blank-headed index column, then the ten
/// `FlatRow::COLUMNS`.
pub fn write_table(path: &Path, rows: &[FlatRow]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(std::iter::once("").chain(FlatRow::COLUMNS))?;
    for (idx, row) in rows.iter().enumerate() {
        let idx = idx.to_string();
        wtr.write_record(std::iter::once(idx.as_str()).chain(row.cells()))?;
    }
    wtr.flush()?;
    Ok(())
}
