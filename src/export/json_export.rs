//! JSON export of a run history.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use serde::Serialize;

use crate::history::{History, HistoryRecord};

/// Export format version
pub const EXPORT_VERSION: &str = "1.0.0";

/// Full history export structure
#[derive(Debug, Clone, Serialize)]
pub struct HistoryExport<'a> {
    /// Export timestamp
    pub exported_at: String,
    /// Export version for compatibility
    pub version: &'static str,
    pub scenario: &'a str,
    pub ticks: usize,
    /// Flat per-tick records
    pub records: &'a [HistoryRecord],
}

impl<'a> HistoryExport<'a> {
    pub fn new(history: &'a History, scenario: &'a str) -> Self {
        Self {
            exported_at: Local::now().to_rfc3339(),
            version: EXPORT_VERSION,
            scenario,
            ticks: history.len(),
            records: history.records(),
        }
    }
}

/// Write a history as pretty JSON to any writer
pub fn write_history_json<W: Write>(history: &History, scenario: &str, writer: W) -> Result<()> {
    let export = HistoryExport::new(history, scenario);
    serde_json::to_writer_pretty(writer, &export)?;
    Ok(())
}

/// Export a history to a specific file
pub fn export_history_json_to<P: AsRef<Path>>(history: &History, scenario: &str, path: P) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_history_json(history, scenario, file)?;

    log::info!("JSON history exported: {}", path.as_ref().display());
    Ok(())
}

/// Export a history to `exports/<scenario>_YYYYMMDD_HHMMSS.json`
///
/// Creates the exports directory if it doesn't exist.
/// Returns the path to the saved JSON file.
pub fn export_history_json(history: &History, scenario: &str) -> Result<PathBuf> {
    let dir = PathBuf::from("exports");
    std::fs::create_dir_all(&dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{}_{}.json", scenario, timestamp));

    export_history_json_to(history, scenario, &path)?;
    Ok(path)
}
