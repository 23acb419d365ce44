//! CSV time-series export of a run history.
//!
//! One header row (`time` followed by every value key in sorted order) and
//! one row per tick. Keys come from the first record; later records are
//! written in the same column order and missing keys are written as 0.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;

use crate::history::{History, HistoryRecord};

/// Streaming CSV writer for history records
pub struct CsvExporter<W: Write> {
    writer: csv::Writer<W>,
    /// Column keys after `time`, fixed by the first record
    columns: Option<Vec<String>>,
    rows: usize,
}

impl<W: Write> CsvExporter<W> {
    pub fn from_writer(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
            columns: None,
            rows: 0,
        }
    }

    /// Append one record, writing the header first if needed
    pub fn record(&mut self, record: &HistoryRecord) -> Result<()> {
        if self.columns.is_none() {
            let columns: Vec<String> = record.keys().map(str::to_string).collect();
            let mut header = Vec::with_capacity(columns.len() + 1);
            header.push("time");
            header.extend(columns.iter().map(String::as_str));
            self.writer.write_record(&header)?;
            self.columns = Some(columns);
        }

        if let Some(columns) = &self.columns {
            let mut row = Vec::with_capacity(columns.len() + 1);
            row.push(record.time.to_string());
            row.extend(columns.iter().map(|key| record.get(key).to_string()));
            self.writer.write_record(&row)?;
        }
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl CsvExporter<File> {
    /// Create a file-backed exporter at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        log::info!("CSV export started: {}", path.as_ref().display());
        Ok(Self::from_writer(file))
    }
}

/// Write a full history to any writer
pub fn write_history_csv<W: Write>(history: &History, inner: W) -> Result<()> {
    let mut exporter = CsvExporter::from_writer(inner);
    for record in history.records() {
        exporter.record(record)?;
    }
    exporter.flush()
}

/// Export a history to a specific CSV file
pub fn export_history_csv_to<P: AsRef<Path>>(history: &History, path: P) -> Result<()> {
    let mut exporter = CsvExporter::create(path.as_ref())?;
    for record in history.records() {
        exporter.record(record)?;
    }
    exporter.flush()?;

    log::info!("CSV export complete: {} rows", exporter.rows());
    Ok(())
}

/// Export a history to `exports/<scenario>_YYYYMMDD_HHMMSS.csv`
///
/// Creates the exports directory if it doesn't exist.
/// Returns the path to the saved CSV file.
pub fn export_history_csv(history: &History, scenario: &str) -> Result<PathBuf> {
    let dir = PathBuf::from("exports");
    std::fs::create_dir_all(&dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{}_{}.csv", scenario, timestamp));

    export_history_csv_to(history, &path)?;
    Ok(path)
}
