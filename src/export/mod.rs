//! Export functionality for run histories.
//!
//! Provides CSV time-series export and JSON history export.

mod csv_export;
mod json_export;

pub use csv_export::{export_history_csv, export_history_csv_to, write_history_csv, CsvExporter};
pub use json_export::{
    export_history_json, export_history_json_to, write_history_json, HistoryExport, EXPORT_VERSION,
};
