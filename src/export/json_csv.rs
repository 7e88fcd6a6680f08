// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::events_to_rows;
use crate::export::notify_export_success;
use crate::models::event::EventRecord;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed: full records, photos included.
pub(crate) fn export_json(events: &[EventRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(events)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV with the table header (column names come from serde).
pub(crate) fn export_csv(events: &[EventRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    let rows = events_to_rows(events);
    if rows.is_empty() {
        // serde only emits the header together with a first record
        wtr.write_record(crate::export::model::get_headers())
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    for item in &rows {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
