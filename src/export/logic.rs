// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::pdf_export::export_pdf;
use crate::models::collection::EventCollection;
use crate::ui::messages::warning;
use crate::utils::path::{expand_tilde, with_default_extension};
use std::path::PathBuf;

/// Presentation settings for the exported document.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub title: String,
    pub thumbnail_size: u32,
    pub force: bool,
}

/// High-level export of one day.
pub struct ExportLogic;

impl ExportLogic {
    /// Export `collection` under `file_name`.
    ///
    /// A blank name is rejected before anything is rendered. The format's
    /// extension is appended when the name has none.
    pub fn export(
        collection: &EventCollection,
        file_name: &str,
        format: ExportFormat,
        opts: &ExportOptions,
    ) -> AppResult<PathBuf> {
        let path = resolve_export_path(file_name, format)?;

        ensure_writable(&path, opts.force)?;

        if collection.is_empty() {
            warning(format!(
                "No events for {}: exporting an empty table.",
                collection.date()
            ));
        }

        let events = collection.events();
        match format {
            ExportFormat::Pdf => {
                let title = build_pdf_title(&opts.title, collection);
                export_pdf(events, &path, &title, opts.thumbnail_size)?
            }
            ExportFormat::Csv => export_csv(events, &path)?,
            ExportFormat::Json => export_json(events, &path)?,
        }

        Ok(path)
    }
}

/// Validate the user-supplied name and turn it into the output path.
pub fn resolve_export_path(file_name: &str, format: ExportFormat) -> AppResult<PathBuf> {
    let name = file_name.trim();
    if name.is_empty() {
        return Err(AppError::ExportPrecondition);
    }
    Ok(with_default_extension(&expand_tilde(name), format.as_str()))
}

fn build_pdf_title(title: &str, collection: &EventCollection) -> String {
    format!("{} - {}", title, collection.date().format("%Y-%m-%d"))
}
