// src/export/pdf_export.rs

use crate::core::photo::decode_data_uri;
use crate::errors::{AppError, AppResult};
use crate::export::model::{PHOTO_COLUMN, events_to_rows, get_headers};
use crate::export::notify_export_success;
use crate::export::pdf::{PdfImage, PdfManager, PdfRow};
use crate::models::event::EventRecord;
use crate::ui::messages::{info, warning};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;
use std::path::Path;

/// Render the day as a PDF table, one embedded thumbnail per row with a photo.
pub(crate) fn export_pdf(
    events: &[EventRecord],
    path: &Path,
    title: &str,
    thumbnail_size: u32,
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let rows: Vec<PdfRow> = events_to_rows(events)
        .iter()
        .zip(events)
        .map(|(row, ev)| PdfRow {
            cells: row.to_pdf_cells(),
            image: if ev.has_photo() {
                let img = thumbnail(&ev.photo, thumbnail_size);
                if img.is_none() {
                    warning(format!("Photo of event {} could not be decoded; omitted.", ev.id));
                }
                img
            } else {
                None
            },
        })
        .collect();

    let mut pdf = PdfManager::new();
    pdf.write_table(title, &get_headers(), &rows, PHOTO_COLUMN);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}

/// Decode a data-URI picture and shrink it to fit `size`×`size` pixels.
pub(crate) fn thumbnail(data_uri: &str, size: u32) -> Option<PdfImage> {
    let (_, bytes) = decode_data_uri(data_uri)?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgb = img.thumbnail(size.max(1), size.max(1)).to_rgb8();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(rgb.as_raw()).ok()?;
    let data = encoder.finish().ok()?;

    Some(PdfImage {
        width: rgb.width(),
        height: rgb.height(),
        data,
    })
}
