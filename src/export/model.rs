// src/export/model.rs

use crate::models::event::EventRecord;
use crate::ui::view::HEADERS;
use serde::Serialize;

/// Flat row shared by the CSV and PDF exports; column names follow the
/// table header.
#[derive(Serialize, Clone, Debug)]
pub struct EventExport {
    #[serde(rename = "#")]
    pub index: usize,
    #[serde(rename = "Fecha")]
    pub date: String,
    #[serde(rename = "Inicio")]
    pub start: String,
    #[serde(rename = "Fin")]
    pub end: String,
    #[serde(rename = "Duración")]
    pub duration: String,
    #[serde(rename = "Motivo")]
    pub reason: String,
    #[serde(rename = "Foto")]
    pub photo: String,
}

impl EventExport {
    pub fn from_record(index: usize, e: &EventRecord) -> Self {
        Self {
            index,
            date: e.date_str(),
            start: e.start_str(),
            end: e.end_str(),
            duration: e.duration.clone(),
            reason: e.reason.clone(),
            photo: if e.has_photo() { "yes".into() } else { String::new() },
        }
    }

    /// Cells for the PDF table; the photo cell stays blank for the picture.
    pub(crate) fn to_pdf_cells(&self) -> Vec<String> {
        vec![
            self.index.to_string(),
            self.date.clone(),
            self.start.clone(),
            self.end.clone(),
            self.duration.clone(),
            self.reason.clone(),
            String::new(),
        ]
    }
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    HEADERS.to_vec()
}

/// Column holding the picture in the PDF table.
pub(crate) const PHOTO_COLUMN: usize = 6;

/// Number rows from 1, in insertion order.
pub(crate) fn events_to_rows(events: &[EventRecord]) -> Vec<EventExport> {
    events
        .iter()
        .enumerate()
        .map(|(i, e)| EventExport::from_record(i + 1, e))
        .collect()
}
