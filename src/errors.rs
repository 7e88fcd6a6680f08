//! Unified application error type.
//! All modules (db, core, cli, export, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Validation errors (create)
    // ---------------------------
    #[error("Please fill in all the form fields (missing: {0})")]
    MissingFields(String),

    #[error("The end time ({end}) cannot be earlier than or equal to the start time ({start})")]
    InvalidTimeOrder { start: String, end: String },

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Store invariants
    // ---------------------------
    #[error("Event dated {record} does not belong to the collection of {collection}")]
    DateMismatch { record: String, collection: String },

    #[error("No event id left above {0} for this date")]
    IdExhausted(i64),

    // ---------------------------
    // Photo attachment
    // ---------------------------
    #[error("Photo error: {0}")]
    Photo(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Please enter a name for the export file")]
    ExportPrecondition,

    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
