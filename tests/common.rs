#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rstoplogger::core::photo::PhotoBlob;
use rstoplogger::models::event::{EventRecord, NewEvent};
use rstoplogger::ui::view::TableView;
use std::env;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

pub fn rsl() -> Command {
    cargo_bin_cmd!("rstoplogger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rstoplogger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Temporary output path (without extension) inside tempdir; any previous
/// file with the given extension is removed.
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out", name));
    fs::remove_file(path.with_extension(ext)).ok();
    path.to_string_lossy().to_string()
}

/// Initialize the DB through the CLI (test mode leaves the config alone)
pub fn init_db(db_path: &str) {
    rsl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Add one event through the CLI
pub fn add_event(db_path: &str, date: &str, number: &str, start: &str, end: &str, reason: &str) {
    rsl()
        .args([
            "--db", db_path, "add", "--number", number, "--date", date, "--start", start, "--end",
            end, "--reason", reason,
        ])
        .assert()
        .success();
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub fn new_event(number: &str, date: &str, start: &str, end: &str, reason: &str) -> NewEvent {
    NewEvent {
        number: number.into(),
        date: date.into(),
        start: start.into(),
        end: end.into(),
        reason: reason.into(),
    }
}

/// A small PNG, encoded in memory.
pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_fn(8, 6, |x, y| image::Rgb([(x * 30) as u8, (y * 40) as u8, 128]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encode png");
    buf
}

pub fn png_blob() -> PhotoBlob {
    PhotoBlob::from_bytes(&png_bytes())
}

/// View that remembers every projection it received.
#[derive(Default)]
pub struct RecordingView {
    pub renders: Vec<(NaiveDate, Vec<EventRecord>)>,
}

impl RecordingView {
    pub fn last(&self) -> Option<&(NaiveDate, Vec<EventRecord>)> {
        self.renders.last()
    }
}

impl TableView for RecordingView {
    fn render(&mut self, date: NaiveDate, events: &[EventRecord]) {
        self.renders.push((date, events.to_vec()));
    }
}
