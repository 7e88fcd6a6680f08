//! Projection of the active day onto a display grid.

use crate::models::event::EventRecord;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

/// Column titles shared by the terminal table and the exports.
pub const HEADERS: [&str; 7] = ["#", "Fecha", "Inicio", "Fin", "Duración", "Motivo", "Foto"];

/// Receives the active collection, in insertion order, after each change.
pub trait TableView {
    fn render(&mut self, date: NaiveDate, events: &[EventRecord]);
}

/// Used by commands that mutate the store without showing the day.
#[derive(Debug, Default)]
pub struct NoView;

impl TableView for NoView {
    fn render(&mut self, _date: NaiveDate, _events: &[EventRecord]) {}
}

/// Prints the day as a text table. The `ID` column is the handle for `del`;
/// `Nº` is the user-supplied event number.
#[derive(Debug)]
pub struct TerminalTable {
    pub separator: char,
    pub reason_width: usize,
}

impl Default for TerminalTable {
    fn default() -> Self {
        Self {
            separator: '-',
            reason_width: 40,
        }
    }
}

impl TerminalTable {
    pub fn build(&self, events: &[EventRecord]) -> Table {
        let mut columns = vec![
            Column::new(HEADERS[0]),
            Column::new("ID"),
            Column::new("Nº"),
        ];
        columns.extend(HEADERS[1..5].iter().map(|h| Column::new(h)));
        columns.push(Column::wrapped(HEADERS[5], self.reason_width));
        columns.push(Column::new(HEADERS[6]));

        let mut table = Table::new(columns).with_separator(self.separator);
        for (idx, ev) in events.iter().enumerate() {
            table.add_row(vec![
                (idx + 1).to_string(),
                ev.id.to_string(),
                ev.number.clone(),
                ev.date_str(),
                ev.start_str(),
                ev.end_str(),
                ev.duration.clone(),
                ev.reason.clone(),
                if ev.has_photo() { "[img]" } else { "-" }.to_string(),
            ]);
        }
        table
    }
}

impl TableView for TerminalTable {
    fn render(&mut self, date: NaiveDate, events: &[EventRecord]) {
        if events.is_empty() {
            info(format!("No events for {}", date));
            return;
        }

        println!("\n=== {} ===", date);
        print!("{}", self.build(events).render());
        println!("Events: {}", events.len());
    }
}
