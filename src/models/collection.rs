use super::event::{EventId, EventRecord};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// All events of one calendar date, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCollection {
    date: NaiveDate,
    events: Vec<EventRecord>,
}

impl EventCollection {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            events: Vec::new(),
        }
    }

    /// Build a collection from stored records, dropping any whose date
    /// does not match the owning key.
    pub fn from_records(date: NaiveDate, records: Vec<EventRecord>) -> Self {
        let events = records.into_iter().filter(|e| e.date == date).collect();
        Self { date, events }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn max_id(&self) -> Option<EventId> {
        self.events.iter().map(|e| e.id).max()
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.events.iter().any(|e| e.id == id)
    }

    pub fn push(&mut self, record: EventRecord) -> AppResult<()> {
        if record.date != self.date {
            return Err(AppError::DateMismatch {
                record: record.date_str(),
                collection: self.date.format("%Y-%m-%d").to_string(),
            });
        }
        self.events.push(record);
        Ok(())
    }

    /// Remove the record with `id`. Returns whether something was removed.
    pub fn remove(&mut self, id: EventId) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        self.events.len() != before
    }
}
