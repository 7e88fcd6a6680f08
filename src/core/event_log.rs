//! Event log controller: create, delete and date switching against the
//! date-scoped store, keeping the active in-memory day consistent with it.

use crate::core::factory::{EventFactory, IdGenerator, ValidatedEvent};
use crate::core::pending::PendingDelete;
use crate::core::photo::PhotoBlob;
use crate::db::log::ttlog;
use crate::db::store::DayStore;
use crate::errors::{AppError, AppResult};
use crate::models::collection::EventCollection;
use crate::models::event::{EventId, EventRecord, NewEvent};
use crate::ui::messages::warning;
use crate::ui::view::TableView;
use crate::utils::{date, time};
use chrono::NaiveDate;

/// The selected query date and its in-memory mirror.
#[derive(Debug, Clone)]
pub struct ActiveQuery {
    pub date: NaiveDate,
    pub events: EventCollection,
}

pub struct EventLog<V: TableView> {
    store: DayStore,
    active: ActiveQuery,
    pending: PendingDelete,
    ids: IdGenerator,
    view: V,
}

impl<V: TableView> EventLog<V> {
    /// Context positioned on today's date.
    pub fn new(store: DayStore, view: V) -> Self {
        Self::open_at(store, view, date::today())
    }

    /// Context positioned on `date`, with its collection loaded.
    pub fn open_at(store: DayStore, view: V, date: NaiveDate) -> Self {
        let events = store.load(date);
        Self {
            store,
            active: ActiveQuery { date, events },
            pending: PendingDelete::Idle,
            ids: IdGenerator::new(),
            view,
        }
    }

    pub fn active_date(&self) -> NaiveDate {
        self.active.date
    }

    pub fn events(&self) -> &EventCollection {
        &self.active.events
    }

    pub fn pending(&self) -> PendingDelete {
        self.pending
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &DayStore {
        &self.store
    }

    /// Validate, build and persist a new event.
    ///
    /// Nothing is written when validation fails. The active day is only
    /// refreshed when the event lands on it.
    pub fn create(&mut self, raw: NewEvent, photo: Option<PhotoBlob>) -> AppResult<EventRecord> {
        let fields = validate(&raw, self.active.date)?;
        let target = fields.date;

        // reload so entries saved since the last query are kept
        let mut collection = self.store.load(target);
        let record = EventFactory::build(&mut self.ids, fields, photo, &collection)?;
        collection.push(record.clone())?;
        self.store.save(target, &collection)?;

        self.audit(
            "add",
            &record.date_str(),
            &format!(
                "#{} {}-{} ({}) {}",
                record.number,
                record.start_str(),
                record.end_str(),
                record.duration,
                record.reason
            ),
        );

        if target == self.active.date {
            self.active.events = collection;
            self.refresh();
        }

        Ok(record)
    }

    /// Remove `id` from the active day and persist it.
    /// Unknown ids are ignored; returns whether a record was removed.
    pub fn delete(&mut self, id: EventId) -> AppResult<bool> {
        if !self.active.events.remove(id) {
            return Ok(false);
        }

        self.store.save(self.active.date, &self.active.events)?;
        self.audit(
            "del",
            &date::date_str(&self.active.date),
            &format!("Deleted event {id}"),
        );
        self.refresh();
        Ok(true)
    }

    /// Make `date` the active day and reload it from the store.
    pub fn switch_query_date(&mut self, date: NaiveDate) {
        self.active = ActiveQuery {
            date,
            events: self.store.load(date),
        };
        self.pending.cancel();
        self.refresh();
    }

    pub fn request_delete(&mut self, id: EventId) {
        self.pending.request(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending.cancel();
    }

    /// Delete the pending id, if any, and return to idle.
    pub fn confirm_delete(&mut self) -> AppResult<bool> {
        match self.pending.take() {
            Some(id) => self.delete(id),
            None => Ok(false),
        }
    }

    fn refresh(&mut self) {
        self.view.render(self.active.date, self.active.events.events());
    }

    fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = ttlog(self.store.conn(), operation, target, message) {
            warning(format!("Failed to write internal log: {e}"));
        }
    }
}

/// Presence checks first, then formats, then time ordering.
pub fn validate(raw: &NewEvent, default_date: NaiveDate) -> AppResult<ValidatedEvent> {
    let number = raw.number.trim();
    let reason = raw.reason.trim();
    let start_raw = raw.start.trim();
    let end_raw = raw.end.trim();

    let missing: Vec<&str> = [
        ("number", number),
        ("start", start_raw),
        ("end", end_raw),
        ("reason", reason),
    ]
    .into_iter()
    .filter(|(_, v)| v.is_empty())
    .map(|(name, _)| name)
    .collect();

    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing.join(", ")));
    }

    let event_date = if raw.date.trim().is_empty() {
        default_date
    } else {
        date::parse_date(&raw.date).ok_or_else(|| AppError::InvalidDate(raw.date.clone()))?
    };

    let start = time::parse_required_time(start_raw)?;
    let end = time::parse_required_time(end_raw)?;

    if start >= end {
        return Err(AppError::InvalidTimeOrder {
            start: start_raw.to_string(),
            end: end_raw.to_string(),
        });
    }

    Ok(ValidatedEvent {
        number: number.to_string(),
        date: event_date,
        start,
        end,
        reason: reason.to_string(),
    })
}
