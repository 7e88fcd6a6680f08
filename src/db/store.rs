//! Date-scoped event store.
//!
//! Every calendar date owns exactly one row in `day_events`, holding the
//! whole collection of that date as a JSON array. Writing one date never
//! touches another date's row.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::collection::EventCollection;
use crate::models::event::EventRecord;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, params};

/// Aggregate numbers shown by `db --info`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub days: usize,
    pub events: usize,
    pub with_photo: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

pub struct DayStore {
    pool: DbPool,
}

impl DayStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self::new(DbPool::new(path)?))
    }

    pub fn in_memory() -> AppResult<Self> {
        Ok(Self::new(DbPool::in_memory()?))
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    /// Return the persisted collection for `date`.
    ///
    /// Absence is not an error, and neither is an unreadable value: both
    /// yield an empty collection.
    pub fn load(&self, date: NaiveDate) -> EventCollection {
        let key = date.format("%Y-%m-%d").to_string();

        let payload: Option<String> = match self
            .pool
            .conn
            .query_row(
                "SELECT payload FROM day_events WHERE date = ?1",
                [&key],
                |row| row.get(0),
            )
            .optional()
        {
            Ok(p) => p,
            Err(e) => {
                self.note_default(&key, &format!("Treated as empty collection (read failed: {e})"));
                None
            }
        };

        let Some(payload) = payload else {
            return EventCollection::empty(date);
        };

        match serde_json::from_str::<Vec<EventRecord>>(&payload) {
            Ok(records) => {
                let stored = records.len();
                let collection = EventCollection::from_records(date, records);
                let foreign = stored - collection.len();
                if foreign > 0 {
                    self.note_default(
                        &key,
                        &format!("{foreign} record(s) dated on another day were dropped"),
                    );
                }
                collection
            }
            Err(e) => {
                self.note_default(&key, &format!("Treated as empty collection (unreadable payload: {e})"));
                EventCollection::empty(date)
            }
        }
    }

    /// Persist the whole collection of `date`, replacing the previous value.
    pub fn save(&mut self, date: NaiveDate, collection: &EventCollection) -> AppResult<()> {
        if collection.date() != date {
            return Err(AppError::DateMismatch {
                record: collection.date().format("%Y-%m-%d").to_string(),
                collection: date.format("%Y-%m-%d").to_string(),
            });
        }

        let key = date.format("%Y-%m-%d").to_string();
        let payload = serde_json::to_string(collection.events())?;
        let now = Local::now().to_rfc3339();

        self.pool.conn.execute(
            "INSERT INTO day_events (date, payload, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(date) DO UPDATE SET payload = excluded.payload,
                                             updated_at = excluded.updated_at",
            params![key, payload, now],
        )?;

        Ok(())
    }

    /// All dates that have a stored row, ascending.
    pub fn dates(&self) -> AppResult<Vec<NaiveDate>> {
        let mut stmt = self
            .pool
            .conn
            .prepare("SELECT date FROM day_events ORDER BY date ASC")?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for r in rows {
            let raw = r?;
            // keys that are not dates cannot be produced by `save`
            if let Ok(d) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                out.push(d);
            }
        }
        Ok(out)
    }

    pub fn stats(&self) -> AppResult<StoreStats> {
        let dates = self.dates()?;
        let mut stats = StoreStats {
            first_date: dates.first().copied(),
            last_date: dates.last().copied(),
            ..Default::default()
        };

        for d in dates {
            let c = self.load(d);
            if c.is_empty() {
                continue;
            }
            stats.days += 1;
            stats.events += c.len();
            stats.with_photo += c.events().iter().filter(|e| e.has_photo()).count();
        }

        Ok(stats)
    }

    fn note_default(&self, key: &str, message: &str) {
        // best effort: a broken DB must not break a read
        let _ = ttlog(&self.pool.conn, "load_default", key, message);
    }
}
