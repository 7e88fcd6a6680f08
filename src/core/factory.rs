use crate::core::photo::PhotoBlob;
use crate::errors::{AppError, AppResult};
use crate::models::collection::EventCollection;
use crate::models::event::{EventId, EventRecord};
use crate::utils::time::duration_hhmm;
use chrono::{NaiveDate, NaiveTime, Utc};

/// Field values that already passed presence and ordering checks.
#[derive(Debug, Clone)]
pub struct ValidatedEvent {
    pub number: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub reason: String,
}

/// Issues millisecond timestamps as ids, bumping by one whenever the clock
/// has not moved past the last issued id (or past an id already stored).
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, floor: Option<EventId>) -> AppResult<EventId> {
        self.next_at(Utc::now().timestamp_millis(), floor)
    }

    /// Same as `next_id` with an explicit clock reading.
    /// Fails when no id is left above the ones already issued or stored.
    pub fn next_at(&mut self, now_ms: i64, floor: Option<EventId>) -> AppResult<EventId> {
        let highest = self.last.max(floor.map(|f| f.0).unwrap_or(i64::MIN));
        let min = highest
            .checked_add(1)
            .ok_or(AppError::IdExhausted(highest))?;
        let id = now_ms.max(min);
        self.last = id;
        Ok(EventId(id))
    }
}

pub struct EventFactory;

impl EventFactory {
    /// Build a complete record for `target`'s date. The id is unique
    /// against every record already in `target`.
    pub fn build(
        ids: &mut IdGenerator,
        fields: ValidatedEvent,
        photo: Option<PhotoBlob>,
        target: &EventCollection,
    ) -> AppResult<EventRecord> {
        let id = ids.next_id(target.max_id())?;
        let duration = duration_hhmm(fields.start, fields.end);

        Ok(EventRecord {
            id,
            number: fields.number,
            date: fields.date,
            start: fields.start,
            end: fields.end,
            duration,
            reason: fields.reason,
            photo: photo.map(PhotoBlob::into_data_uri).unwrap_or_default(),
        })
    }
}
