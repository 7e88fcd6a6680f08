use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Record identity: creation time in Unix milliseconds, bumped when needed
/// so that it stays unique inside a date's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One logged stop/incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub number: String,
    pub date: NaiveDate, // "YYYY-MM-DD"
    #[serde(with = "hhmm")]
    pub start: NaiveTime, // "HH:MM"
    #[serde(with = "hhmm")]
    pub end: NaiveTime, // "HH:MM"
    pub duration: String, // derived "HH:MM"
    pub reason: String,
    #[serde(default)]
    pub photo: String, // data-URI or ""
}

impl EventRecord {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn start_str(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%H:%M").to_string()
    }

    pub fn has_photo(&self) -> bool {
        !self.photo.is_empty()
    }
}

/// Raw field values as typed by the user, before validation.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub number: String,
    pub date: String, // blank → active query date
    pub start: String,
    pub end: String,
    pub reason: String,
}

/// Serde adapter keeping times as `HH:MM` on disk.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(de::Error::custom)
    }
}
