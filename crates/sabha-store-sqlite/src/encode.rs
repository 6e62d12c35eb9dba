//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings
//! (`2024-01-01T00:00:00.000Z`) so `ORDER BY` on the raw column is
//! chronological. Writes pass every value through
//! [`sabha_core::timestamp::normalize`] first; the width only holds for the
//! four-digit years it admits.

use chrono::{DateTime, SecondsFormat, Utc};
use sabha_core::{
  event::{ChildEvent, Event},
  reference::{Category, ReferenceType, Topic},
  session::SessionSummary,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Ids ─────────────────────────────────────────────────────────────────────

pub fn new_id() -> String { Uuid::new_v4().hyphenated().to_string() }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── ReferenceType ───────────────────────────────────────────────────────────

pub fn decode_reference_type(s: &str) -> Result<ReferenceType> {
  Ok(s.parse::<ReferenceType>()?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `events` row.
pub struct RawEvent {
  pub id:               String,
  pub event_id:         String,
  pub event_name:       String,
  pub event_type:       String,
  pub event_date_start: String,
  pub parent_event_id:  Option<String>,
}

impl RawEvent {
  pub const COLUMNS: &'static str =
    "id, event_id, event_name, event_type, event_date_start, parent_event_id";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      event_id:         row.get(1)?,
      event_name:       row.get(2)?,
      event_type:       row.get(3)?,
      event_date_start: row.get(4)?,
      parent_event_id:  row.get(5)?,
    })
  }

  pub fn into_event(self) -> Result<Event> {
    Ok(Event {
      event_date_start: decode_dt(&self.event_date_start)?,
      id:               self.id,
      event_id:         self.event_id,
      event_name:       self.event_name,
      event_type:       self.event_type,
      parent_event_id:  self.parent_event_id,
    })
  }
}

/// Raw strings for the child-event projection.
pub struct RawChildEvent {
  pub id:               String,
  pub event_id:         String,
  pub event_name:       String,
  pub event_type:       String,
  pub event_date_start: String,
}

impl RawChildEvent {
  pub fn into_child(self) -> Result<ChildEvent> {
    Ok(ChildEvent {
      event_date_start: decode_dt(&self.event_date_start)?,
      id:               self.id,
      event_id:         self.event_id,
      event_name:       self.event_name,
      event_type:       self.event_type,
    })
  }
}

/// Raw values for the session-summary projection.
pub struct RawSessionSummary {
  pub id:                String,
  pub session_name:      String,
  pub session_date:      String,
  pub sequence_in_event: i64,
}

impl RawSessionSummary {
  pub fn into_summary(self) -> Result<SessionSummary> {
    Ok(SessionSummary {
      session_date:      decode_dt(&self.session_date)?,
      id:                self.id,
      session_name:      self.session_name,
      sequence_in_event: self.sequence_in_event,
    })
  }
}

/// Raw strings from a `topics` or `categories` row; both share one shape.
pub struct RawReference {
  pub id:   String,
  pub name: String,
  pub kind: String,
}

impl RawReference {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:   row.get(0)?,
      name: row.get(1)?,
      kind: row.get(2)?,
    })
  }

  pub fn into_topic(self) -> Result<Topic> {
    Ok(Topic {
      kind: decode_reference_type(&self.kind)?,
      id:   self.id,
      name: self.name,
    })
  }

  pub fn into_category(self) -> Result<Category> {
    Ok(Category {
      kind: decode_reference_type(&self.kind)?,
      id:   self.id,
      name: self.name,
    })
  }
}
