//! Fixture loading for `server --seed <FILE>`.
//!
//! A fixture is a JSON document naming events by a local `key` so that
//! parents and sessions can refer to them before their store ids exist.
//! Events are inserted in document order; a parent must appear before its
//! children. Sessions refer to topics and categories by name.
//!
//! ```json
//! {
//!   "events": [
//!     { "key": "retreat", "eventId": "R-2024", "eventName": "Retreat",
//!       "eventType": "Retreat", "eventDateStart": "2024-01-01T00:00:00Z" },
//!     { "key": "day1", "parent": "retreat", "eventId": "R-2024-1",
//!       "eventName": "Day 1", "eventType": "Day",
//!       "eventDateStart": "2024-01-01T00:00:00Z" }
//!   ],
//!   "topics":     [{ "name": "Gita", "type": "Texts" }],
//!   "categories": [{ "name": "Krishna", "type": "Deities" }],
//!   "sessions": [
//!     { "event": "day1", "sessionName": "Opening",
//!       "sessionDate": "2024-01-01T09:00:00Z", "sequenceInEvent": 1,
//!       "topics": ["Gita"], "categories": ["Krishna"] }
//!   ]
//! }
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sabha_core::{
  event::NewEvent,
  reference::ReferenceType,
  session::NewSession,
  store::CatalogStore,
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
  #[serde(default)]
  pub events:     Vec<FixtureEvent>,
  #[serde(default)]
  pub topics:     Vec<FixtureReference>,
  #[serde(default)]
  pub categories: Vec<FixtureReference>,
  #[serde(default)]
  pub sessions:   Vec<FixtureSession>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureEvent {
  pub key:              String,
  #[serde(default)]
  pub parent:           Option<String>,
  pub event_id:         String,
  pub event_name:       String,
  pub event_type:       String,
  pub event_date_start: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureReference {
  pub name: String,
  /// Deserialising into the closed enum rejects any other literal.
  #[serde(rename = "type")]
  pub kind: ReferenceType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSession {
  pub event:             String,
  pub session_name:      String,
  pub session_date:      DateTime<Utc>,
  pub sequence_in_event: i64,
  #[serde(default)]
  pub topics:            Vec<String>,
  #[serde(default)]
  pub categories:        Vec<String>,
}

#[derive(Debug, Error)]
pub enum SeedError {
  #[error("invalid fixture: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("duplicate event key: {0:?}")]
  DuplicateKey(String),

  #[error("unknown event key: {0:?}")]
  UnknownEvent(String),

  #[error("unknown topic: {0:?}")]
  UnknownTopic(String),

  #[error("unknown category: {0:?}")]
  UnknownCategory(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Counts of rows written by [`seed`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
  pub events:     usize,
  pub topics:     usize,
  pub categories: usize,
  pub sessions:   usize,
}

impl Fixture {
  pub fn from_json(s: &str) -> Result<Self, SeedError> {
    Ok(serde_json::from_str(s)?)
  }
}

/// Write every row of `fixture` into `store`.
///
/// Not transactional: rows written before a failure stay written.
pub async fn seed<S>(store: &S, fixture: Fixture) -> Result<SeedSummary, SeedError>
where
  S: CatalogStore,
{
  fn store_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> SeedError {
    SeedError::Store(Box::new(e))
  }

  let mut summary = SeedSummary::default();
  let mut event_by_key: HashMap<String, String> = HashMap::new();

  for e in fixture.events {
    if event_by_key.contains_key(&e.key) {
      return Err(SeedError::DuplicateKey(e.key));
    }
    let parent_event_id = match e.parent {
      Some(parent) => Some(
        event_by_key
          .get(&parent)
          .cloned()
          .ok_or(SeedError::UnknownEvent(parent))?,
      ),
      None => None,
    };
    let event = store
      .add_event(NewEvent {
        event_id: e.event_id,
        event_name: e.event_name,
        event_type: e.event_type,
        event_date_start: e.event_date_start,
        parent_event_id,
      })
      .await
      .map_err(store_err)?;
    event_by_key.insert(e.key, event.id);
    summary.events += 1;
  }

  let mut topic_by_name = HashMap::new();
  for t in fixture.topics {
    let topic = store.add_topic(t.name, t.kind).await.map_err(store_err)?;
    topic_by_name.insert(topic.name, topic.id);
    summary.topics += 1;
  }

  let mut category_by_name = HashMap::new();
  for c in fixture.categories {
    let category = store.add_category(c.name, c.kind).await.map_err(store_err)?;
    category_by_name.insert(category.name, category.id);
    summary.categories += 1;
  }

  for s in fixture.sessions {
    let event_id = event_by_key
      .get(&s.event)
      .cloned()
      .ok_or(SeedError::UnknownEvent(s.event))?;
    let topic_ids = s
      .topics
      .into_iter()
      .map(|name| topic_by_name.get(&name).cloned().ok_or(SeedError::UnknownTopic(name)))
      .collect::<Result<Vec<_>, _>>()?;
    let category_ids = s
      .categories
      .into_iter()
      .map(|name| {
        category_by_name
          .get(&name)
          .cloned()
          .ok_or(SeedError::UnknownCategory(name))
      })
      .collect::<Result<Vec<_>, _>>()?;

    store
      .add_session(NewSession {
        event_id,
        session_name: s.session_name,
        session_date: s.session_date,
        sequence_in_event: s.sequence_in_event,
        topic_ids,
        category_ids,
      })
      .await
      .map_err(store_err)?;
    summary.sessions += 1;
  }

  tracing::info!(?summary, "fixture loaded");
  Ok(summary)
}
