//! Events and the projection served by the child-events endpoint.
//!
//! Events form a forest through `parent_event_id`: an event has at most one
//! parent and any number of children. Only the direct parent/child relation is
//! ever queried.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
  pub id:               String,
  /// Business identifier, distinct from the row id.
  pub event_id:         String,
  pub event_name:       String,
  pub event_type:       String,
  pub event_date_start: DateTime<Utc>,
  pub parent_event_id:  Option<String>,
}

/// The columns returned for each child of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildEvent {
  pub id:               String,
  pub event_id:         String,
  pub event_name:       String,
  pub event_type:       String,
  pub event_date_start: DateTime<Utc>,
}

impl From<Event> for ChildEvent {
  fn from(e: Event) -> Self {
    Self {
      id:               e.id,
      event_id:         e.event_id,
      event_name:       e.event_name,
      event_type:       e.event_type,
      event_date_start: e.event_date_start,
    }
  }
}

/// Input for [`CatalogStore::add_event`](crate::store::CatalogStore::add_event).
/// The row id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
  pub event_id:         String,
  pub event_name:       String,
  pub event_type:       String,
  pub event_date_start: DateTime<Utc>,
  #[serde(default)]
  pub parent_event_id:  Option<String>,
}
