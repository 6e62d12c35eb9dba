//! Sessions — ordered sub-units of a single event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored session row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
  pub id:                String,
  pub session_name:      String,
  pub session_date:      DateTime<Utc>,
  /// Explicit ordering key within the owning event.
  pub sequence_in_event: i64,
  pub event_id:          String,
  pub topic_ids:         Vec<String>,
  pub category_ids:      Vec<String>,
}

/// The columns returned for each session of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
  pub id:                String,
  pub session_name:      String,
  pub session_date:      DateTime<Utc>,
  pub sequence_in_event: i64,
}

/// Input for [`CatalogStore::add_session`](crate::store::CatalogStore::add_session).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
  pub event_id:          String,
  pub session_name:      String,
  pub session_date:      DateTime<Utc>,
  pub sequence_in_event: i64,
  #[serde(default)]
  pub topic_ids:         Vec<String>,
  #[serde(default)]
  pub category_ids:      Vec<String>,
}
