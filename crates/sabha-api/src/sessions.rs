//! Handler for `POST /sessions` — the target of the new-session form.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use sabha_core::{session::NewSession, store::CatalogStore, timestamp};
use serde::Deserialize;

use crate::error::{ApiError, CREATE_SESSION_FAILED};

/// JSON body accepted by `POST /sessions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub event_id:          String,
  pub session_name:      String,
  pub session_date:      DateTime<Utc>,
  pub sequence_in_event: i64,
  #[serde(default)]
  pub topic_ids:         Vec<String>,
  #[serde(default)]
  pub category_ids:      Vec<String>,
}

impl From<CreateBody> for NewSession {
  fn from(b: CreateBody) -> Self {
    NewSession {
      event_id:          b.event_id,
      session_name:      b.session_name,
      session_date:      b.session_date,
      sequence_in_event: b.sequence_in_event,
      topic_ids:         b.topic_ids,
      category_ids:      b.category_ids,
    }
  }
}

/// `POST /sessions` — returns 201 + the stored
/// [`Session`](sabha_core::session::Session).
///
/// An unknown event, topic or category is a 404. A date the store cannot
/// hold is a 422.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(mut body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let fail = |e: S::Error| ApiError::store(CREATE_SESSION_FAILED, e);

  body.session_date = timestamp::normalize(body.session_date)
    .map_err(|e| ApiError::Unprocessable(e.to_string()))?;

  store
    .get_event(&body.event_id)
    .await
    .map_err(fail)?
    .ok_or_else(|| ApiError::NotFound(format!("event {} not found", body.event_id)))?;
  for id in &body.topic_ids {
    if store.get_topic(id).await.map_err(fail)?.is_none() {
      return Err(ApiError::NotFound(format!("topic {id} not found")));
    }
  }
  for id in &body.category_ids {
    if store.get_category(id).await.map_err(fail)?.is_none() {
      return Err(ApiError::NotFound(format!("category {id} not found")));
    }
  }

  let session = store
    .add_session(NewSession::from(body))
    .await
    .map_err(fail)?;

  tracing::info!(session = %session.id, event = %session.event_id, "session created");
  Ok((StatusCode::CREATED, Json(session)))
}
