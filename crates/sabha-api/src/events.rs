//! Handlers for `/events/:id/...` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/events/:id/children` | Ordered by start date, then name |
//! | `GET`  | `/events/:id/sessions` | Ordered by sequence, then date |
//!
//! The id is passed to the store as-is; an unknown id yields `[]`, not 404.
//! Neither endpoint paginates.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use sabha_core::{event::ChildEvent, session::SessionSummary, store::CatalogStore};

use crate::error::{ApiError, CHILD_EVENTS_FAILED, SESSIONS_FAILED};

/// `GET /events/:id/children`
pub async fn children<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Vec<ChildEvent>>, ApiError>
where
  S: CatalogStore,
{
  let children = store
    .child_events(&id)
    .await
    .map_err(|e| ApiError::store(CHILD_EVENTS_FAILED, e))?;
  Ok(Json(children))
}

/// `GET /events/:id/sessions`
pub async fn sessions<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Vec<SessionSummary>>, ApiError>
where
  S: CatalogStore,
{
  let sessions = store
    .event_sessions(&id)
    .await
    .map_err(|e| ApiError::store(SESSIONS_FAILED, e))?;
  Ok(Json(sessions))
}
