//! `GET /sessions/new` — the form for creating a session.
//!
//! Rendered fresh on every request. The three reference lists are fetched
//! one after another; any failure aborts the page with a generic 500.

use axum::{
  extract::{Query, State},
  http::header,
  response::{Html, IntoResponse},
};
use sabha_core::store::CatalogStore;
use serde::Deserialize;
use tera::Context;

use crate::{AppState, error::PageError};

#[derive(Debug, Default, Deserialize)]
pub struct NewSessionParams {
  /// Pre-selected event. Not checked against the event list.
  #[serde(rename = "eventId")]
  pub event_id: Option<String>,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<NewSessionParams>,
) -> Result<impl IntoResponse, PageError>
where
  S: CatalogStore + Clone + 'static,
{
  let events = state.store.list_events().await.map_err(PageError::store)?;
  let topics = state.store.list_topics().await.map_err(PageError::store)?;
  let categories = state.store.list_categories().await.map_err(PageError::store)?;

  let mut context = Context::new();
  context.insert("events", &events);
  context.insert("topics", &topics);
  context.insert("categories", &categories);
  context.insert("default_event_id", &params.event_id);

  let html = state.templates.render("new_session.html", &context)?;
  Ok(([(header::CACHE_CONTROL, "no-store")], Html(html)))
}
