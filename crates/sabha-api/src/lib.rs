//! JSON REST API for Sabha.
//!
//! Exposes an axum [`Router`] backed by any [`sabha_core::store::CatalogStore`].
//! There is no auth layer; transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", sabha_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod events;
pub mod sessions;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use sabha_core::store::CatalogStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + 'static,
{
  Router::new()
    // Events
    .route("/events/{id}/children", get(events::children::<S>))
    .route("/events/{id}/sessions", get(events::sessions::<S>))
    // Sessions
    .route("/sessions", post(sessions::create::<S>))
    .with_state(store)
}

// ─── Router tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use chrono::{DateTime, TimeZone as _, Utc};
  use sabha_core::{
    event::{ChildEvent, Event, NewEvent},
    reference::{Category, ReferenceType, Topic},
    session::{NewSession, Session, SessionSummary},
  };
  use sabha_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  // ── Fixtures ────────────────────────────────────────────────────────────────

  /// A store whose every operation fails, standing in for a dropped
  /// connection.
  struct FailingStore;

  fn down() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection dropped")
  }

  impl CatalogStore for FailingStore {
    type Error = std::io::Error;

    async fn child_events(&self, _: &str) -> Result<Vec<ChildEvent>, Self::Error> {
      Err(down())
    }
    async fn event_sessions(&self, _: &str) -> Result<Vec<SessionSummary>, Self::Error> {
      Err(down())
    }
    async fn list_events(&self) -> Result<Vec<Event>, Self::Error> { Err(down()) }
    async fn list_topics(&self) -> Result<Vec<Topic>, Self::Error> { Err(down()) }
    async fn list_categories(&self) -> Result<Vec<Category>, Self::Error> {
      Err(down())
    }
    async fn get_event(&self, _: &str) -> Result<Option<Event>, Self::Error> {
      Err(down())
    }
    async fn get_topic(&self, _: &str) -> Result<Option<Topic>, Self::Error> {
      Err(down())
    }
    async fn get_category(&self, _: &str) -> Result<Option<Category>, Self::Error> {
      Err(down())
    }
    async fn add_event(&self, _: NewEvent) -> Result<Event, Self::Error> { Err(down()) }
    async fn add_topic(&self, _: String, _: ReferenceType) -> Result<Topic, Self::Error> {
      Err(down())
    }
    async fn add_category(
      &self,
      _: String,
      _: ReferenceType,
    ) -> Result<Category, Self::Error> {
      Err(down())
    }
    async fn add_session(&self, _: NewSession) -> Result<Session, Self::Error> {
      Err(down())
    }
  }

  fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
  }

  fn event_input(name: &str, start: DateTime<Utc>, parent: Option<&Event>) -> NewEvent {
    NewEvent {
      event_id:         format!("EVT-{name}"),
      event_name:       name.into(),
      event_type:       "Festival".into(),
      event_date_start: start,
      parent_event_id:  parent.map(|p| p.id.clone()),
    }
  }

  async fn get_json<S>(store: Arc<S>, uri: &str) -> (StatusCode, Value)
  where
    S: CatalogStore + 'static,
  {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = api_router(store).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  async fn post_json<S>(store: Arc<S>, uri: &str, body: Value) -> (StatusCode, Value)
  where
    S: CatalogStore + 'static,
  {
    let req = Request::builder()
      .method("POST")
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap();
    let resp = api_router(store).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
  }

  // ── /events/:id/children ────────────────────────────────────────────────────

  #[tokio::test]
  async fn children_tie_on_date_breaks_by_name() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let a = store.add_event(event_input("A", day(2023, 12, 1), None)).await.unwrap();
    let c1 = store
      .add_event(event_input("Z", day(2024, 1, 1), Some(&a)))
      .await
      .unwrap();
    let c2 = store
      .add_event(event_input("A", day(2024, 1, 1), Some(&a)))
      .await
      .unwrap();

    let (status, body) = get_json(store, &format!("/events/{}/children", a.id)).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], c2.id);
    assert_eq!(items[1]["id"], c1.id);
  }

  #[tokio::test]
  async fn children_serialise_exact_projection() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let a = store.add_event(event_input("Root", day(2024, 1, 1), None)).await.unwrap();
    let child = store
      .add_event(event_input("Puja", day(2024, 5, 2), Some(&a)))
      .await
      .unwrap();

    let (_, body) = get_json(store, &format!("/events/{}/children", a.id)).await;
    assert_eq!(
      body,
      json!([{
        "id": child.id,
        "eventId": "EVT-Puja",
        "eventName": "Puja",
        "eventType": "Festival",
        "eventDateStart": "2024-05-02T00:00:00Z"
      }])
    );
  }

  #[tokio::test]
  async fn children_of_childless_event_is_empty_200() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let a = store.add_event(event_input("Lonely", day(2024, 1, 1), None)).await.unwrap();

    let (status, body) = get_json(store.clone(), &format!("/events/{}/children", a.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = get_json(store, "/events/whatever%20id/children").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn children_store_failure_returns_fixed_500() {
    let (status, body) = get_json(Arc::new(FailingStore), "/events/e1/children").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch child events" }));
  }

  // ── /events/:id/sessions ────────────────────────────────────────────────────

  #[tokio::test]
  async fn sessions_ordered_by_sequence_then_date() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let e = store.add_event(event_input("E", day(2024, 1, 1), None)).await.unwrap();
    let s1 = store
      .add_session(NewSession {
        event_id:          e.id.clone(),
        session_name:      "S1".into(),
        session_date:      day(2024, 2, 1),
        sequence_in_event: 2,
        topic_ids:         vec![],
        category_ids:      vec![],
      })
      .await
      .unwrap();
    let s2 = store
      .add_session(NewSession {
        event_id:          e.id.clone(),
        session_name:      "S2".into(),
        session_date:      day(2024, 1, 1),
        sequence_in_event: 1,
        topic_ids:         vec![],
        category_ids:      vec![],
      })
      .await
      .unwrap();

    let (status, body) = get_json(store, &format!("/events/{}/sessions", e.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
      body,
      json!([
        {
          "id": s2.id,
          "sessionName": "S2",
          "sessionDate": "2024-01-01T00:00:00Z",
          "sequenceInEvent": 1
        },
        {
          "id": s1.id,
          "sessionName": "S1",
          "sessionDate": "2024-02-01T00:00:00Z",
          "sequenceInEvent": 2
        }
      ])
    );
  }

  #[tokio::test]
  async fn sessions_of_unknown_event_is_empty_200() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let (status, body) = get_json(store, "/events/nope/sessions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn sessions_store_failure_returns_fixed_500() {
    let (status, body) = get_json(Arc::new(FailingStore), "/events/e1/sessions").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch sessions" }));
  }

  // ── POST /sessions ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_session_returns_201_and_is_listed() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let e = store.add_event(event_input("E", day(2024, 1, 1), None)).await.unwrap();
    let topic = store.add_topic("Rama".into(), ReferenceType::Deities).await.unwrap();

    let (status, body) = post_json(
      store.clone(),
      "/sessions",
      json!({
        "eventId": e.id,
        "sessionName": "Opening",
        "sessionDate": "2024-01-02T09:00:00Z",
        "sequenceInEvent": 1,
        "topicIds": [topic.id]
      }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sessionName"], "Opening");
    assert_eq!(body["topicIds"], json!([topic.id]));
    assert_eq!(body["categoryIds"], json!([]));

    let (_, listed) = get_json(store, &format!("/events/{}/sessions", e.id)).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], body["id"]);
  }

  #[tokio::test]
  async fn create_session_for_unknown_event_returns_404() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let (status, body) = post_json(
      store,
      "/sessions",
      json!({
        "eventId": "missing",
        "sessionName": "Opening",
        "sessionDate": "2024-01-02T09:00:00Z",
        "sequenceInEvent": 1
      }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("missing"));
  }

  #[tokio::test]
  async fn create_session_with_unknown_reference_returns_404() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let e = store.add_event(event_input("E", day(2024, 1, 1), None)).await.unwrap();

    for (field, label) in [("topicIds", "topic"), ("categoryIds", "category")] {
      let mut body = json!({
        "eventId": e.id,
        "sessionName": "Opening",
        "sessionDate": "2024-01-02T09:00:00Z",
        "sequenceInEvent": 1
      });
      body[field] = json!(["no-such-ref"]);

      let (status, body) = post_json(store.clone(), "/sessions", body).await;
      assert_eq!(status, StatusCode::NOT_FOUND, "{field}");
      assert_eq!(body, json!({ "error": format!("{label} no-such-ref not found") }));
    }

    let (_, listed) = get_json(store, &format!("/events/{}/sessions", e.id)).await;
    assert_eq!(listed, json!([]));
  }

  #[tokio::test]
  async fn create_session_with_five_digit_year_returns_422() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let e = store.add_event(event_input("E", day(2024, 1, 1), None)).await.unwrap();

    let (status, body) = post_json(
      store.clone(),
      "/sessions",
      json!({
        "eventId": e.id,
        "sessionName": "Far future",
        "sessionDate": "+10000-01-01T00:00:00Z",
        "sequenceInEvent": 1
      }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("0000-9999"));

    let (status, listed) = get_json(store, &format!("/events/{}/sessions", e.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
  }

  #[tokio::test]
  async fn create_session_echoes_the_listed_date() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let e = store.add_event(event_input("E", day(2024, 1, 1), None)).await.unwrap();

    let (status, body) = post_json(
      store.clone(),
      "/sessions",
      json!({
        "eventId": e.id,
        "sessionName": "Dawn",
        "sessionDate": "2024-01-02T05:00:00.123456Z",
        "sequenceInEvent": 1
      }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sessionDate"], "2024-01-02T05:00:00.123Z");

    let (_, listed) = get_json(store, &format!("/events/{}/sessions", e.id)).await;
    assert_eq!(listed[0]["sessionDate"], body["sessionDate"]);
  }

  #[tokio::test]
  async fn create_session_store_failure_returns_fixed_500() {
    let (status, body) = post_json(
      Arc::new(FailingStore),
      "/sessions",
      json!({
        "eventId": "e1",
        "sessionName": "Opening",
        "sessionDate": "2024-01-02T09:00:00Z",
        "sequenceInEvent": 1
      }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to create session" }));
  }

  #[tokio::test]
  async fn create_session_rejects_malformed_body() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let (status, _) = post_json(store, "/sessions", json!({ "sessionName": "x" })).await;
    assert!(status.is_client_error(), "status: {status}");
  }
}
