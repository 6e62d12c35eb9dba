//! The `CatalogStore` trait — the storage accessor shared by every handler.
//!
//! Implemented by storage backends (e.g. `sabha-store-sqlite`). The API and
//! page layers depend on this abstraction, not on any concrete backend.
//!
//! Every read is a single statement with at most one equality filter and a
//! fixed ascending sort. Result sets are unbounded.

use std::future::Future;

use crate::{
  event::{ChildEvent, Event, NewEvent},
  reference::{Category, ReferenceType, Topic},
  session::{NewSession, Session, SessionSummary},
};

/// Abstraction over a catalog backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Events whose parent is `parent_event_id`, ordered by start date then
  /// name. An unknown parent yields an empty list.
  fn child_events<'a>(
    &'a self,
    parent_event_id: &'a str,
  ) -> impl Future<Output = Result<Vec<ChildEvent>, Self::Error>> + Send + 'a;

  /// Sessions owned by `event_id`, ordered by sequence number then date.
  fn event_sessions<'a>(
    &'a self,
    event_id: &'a str,
  ) -> impl Future<Output = Result<Vec<SessionSummary>, Self::Error>> + Send + 'a;

  /// Every event, ordered by name.
  fn list_events(
    &self,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + '_;

  /// Every topic, ordered by name.
  fn list_topics(
    &self,
  ) -> impl Future<Output = Result<Vec<Topic>, Self::Error>> + Send + '_;

  /// Every category, ordered by name.
  fn list_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  /// Retrieve an event by row id. Returns `None` if not found.
  fn get_event<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Event>, Self::Error>> + Send + 'a;

  /// Retrieve a topic by row id. Returns `None` if not found.
  fn get_topic<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Topic>, Self::Error>> + Send + 'a;

  fn get_category<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send + 'a;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new event. Fails if `parent_event_id` names no existing event
  /// or the start date is not storable (see [`crate::timestamp`]).
  fn add_event(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  fn add_topic(
    &self,
    name: String,
    kind: ReferenceType,
  ) -> impl Future<Output = Result<Topic, Self::Error>> + Send + '_;

  fn add_category(
    &self,
    name: String,
    kind: ReferenceType,
  ) -> impl Future<Output = Result<Category, Self::Error>> + Send + '_;

  /// Persist a new session together with its topic and category links.
  ///
  /// Fails if the owning event, or any referenced topic or category, does
  /// not exist, or if the date is not storable. Nothing is written in that
  /// case.
  fn add_session(
    &self,
    input: NewSession,
  ) -> impl Future<Output = Result<Session, Self::Error>> + Send + '_;
}
