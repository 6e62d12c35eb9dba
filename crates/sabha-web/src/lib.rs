//! Server-rendered pages and the application router for Sabha.
//!
//! Mounts the JSON API from `sabha-api` under `/api` next to the HTML pages,
//! all backed by one shared [`CatalogStore`].

pub mod error;
pub mod pages;
pub mod seed;
pub mod templates;

pub use error::PageError;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, routing::get};
use sabha_core::store::CatalogStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use templates::Templates;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SABHA_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// `store_path` with a leading `~/` replaced by `home`.
  ///
  /// Without a home directory the path is returned as written.
  pub fn resolved_store_path(&self, home: Option<&Path>) -> PathBuf {
    match (self.store_path.strip_prefix("~"), home) {
      (Ok(rest), Some(home)) => home.join(rest),
      _ => self.store_path.clone(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the page handlers.
#[derive(Clone)]
pub struct AppState<S: CatalogStore> {
  pub store:     Arc<S>,
  pub templates: Arc<Templates>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application [`Router`]: pages at the root, JSON under `/api`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CatalogStore + Clone + 'static,
{
  let api = sabha_api::api_router(state.store.clone());

  Router::new()
    .route("/sessions/new", get(pages::new_session::handler::<S>))
    .with_state(state)
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
