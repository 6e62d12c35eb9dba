//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Storage failures are never described to the client: the response carries
//! only the fixed message for the failing operation, and the underlying cause
//! goes to the log.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const CHILD_EVENTS_FAILED: &str = "Failed to fetch child events";
pub const SESSIONS_FAILED: &str = "Failed to fetch sessions";
pub const CREATE_SESSION_FAILED: &str = "Failed to create session";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error("{message}: {source}")]
  Store {
    message: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Tag a store error with the public message for the failing operation.
  pub fn store<E>(message: &'static str, e: E) -> ApiError
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store { message, source: Box::new(e) }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Unprocessable(m) => {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Store { message, source } => {
        tracing::error!(error = %source, "{message}");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message })))
          .into_response()
      }
    }
  }
}
