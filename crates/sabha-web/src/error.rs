//! Page error type and axum `IntoResponse` implementation.
//!
//! Pages do not recover from a failed fetch: any error aborts the render and
//! the client gets the same generic 500 page regardless of cause.

use axum::{
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use thiserror::Error;

const ERROR_PAGE: &str = "<!DOCTYPE html>
<html lang=\"en\">
<head><meta charset=\"utf-8\"><title>500 Internal Server Error</title></head>
<body>
  <h1>Internal Server Error</h1>
  <p>Something went wrong while rendering this page.</p>
</body>
</html>
";

#[derive(Debug, Error)]
pub enum PageError {
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("template error: {0}")]
  Template(#[from] tera::Error),
}

impl PageError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    PageError::Store(Box::new(e))
  }
}

impl IntoResponse for PageError {
  fn into_response(self) -> Response {
    tracing::error!(error = %self, "page render failed");
    (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response()
  }
}
