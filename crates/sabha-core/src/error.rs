//! Error types for `sabha-core`.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("event not found: {0}")]
  EventNotFound(String),

  #[error("parent event not found: {0}")]
  ParentEventNotFound(String),

  #[error("topic not found: {0}")]
  TopicNotFound(String),

  #[error("category not found: {0}")]
  CategoryNotFound(String),

  #[error("timestamp {0} is outside years 0000-9999")]
  TimestampOutOfRange(DateTime<Utc>),

  #[error("unknown reference type: {0:?}")]
  UnknownReferenceType(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
