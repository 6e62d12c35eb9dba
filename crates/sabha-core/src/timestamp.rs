//! Normalisation applied to every timestamp before it is stored.
//!
//! Stored timestamps carry millisecond precision and a four-digit year, so
//! the text form sorts chronologically and parses back as RFC 3339. A value
//! handed back from a write is the normalised one, never the caller's input.

use chrono::{DateTime, Datelike as _, SubsecRound as _, Utc};

use crate::{Error, Result};

/// Earliest and latest storable years.
pub const YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Truncate `dt` to whole milliseconds.
///
/// Fails with [`Error::TimestampOutOfRange`] if the year is outside [`YEARS`].
pub fn normalize(dt: DateTime<Utc>) -> Result<DateTime<Utc>> {
  if !YEARS.contains(&dt.year()) {
    return Err(Error::TimestampOutOfRange(dt));
  }
  Ok(dt.trunc_subsecs(3))
}
