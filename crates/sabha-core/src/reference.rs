//! Topics and categories — lookup entities classified by [`ReferenceType`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The closed set of domains a topic or category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceType {
  Deities,
  Practices,
  #[serde(rename = "Core Teachings")]
  CoreTeachings,
  Texts,
  #[serde(rename = "Historical Figures")]
  HistoricalFigures,
}

impl ReferenceType {
  pub const ALL: [ReferenceType; 5] = [
    ReferenceType::Deities,
    ReferenceType::Practices,
    ReferenceType::CoreTeachings,
    ReferenceType::Texts,
    ReferenceType::HistoricalFigures,
  ];

  /// The literal stored in the `type` column and sent over the wire.
  pub fn as_str(self) -> &'static str {
    match self {
      ReferenceType::Deities => "Deities",
      ReferenceType::Practices => "Practices",
      ReferenceType::CoreTeachings => "Core Teachings",
      ReferenceType::Texts => "Texts",
      ReferenceType::HistoricalFigures => "Historical Figures",
    }
  }
}

impl fmt::Display for ReferenceType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ReferenceType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    ReferenceType::ALL
      .into_iter()
      .find(|t| t.as_str() == s)
      .ok_or_else(|| Error::UnknownReferenceType(s.to_owned()))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
  pub id:   String,
  pub name: String,
  #[serde(rename = "type")]
  pub kind: ReferenceType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub id:   String,
  pub name: String,
  #[serde(rename = "type")]
  pub kind: ReferenceType,
}
