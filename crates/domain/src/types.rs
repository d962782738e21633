// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// In-memory form state: field key to JSON value.
///
/// `serde_json::Map` keeps keys ordered, so two maps with the same entries
/// compare and serialize identically regardless of insertion order.
pub type FormData = serde_json::Map<String, serde_json::Value>;

/// Identifies the record a wizard page is editing.
///
/// The route segment for a new record is a sentinel (for example `create`),
/// never a real identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    /// The page is creating a record that does not exist yet.
    Create,
    /// The page is editing a persisted record.
    Existing(String),
}

impl RecordId {
    /// Parses a route segment, treating `sentinel` as the create flow.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyRecordId` if the segment is blank.
    pub fn parse(segment: &str, sentinel: &str) -> Result<Self, DomainError> {
        let segment: &str = segment.trim();
        if segment.is_empty() {
            return Err(DomainError::EmptyRecordId);
        }
        if segment == sentinel {
            return Ok(Self::Create);
        }
        Ok(Self::Existing(segment.to_string()))
    }

    /// Returns the persisted identifier, if any.
    #[must_use]
    pub fn as_existing(&self) -> Option<&str> {
        match self {
            Self::Create => None,
            Self::Existing(id) => Some(id.as_str()),
        }
    }

    /// Returns true if this is the create flow.
    #[must_use]
    pub const fn is_create(&self) -> bool {
        matches!(self, Self::Create)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "<new>"),
            Self::Existing(id) => write!(f, "{id}"),
        }
    }
}

/// Lifecycle status of a backend record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Saved but not yet published.
    Draft,
    /// Published or activated.
    Published,
    /// Retired from use.
    Archived,
}

impl RecordStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    /// Reads the status of a raw record from `key`.
    ///
    /// Returns `Ok(None)` when the record carries no status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecordStatus` if the value is not a known status.
    pub fn from_record(record: &serde_json::Value, key: &str) -> Result<Option<Self>, DomainError> {
        match record.get(key) {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s.parse().map(Some),
            Some(serde_json::Value::String(_) | serde_json::Value::Null) | None => Ok(None),
            Some(other) => Err(DomainError::InvalidRecordStatus {
                status: other.to_string(),
            }),
        }
    }
}

impl FromStr for RecordStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::InvalidRecordStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Which save action produced a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Save without publishing; only the active step is validated.
    Draft,
    /// Save and then run the publish transition; every step is validated.
    Publish,
}
