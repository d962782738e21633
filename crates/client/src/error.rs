// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the client layer.

use serde_json::Value;
use thiserror::Error;

/// Message shown when the backend gives no usable explanation.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Errors raised while talking to the backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("Request failed: {message}")]
    Transport { message: String },

    /// The backend answered with a non-2xx status.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// A 2xx response body was not valid JSON.
    #[error("Invalid response body: {message}")]
    Decode { message: String },

    /// The request URL could not be built.
    #[error("Invalid request URL: {message}")]
    InvalidUrl { message: String },

    /// Reading or writing persisted storage failed.
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Configuration could not be read.
    #[error("Invalid configuration for {key}: {message}")]
    Config { key: String, message: String },

    /// A create call succeeded but returned no record identifier.
    #[error("Record id missing from create response to {path}")]
    MissingId { path: String },
}

impl ClientError {
    /// The text to show the user for this error.
    ///
    /// Backend-provided messages are passed through; everything else
    /// collapses to [`GENERIC_FAILURE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::MissingId { .. } => self.to_string(),
            Self::Transport { .. }
            | Self::Decode { .. }
            | Self::InvalidUrl { .. }
            | Self::Storage { .. }
            | Self::Config { .. } => String::from(GENERIC_FAILURE),
        }
    }

    /// The HTTP status, if the backend answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the backend reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Extracts a human-readable message from an error response body.
///
/// Looks at `detail` (a string, or a list of `{msg}` validation entries),
/// then `message`, then `error`. Falls back to [`GENERIC_FAILURE`].
#[must_use]
pub fn extract_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return String::from(GENERIC_FAILURE);
    };

    for key in ["detail", "message", "error"] {
        if let Some(message) = value.get(key).and_then(message_from) {
            return message;
        }
    }
    String::from(GENERIC_FAILURE)
}

fn message_from(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(entries) => entries.iter().find_map(|entry| match entry {
            Value::Object(fields) => fields.get("msg").and_then(message_from),
            other => message_from(other),
        }),
        Value::Object(fields) => fields.get("message").and_then(message_from),
        _ => None,
    }
}
