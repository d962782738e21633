// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cmp_forms_client::ClientError;
use cmp_forms_domain::{DomainError, FieldIssue, StepIssue};
use thiserror::Error;

/// Errors returned by the form lifecycle.
///
/// Every variant leaves the form input intact so the operation can be
/// retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// The form has not been loaded, or its last load failed.
    #[error("The form has not been loaded")]
    NotLoaded,

    /// Another save or publish is in flight for this form.
    #[error("Another request is already in progress")]
    Busy,

    /// The form was unmounted while the request was in flight.
    #[error("The form is no longer mounted")]
    Unmounted,

    /// The active step has blank required fields or invalid values.
    #[error("{}", validation_message(missing, invalid))]
    Validation {
        missing: Vec<String>,
        invalid: Vec<FieldIssue>,
    },

    /// Publishing needs steps that are not complete.
    #[error("Please complete step(s) {}", step_list(steps))]
    Incomplete { steps: Vec<StepIssue> },

    /// The record kind cannot be edited after creation.
    #[error("This record cannot be edited once created")]
    UpdateUnsupported,

    /// The record kind has no archive operation.
    #[error("This record cannot be archived")]
    ArchiveUnsupported,

    /// The record has not been saved yet.
    #[error("The record has not been saved yet")]
    NotPersisted,

    /// Talking to the backend failed; nothing was saved.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The record was saved as a draft but the publish transition failed.
    #[error("Saved as draft, but publishing {id} failed: {source}")]
    PublishTransitionFailed {
        id: String,
        #[source]
        source: ClientError,
    },

    /// A domain rule was violated.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl LifecycleError {
    /// The step numbers that need attention, for `Incomplete`.
    #[must_use]
    pub fn incomplete_steps(&self) -> Vec<usize> {
        match self {
            Self::Incomplete { steps } => steps.iter().map(|issue| issue.step).collect(),
            _ => Vec::new(),
        }
    }

    /// Every missing field named by this error.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<String> {
        match self {
            Self::Validation { missing, .. } => missing.clone(),
            Self::Incomplete { steps } => steps
                .iter()
                .flat_map(|issue| issue.missing.iter().cloned())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Returns true when the record was persisted despite the error.
    #[must_use]
    pub const fn is_partial_failure(&self) -> bool {
        matches!(self, Self::PublishTransitionFailed { .. })
    }
}

fn validation_message(missing: &[String], invalid: &[FieldIssue]) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("Missing required fields: {}", missing.join(", ")));
    }
    for issue in invalid {
        parts.push(format!("{}: {}", issue.field, issue.message));
    }
    if parts.is_empty() {
        return String::from("Validation failed");
    }
    parts.join("; ")
}

fn step_list(steps: &[StepIssue]) -> String {
    steps
        .iter()
        .map(|issue| issue.step.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}
