// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while shaping or inspecting form data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A record status string is not one of the known lifecycle states.
    InvalidRecordStatus {
        /// The unrecognized status value.
        status: String,
    },
    /// A step number is outside the step plan.
    StepOutOfRange {
        /// The requested step (1-based).
        step: usize,
        /// The number of steps in the plan.
        len: usize,
    },
    /// A form did not serialize to a JSON object.
    FormNotAnObject {
        /// The record kind whose form was serialized.
        kind: &'static str,
    },
    /// A fetched record could not be projected into the form schema.
    ProjectionFailed {
        /// The record kind being projected.
        kind: &'static str,
        /// The deserialization error message.
        error: String,
    },
    /// A field key is not part of the form schema.
    UnknownField {
        /// The record kind.
        kind: &'static str,
        /// The unknown field key.
        field: String,
    },
    /// A record identifier is empty.
    EmptyRecordId,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRecordStatus { status } => {
                write!(f, "Invalid record status: '{status}'")
            }
            Self::StepOutOfRange { step, len } => {
                write!(f, "Step {step} is out of range. Must be between 1 and {len}")
            }
            Self::FormNotAnObject { kind } => {
                write!(f, "Form for {kind} did not serialize to an object")
            }
            Self::ProjectionFailed { kind, error } => {
                write!(f, "Failed to project {kind} record into form: {error}")
            }
            Self::UnknownField { kind, field } => {
                write!(f, "Field '{field}' is not part of the {kind} form")
            }
            Self::EmptyRecordId => write!(f, "Record identifier cannot be empty"),
        }
    }
}

impl std::error::Error for DomainError {}
