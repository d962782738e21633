// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod diff;
mod error;
pub mod kinds;
mod schema;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use diff::{FieldMap, apply_patch, apply_patch_to_record, diff};
pub use error::DomainError;
pub use schema::{
    Endpoint, Endpoints, FieldName, ListPaging, PayloadStrategy, RecordKind, Step, StepIssue,
    StepPlan, WriteMethod, compact, extract_id, project, resolve_path, to_form_data,
};
pub use types::{FormData, RecordId, RecordStatus, SaveMode};
pub use validation::{FieldIssue, Rule, find_invalid, find_missing, is_blank, is_http_url};
