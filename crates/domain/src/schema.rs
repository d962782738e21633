// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed record schemas and step plans.
//!
//! Each record kind names its fields through a `Field` enum, so the required
//! field sets of a wizard are checked by the compiler rather than being
//! string literals scattered across pages.

use crate::error::DomainError;
use crate::types::{FormData, SaveMode};
use crate::validation::{FieldIssue, Rule, find_invalid, find_missing, is_blank};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A field of a record kind's form.
pub trait FieldName: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {
    /// The JSON key used on the wire and in `FormData`.
    fn key(self) -> &'static str;

    /// The label shown next to the input.
    fn label(self) -> &'static str;
}

/// One step of a wizard.
#[derive(Debug, Clone)]
pub struct Step<F: FieldName> {
    /// Stable identifier of the step.
    pub id: &'static str,
    /// Heading shown for the step.
    pub title: &'static str,
    /// Fields that must be filled in before leaving the step.
    pub required: Vec<F>,
    /// Pattern rules checked for the step's fields.
    pub rules: Vec<Rule>,
}

impl<F: FieldName> Step<F> {
    /// Creates a step with no rules.
    #[must_use]
    pub const fn new(id: &'static str, title: &'static str, required: Vec<F>) -> Self {
        Self {
            id,
            title,
            required,
            rules: Vec::new(),
        }
    }

    /// Adds pattern rules to the step.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// The wire keys of the required fields.
    #[must_use]
    pub fn required_keys(&self) -> Vec<&'static str> {
        self.required.iter().map(|f| f.key()).collect()
    }
}

/// The validation outcome for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepIssue {
    /// The step number (1-based).
    pub step: usize,
    /// The step identifier.
    pub step_id: &'static str,
    /// Required fields that are blank.
    pub missing: Vec<String>,
    /// Fields that fail a pattern rule.
    pub invalid: Vec<FieldIssue>,
}

impl StepIssue {
    /// Returns true if the step passed validation.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

/// Ordered, fixed-length list of steps for a wizard.
#[derive(Debug, Clone)]
pub struct StepPlan<F: FieldName> {
    steps: Vec<Step<F>>,
}

impl<F: FieldName> StepPlan<F> {
    /// Creates a plan. An empty step list becomes a single step with
    /// nothing required, so a plan always has at least one step.
    #[must_use]
    pub fn new(steps: Vec<Step<F>>) -> Self {
        if steps.is_empty() {
            return Self {
                steps: vec![Step::new("main", "General", Vec::new())],
            };
        }
        Self { steps }
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All steps in order.
    #[must_use]
    pub fn steps(&self) -> &[Step<F>] {
        &self.steps
    }

    /// Returns the step with the given 1-based number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StepOutOfRange` if `step` is not in `1..=len`.
    pub fn step(&self, step: usize) -> Result<&Step<F>, DomainError> {
        step.checked_sub(1)
            .and_then(|index| self.steps.get(index))
            .ok_or(DomainError::StepOutOfRange {
                step,
                len: self.steps.len(),
            })
    }

    /// Validates a single step against the form data.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StepOutOfRange` if `step` is not in `1..=len`.
    pub fn validate_step(&self, step: usize, data: &FormData) -> Result<StepIssue, DomainError> {
        let definition: &Step<F> = self.step(step)?;
        Ok(StepIssue {
            step,
            step_id: definition.id,
            missing: find_missing(data, &definition.required_keys()),
            invalid: find_invalid(data, &definition.rules),
        })
    }

    /// Validates every step and returns only the steps that need attention.
    #[must_use]
    pub fn validate_all(&self, data: &FormData) -> Vec<StepIssue> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, definition)| StepIssue {
                step: index + 1,
                step_id: definition.id,
                missing: find_missing(data, &definition.required_keys()),
                invalid: find_invalid(data, &definition.rules),
            })
            .filter(|issue| !issue.is_clean())
            .collect()
    }
}

/// REST endpoints of a record kind.
///
/// Paths contain `{id}` where the record identifier goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Fetch one record.
    pub get: &'static str,
    /// Create a record.
    pub create: Endpoint,
    /// Partially update a record, if the kind supports edits.
    pub update: Option<Endpoint>,
    /// Status transition to published, if the kind has one.
    pub publish: Option<Endpoint>,
    /// Soft delete: drafts are removed, published records are archived.
    pub archive: Option<Endpoint>,
    /// Paginated list of records.
    pub list: &'static str,
    /// Key of the item array in the list response.
    pub list_items_key: &'static str,
    /// Query parameter names the list endpoint reads.
    pub list_paging: ListPaging,
    /// Front-end route of the list page, used as the redirect after a save.
    pub list_route: &'static str,
}

/// Names of the page number and page size query parameters of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListPaging {
    pub page: &'static str,
    pub page_size: &'static str,
}

impl ListPaging {
    /// `current_page` / `data_per_page`, used by most lists.
    pub const CURRENT_PAGE: Self = Self {
        page: "current_page",
        page_size: "data_per_page",
    };

    /// `page` / `page_size`.
    pub const PAGE: Self = Self {
        page: "page",
        page_size: "page_size",
    };
}

impl Default for ListPaging {
    fn default() -> Self {
        Self::CURRENT_PAGE
    }
}

/// HTTP methods used by mutating calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMethod {
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

/// What a save sends to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadStrategy {
    /// Create sends only filled-in fields; update sends only changed fields.
    #[default]
    Diff,
    /// Create and update both send every field of the form. Used by
    /// create-or-update endpoints that validate the whole body.
    Full,
}

/// A mutating endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// HTTP method.
    pub method: WriteMethod,
    /// Path template.
    pub path: &'static str,
}

impl Endpoint {
    /// Creates an endpoint.
    #[must_use]
    pub const fn new(method: WriteMethod, path: &'static str) -> Self {
        Self { method, path }
    }

    /// The path with `{id}` substituted.
    #[must_use]
    pub fn resolve(&self, id: &str) -> String {
        resolve_path(self.path, id)
    }
}

/// Substitutes `{id}` in a path template.
#[must_use]
pub fn resolve_path(template: &str, id: &str) -> String {
    template.replace("{id}", id)
}

/// A kind of backend record edited through a wizard.
pub trait RecordKind {
    /// The typed form state. `Default` gives the schema defaults of the
    /// create flow; `Deserialize` projects a fetched record.
    type Form: Serialize
        + DeserializeOwned
        + Default
        + Clone
        + std::fmt::Debug
        + PartialEq
        + Send
        + Sync
        + 'static;

    /// The fields of the form.
    type Field: FieldName;

    /// Human-readable name of the kind, used in notices and logs.
    const NAME: &'static str;

    /// Route segment meaning "new record".
    const CREATE_SENTINEL: &'static str = "create";

    /// Keys searched, in order, for the id in a create response.
    const ID_KEYS: &'static [&'static str];

    /// Key of the status field on a fetched record.
    const STATUS_KEY: &'static str = "status";

    /// How create and update payloads are built.
    const PAYLOAD: PayloadStrategy = PayloadStrategy::Diff;

    /// The REST endpoints of the kind.
    fn endpoints() -> Endpoints;

    /// The wizard steps.
    fn step_plan() -> StepPlan<Self::Field>;

    /// Adjusts an outgoing payload. `creating` is true for the create call.
    fn normalize_payload(_payload: &mut FormData, _mode: SaveMode, _creating: bool) {}

    /// Completeness checks that only apply to publishing, beyond the
    /// required fields of the step plan. Returns `(step, field)` pairs.
    fn publish_requirements(_data: &FormData) -> Vec<(usize, String)> {
        Vec::new()
    }
}

/// Serializes a typed form into `FormData`.
///
/// # Errors
///
/// Returns `DomainError::FormNotAnObject` if the form does not serialize to a
/// JSON object.
pub fn to_form_data<K: RecordKind>(form: &K::Form) -> Result<FormData, DomainError> {
    match serde_json::to_value(form) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) | Err(_) => Err(DomainError::FormNotAnObject { kind: K::NAME }),
    }
}

/// Projects a fetched record into the kind's form.
///
/// Fields the form does not know are ignored; fields the record lacks take
/// their schema defaults.
///
/// # Errors
///
/// Returns `DomainError::ProjectionFailed` if a known field has the wrong type.
pub fn project<K: RecordKind>(record: &serde_json::Value) -> Result<K::Form, DomainError> {
    serde_json::from_value(record.clone()).map_err(|e| DomainError::ProjectionFailed {
        kind: K::NAME,
        error: e.to_string(),
    })
}

/// Removes blank entries, leaving only fields that carry a value.
#[must_use]
pub fn compact(payload: &FormData) -> FormData {
    payload
        .iter()
        .filter(|(_, value)| !is_blank(Some(value)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Reads the identifier of a created record from a create response.
#[must_use]
pub fn extract_id(response: &serde_json::Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match response.get(*key) {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
