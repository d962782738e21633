// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::schema::FieldName;
use crate::types::FormData;
use serde::Serialize;
use serde_json::Value;

/// A field that holds a value but fails a pattern rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// The field key.
    pub field: String,
    /// A human-readable description of the problem.
    pub message: String,
}

/// A pattern rule applied to a single field.
///
/// Rules only judge fields that hold a value; blank fields are the
/// concern of [`find_missing`].
#[derive(Clone, Copy)]
pub struct Rule {
    /// The field key the rule applies to.
    pub field: &'static str,
    /// Returns true when the value is acceptable.
    pub predicate: fn(&str) -> bool,
    /// Message reported when the predicate rejects the value.
    pub message: &'static str,
}

impl Rule {
    /// Creates a rule from an arbitrary predicate.
    #[must_use]
    pub fn new(field: impl FieldName, predicate: fn(&str) -> bool, message: &'static str) -> Self {
        Self {
            field: field.key(),
            predicate,
            message,
        }
    }

    /// Requires the field to be an absolute `http://` or `https://` URL.
    #[must_use]
    pub fn http_url(field: impl FieldName) -> Self {
        Self::new(
            field,
            is_http_url,
            "Please enter a valid URL starting with http:// or https://",
        )
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Returns true if the value starts with `http://` or `https://`, ignoring case.
#[must_use]
pub fn is_http_url(value: &str) -> bool {
    let lower: String = value.trim_start().chars().take(8).collect::<String>().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Returns true if a value counts as "not filled in".
///
/// Absent, `null`, whitespace-only strings and empty arrays are blank.
/// `false`, `0` and empty objects are values.
#[must_use]
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Returns the required fields that are blank in `record`, in the order given.
///
/// This function is pure; calling it twice with the same inputs yields the
/// same result.
#[must_use]
pub fn find_missing(record: &FormData, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|field| is_blank(record.get(**field)))
        .map(|field| (*field).to_string())
        .collect()
}

/// Returns one issue per rule whose field holds a value the rule rejects.
///
/// Blank fields are skipped. Non-string scalars are checked through their
/// JSON text; arrays and objects are not pattern-checked.
#[must_use]
pub fn find_invalid(record: &FormData, rules: &[Rule]) -> Vec<FieldIssue> {
    rules
        .iter()
        .filter_map(|rule| {
            let value: Option<&Value> = record.get(rule.field);
            if is_blank(value) {
                return None;
            }
            let text: String = match value? {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
            };
            if (rule.predicate)(&text) {
                None
            } else {
                Some(FieldIssue {
                    field: rule.field.to_string(),
                    message: rule.message.to_string(),
                })
            }
        })
        .collect()
}
