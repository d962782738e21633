// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Change-set computation for partial updates.

use crate::types::FormData;
use serde_json::Value;
use std::collections::BTreeMap;

/// Maps a key of the current form to the key it has on the original record.
pub type FieldMap = BTreeMap<String, String>;

/// Returns the fields of `current` whose value differs from `original`.
///
/// Values are compared structurally, so object key order never produces a
/// change. A key absent from `original` differs from every value in
/// `current`, including `null`. When `original` is `None` nothing has been
/// persisted yet and `current` is returned unchanged.
#[must_use]
pub fn diff(original: Option<&FormData>, current: &FormData, field_map: Option<&FieldMap>) -> FormData {
    let Some(original) = original else {
        return current.clone();
    };

    current
        .iter()
        .filter(|(key, value)| {
            let original_key: &str = field_map
                .and_then(|map| map.get(key.as_str()))
                .map_or(key.as_str(), String::as_str);
            original.get(original_key) != Some(*value)
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Applies a shallow patch over a copy of `base`.
#[must_use]
pub fn apply_patch(base: &FormData, patch: &FormData) -> FormData {
    let mut merged: FormData = base.clone();
    for (key, value) in patch {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Applies a shallow patch to a raw record value.
///
/// Non-object records are replaced by the patch.
#[must_use]
pub fn apply_patch_to_record(record: &Value, patch: &FormData) -> Value {
    match record {
        Value::Object(fields) => Value::Object(apply_patch(fields, patch)),
        _ => Value::Object(patch.clone()),
    }
}
