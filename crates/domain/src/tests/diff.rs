// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{FieldMap, FormData, apply_patch, apply_patch_to_record, diff};
use serde_json::{Value, json};

fn form(value: Value) -> FormData {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn sample_pairs() -> Vec<(FormData, FormData)> {
    vec![
        (FormData::new(), FormData::new()),
        (FormData::new(), form(json!({"asset_name": "Acme"}))),
        (
            form(json!({"asset_name": "Acme", "description": "old"})),
            form(json!({"asset_name": "Acme", "description": "new"})),
        ),
        (
            form(json!({"a": 1, "b": [1, 2], "c": {"x": 1, "y": 2}})),
            form(json!({"a": 1, "b": [2, 1], "c": {"y": 2, "x": 1}})),
        ),
        (
            form(json!({"a": null, "extra": "kept"})),
            form(json!({"a": "", "b": null})),
        ),
        (
            form(json!({"flag": true, "count": 10})),
            form(json!({"flag": false, "count": 10.5})),
        ),
    ]
}

#[test]
fn test_diff_reports_only_changed_fields() {
    let original: FormData = form(json!({"asset_name": "Acme", "description": "old"}));
    let current: FormData = form(json!({"asset_name": "Acme", "description": "new"}));

    let patch: FormData = diff(Some(&original), &current, None);

    assert_eq!(patch, form(json!({"description": "new"})));
    assert!(!patch.contains_key("asset_name"));
}

#[test]
fn test_diff_without_original_returns_current() {
    let current: FormData = form(json!({"asset_name": "Acme", "category": "tech"}));
    assert_eq!(diff(None, &current, None), current);
}

#[test]
fn test_diff_of_equal_records_is_empty() {
    for (original, _) in sample_pairs() {
        assert!(diff(Some(&original), &original, None).is_empty());
    }
}

#[test]
fn test_diff_ignores_object_key_order() {
    let original: FormData = form(json!({"c": {"x": 1, "y": {"p": 1, "q": 2}}}));
    let current: FormData = form(json!({"c": {"y": {"q": 2, "p": 1}, "x": 1}}));
    assert!(diff(Some(&original), &current, None).is_empty());
}

#[test]
fn test_diff_treats_array_order_as_change() {
    let original: FormData = form(json!({"b": [1, 2]}));
    let current: FormData = form(json!({"b": [2, 1]}));
    assert_eq!(diff(Some(&original), &current, None), current);
}

#[test]
fn test_diff_distinguishes_absent_from_null() {
    let original: FormData = FormData::new();
    let current: FormData = form(json!({"deadline": null}));
    assert_eq!(diff(Some(&original), &current, None), current);
}

#[test]
fn test_diff_round_trip_reproduces_current() {
    for (original, current) in sample_pairs() {
        let patch: FormData = diff(Some(&original), &current, None);
        let patched: FormData = apply_patch(&original, &patch);
        for (key, value) in &current {
            assert_eq!(patched.get(key), Some(value), "key {key} did not round-trip");
        }
    }
}

#[test]
fn test_diff_uses_field_map_for_original_keys() {
    let original: FormData = form(json!({"asset_name": "Acme", "usage_url": "https://a"}));
    let current: FormData = form(json!({"assetName": "Acme", "usageUrl": "https://b"}));
    let mut map: FieldMap = FieldMap::new();
    map.insert(String::from("assetName"), String::from("asset_name"));
    map.insert(String::from("usageUrl"), String::from("usage_url"));

    let patch: FormData = diff(Some(&original), &current, Some(&map));

    assert_eq!(patch, form(json!({"usageUrl": "https://b"})));
}

#[test]
fn test_apply_patch_to_record_keeps_unknown_fields() {
    let record: Value = json!({"asset_id": "a1", "asset_name": "Acme", "df_id": "df"});
    let patch: FormData = form(json!({"asset_name": "Acme 2"}));

    let patched: Value = apply_patch_to_record(&record, &patch);

    assert_eq!(
        patched,
        json!({"asset_id": "a1", "asset_name": "Acme 2", "df_id": "df"})
    );
}

#[test]
fn test_apply_patch_to_non_object_record_uses_patch() {
    let patch: FormData = form(json!({"a": 1}));
    assert_eq!(apply_patch_to_record(&Value::Null, &patch), json!({"a": 1}));
}
