// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::kinds::{
    Asset, AssetForm, CollectionPoint, CollectionPointForm, ContactPerson, DataElement,
    DparRequest, Incident, TRANSLATION_LANGUAGES, Vendor, VendorForm,
};
use crate::{
    DomainError, FieldName, FormData, ListPaging, PayloadStrategy, RecordKind, SaveMode, Step,
    StepIssue, StepPlan, WriteMethod, compact, extract_id, project, to_form_data,
};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlanField {
    Name,
    Type,
}

impl FieldName for PlanField {
    fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Type => "type",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Type => "Type",
        }
    }
}

fn two_step_plan() -> StepPlan<PlanField> {
    StepPlan::new(vec![
        Step::new("one", "One", vec![PlanField::Name]),
        Step::new("two", "Two", vec![PlanField::Type]),
    ])
}

#[test]
fn test_step_plan_validate_all_reports_every_incomplete_step() {
    let plan: StepPlan<PlanField> = two_step_plan();
    let mut data: FormData = FormData::new();
    data.insert(String::from("name"), json!("Acme"));

    let issues: Vec<StepIssue> = plan.validate_all(&data);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].step, 2);
    assert_eq!(issues[0].step_id, "two");
    assert_eq!(issues[0].missing, vec!["type"]);
}

#[test]
fn test_step_plan_validate_step_only_checks_that_step() {
    let plan: StepPlan<PlanField> = two_step_plan();
    let mut data: FormData = FormData::new();
    data.insert(String::from("name"), json!("Acme"));

    let issue: StepIssue = plan.validate_step(1, &data).unwrap();
    assert!(issue.is_clean());
}

#[test]
fn test_step_plan_rejects_out_of_range_steps() {
    let plan: StepPlan<PlanField> = two_step_plan();
    assert_eq!(
        plan.step(0).err(),
        Some(DomainError::StepOutOfRange { step: 0, len: 2 })
    );
    assert!(plan.validate_step(3, &FormData::new()).is_err());
}

#[test]
fn test_empty_step_plan_has_one_step() {
    let plan: StepPlan<PlanField> = StepPlan::new(Vec::new());
    assert_eq!(plan.len(), 1);
    assert!(!plan.is_empty());
    assert!(plan.validate_all(&FormData::new()).is_empty());
}

#[test]
fn test_asset_projection_fills_defaults_and_ignores_unknown_fields() {
    let record: Value = json!({
        "asset_id": "a1",
        "asset_name": "Acme",
        "description": "old",
        "df_id": "df-9",
    });

    let projected: AssetForm = project::<Asset>(&record).unwrap();

    assert_eq!(projected.asset_name, "Acme");
    assert_eq!(projected.description, "old");
    assert_eq!(projected.category, "");
}

#[test]
fn test_projection_rejects_wrong_types() {
    let record: Value = json!({"asset_name": 12});
    assert!(matches!(
        project::<Asset>(&record),
        Err(DomainError::ProjectionFailed { kind: "asset", .. })
    ));
}

#[test]
fn test_to_form_data_uses_wire_keys() {
    let form: AssetForm = AssetForm {
        asset_name: String::from("Acme"),
        usage_url: String::from("https://acme.example"),
        ..AssetForm::default()
    };

    let data: FormData = to_form_data::<Asset>(&form).unwrap();

    assert_eq!(data.get("asset_name"), Some(&json!("Acme")));
    assert_eq!(data.get("usage_url"), Some(&json!("https://acme.example")));
    assert_eq!(data.len(), 5);
}

#[test]
fn test_compact_drops_blank_values_only() {
    let data: FormData = match json!({
        "asset_name": "Acme",
        "description": "",
        "data_elements": [],
        "deadline": null,
        "regulatory_reported": false,
        "affected_population": 0,
    }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };

    let compacted: FormData = compact(&data);

    assert_eq!(
        Value::Object(compacted),
        json!({"asset_name": "Acme", "regulatory_reported": false, "affected_population": 0})
    );
}

#[test]
fn test_extract_id_tries_keys_in_order() {
    let response: Value = json!({"_id": "mongo", "asset_id": "a1"});
    assert_eq!(
        extract_id(&response, Asset::ID_KEYS),
        Some(String::from("a1"))
    );

    let response: Value = json!({"id": 7});
    assert_eq!(extract_id(&response, Asset::ID_KEYS), Some(String::from("7")));

    let response: Value = json!({"asset_id": ""});
    assert_eq!(extract_id(&response, Asset::ID_KEYS), None);
}

#[test]
fn test_collection_point_plan_matches_wizard() {
    let plan = CollectionPoint::step_plan();
    let ids: Vec<&str> = plan.steps().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["platform", "type", "details", "notice"]);

    let data: FormData = to_form_data::<CollectionPoint>(&CollectionPointForm {
        asset_id: String::from("a1"),
        cp_type: String::from("new"),
        cp_name: String::from("Signup"),
        redirection_url: String::from("example.com"),
        notice_type: String::from("single"),
        ..CollectionPointForm::default()
    })
    .unwrap();

    let issues: Vec<StepIssue> = plan.validate_all(&data);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].step, 3);
    assert!(issues[0].missing.is_empty());
    assert_eq!(issues[0].invalid[0].field, "redirection_url");
}

#[test]
fn test_collection_point_defaults() {
    let form: CollectionPointForm = CollectionPointForm::default();
    assert_eq!(form.default_language, "English");
    assert_eq!(form.notice_popup_window_timeout, 10);
    assert_eq!(CollectionPoint::CREATE_SENTINEL, "create-collection-point");
}

#[test]
fn test_incident_normalization_nulls_blank_dates_and_forces_draft() {
    let mut payload: FormData = match json!({
        "incident_name": "Leak",
        "date_occurred": "",
        "deadline": "2026-01-02",
        "status": "published",
    }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };

    Incident::normalize_payload(&mut payload, SaveMode::Draft, false);

    assert_eq!(payload.get("date_occurred"), Some(&Value::Null));
    assert_eq!(payload.get("deadline"), Some(&json!("2026-01-02")));
    assert_eq!(payload.get("status"), Some(&json!("draft")));
}

#[test]
fn test_incident_normalization_keeps_status_when_publishing() {
    let mut payload: FormData = match json!({"status": "published"}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    Incident::normalize_payload(&mut payload, SaveMode::Publish, false);
    assert_eq!(payload.get("status"), Some(&json!("published")));
}

#[test]
fn test_data_element_publish_requires_every_translation() {
    let mut data: FormData = FormData::new();
    let mut translations = serde_json::Map::new();
    for language in TRANSLATION_LANGUAGES.iter().skip(1) {
        translations.insert((*language).to_string(), json!("x"));
    }
    data.insert(String::from("translations"), Value::Object(translations));

    let missing: Vec<(usize, String)> = DataElement::publish_requirements(&data);

    assert_eq!(missing, vec![(2, String::from("translations.hin"))]);
}

#[test]
fn test_data_element_publish_without_translations_lists_all_languages() {
    let missing: Vec<(usize, String)> = DataElement::publish_requirements(&FormData::new());
    assert_eq!(missing.len(), TRANSLATION_LANGUAGES.len());
}

#[test]
fn test_data_element_update_drops_source_translation() {
    let mut payload: FormData = match json!({"translations": {"eng": "Email", "hin": "ईमेल"}}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };

    DataElement::normalize_payload(&mut payload, SaveMode::Draft, true);
    assert!(payload["translations"].get("eng").is_some());

    DataElement::normalize_payload(&mut payload, SaveMode::Draft, false);
    assert!(payload["translations"].get("eng").is_none());
    assert!(payload["translations"].get("hin").is_some());
}

#[test]
fn test_dpar_requires_an_identifier_to_submit() {
    let mut data: FormData = FormData::new();
    assert_eq!(
        DparRequest::publish_requirements(&data),
        vec![(1, String::from("core_identifier"))]
    );

    data.insert(String::from("secondary_identifier"), json!("+91 90000 00000"));
    assert!(DparRequest::publish_requirements(&data).is_empty());
}

#[test]
fn test_dpar_has_no_update_or_publish_endpoint() {
    let endpoints = DparRequest::endpoints();
    assert!(endpoints.update.is_none());
    assert!(endpoints.publish.is_none());
    assert!(endpoints.archive.is_none());
}

#[test]
fn test_list_paging_per_kind() {
    assert_eq!(Asset::endpoints().list_paging, ListPaging::CURRENT_PAGE);
    assert_eq!(DataElement::endpoints().list_paging, ListPaging::CURRENT_PAGE);
    assert_eq!(CollectionPoint::endpoints().list_paging, ListPaging::CURRENT_PAGE);

    let incident = Incident::endpoints();
    assert_eq!(incident.list_paging, ListPaging::PAGE);
    assert_eq!(incident.list_items_key, "incidents");

    let dpar = DparRequest::endpoints();
    assert_eq!(dpar.list_paging.page, "page");
    assert_eq!(dpar.list_paging.page_size, "page_size");
    assert_eq!(dpar.list_items_key, "data");

    let vendor = Vendor::endpoints();
    assert_eq!(vendor.list_paging, ListPaging::PAGE);
    assert_eq!(vendor.list_items_key, "vendors");
}

#[test]
fn test_payload_strategy_per_kind() {
    assert_eq!(Asset::PAYLOAD, PayloadStrategy::Diff);
    assert_eq!(DataElement::PAYLOAD, PayloadStrategy::Diff);
    assert_eq!(CollectionPoint::PAYLOAD, PayloadStrategy::Diff);
    assert_eq!(DparRequest::PAYLOAD, PayloadStrategy::Diff);
    assert_eq!(Incident::PAYLOAD, PayloadStrategy::Full);
    assert_eq!(Vendor::PAYLOAD, PayloadStrategy::Full);
}

#[test]
fn test_archive_endpoints_are_deletes() {
    for (kind, archive) in [
        ("asset", Asset::endpoints().archive),
        ("data element", DataElement::endpoints().archive),
        ("collection point", CollectionPoint::endpoints().archive),
        ("vendor", Vendor::endpoints().archive),
    ] {
        let archive = archive.unwrap_or_else(|| panic!("{kind} has no archive endpoint"));
        assert_eq!(archive.method, WriteMethod::Delete, "{kind}");
    }
    assert_eq!(
        Asset::endpoints().archive.unwrap().resolve("a-1"),
        "/assets/delete-asset/a-1"
    );
    assert!(Incident::endpoints().archive.is_none());
}

#[test]
fn test_vendor_projection_accepts_nulls() {
    let record: Value = json!({
        "vendor_id": "v-1",
        "dpr_name": "Acme Cloud",
        "dpr_legal_name": null,
        "processing_category": ["storage"],
        "contact_person": {"name": "Ravi", "email": "ravi@acme.test", "phone": null},
        "security_measures": null,
        "status": "published",
    });

    let form: VendorForm = project::<Vendor>(&record).unwrap();

    assert_eq!(form.dpr_name.as_deref(), Some("Acme Cloud"));
    assert!(form.dpr_legal_name.is_none());
    assert_eq!(form.processing_category, Some(vec![String::from("storage")]));
    assert!(form.security_measures.is_none());
    let contact: ContactPerson = form.contact_person.unwrap();
    assert_eq!(contact.name, "Ravi");
    assert!(contact.designation.is_empty());
    assert!(contact.phone.is_none());
    assert_eq!(extract_id(&record, Vendor::ID_KEYS).as_deref(), Some("v-1"));
}

#[test]
fn test_vendor_requires_only_a_name() {
    let plan = Vendor::step_plan();
    assert_eq!(plan.len(), 3);

    let mut data: FormData = to_form_data::<Vendor>(&VendorForm::default()).unwrap();
    let issues: Vec<StepIssue> = plan.validate_all(&data);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].missing, vec![String::from("dpr_name")]);

    data.insert(String::from("dpr_name"), json!("Acme Cloud"));
    assert!(plan.validate_all(&data).is_empty());
    assert_eq!(Vendor::CREATE_SENTINEL, "create-vender");
}

#[test]
fn test_endpoint_resolves_id() {
    let endpoints = Incident::endpoints();
    let update = endpoints.update.unwrap();
    assert_eq!(
        update.resolve("inc-1"),
        "/incidents/create-or-update?incident_id=inc-1"
    );
    assert_eq!(
        endpoints.publish.unwrap().resolve("inc-1"),
        "/incidents/inc-1/publish"
    );
}
