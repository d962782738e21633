// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{FormController, LifecycleError, NoticeLevel, RecordingNavigator, ViewState};
use cmp_forms_client::{ClientError, ScriptedTransport};
use cmp_forms_domain::kinds::{Asset, AssetForm, CollectionPoint, DataElement};
use cmp_forms_domain::{RecordId, RecordStatus};
use serde_json::json;
use std::sync::Arc;

use super::helpers::{create_scripted_controller, create_test_client, path_of};

#[tokio::test]
async fn test_create_flow_uses_schema_defaults() {
    let transport: ScriptedTransport = ScriptedTransport::new();
    let (controller, _) = create_scripted_controller::<CollectionPoint>(&transport);

    controller.load(RecordId::Create).await.unwrap();

    assert_eq!(transport.request_count(), 0);
    assert!(controller.snapshot().is_none());
    assert_eq!(controller.form().default_language, "English");
    let view: ViewState = controller.view();
    assert!(view.loaded);
    assert!(view.record_id.is_none());
}

#[tokio::test]
async fn test_existing_record_is_fetched_and_projected() {
    let transport: ScriptedTransport = ScriptedTransport::new().reply(
        200,
        json!({
            "asset_id": "a-1",
            "asset_name": "Acme",
            "category": "tech",
            "asset_status": "published",
            "created_at": "2025-01-01T00:00:00Z"
        }),
    );
    let (controller, _) = create_scripted_controller::<Asset>(&transport);

    controller
        .load(RecordId::Existing(String::from("a-1")))
        .await
        .unwrap();

    assert_eq!(
        path_of(&transport.requests()[0]),
        "/assets/get-asset/a-1"
    );
    let form: AssetForm = controller.form();
    assert_eq!(form.asset_name, "Acme");
    assert_eq!(form.description, "");
    let snapshot = controller.snapshot().unwrap();
    assert_eq!(snapshot.record["created_at"], "2025-01-01T00:00:00Z");
    assert!(snapshot.baseline.get("created_at").is_none());
    assert_eq!(controller.status(), Some(RecordStatus::Published));
    assert_eq!(controller.view().record_id.as_deref(), Some("a-1"));
}

#[tokio::test]
async fn test_load_failure_leaves_form_unusable() {
    let transport: ScriptedTransport =
        ScriptedTransport::new().reply(404, json!({"detail": "Asset not found"}));
    let (controller, _) = create_scripted_controller::<Asset>(&transport);

    let err: LifecycleError = controller
        .load(RecordId::Existing(String::from("missing")))
        .await
        .unwrap_err();

    assert!(matches!(err, LifecycleError::Client(ref e) if e.is_not_found()));
    let view: ViewState = controller.view();
    assert!(!view.loaded);
    let notice = view.notice.unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Asset not found");
    assert_eq!(controller.save_draft().await.unwrap_err(), LifecycleError::NotLoaded);
}

#[tokio::test]
async fn test_retry_after_failed_load() {
    let transport: ScriptedTransport = ScriptedTransport::new()
        .fail("connection refused")
        .reply(200, json!({"de_id": "d-1", "de_name": "Email", "de_retention_period": 30}));
    let (controller, _) = create_scripted_controller::<DataElement>(&transport);
    let id: RecordId = RecordId::Existing(String::from("d-1"));

    let err: LifecycleError = controller.load(id.clone()).await.unwrap_err();
    assert!(matches!(err, LifecycleError::Client(ClientError::Transport { .. })));

    controller.load(id).await.unwrap();
    assert!(controller.view().loaded);
    assert!(controller.view().notice.is_none());
    assert_eq!(controller.form().de_retention_period, Some(30));
}

#[tokio::test]
async fn test_record_of_wrong_shape_is_rejected() {
    let transport: ScriptedTransport =
        ScriptedTransport::new().reply(200, json!({"asset_id": "a-1", "asset_name": 42}));
    let (controller, _) = create_scripted_controller::<Asset>(&transport);

    let err: LifecycleError = controller
        .load(RecordId::Existing(String::from("a-1")))
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Domain(_)));
    assert!(!controller.view().loaded);
}

#[test]
fn test_route_segment_selects_create_flow() {
    let client = create_test_client(Arc::new(ScriptedTransport::new()));
    let navigator: Arc<RecordingNavigator> = Arc::new(RecordingNavigator::new());

    let (controller, id) = FormController::<CollectionPoint>::for_route(
        client.clone(),
        navigator.clone(),
        "create-collection-point",
        "activeTab=2",
    )
    .unwrap();
    assert_eq!(id, RecordId::Create);
    assert_eq!(controller.active_step(), 2);
    assert_eq!(
        controller.location().path,
        "/apps/collection-point/create-collection-point"
    );

    let (_, id) = FormController::<CollectionPoint>::for_route(client.clone(), navigator.clone(), "cp-9", "")
        .unwrap();
    assert_eq!(id, RecordId::Existing(String::from("cp-9")));

    assert!(FormController::<Asset>::for_route(client, navigator, "  ", "").is_err());
}
