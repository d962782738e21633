// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{FormController, LifecycleError, Location, RecordingNavigator, StepSequencer, ViewState};
use cmp_forms_client::ScriptedTransport;
use cmp_forms_domain::kinds::{CollectionPoint, CollectionPointForm};
use cmp_forms_domain::{FormData, RecordId, StepPlan, to_form_data};
use serde_json::json;

use super::helpers::{Widget, WidgetField, WidgetForm, create_controller, create_scripted_controller};

/// Deterministic pseudo-random operation stream.
fn operations(seed: u64, count: usize) -> Vec<u8> {
    let mut state: u64 = seed;
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            u8::try_from(state >> 62).unwrap()
        })
        .collect()
}

#[test]
fn test_step_bounds_hold_for_any_sequence() {
    let plan: StepPlan<_> = <CollectionPoint as cmp_forms_domain::RecordKind>::step_plan();
    let complete: CollectionPointForm = CollectionPointForm {
        asset_id: String::from("asset-1"),
        cp_type: String::from("new"),
        cp_name: String::from("Signup"),
        notice_type: String::from("single"),
        ..CollectionPointForm::default()
    };
    let complete: FormData = to_form_data::<CollectionPoint>(&complete).unwrap();
    let empty: FormData = FormData::new();

    for seed in 0..50 {
        let mut sequencer: StepSequencer = StepSequencer::new(plan.len());
        for (i, op) in operations(seed, 200).into_iter().enumerate() {
            let data: &FormData = if i % 3 == 0 { &empty } else { &complete };
            match op {
                0 | 1 => {
                    let _ = sequencer.go_next(&plan, data);
                }
                _ => {
                    sequencer.go_back();
                }
            }
            assert!((1..=plan.len()).contains(&sequencer.active()));
        }
    }
}

#[test]
fn test_go_next_at_last_step_stays() {
    let plan: StepPlan<WidgetField> = <Widget as cmp_forms_domain::RecordKind>::step_plan();
    let data: FormData = json!({"name": "w", "type": "t"}).as_object().unwrap().clone();
    let mut sequencer: StepSequencer = StepSequencer::new(plan.len());

    assert_eq!(sequencer.go_next(&plan, &data).unwrap(), 2);
    assert_eq!(sequencer.go_next(&plan, &data).unwrap(), 2);
    assert_eq!(sequencer.go_back(), 1);
    assert_eq!(sequencer.go_back(), 1);
}

#[tokio::test]
async fn test_go_next_refuses_and_surfaces_missing() {
    let transport: ScriptedTransport = ScriptedTransport::new();
    let (controller, navigator) = create_scripted_controller::<Widget>(&transport);
    controller.load(RecordId::Create).await.unwrap();

    let err: LifecycleError = controller.go_next().unwrap_err();
    assert_eq!(err.missing_fields(), vec![String::from("name")]);
    assert_eq!(controller.active_step(), 1);
    assert_eq!(controller.view().missing, vec![String::from("name")]);
    assert!(navigator.history().is_empty());

    controller.set_field(WidgetField::Name, json!("Widget")).unwrap();
    assert!(controller.view().missing.is_empty());
    assert_eq!(controller.go_next().unwrap(), 2);
}

#[tokio::test]
async fn test_step_changes_are_written_to_the_url() {
    let transport: ScriptedTransport = ScriptedTransport::new();
    let (controller, navigator) =
        create_controller::<Widget>(std::sync::Arc::new(transport), "mode=edit");
    controller.load(RecordId::Create).await.unwrap();
    controller.update_form(|form: &mut WidgetForm| form.name = String::from("Widget"));

    controller.go_next().unwrap();
    assert_eq!(
        navigator.last(),
        Some(Location::new("/page", "mode=edit&activeTab=2"))
    );

    controller.go_back().unwrap();
    assert_eq!(navigator.last().unwrap().query, "mode=edit&activeTab=1");
    assert_eq!(controller.location().to_string(), "/page?mode=edit&activeTab=1");
}

#[tokio::test]
async fn test_direct_jump_skips_validation() {
    let transport: ScriptedTransport = ScriptedTransport::new();
    let (controller, _) = create_scripted_controller::<Widget>(&transport);
    controller.load(RecordId::Create).await.unwrap();

    assert_eq!(controller.go_to_step(2).unwrap(), 2);
    assert!(matches!(
        controller.go_to_step(3),
        Err(LifecycleError::Domain(_))
    ));
    assert_eq!(controller.view().active_step, 2);
}

#[test]
fn test_active_step_restored_from_location() {
    let navigator: RecordingNavigator = RecordingNavigator::new();
    let controller: FormController<CollectionPoint> = FormController::new(
        super::helpers::create_test_client(std::sync::Arc::new(ScriptedTransport::new())),
        std::sync::Arc::new(navigator),
        Location::parse("/apps/collection-point/create-collection-point?activeTab=3"),
    );
    let view: ViewState = controller.view();
    assert_eq!(view.active_step, 3);
    assert_eq!(view.step_count, 4);
    assert!(!view.loaded);
}
