// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::schema::{
    Endpoint, Endpoints, FieldName, ListPaging, RecordKind, Step, StepPlan, WriteMethod,
};
use crate::validation::Rule;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A consent collection point: the integration through which an asset
/// shows a notice and captures consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionPoint;

/// Form state of the collection point wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionPointForm {
    pub cp_name: String,
    pub cp_description: String,
    pub cp_type: String,
    pub redirection_url: String,
    pub fallback_url: String,
    pub default_language: String,
    pub asset_id: String,
    pub data_elements: Vec<Value>,
    pub notice_type: String,
    pub is_verification_required: bool,
    pub notice_popup_window_timeout: u32,
    pub verification_done_by: String,
    pub prefered_verification_medium: String,
}

impl Default for CollectionPointForm {
    fn default() -> Self {
        Self {
            cp_name: String::new(),
            cp_description: String::new(),
            cp_type: String::new(),
            redirection_url: String::new(),
            fallback_url: String::new(),
            default_language: String::from("English"),
            asset_id: String::new(),
            data_elements: Vec::new(),
            notice_type: String::new(),
            is_verification_required: false,
            notice_popup_window_timeout: 10,
            verification_done_by: String::new(),
            prefered_verification_medium: String::new(),
        }
    }
}

/// Fields of [`CollectionPointForm`] that the wizard validates or labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionPointField {
    Platform,
    Type,
    Name,
    Description,
    RedirectionUrl,
    FallbackUrl,
    DataElements,
    NoticeType,
}

impl FieldName for CollectionPointField {
    fn key(self) -> &'static str {
        match self {
            Self::Platform => "asset_id",
            Self::Type => "cp_type",
            Self::Name => "cp_name",
            Self::Description => "cp_description",
            Self::RedirectionUrl => "redirection_url",
            Self::FallbackUrl => "fallback_url",
            Self::DataElements => "data_elements",
            Self::NoticeType => "notice_type",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Platform => "Usage Platform",
            Self::Type => "Collection Point Type",
            Self::Name => "Name",
            Self::Description => "Description",
            Self::RedirectionUrl => "Redirection URL",
            Self::FallbackUrl => "Fallback URL",
            Self::DataElements => "Data Elements",
            Self::NoticeType => "Notice Type",
        }
    }
}

impl RecordKind for CollectionPoint {
    type Form = CollectionPointForm;
    type Field = CollectionPointField;

    const NAME: &'static str = "collection point";
    const CREATE_SENTINEL: &'static str = "create-collection-point";
    const ID_KEYS: &'static [&'static str] = &["cp_id", "_id", "id"];
    const STATUS_KEY: &'static str = "cp_status";

    fn endpoints() -> Endpoints {
        Endpoints {
            get: "/cp/get-cp/{id}",
            create: Endpoint::new(WriteMethod::Post, "/cp/create-collection-point"),
            update: Some(Endpoint::new(WriteMethod::Put, "/cp/update-cp/{id}")),
            publish: Some(Endpoint::new(WriteMethod::Patch, "/cp/publish-cp/{id}")),
            archive: Some(Endpoint::new(WriteMethod::Delete, "/cp/delete-cp/{id}")),
            list: "/cp/get-all-cps",
            list_items_key: "collection_points",
            list_paging: ListPaging::CURRENT_PAGE,
            list_route: "/apps/collection-point",
        }
    }

    fn step_plan() -> StepPlan<CollectionPointField> {
        StepPlan::new(vec![
            Step::new("platform", "Choose Platform", vec![CollectionPointField::Platform]),
            Step::new("type", "Collection Point Type", vec![CollectionPointField::Type]),
            Step::new("details", "Details", vec![CollectionPointField::Name]).with_rules(vec![
                Rule::http_url(CollectionPointField::RedirectionUrl),
                Rule::http_url(CollectionPointField::FallbackUrl),
            ]),
            Step::new("notice", "Notice", vec![CollectionPointField::NoticeType]),
        ])
    }
}
