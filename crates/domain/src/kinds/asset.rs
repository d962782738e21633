// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::schema::{
    Endpoint, Endpoints, FieldName, ListPaging, RecordKind, Step, StepPlan, WriteMethod,
};
use crate::validation::Rule;
use serde::{Deserialize, Serialize};

/// An asset (website, mobile app, kiosk...) that collects consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset;

/// Form state of the asset wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetForm {
    pub asset_name: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub usage_url: String,
}

/// Fields of [`AssetForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetField {
    Name,
    Category,
    Description,
    Image,
    UsageUrl,
}

impl FieldName for AssetField {
    fn key(self) -> &'static str {
        match self {
            Self::Name => "asset_name",
            Self::Category => "category",
            Self::Description => "description",
            Self::Image => "image",
            Self::UsageUrl => "usage_url",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Category => "Category",
            Self::Description => "Description",
            Self::Image => "Image",
            Self::UsageUrl => "Asset URL",
        }
    }
}

impl RecordKind for Asset {
    type Form = AssetForm;
    type Field = AssetField;

    const NAME: &'static str = "asset";
    const ID_KEYS: &'static [&'static str] = &["asset_id", "id", "_id"];
    const STATUS_KEY: &'static str = "asset_status";

    fn endpoints() -> Endpoints {
        Endpoints {
            get: "/assets/get-asset/{id}",
            create: Endpoint::new(WriteMethod::Post, "/assets/create-asset"),
            update: Some(Endpoint::new(WriteMethod::Patch, "/assets/update-asset/{id}")),
            publish: Some(Endpoint::new(WriteMethod::Patch, "/assets/publish-asset/{id}")),
            archive: Some(Endpoint::new(WriteMethod::Delete, "/assets/delete-asset/{id}")),
            list: "/assets/get-all-assets",
            list_items_key: "assets",
            list_paging: ListPaging::CURRENT_PAGE,
            list_route: "/apps/asset-sku",
        }
    }

    fn step_plan() -> StepPlan<AssetField> {
        StepPlan::new(vec![
            Step::new(
                "general",
                "General Information",
                vec![AssetField::Name, AssetField::Category],
            )
            .with_rules(vec![Rule::http_url(AssetField::UsageUrl)]),
        ])
    }
}
