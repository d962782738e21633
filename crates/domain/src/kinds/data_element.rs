// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::schema::{
    Endpoint, Endpoints, FieldName, ListPaging, RecordKind, Step, StepPlan, WriteMethod,
};
use crate::types::{FormData, SaveMode};
use crate::validation::is_blank;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A data element: one kind of personal data the fiduciary collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataElement;

/// Languages a data element must be translated into before publishing.
pub const TRANSLATION_LANGUAGES: &[&str] = &[
    "hin", "asm", "ben", "brx", "guj", "kan", "kas", "kok", "mai", "mal", "mar", "mni", "nep",
    "ori", "pan", "san", "sat", "snd", "tam", "tel", "urd",
];

/// The source language; never sent as a translation on update.
const SOURCE_LANGUAGE: &str = "eng";

/// Step number of the translations step.
const TRANSLATIONS_STEP: usize = 2;

/// Form state of the data element wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataElementForm {
    pub de_name: String,
    pub de_description: String,
    pub de_original_name: String,
    pub de_data_type: String,
    pub de_sensitivity: String,
    pub is_core_identifier: bool,
    pub de_retention_period: Option<u32>,
    pub translations: BTreeMap<String, String>,
}

/// Fields of [`DataElementForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataElementField {
    Name,
    Description,
    OriginalName,
    DataType,
    Sensitivity,
    CoreIdentifier,
    RetentionPeriod,
    Translations,
}

impl FieldName for DataElementField {
    fn key(self) -> &'static str {
        match self {
            Self::Name => "de_name",
            Self::Description => "de_description",
            Self::OriginalName => "de_original_name",
            Self::DataType => "de_data_type",
            Self::Sensitivity => "de_sensitivity",
            Self::CoreIdentifier => "is_core_identifier",
            Self::RetentionPeriod => "de_retention_period",
            Self::Translations => "translations",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::OriginalName => "Name in Notice",
            Self::DataType => "Data Type",
            Self::Sensitivity => "Sensitivity",
            Self::CoreIdentifier => "Core Identifier",
            Self::RetentionPeriod => "Retention Period (days)",
            Self::Translations => "Translations",
        }
    }
}

impl RecordKind for DataElement {
    type Form = DataElementForm;
    type Field = DataElementField;

    const NAME: &'static str = "data element";
    const ID_KEYS: &'static [&'static str] = &["de_id", "id", "_id"];
    const STATUS_KEY: &'static str = "de_status";

    fn endpoints() -> Endpoints {
        Endpoints {
            get: "/data-elements/get-data-element/{id}",
            create: Endpoint::new(WriteMethod::Post, "/data-elements/create-data-element"),
            update: Some(Endpoint::new(
                WriteMethod::Patch,
                "/data-elements/update-data-element/{id}",
            )),
            publish: Some(Endpoint::new(
                WriteMethod::Patch,
                "/data-elements/publish-data-element/{id}",
            )),
            archive: Some(Endpoint::new(
                WriteMethod::Delete,
                "/data-elements/delete-data-element/{id}",
            )),
            list: "/data-elements/get-all-data-element",
            list_items_key: "data_elements",
            list_paging: ListPaging::CURRENT_PAGE,
            list_route: "/apps/data-element",
        }
    }

    fn step_plan() -> StepPlan<DataElementField> {
        StepPlan::new(vec![
            Step::new(
                "general",
                "General Information",
                vec![
                    DataElementField::Name,
                    DataElementField::OriginalName,
                    DataElementField::DataType,
                    DataElementField::Sensitivity,
                    DataElementField::RetentionPeriod,
                ],
            ),
            Step::new("translations", "Translations", Vec::new()),
        ])
    }

    fn normalize_payload(payload: &mut FormData, _mode: SaveMode, creating: bool) {
        if creating {
            return;
        }
        if let Some(Value::Object(translations)) = payload.get_mut("translations") {
            translations.remove(SOURCE_LANGUAGE);
        }
    }

    fn publish_requirements(data: &FormData) -> Vec<(usize, String)> {
        let translations: Option<&serde_json::Map<String, Value>> =
            data.get("translations").and_then(Value::as_object);
        TRANSLATION_LANGUAGES
            .iter()
            .filter(|language| is_blank(translations.and_then(|t| t.get(**language))))
            .map(|language| (TRANSLATIONS_STEP, format!("translations.{language}")))
            .collect()
    }
}
