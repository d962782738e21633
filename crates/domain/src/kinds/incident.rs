// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::schema::{
    Endpoint, Endpoints, FieldName, ListPaging, PayloadStrategy, RecordKind, Step, StepPlan,
    WriteMethod,
};
use crate::types::{FormData, RecordStatus, SaveMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A personal-data breach incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Incident;

/// Date fields sent as `null` rather than an empty string.
const DATE_FIELDS: &[&str] = &[
    "date_occurred",
    "date_discovered",
    "deadline",
    "date_closed",
    "regulatory_reported_date",
    "notification_sent_date",
];

/// Form state of the breach incident wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentForm {
    pub incident_name: String,
    pub incident_type: String,
    pub incident_sensitivity: String,
    pub description: String,
    pub status: String,
    pub current_stage: String,
    pub assignee: String,
    pub workflow: Vec<Value>,
    pub template_used: String,
    pub date_occurred: Option<String>,
    pub date_discovered: Option<String>,
    pub deadline: Option<String>,
    pub date_closed: Option<String>,
    pub data_element: Vec<String>,
    pub regulatory_reported: bool,
    pub regulatory_reported_date: Option<String>,
    pub regulatory_authority: String,
    pub compliance_standard: String,
    pub notification_needed: bool,
    pub notification_sent: bool,
    pub notification_sent_date: Option<String>,
    pub affected_population: u64,
    pub mitigation_steps: Vec<String>,
}

impl Default for IncidentForm {
    fn default() -> Self {
        Self {
            incident_name: String::new(),
            incident_type: String::new(),
            incident_sensitivity: String::new(),
            description: String::new(),
            status: RecordStatus::Draft.as_str().to_string(),
            current_stage: String::new(),
            assignee: String::new(),
            workflow: Vec::new(),
            template_used: String::new(),
            date_occurred: None,
            date_discovered: None,
            deadline: None,
            date_closed: None,
            data_element: Vec::new(),
            regulatory_reported: true,
            regulatory_reported_date: None,
            regulatory_authority: String::new(),
            compliance_standard: String::new(),
            notification_needed: true,
            notification_sent: true,
            notification_sent_date: None,
            affected_population: 0,
            mitigation_steps: vec![String::new()],
        }
    }
}

/// Fields of [`IncidentForm`] that the wizard validates or labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentField {
    Name,
    Type,
    Sensitivity,
    DateOccurred,
    DateDiscovered,
    RegulatoryAuthority,
    ComplianceStandard,
    AffectedPopulation,
}

impl FieldName for IncidentField {
    fn key(self) -> &'static str {
        match self {
            Self::Name => "incident_name",
            Self::Type => "incident_type",
            Self::Sensitivity => "incident_sensitivity",
            Self::DateOccurred => "date_occurred",
            Self::DateDiscovered => "date_discovered",
            Self::RegulatoryAuthority => "regulatory_authority",
            Self::ComplianceStandard => "compliance_standard",
            Self::AffectedPopulation => "affected_population",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Incident Name",
            Self::Type => "Incident Type",
            Self::Sensitivity => "Sensitivity",
            Self::DateOccurred => "Date Occurred",
            Self::DateDiscovered => "Date Discovered",
            Self::RegulatoryAuthority => "Regulatory Authority",
            Self::ComplianceStandard => "Compliance Standard",
            Self::AffectedPopulation => "Affected Population",
        }
    }
}

impl RecordKind for Incident {
    type Form = IncidentForm;
    type Field = IncidentField;

    const NAME: &'static str = "breach incident";
    const ID_KEYS: &'static [&'static str] = &["incident_id", "_id", "id"];
    const PAYLOAD: PayloadStrategy = PayloadStrategy::Full;

    fn endpoints() -> Endpoints {
        Endpoints {
            get: "/incidents/get-incidents/{id}",
            create: Endpoint::new(WriteMethod::Post, "/incidents/create-or-update"),
            update: Some(Endpoint::new(
                WriteMethod::Post,
                "/incidents/create-or-update?incident_id={id}",
            )),
            publish: Some(Endpoint::new(WriteMethod::Post, "/incidents/{id}/publish")),
            archive: None,
            list: "/incidents/get-all-incidents",
            list_items_key: "incidents",
            list_paging: ListPaging::PAGE,
            list_route: "/apps/breach-management",
        }
    }

    fn step_plan() -> StepPlan<IncidentField> {
        StepPlan::new(vec![
            Step::new(
                "general",
                "General Information",
                vec![
                    IncidentField::Name,
                    IncidentField::Type,
                    IncidentField::Sensitivity,
                ],
            ),
            Step::new("regulatory", "Regulatory Information", Vec::new()),
            Step::new("compliance", "Compliance", Vec::new()),
            Step::new("workflow", "Workflow Stages", Vec::new()),
        ])
    }

    fn normalize_payload(payload: &mut FormData, mode: SaveMode, _creating: bool) {
        for field in DATE_FIELDS {
            let blank: bool = matches!(payload.get(*field), Some(Value::String(s)) if s.trim().is_empty());
            if blank {
                payload.insert((*field).to_string(), Value::Null);
            }
        }
        if mode == SaveMode::Draft {
            payload.insert(
                String::from("status"),
                Value::String(RecordStatus::Draft.as_str().to_string()),
            );
        }
    }
}
