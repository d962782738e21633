// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::schema::{
    Endpoint, Endpoints, FieldName, ListPaging, RecordKind, Step, StepPlan, WriteMethod,
};
use crate::types::FormData;
use crate::validation::is_blank;
use serde::{Deserialize, Serialize};

/// A data principal access request (DPAR) raised on behalf of a person.
///
/// Requests are created once and then handled by a separate review flow,
/// so there is no update endpoint and no publish transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DparRequest;

/// Form state of the new-request wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DparRequestForm {
    pub first_name: String,
    pub last_name: String,
    pub core_identifier: String,
    pub secondary_identifier: Option<String>,
    pub dp_type: String,
    pub country: String,
    pub request_priority: String,
    pub request_type: String,
    pub request_message: String,
    pub kyc_document: Option<String>,
    pub related_request: String,
    pub related_request_type: String,
}

/// Fields of [`DparRequestForm`] that the wizard validates or labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DparRequestField {
    FirstName,
    LastName,
    CoreIdentifier,
    SecondaryIdentifier,
    RequestType,
    RequestPriority,
    KycDocument,
}

impl FieldName for DparRequestField {
    fn key(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::CoreIdentifier => "core_identifier",
            Self::SecondaryIdentifier => "secondary_identifier",
            Self::RequestType => "request_type",
            Self::RequestPriority => "request_priority",
            Self::KycDocument => "kyc_document",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::CoreIdentifier => "Core Identifier",
            Self::SecondaryIdentifier => "Secondary Identifier",
            Self::RequestType => "Request Type",
            Self::RequestPriority => "Priority",
            Self::KycDocument => "KYC Document",
        }
    }
}

impl RecordKind for DparRequest {
    type Form = DparRequestForm;
    type Field = DparRequestField;

    const NAME: &'static str = "access request";
    const CREATE_SENTINEL: &'static str = "new-request";
    const ID_KEYS: &'static [&'static str] = &["dpar_request_id", "_id", "id"];

    fn endpoints() -> Endpoints {
        Endpoints {
            get: "/dpar/get-one/{id}",
            create: Endpoint::new(WriteMethod::Post, "/dpar/make-request"),
            update: None,
            publish: None,
            archive: None,
            list: "/dpar/get_all",
            list_items_key: "data",
            list_paging: ListPaging::PAGE,
            list_route: "/apps/dpar",
        }
    }

    fn step_plan() -> StepPlan<DparRequestField> {
        StepPlan::new(vec![
            Step::new("principal", "Data Principal", vec![DparRequestField::FirstName]),
            Step::new("request", "Request Details", vec![DparRequestField::RequestType]),
            Step::new("verification", "Verification", Vec::new()),
        ])
    }

    fn publish_requirements(data: &FormData) -> Vec<(usize, String)> {
        let core_blank: bool = is_blank(data.get(DparRequestField::CoreIdentifier.key()));
        let secondary_blank: bool = is_blank(data.get(DparRequestField::SecondaryIdentifier.key()));
        if core_blank && secondary_blank {
            return vec![(1, DparRequestField::CoreIdentifier.key().to_string())];
        }
        Vec::new()
    }
}
