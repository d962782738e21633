// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::schema::{
    Endpoint, Endpoints, FieldName, ListPaging, PayloadStrategy, RecordKind, Step, StepPlan,
    WriteMethod,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A data processor (vendor) the fiduciary shares personal data with.
///
/// The backend stores every vendor field as optional, so the form keeps
/// them optional too and a fetched record with `null`s still projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vendor;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DpdpaComplianceStatus {
    pub signed_dpa: bool,
    pub transfer_outside_india: bool,
    pub cross_border_mechanism: String,
    pub breach_notification_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityMeasure {
    pub measure_name: String,
    pub description: String,
    pub compliance_reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditStatus {
    pub last_audit_date: Option<String>,
    pub next_audit_due: Option<String>,
    pub audit_result: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactPerson {
    pub name: String,
    pub designation: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Form state of the vendor wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorForm {
    pub dpr_name: Option<String>,
    pub dpr_legal_name: Option<String>,
    pub dpr_logo_url: Option<String>,
    pub description: Option<String>,
    pub dpr_address: Option<String>,
    pub dpr_country: Option<String>,
    pub dpr_country_risk: Option<String>,
    pub dpr_privacy_policy: Option<String>,
    pub dpr_data_policy: Option<String>,
    pub dpr_security_policy: Option<String>,
    pub industry: Option<String>,
    pub processing_category: Option<Vec<String>>,
    pub data_categories: Option<Vec<String>>,
    pub data_processing_activity: Option<Vec<Value>>,
    pub data_retention_policy: Option<String>,
    pub data_location: Option<Vec<String>>,
    pub cross_border: Option<bool>,
    pub sub_processor: Option<bool>,
    pub sub_processors: Option<Vec<String>>,
    pub legal_basis_of_processing: Option<String>,
    pub dpdpa_compliance_status: Option<DpdpaComplianceStatus>,
    pub security_measures: Option<Vec<SecurityMeasure>>,
    pub audit_status: Option<AuditStatus>,
    pub contact_person: Option<ContactPerson>,
    pub contract_documents: Option<Vec<Value>>,
}

/// Fields of [`VendorForm`] that the wizard validates or labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorField {
    Name,
    LegalName,
    Country,
    Industry,
    ProcessingCategory,
    DataCategories,
    SecurityMeasures,
    ContactPerson,
}

impl FieldName for VendorField {
    fn key(self) -> &'static str {
        match self {
            Self::Name => "dpr_name",
            Self::LegalName => "dpr_legal_name",
            Self::Country => "dpr_country",
            Self::Industry => "industry",
            Self::ProcessingCategory => "processing_category",
            Self::DataCategories => "data_categories",
            Self::SecurityMeasures => "security_measures",
            Self::ContactPerson => "contact_person",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::LegalName => "Legal Name",
            Self::Country => "Country",
            Self::Industry => "Industry",
            Self::ProcessingCategory => "Processing Category",
            Self::DataCategories => "Data Categories",
            Self::SecurityMeasures => "Security Measures",
            Self::ContactPerson => "Contact Person",
        }
    }
}

impl RecordKind for Vendor {
    type Form = VendorForm;
    type Field = VendorField;

    const NAME: &'static str = "vendor";
    const CREATE_SENTINEL: &'static str = "create-vender";
    const ID_KEYS: &'static [&'static str] = &["vendor_id", "_id", "id"];
    const PAYLOAD: PayloadStrategy = PayloadStrategy::Full;

    fn endpoints() -> Endpoints {
        Endpoints {
            get: "/vendor/get-one-vendor?vendor_id={id}",
            create: Endpoint::new(WriteMethod::Post, "/vendor/create-or-update-vendor"),
            update: Some(Endpoint::new(
                WriteMethod::Post,
                "/vendor/create-or-update-vendor?vendor_id={id}",
            )),
            publish: Some(Endpoint::new(WriteMethod::Post, "/vendor/make-it-publish/{id}")),
            archive: Some(Endpoint::new(
                WriteMethod::Delete,
                "/vendor/delete-my-vendor/{id}",
            )),
            list: "/vendor/get-all-vendors",
            list_items_key: "vendors",
            list_paging: ListPaging::PAGE,
            list_route: "/apps/vendors",
        }
    }

    fn step_plan() -> StepPlan<VendorField> {
        StepPlan::new(vec![
            Step::new("general", "General Information", vec![VendorField::Name]),
            Step::new("processing", "Data Processing", Vec::new()),
            Step::new("compliance", "Security & Compliance", Vec::new()),
        ])
    }
}
