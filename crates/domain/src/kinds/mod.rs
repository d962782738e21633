// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The record kinds edited through wizards in the admin console.

mod asset;
mod collection_point;
mod data_element;
mod dpar;
mod incident;
mod vendor;

pub use asset::{Asset, AssetField, AssetForm};
pub use collection_point::{CollectionPoint, CollectionPointField, CollectionPointForm};
pub use data_element::{DataElement, DataElementField, DataElementForm, TRANSLATION_LANGUAGES};
pub use dpar::{DparRequest, DparRequestField, DparRequestForm};
pub use incident::{Incident, IncidentField, IncidentForm};
pub use vendor::{
    AuditStatus, ContactPerson, DpdpaComplianceStatus, SecurityMeasure, Vendor, VendorField,
    VendorForm,
};
