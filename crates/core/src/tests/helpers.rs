// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{FormController, Location, RecordingNavigator};
use async_trait::async_trait;
use cmp_forms_client::{
    ClientConfig, ClientError, HttpRequest, HttpResponse, MemoryStore, ResourceClient,
    ScriptedTransport, Transport,
};
use cmp_forms_domain::{
    Endpoint, Endpoints, FieldName, ListPaging, RecordKind, Step, StepPlan, WriteMethod,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Notify;

/// A two-step kind: `name` on step 1, `type` on step 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Widget;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetForm {
    pub name: String,
    #[serde(rename = "type")]
    pub widget_type: String,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetField {
    Name,
    Type,
    Notes,
}

impl FieldName for WidgetField {
    fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Type => "type",
            Self::Notes => "notes",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Type => "Type",
            Self::Notes => "Notes",
        }
    }
}

impl RecordKind for Widget {
    type Form = WidgetForm;
    type Field = WidgetField;

    const NAME: &'static str = "widget";
    const ID_KEYS: &'static [&'static str] = &["widget_id", "_id"];

    fn endpoints() -> Endpoints {
        Endpoints {
            get: "/widgets/get-widget/{id}",
            create: Endpoint::new(WriteMethod::Post, "/widgets/create-widget"),
            update: Some(Endpoint::new(WriteMethod::Patch, "/widgets/update-widget/{id}")),
            publish: Some(Endpoint::new(WriteMethod::Patch, "/widgets/publish-widget/{id}")),
            archive: Some(Endpoint::new(WriteMethod::Delete, "/widgets/delete-widget/{id}")),
            list: "/widgets/get-all-widgets",
            list_items_key: "widgets",
            list_paging: ListPaging::CURRENT_PAGE,
            list_route: "/apps/widgets",
        }
    }

    fn step_plan() -> StepPlan<WidgetField> {
        StepPlan::new(vec![
            Step::new("basics", "Basics", vec![WidgetField::Name]),
            Step::new("details", "Details", vec![WidgetField::Type]),
        ])
    }
}

pub const TEST_BASE_URL: &str = "http://cmp.test/api/v1";

pub fn create_test_client(transport: Arc<dyn Transport>) -> ResourceClient {
    ResourceClient::new(
        ClientConfig {
            base_url: String::from(TEST_BASE_URL),
            ..ClientConfig::default()
        },
        transport,
        Arc::new(MemoryStore::with_entry("access_token", "token-abc")),
    )
}

/// A controller for `K` at `/page?query`, plus the navigator it reports to.
pub fn create_controller<K: RecordKind>(
    transport: Arc<dyn Transport>,
    query: &str,
) -> (FormController<K>, RecordingNavigator) {
    let navigator: RecordingNavigator = RecordingNavigator::new();
    let controller: FormController<K> = FormController::new(
        create_test_client(transport),
        Arc::new(navigator.clone()),
        Location::new("/page", query),
    );
    (controller, navigator)
}

pub fn create_scripted_controller<K: RecordKind>(
    transport: &ScriptedTransport,
) -> (FormController<K>, RecordingNavigator) {
    create_controller::<K>(Arc::new(transport.clone()), "")
}

/// The path part of a recorded request URL.
pub fn path_of(request: &HttpRequest) -> String {
    request
        .url
        .strip_prefix(TEST_BASE_URL)
        .unwrap_or(&request.url)
        .to_string()
}

/// Holds every request until released.
#[derive(Debug, Clone, Default)]
pub struct GatedTransport {
    pub inner: ScriptedTransport,
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl GatedTransport {
    pub fn new(inner: ScriptedTransport) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Waits until a request is being held.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Lets one held request through.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.send(request).await
    }
}
