// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod lifecycle;
mod mount;
mod navigation;
mod sequencer;
mod view;

#[cfg(test)]
mod tests;

use cmp_forms_client::{ListAdapter, ListEndpoint, PageRequest, ResourceClient};
use cmp_forms_domain::RecordKind;

pub use error::LifecycleError;
pub use lifecycle::{
    FILL_REQUIRED, FormController, NO_CHANGES, PublishOutcome, SaveOutcome, Snapshot,
};
pub use mount::MountHandle;
pub use navigation::{Location, Navigator, RecordingNavigator};
pub use sequencer::{STEP_QUERY_KEY, StepSequencer};
pub use view::{Notice, NoticeLevel, ViewState};

/// The list endpoint of a record kind.
#[must_use]
pub fn list_endpoint<K: RecordKind>() -> ListEndpoint {
    let endpoints = K::endpoints();
    ListEndpoint::new(endpoints.list, endpoints.list_items_key)
        .with_paging(endpoints.list_paging.page, endpoints.list_paging.page_size)
}

/// Creates the list adapter for a record kind's list page, restoring page,
/// page size and search from the page's query string.
#[must_use]
pub fn list_adapter<K: RecordKind>(client: ResourceClient, query: &str) -> ListAdapter {
    ListAdapter::with_request(
        client,
        list_endpoint::<K>(),
        PageRequest::from_query_string(query),
    )
}
