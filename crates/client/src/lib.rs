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

mod client;
mod config;
mod debounce;
mod error;
mod http;
mod list;
mod storage;
mod transport;

#[cfg(test)]
mod tests;

pub use client::{RequestOptions, ResourceClient};
pub use config::{ClientConfig, ENV_BASE_URL, ENV_TIMEOUT_SECS, ENV_TOKEN_KEY};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use error::{ClientError, GENERIC_FAILURE, extract_error_message};
pub use http::UreqTransport;
pub use list::{
    DEFAULT_PAGE_SIZE, ListAdapter, ListEndpoint, ListState, PAGE_PARAM, PAGE_SIZE_PARAM, Page,
    PageRequest, SEARCH_PARAM,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use transport::{
    Fallback, HttpRequest, HttpResponse, Method, RecordedRequest, ScriptedTransport, Transport,
};
