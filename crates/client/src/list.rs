// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Paginated list adapter.
//!
//! The adapter owns the page request for one list view, fetches pages through
//! the [`ResourceClient`], and publishes a [`ListState`] on a watch channel so
//! a view can tell "still fetching" apart from "nothing found".

use crate::client::{RequestOptions, ResourceClient};
use crate::debounce::Debouncer;
use crate::error::ClientError;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Query parameter carrying the 1-based page number, unless the endpoint
/// names its own.
pub const PAGE_PARAM: &str = "current_page";
/// Query parameter carrying the page size, unless the endpoint names its own.
pub const PAGE_SIZE_PARAM: &str = "data_per_page";
/// Query parameter carrying the free-text search.
pub const SEARCH_PARAM: &str = "search";

/// Where a list lives on the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEndpoint {
    pub path: String,
    /// Key of the items array in the response body.
    pub items_key: String,
    /// Query parameter the backend reads the page number from.
    pub page_param: String,
    /// Query parameter the backend reads the page size from.
    pub page_size_param: String,
}

impl ListEndpoint {
    /// An endpoint paged with [`PAGE_PARAM`] and [`PAGE_SIZE_PARAM`].
    #[must_use]
    pub fn new(path: &str, items_key: &str) -> Self {
        Self {
            path: path.to_string(),
            items_key: items_key.to_string(),
            page_param: PAGE_PARAM.to_string(),
            page_size_param: PAGE_SIZE_PARAM.to_string(),
        }
    }

    /// Overrides the paging parameter names.
    #[must_use]
    pub fn with_paging(mut self, page_param: &str, page_size_param: &str) -> Self {
        self.page_param = page_param.to_string();
        self.page_size_param = page_size_param.to_string();
        self
    }
}

/// The page a list view is asking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
            filters: BTreeMap::new(),
        }
    }
}

impl PageRequest {
    /// Query parameters sent to `endpoint`, named the way it pages.
    #[must_use]
    pub fn params(&self, endpoint: &ListEndpoint) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = vec![
            (endpoint.page_param.clone(), self.page.max(1).to_string()),
            (
                endpoint.page_size_param.clone(),
                self.page_size.max(1).to_string(),
            ),
        ];
        if let Some(search) = self.search.as_deref() {
            params.push((SEARCH_PARAM.to_string(), search.to_string()));
        }
        params.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        params
    }

    /// Serializes page, page size and search for the view URL.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        serializer.append_pair(PAGE_PARAM, &self.page.max(1).to_string());
        serializer.append_pair(PAGE_SIZE_PARAM, &self.page_size.max(1).to_string());
        if let Some(search) = self.search.as_deref() {
            serializer.append_pair(SEARCH_PARAM, search);
        }
        serializer.finish()
    }

    /// Restores a request from a view URL query string.
    ///
    /// Unparseable or zero values fall back to the defaults; unknown
    /// parameters are ignored.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let mut request: Self = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                PAGE_PARAM => {
                    if let Some(page) = parse_positive(&value) {
                        request.page = page;
                    }
                }
                PAGE_SIZE_PARAM => {
                    if let Some(size) = parse_positive(&value) {
                        request.page_size = size;
                    }
                }
                SEARCH_PARAM => request.search = normalize_search(&value),
                _ => {}
            }
        }
        request
    }
}

fn parse_positive(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

fn normalize_search(value: &str) -> Option<String> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub items: Vec<Value>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: Option<u64>,
}

impl Page {
    /// Reads a page out of a list response.
    ///
    /// Items are read from `items_key`, then `items`, then `data`; pagination
    /// fields may sit at the top level or under `pagination`, with the current
    /// page under `current_page` or `page`. A page past the last one has no
    /// items.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Decode` if the body is neither an object nor an
    /// array.
    pub fn from_response(
        body: &Value,
        items_key: &str,
        requested: u32,
    ) -> Result<Self, ClientError> {
        let requested: u32 = requested.max(1);
        let fields = match body {
            Value::Object(fields) => fields,
            Value::Array(items) => {
                return Ok(Self {
                    items: if requested > 1 { Vec::new() } else { items.clone() },
                    current_page: requested,
                    total_pages: 1,
                    total_items: u64::try_from(items.len()).ok(),
                });
            }
            other => {
                return Err(ClientError::Decode {
                    message: format!("expected a list response, got {other}"),
                });
            }
        };

        let items: Vec<Value> = [items_key, "items", "data"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_array))
            .cloned()
            .unwrap_or_default();

        let pagination = fields.get("pagination").and_then(Value::as_object);
        let number = |key: &str| -> Option<u64> {
            fields
                .get(key)
                .or_else(|| pagination.and_then(|p| p.get(key)))
                .and_then(Value::as_u64)
        };

        let total_pages: u32 = number("total_pages")
            .map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX));
        let total_items: Option<u64> = number("total_items")
            .or_else(|| number("total_records"))
            .or_else(|| number("total"));
        let current_page: u32 = number(PAGE_PARAM)
            .or_else(|| number("page"))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(requested);

        let items: Vec<Value> = if requested > total_pages { Vec::new() } else { items };

        Ok(Self {
            items,
            current_page,
            total_pages,
            total_items,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// What a list view should render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch returned at least one item.
    Loaded(Page),
    /// The last fetch succeeded with zero items.
    Empty(Page),
    /// The last fetch failed; carries the user-facing message.
    Failed(String),
}

impl ListState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The last page fetched, if any.
    #[must_use]
    pub const fn page(&self) -> Option<&Page> {
        match self {
            Self::Loaded(page) | Self::Empty(page) => Some(page),
            _ => None,
        }
    }
}

/// Drives one list view.
#[derive(Debug)]
pub struct ListAdapter {
    client: ResourceClient,
    endpoint: ListEndpoint,
    request: PageRequest,
    state: watch::Sender<ListState>,
}

impl ListAdapter {
    #[must_use]
    pub fn new(client: ResourceClient, endpoint: ListEndpoint) -> Self {
        Self::with_request(client, endpoint, PageRequest::default())
    }

    /// Creates an adapter starting from `request`, typically restored with
    /// [`PageRequest::from_query_string`].
    #[must_use]
    pub fn with_request(
        client: ResourceClient,
        endpoint: ListEndpoint,
        request: PageRequest,
    ) -> Self {
        let (state, _) = watch::channel(ListState::Idle);
        Self {
            client,
            endpoint,
            request,
            state,
        }
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.subscribe()
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> ListState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub const fn request(&self) -> &PageRequest {
        &self.request
    }

    /// The current request serialized for the view URL.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.request.to_query_string()
    }

    /// Fetches one page and makes it the current request.
    ///
    /// Pages past the last return no items rather than an error.
    ///
    /// # Errors
    ///
    /// Returns the client error; the state becomes [`ListState::Failed`].
    pub async fn fetch_page(
        &mut self,
        page: u32,
        page_size: u32,
        filters: Option<BTreeMap<String, String>>,
    ) -> Result<Page, ClientError> {
        self.request.page = page.max(1);
        self.request.page_size = page_size.max(1);
        if let Some(filters) = filters {
            self.request.filters = filters;
        }
        self.refresh().await
    }

    /// Re-fetches the current request.
    ///
    /// # Errors
    ///
    /// Returns the client error; the state becomes [`ListState::Failed`].
    pub async fn refresh(&mut self) -> Result<Page, ClientError> {
        let request: PageRequest = self.request.clone();
        debug!(
            path = %self.endpoint.path,
            page = request.page,
            page_size = request.page_size,
            search = request.search.as_deref().unwrap_or(""),
            "fetching list page"
        );
        self.state.send_replace(ListState::Loading);

        let options: RequestOptions = RequestOptions {
            params: request.params(&self.endpoint),
            ..RequestOptions::get()
        };
        let result: Result<Page, ClientError> = self
            .client
            .request(&self.endpoint.path, options)
            .await
            .and_then(|body| Page::from_response(&body, &self.endpoint.items_key, request.page));

        match &result {
            Ok(page) if page.is_empty() => {
                info!(path = %self.endpoint.path, page = request.page, "list page is empty");
                self.state.send_replace(ListState::Empty(page.clone()));
            }
            Ok(page) => {
                info!(
                    path = %self.endpoint.path,
                    page = page.current_page,
                    total_pages = page.total_pages,
                    items = page.items.len(),
                    "list page loaded"
                );
                self.state.send_replace(ListState::Loaded(page.clone()));
            }
            Err(e) => {
                warn!(path = %self.endpoint.path, error = %e, "list fetch failed");
                self.state.send_replace(ListState::Failed(e.user_message()));
            }
        }
        result
    }

    /// Moves to `page` and re-fetches.
    ///
    /// # Errors
    ///
    /// See [`Self::refresh`].
    pub async fn set_page(&mut self, page: u32) -> Result<Page, ClientError> {
        self.request.page = page.max(1);
        self.refresh().await
    }

    /// Changes the page size, returns to the first page, and re-fetches.
    ///
    /// # Errors
    ///
    /// See [`Self::refresh`].
    pub async fn set_page_size(&mut self, page_size: u32) -> Result<Page, ClientError> {
        self.request.page_size = page_size.max(1);
        self.request.page = 1;
        self.refresh().await
    }

    /// Replaces the filters, returns to the first page, and re-fetches.
    ///
    /// # Errors
    ///
    /// See [`Self::refresh`].
    pub async fn set_filters(
        &mut self,
        filters: BTreeMap<String, String>,
    ) -> Result<Page, ClientError> {
        self.request.filters = filters;
        self.request.page = 1;
        self.refresh().await
    }

    /// Sets the search text, returns to the first page, and re-fetches.
    ///
    /// # Errors
    ///
    /// See [`Self::refresh`].
    pub async fn set_search(&mut self, search: &str) -> Result<Page, ClientError> {
        self.request.search = normalize_search(search);
        self.request.page = 1;
        self.refresh().await
    }

    /// Feeds search keystrokes through a debouncer until `input` closes.
    ///
    /// Each settled value triggers one fetch; a value equal to the current
    /// search is skipped. Fetch failures are published as state and do not
    /// stop the loop. Returns the number of fetches issued.
    pub async fn run_search(
        &mut self,
        mut input: mpsc::Receiver<String>,
        mut debouncer: Debouncer<String>,
    ) -> usize {
        let mut fetches: usize = 0;
        while let Some(text) = debouncer.next(&mut input).await {
            if normalize_search(&text) == self.request.search {
                continue;
            }
            fetches += 1;
            // Failures are already reflected in the published state.
            let _ = self.set_search(&text).await;
        }
        fetches
    }
}
