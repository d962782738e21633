// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The remote resource client.
//!
//! Every call attaches the bearer token found in storage, issues exactly one
//! request, and maps non-2xx responses to [`ClientError::Status`] carrying the
//! backend's own message. There is no retry and no cache; callers own their
//! loading and error state.

use crate::config::ClientConfig;
use crate::error::{ClientError, extract_error_message};
use crate::storage::KeyValueStore;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Method, body and query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Method,
    pub data: Option<Value>,
    pub params: Vec<(String, String)>,
}

impl RequestOptions {
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn delete() -> Self {
        Self {
            method: Method::Delete,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn post(data: Value) -> Self {
        Self::with_body(Method::Post, data)
    }

    #[must_use]
    pub fn patch(data: Value) -> Self {
        Self::with_body(Method::Patch, data)
    }

    #[must_use]
    pub fn put(data: Value) -> Self {
        Self::with_body(Method::Put, data)
    }

    /// A request of `method` carrying `data` as its JSON body.
    #[must_use]
    pub const fn with_body(method: Method, data: Value) -> Self {
        Self {
            method,
            data: Some(data),
            params: Vec::new(),
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }
}

/// Client for the backend REST API.
///
/// Cheap to clone; clones share the transport and the token store.
#[derive(Clone)]
pub struct ResourceClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ResourceClient {
    #[must_use]
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            config,
            transport,
            store,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the absolute URL for `path` with `params` appended.
    ///
    /// Query parameters already embedded in `path` are kept.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if the result is not a valid URL.
    pub fn url_for(&self, path: &str, params: &[(String, String)]) -> Result<Url, ClientError> {
        let joined: String = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url: Url = Url::parse(&joined).map_err(|e| ClientError::InvalidUrl {
            message: format!("{joined}: {e}"),
        })?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    /// Issues one request and returns the decoded JSON body.
    ///
    /// An empty 2xx body decodes as `null`.
    ///
    /// # Errors
    ///
    /// - `ClientError::Transport` if no response was received
    /// - `ClientError::Status` for a non-2xx response, carrying the backend message
    /// - `ClientError::Decode` if a 2xx body is not JSON
    /// - `ClientError::Storage` if the token cannot be read
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ClientError> {
        let url: Url = self.url_for(path, &options.params)?;
        let bearer: Option<String> = self.store.get(&self.config.token_key)?;

        debug!(
            method = %options.method,
            path = path,
            authorized = bearer.is_some(),
            "sending request"
        );

        let response: HttpResponse = self
            .transport
            .send(HttpRequest {
                method: options.method,
                url: url.into(),
                body: options.data,
                bearer,
            })
            .await
            .inspect_err(|e| warn!(method = %options.method, path = path, error = %e, "request failed"))?;

        if !response.is_success() {
            let message: String = extract_error_message(&response.body);
            warn!(
                method = %options.method,
                path = path,
                status = response.status,
                message = %message,
                "request rejected"
            );
            return Err(ClientError::Status {
                status: response.status,
                message,
            });
        }

        debug!(method = %options.method, path = path, status = response.status, "request succeeded");

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| ClientError::Decode {
            message: e.to_string(),
        })
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.request(path, RequestOptions::get()).await
    }
}
