// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP transport backed by `ureq`.
//!
//! `ureq` is blocking, so every call runs inside
//! `tokio::task::spawn_blocking` to keep the runtime responsive.

use crate::error::ClientError;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use async_trait::async_trait;
use std::time::Duration;

/// Transport that talks to a real backend over HTTP.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Creates a transport whose requests give up after `timeout`.
    ///
    /// Non-2xx statuses are returned as responses rather than errors so
    /// that error bodies can be read.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

fn authorize<B>(builder: ureq::RequestBuilder<B>, bearer: Option<&str>) -> ureq::RequestBuilder<B> {
    let builder = builder.header("Accept", "application/json");
    match bearer {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

fn send_blocking(agent: &ureq::Agent, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
    let url: &str = request.url.as_str();
    let bearer: Option<&str> = request.bearer.as_deref();

    let with_body = |builder: ureq::RequestBuilder<ureq::typestate::WithBody>| match &request.body {
        Some(body) => authorize(builder, bearer).send_json(body),
        None => authorize(builder, bearer).send_empty(),
    };

    let result = match request.method {
        Method::Get => authorize(agent.get(url), bearer).call(),
        Method::Delete => authorize(agent.delete(url), bearer).call(),
        Method::Post => with_body(agent.post(url)),
        Method::Patch => with_body(agent.patch(url)),
        Method::Put => with_body(agent.put(url)),
    };

    let mut response = result.map_err(|e| ClientError::Transport {
        message: e.to_string(),
    })?;
    let status: u16 = response.status().as_u16();
    let body: String = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ClientError::Transport {
            message: format!("failed to read response body: {e}"),
        })?;

    Ok(HttpResponse { status, body })
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let agent: ureq::Agent = self.agent.clone();
        tokio::task::spawn_blocking(move || send_blocking(&agent, &request))
            .await
            .map_err(|e| ClientError::Transport {
                message: format!("task join error: {e}"),
            })?
    }
}
