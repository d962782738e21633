// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The seam between the resource client and the network.

use crate::error::ClientError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::Instant;

/// HTTP methods used against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Method {
    /// The method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL including the query string.
    pub url: String,
    /// JSON body, if any.
    pub body: Option<Value>,
    /// Bearer credential attached as `Authorization`.
    pub bearer: Option<String>,
}

/// A raw response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Creates a response with a JSON body.
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends requests to the backend.
///
/// Implementations do not retry and do not cache.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` when no response was received.
    /// Non-2xx responses are returned as `Ok`.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError>;
}

/// What a [`ScriptedTransport`] answers once its queue is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// `200 {}`
    #[default]
    EmptyObject,
    /// `200` echoing the request body, plus `"_id": "dry-run"` for `POST`.
    Echo,
}

/// A request as observed by a [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub request: HttpRequest,
    /// When the request was sent, on the tokio clock.
    pub sent_at: Instant,
}

#[derive(Debug, Default)]
struct Script {
    replies: VecDeque<Result<HttpResponse, ClientError>>,
    recorded: Vec<RecordedRequest>,
    fallback: Fallback,
}

/// In-process transport that records requests and replays scripted replies.
///
/// Clones share the same script, so a test can keep a handle while the
/// client owns another.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    /// Creates a transport that answers `200 {}` to everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that echoes request bodies back.
    #[must_use]
    pub fn echo() -> Self {
        let transport: Self = Self::default();
        transport.lock().fallback = Fallback::Echo;
        transport
    }

    /// Queues a JSON reply.
    #[must_use]
    pub fn reply(self, status: u16, body: Value) -> Self {
        self.lock().replies.push_back(Ok(HttpResponse::json(status, &body)));
        self
    }

    /// Queues a reply with a raw body.
    #[must_use]
    pub fn reply_raw(self, status: u16, body: &str) -> Self {
        self.lock().replies.push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    /// Queues a transport failure.
    #[must_use]
    pub fn fail(self, message: &str) -> Self {
        self.lock().replies.push_back(Err(ClientError::Transport {
            message: message.to_string(),
        }));
        self
    }

    /// All requests sent so far.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock()
            .recorded
            .iter()
            .map(|r| r.request.clone())
            .collect()
    }

    /// All requests sent so far, with send times.
    #[must_use]
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.lock().recorded.clone()
    }

    /// Number of requests sent so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.lock().recorded.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let mut script = self.lock();
        script.recorded.push(RecordedRequest {
            request: request.clone(),
            sent_at: Instant::now(),
        });
        if let Some(reply) = script.replies.pop_front() {
            return reply;
        }
        let body: Value = match script.fallback {
            Fallback::EmptyObject => Value::Object(serde_json::Map::new()),
            Fallback::Echo => {
                let mut body: Value = request
                    .body
                    .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
                if let (Method::Post, Value::Object(fields)) = (request.method, &mut body) {
                    fields
                        .entry("_id")
                        .or_insert_with(|| Value::String(String::from("dry-run")));
                }
                body
            }
        };
        Ok(HttpResponse::json(200, &body))
    }
}
