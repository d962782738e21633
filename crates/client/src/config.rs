// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ClientError;
use std::time::Duration;

/// Environment variable holding the API base URL.
pub const ENV_BASE_URL: &str = "CMP_API_BASE_URL";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "CMP_API_TIMEOUT_SECS";
/// Environment variable naming the storage key of the bearer token.
pub const ENV_TOKEN_KEY: &str = "CMP_TOKEN_KEY";

/// Connection settings for the backend API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every request path is appended to.
    pub base_url: String,
    /// Upper bound on a single request.
    pub timeout: Duration,
    /// Storage key the bearer token is read from.
    pub token_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8000/api/v1"),
            timeout: Duration::from_secs(30),
            token_key: String::from("access_token"),
        }
    }
}

impl ClientConfig {
    /// Reads the configuration from the process environment, falling back
    /// to defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if a variable is set but unusable.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if a variable is set but unusable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let mut config: Self = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            let base_url: &str = base_url.trim();
            if url::Url::parse(base_url).is_err() {
                return Err(ClientError::Config {
                    key: String::from(ENV_BASE_URL),
                    message: format!("'{base_url}' is not an absolute URL"),
                });
            }
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            let seconds: u64 = timeout.trim().parse().map_err(|e| ClientError::Config {
                key: String::from(ENV_TIMEOUT_SECS),
                message: format!("{e}"),
            })?;
            config.timeout = Duration::from_secs(seconds);
        }

        if let Some(token_key) = lookup(ENV_TOKEN_KEY).filter(|k| !k.trim().is_empty()) {
            config.token_key = token_key.trim().to_string();
        }

        Ok(config)
    }
}
