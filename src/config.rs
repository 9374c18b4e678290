// src/config.rs
//! Client configuration.
//!
//! Configuration is always passed in explicitly. Nothing is read from the
//! environment.

use crate::constants::{
    DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_MAX_DECODE_DEPTH, DEFAULT_USER_AGENT,
};
use crate::error::ClientError;
use crate::types::{ApiKey, ValidationError};
use std::time::Duration;
use url::Url;

/// Everything a [`NotionClient`](crate::NotionClient) needs to talk to the API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    pub base_url: Url,
    pub api_version: String,
    pub user_agent: String,
    /// Bound on a single request. `None` waits as long as the transport does.
    pub timeout: Option<Duration>,
    pub max_decode_depth: usize,
}

impl ClientConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: default_base_url(),
            api_version: DEFAULT_API_VERSION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            max_decode_depth: DEFAULT_MAX_DECODE_DEPTH,
        }
    }

    /// Point the client at another host, e.g. a local mock server.
    ///
    /// A missing trailing slash is added so endpoint paths join under the
    /// given prefix instead of replacing its last segment.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ClientError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let url = Url::parse(&normalized).map_err(|e| ValidationError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ClientError::InvalidConfiguration(format!(
                "base URL cannot carry endpoint paths: {}",
                base_url
            )));
        }
        self.base_url = url;
        Ok(self)
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Above roughly 40 the JSON parser's own nesting limit is reached first
    /// for block trees, and surfaces as a malformed-body error.
    pub fn with_max_decode_depth(mut self, depth: usize) -> Self {
        self.max_decode_depth = depth;
        self
    }
}

fn default_base_url() -> Url {
    // A compile-time constant; parsing cannot fail for it.
    match Url::parse(DEFAULT_BASE_URL) {
        Ok(url) => url,
        Err(_) => unreachable!("DEFAULT_BASE_URL is a valid URL"),
    }
}
