// src/api/client.rs
//! The Notion API client.
//!
//! [`NotionClient`] owns configuration, the transport, and rate-limit
//! state. Resource operations live on borrowed accessors returned by
//! [`NotionClient::pages`], [`NotionClient::blocks`] and friends.

use super::blocks::Blocks;
use super::databases::Databases;
use super::pages::Pages;
use super::parser::parse_response;
use super::rate_limit::{RateLimit, RateLimitState};
use super::search::Search;
use super::transport::{HttpRequest, ReqwestTransport, Transport};
use super::users::Users;
use crate::codec::Decoder;
use crate::config::ClientConfig;
use crate::constants::HEADER_NOTION_VERSION;
use crate::error::{ClientError, TransportError};
use crate::types::ValidationError;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// A typed client for the Notion REST API.
///
/// The client is cheap to share: wrap it in an `Arc` and call it from as
/// many tasks as needed. Rate-limit state is updated atomically per response.
pub struct NotionClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    rate_limit: RateLimitState,
    decoder: Decoder,
    default_headers: HeaderMap,
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("config", &self.config)
            .field("rate_limit", &self.rate_limit)
            .finish_non_exhaustive()
    }
}

impl NotionClient {
    /// Creates a client that talks HTTP through `reqwest`.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Self::with_transport(config, ReqwestTransport::new())
    }

    /// Creates a client over any [`Transport`].
    pub fn with_transport(
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self, ClientError> {
        let default_headers = Self::create_headers(&config)?;
        Ok(Self {
            decoder: Decoder::new(config.max_decode_depth),
            config,
            transport: Arc::new(transport),
            rate_limit: RateLimitState::new(),
            default_headers,
        })
    }

    /// Creates the headers sent with every request.
    fn create_headers(config: &ClientConfig) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();

        let mut auth = header_value(
            "Authorization",
            &format!("Bearer {}", config.api_key.as_str()),
        )?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            HEADER_NOTION_VERSION,
            header_value(HEADER_NOTION_VERSION, &config.api_version)?,
        );
        headers.insert(
            header::USER_AGENT,
            header_value("User-Agent", &config.user_agent)?,
        );

        Ok(headers)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The rate-limit window reported by the most recent response.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit.snapshot()
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn pages(&self) -> Pages<'_> {
        Pages::new(self)
    }

    pub fn databases(&self) -> Databases<'_> {
        Databases::new(self)
    }

    pub fn blocks(&self) -> Blocks<'_> {
        Blocks::new(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub fn search(&self) -> Search<'_> {
        Search::new(self)
    }

    pub(crate) async fn get(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Value, ClientError> {
        self.execute(Method::GET, path, query, None).await
    }

    pub(crate) async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        let body = serde_json::to_vec(body)?;
        self.execute(Method::POST, path, &[], Some(body)).await
    }

    pub(crate) async fn patch<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        let body = serde_json::to_vec(body)?;
        self.execute(Method::PATCH, path, &[], Some(body)).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<Vec<u8>>,
    ) -> Result<Value, ClientError> {
        let url = self.endpoint(path, query)?;
        log::debug!("{} {}", method, url);

        let mut headers = self.default_headers.clone();
        if body.is_some() {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }
        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };

        let exchange = self.transport.send(request);
        let response = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .map_err(|_| TransportError::Timeout(limit))??,
            None => exchange.await?,
        };
        log::debug!("{} {}", response.status, path);

        // Headers are read even from error responses. An API error outranks a
        // bad rate-limit header; the header error only fails a successful call.
        let observed = self.rate_limit.observe(&response.headers);
        let value = parse_response(&self.decoder, &response)?;
        observed?;
        Ok(value)
    }

    fn endpoint(&self, path: &str, query: &[(&'static str, String)]) -> Result<Url, ClientError> {
        let mut url = self.config.base_url.join(path).map_err(|e| {
            ClientError::InvalidConfiguration(format!("cannot build URL for {}: {}", path, e))
        })?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        Ok(url)
    }
}

fn header_value(header: &'static str, value: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::from_str(value).map_err(|e| {
        ValidationError::InvalidHeaderValue {
            header,
            reason: e.to_string(),
        }
        .into()
    })
}
