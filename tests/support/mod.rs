// tests/support/mod.rs
//! Shared test harness: a recording transport that replays canned responses.

#![allow(dead_code)]

use async_trait::async_trait;
use notion_typed::{
    ApiKey, ClientConfig, HttpRequest, HttpResponse, NotionClient, Transport, TransportError,
};
use parking_lot::Mutex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Mock transport that returns fixture data instead of making real API calls.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, HttpResponse>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a JSON response for `METHOD /v1/path`.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.respond_with_headers(method, path, status, body, &[])
    }

    pub fn respond_with_headers(
        &self,
        method: Method,
        path: &str,
        status: u16,
        body: &str,
        headers: &[(&str, &str)],
    ) -> &Self {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            header_map.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        let response = HttpResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: header_map,
            body: body.as_bytes().to_vec(),
        };
        self.responses.lock().insert(key(&method, path), response);
        self
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    /// The JSON body of the most recent request.
    pub fn last_body(&self) -> Value {
        let request = self.last_request();
        let body = request.body.expect("request had no body");
        serde_json::from_slice(&body).expect("request body is not JSON")
    }
}

fn key(method: &Method, path: &str) -> String {
    format!("{} {}", method, path)
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let lookup = key(&request.method, request.url.path());
        self.requests.lock().push(request);
        self.responses
            .lock()
            .get(&lookup)
            .cloned()
            .ok_or_else(|| TransportError::Other(format!("no mock response for {}", lookup)))
    }
}

pub fn api_key() -> ApiKey {
    ApiKey::new("secret_test_token").unwrap()
}

/// A client wired to the mock transport with default configuration.
pub fn client(transport: &MockTransport) -> NotionClient {
    NotionClient::with_transport(ClientConfig::new(api_key()), transport.clone()).unwrap()
}

pub fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
    request
        .headers
        .get(name)
        .map(|value| value.to_str().unwrap())
}
