// tests/client.rs
//! Client behavior shared by every endpoint: configuration, rate limits,
//! error mapping and timeouts.

mod support;

use async_trait::async_trait;
use notion_typed::{
    ClientConfig, ClientError, ErrorCode, HttpRequest, HttpResponse, NotionClient, RateLimit,
    Transport, TransportError, UserId,
};
use pretty_assertions::assert_eq;
use reqwest::Method;
use std::time::Duration;
use support::{api_key, client, header, MockTransport};

const USER_PATH: &str = "/v1/users/be32e790-8292-46df-a248-b784fdf483cf";
const USER_BODY: &str = r#"{
    "object": "user",
    "id": "be32e790-8292-46df-a248-b784fdf483cf",
    "type": "person",
    "person": { "email": "jane@example.com" }
}"#;

fn user_id() -> UserId {
    UserId::parse("be32e790829246dfa248b784fdf483cf").unwrap()
}

#[tokio::test]
async fn rate_limit_defaults_before_first_response() {
    let transport = MockTransport::new();
    let client = client(&transport);
    assert_eq!(client.rate_limit(), RateLimit::default());
    assert_eq!(client.rate_limit().limit, 10_000);
    assert_eq!(client.rate_limit().remaining, 10_000);
}

#[tokio::test]
async fn rate_limit_headers_update_state() {
    let transport = MockTransport::new();
    transport.respond_with_headers(
        Method::GET,
        USER_PATH,
        200,
        USER_BODY,
        &[
            ("X-RateLimit-Limit", "1000"),
            ("X-RateLimit-Remaining", "99"),
            ("X-RateLimit-Reset", "1598795193"),
        ],
    );
    let client = client(&transport);

    client.users().get(&user_id()).await.unwrap();

    let rate_limit = client.rate_limit();
    assert_eq!(rate_limit.limit, 1000);
    assert_eq!(rate_limit.remaining, 99);
    assert_eq!(
        rate_limit.reset.map(|reset| reset.to_rfc3339()),
        Some("2020-08-30T13:46:33+00:00".to_string())
    );
}

#[tokio::test]
async fn rate_limit_headers_are_read_from_error_responses() {
    let transport = MockTransport::new();
    transport.respond_with_headers(
        Method::GET,
        USER_PATH,
        429,
        r#"{"object":"error","status":429,"code":"rate_limited","message":"Slow down"}"#,
        &[("X-RateLimit-Remaining", "0")],
    );
    let client = client(&transport);

    let err = client.users().get(&user_id()).await.unwrap_err();
    assert_eq!(err.api_code(), Some(&ErrorCode::RateLimited));
    assert!(err.api_code().unwrap().is_retryable());
    assert_eq!(client.rate_limit().remaining, 0);
}

#[tokio::test]
async fn malformed_rate_limit_header_fails_without_partial_update() {
    let transport = MockTransport::new();
    transport.respond_with_headers(
        Method::GET,
        USER_PATH,
        200,
        USER_BODY,
        &[
            ("X-RateLimit-Limit", "500"),
            ("X-RateLimit-Remaining", "many"),
        ],
    );
    let client = client(&transport);

    let err = client.users().get(&user_id()).await.unwrap_err();
    match err {
        ClientError::RateLimitHeader { header, value } => {
            assert_eq!(header, "x-ratelimit-remaining");
            assert_eq!(value, "many");
        }
        other => panic!("expected rate-limit header error, got {:?}", other),
    }
    assert_eq!(client.rate_limit(), RateLimit::default());
}

#[tokio::test]
async fn api_error_wins_over_malformed_rate_limit_header() {
    let transport = MockTransport::new();
    transport.respond_with_headers(
        Method::GET,
        USER_PATH,
        503,
        r#"{"object":"error","status":503,"code":"service_unavailable","message":"Down"}"#,
        &[("X-RateLimit-Remaining", "soon")],
    );
    let client = client(&transport);

    let err = client.users().get(&user_id()).await.unwrap_err();
    assert_eq!(err.api_code(), Some(&ErrorCode::ServiceUnavailable));
    assert_eq!(client.rate_limit(), RateLimit::default());
}

#[tokio::test]
async fn error_body_maps_to_typed_code() {
    let transport = MockTransport::new();
    transport.respond(
        Method::GET,
        USER_PATH,
        401,
        r#"{"object":"error","status":401,"code":"unauthorized","message":"API token is invalid."}"#,
    );
    let client = client(&transport);

    match client.users().get(&user_id()).await.unwrap_err() {
        ClientError::Api(api) => {
            assert_eq!(api.status, 401);
            assert_eq!(api.code, ErrorCode::Unauthorized);
            assert_eq!(api.message, "API token is invalid.");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn unparseable_error_body_falls_back_to_status() {
    let transport = MockTransport::new();
    transport.respond(Method::GET, USER_PATH, 502, "<html>Bad Gateway</html>");
    let client = client(&transport);

    match client.users().get(&user_id()).await.unwrap_err() {
        ClientError::Api(api) => {
            assert_eq!(api.status, 502);
            assert_eq!(api.code, ErrorCode::HttpStatus(502));
            assert_eq!(api.message, "<html>Bad Gateway</html>");
            assert!(api.code.is_retryable());
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let transport = MockTransport::new();
    transport.respond(Method::GET, USER_PATH, 200, "{not json");
    let client = client(&transport);

    let err = client.users().get(&user_id()).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn transport_failure_is_surfaced() {
    let transport = MockTransport::new();
    let client = client(&transport);

    let err = client.users().get(&user_id()).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transport(TransportError::Other(ref message)) if message.contains(USER_PATH)
    ));
}

/// A transport that never answers in time.
struct SlowTransport;

#[async_trait]
impl Transport for SlowTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Err(TransportError::Other("unreachable".to_string()))
    }
}

#[tokio::test]
async fn slow_response_times_out() {
    let config = ClientConfig::new(api_key()).with_timeout(Duration::from_millis(50));
    let client = NotionClient::with_transport(config, SlowTransport).unwrap();

    let err = client.users().get(&user_id()).await.unwrap_err();
    match err {
        ClientError::Transport(transport) => {
            assert!(transport.is_timeout());
            assert!(matches!(transport, TransportError::Timeout(limit) if limit == Duration::from_millis(50)));
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn custom_base_url_and_version() {
    let transport = MockTransport::new();
    transport.respond(
        Method::GET,
        "/proxy/v1/users/be32e790-8292-46df-a248-b784fdf483cf",
        200,
        USER_BODY,
    );
    let config = ClientConfig::new(api_key())
        .with_base_url("http://localhost:8080/proxy/v1")
        .unwrap()
        .with_version("2022-06-28")
        .with_user_agent("grocery-sync/1.0");
    let client = NotionClient::with_transport(config, transport.clone()).unwrap();

    let user = client.users().get(&user_id()).await.unwrap();
    assert_eq!(user.email(), Some("jane@example.com"));

    let request = transport.last_request();
    assert_eq!(request.url.host_str(), Some("localhost"));
    assert_eq!(request.url.port(), Some(8080));
    assert_eq!(header(&request, "notion-version"), Some("2022-06-28"));
    assert_eq!(header(&request, "user-agent"), Some("grocery-sync/1.0"));
}

#[tokio::test]
async fn invalid_base_url_is_rejected() {
    let err = ClientConfig::new(api_key())
        .with_base_url("not a url")
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn decode_depth_is_configurable() {
    let transport = MockTransport::new();
    transport.respond(
        Method::GET,
        "/v1/blocks/b55c9c91-384d-452b-81db-d1ef79372b75/children",
        200,
        &format!(
            r#"{{"object":"list","results":[{}],"next_cursor":null,"has_more":false}}"#,
            include_str!("fixtures/api_responses/nested_blocks.json")
        ),
    );
    let config = ClientConfig::new(api_key()).with_max_decode_depth(2);
    let client = NotionClient::with_transport(config, transport.clone()).unwrap();

    let id = notion_typed::BlockId::parse("b55c9c91384d452b81dbd1ef79372b75").unwrap();
    let err = client.blocks().list_children(&id).await.unwrap_err();
    match err {
        ClientError::Decode(decode) => assert!(matches!(
            decode.kind,
            notion_typed::DecodeErrorKind::TooDeeplyNested { limit: 2 }
        )),
        other => panic!("expected depth error, got {:?}", other),
    }
}
