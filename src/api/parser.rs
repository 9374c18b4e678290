// src/api/parser.rs
//! Turns raw HTTP responses into JSON trees or typed API errors.

use super::transport::HttpResponse;
use crate::codec::Decoder;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{ApiError, ClientError, ErrorCode};
use serde::Deserialize;
use serde_json::Value;

/// The error body the API sends with every non-success status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status: Option<u16>,
    code: String,
    #[serde(default)]
    message: String,
}

/// Parse a response body, or the API error it carries.
///
/// Any 2xx status counts as success.
pub(crate) fn parse_response(
    decoder: &Decoder,
    response: &HttpResponse,
) -> Result<Value, ClientError> {
    if response.status.is_success() {
        Ok(decoder.parse(&response.body)?)
    } else {
        Err(parse_error(response).into())
    }
}

fn parse_error(response: &HttpResponse) -> ApiError {
    let status = response.status.as_u16();
    let error = match serde_json::from_slice::<ErrorBody>(&response.body) {
        Ok(body) => ApiError {
            status: body.status.unwrap_or(status),
            code: ErrorCode::from_api_response(&body.code),
            message: body.message,
        },
        // Fallback to generic error with HTTP status code
        Err(_) => ApiError {
            status,
            code: ErrorCode::from_http_status(status),
            message: body_preview(&response.body),
        },
    };
    log::warn!("Notion API error: {}", error);
    error
}

fn body_preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let preview: String = text.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", preview)
    } else {
        text.into_owned()
    }
}
