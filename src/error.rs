// src/error.rs
//! Client error types.
//!
//! Every public operation returns [`ClientError`]. Its variants separate the
//! four ways a call can fail: the transport never produced a response, the
//! server answered with a non-success status, the response body could not be
//! decoded into the typed model, or the rate-limit headers were unreadable.

use crate::types::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Each variant maps to exactly one machine code string returned in the
/// `code` field of an error body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Request body could not be parsed as JSON
    InvalidJson,
    /// Request URL is not valid
    InvalidRequestUrl,
    /// Request is not supported
    InvalidRequest,
    /// Request body does not match the expected schema
    ValidationError,
    /// The Notion-Version header is missing
    MissingVersion,
    /// Bearer token is not valid
    Unauthorized,
    /// Token lacks permission for this resource
    RestrictedResource,
    /// The resource does not exist or is not shared with the integration
    ObjectNotFound,
    /// Transaction could not be completed, usually a data collision
    ConflictError,
    /// Request rate exceeded the limit
    RateLimited,
    /// Unexpected server error
    InternalServerError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status fallback when the error body is unparseable
    HttpStatus(u16),
    /// A code this client does not know yet
    Unknown(String),
}

impl ErrorCode {
    /// Parse a machine code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "invalid_json" => Self::InvalidJson,
            "invalid_request_url" => Self::InvalidRequestUrl,
            "invalid_request" => Self::InvalidRequest,
            "validation_error" => Self::ValidationError,
            "missing_version" => Self::MissingVersion,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "object_not_found" => Self::ObjectNotFound,
            "conflict_error" => Self::ConflictError,
            "rate_limited" => Self::RateLimited,
            "internal_server_error" => Self::InternalServerError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether a caller may reasonably retry the request later.
    ///
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited
            | Self::ConflictError
            | Self::InternalServerError
            | Self::ServiceUnavailable => true,
            Self::HttpStatus(status) => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound | Self::HttpStatus(404))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::InvalidRequestUrl => write!(f, "invalid_request_url"),
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::ValidationError => write!(f, "validation_error"),
            Self::MissingVersion => write!(f, "missing_version"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::ConflictError => write!(f, "conflict_error"),
            Self::RateLimited => write!(f, "rate_limited"),
            Self::InternalServerError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from_api_response(&code))
    }
}

/// A non-success response from the API.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Notion API returned an error ({status} {code}): {message}")]
pub struct ApiError {
    pub status: u16,
    pub code: ErrorCode,
    pub message: String,
}

/// The request never produced an HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Transport failure: {0}")]
    Other(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Network(err) => err.is_timeout(),
            Self::Timeout(_) => true,
            Self::Other(_) => false,
        }
    }
}

/// Why a JSON payload could not be turned into the typed model.
#[derive(Debug, Error)]
pub enum DecodeErrorKind {
    #[error("{family} kind not supported: {tag:?}")]
    UnsupportedKind { family: &'static str, tag: String },

    #[error("missing discriminator field {field:?}")]
    MissingDiscriminator { field: &'static str },

    #[error("missing required field {field:?}")]
    MissingField { field: String },

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("expected a {expected} object, found {found:?}")]
    UnexpectedObject {
        expected: &'static str,
        found: String,
    },

    #[error("too deeply nested (limit {limit})")]
    TooDeeplyNested { limit: usize },

    #[error("malformed JSON: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// A decode failure together with the field path where it happened.
#[derive(Debug, Error)]
#[error("decode error at {path}: {kind}")]
pub struct DecodeError {
    pub path: String,
    #[source]
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(path: impl Into<String>, kind: DecodeErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// The offending discriminator, when the failure was an unknown tag.
    pub fn unsupported_tag(&self) -> Option<&str> {
        match &self.kind {
            DecodeErrorKind::UnsupportedKind { tag, .. } => Some(tag),
            _ => None,
        }
    }
}

/// Main client error type.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Invalid rate-limit header {header}: {value:?}")]
    RateLimitHeader { header: &'static str, value: String },

    #[error("Failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// The API error code, when the server answered with one.
    pub fn api_code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Api(err) => Some(&err.code),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = ClientError> = std::result::Result<T, E>;
