//! Validated newtypes shared by the model and the client.

use thiserror::Error;

mod domain_types;
mod ids;

pub use domain_types::{ApiKey, PropertyName};
pub use ids::{
    BlockId, BlockObject, DatabaseId, DatabaseObject, Id, IdKind, PageId, PageObject, UserId,
    UserObject,
};

/// Rejected caller input, caught before any request is sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid {kind} ID {input:?}: {reason}")]
    InvalidId {
        kind: &'static str,
        input: String,
        reason: &'static str,
    },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid page size {0}: must be between 1 and 100")]
    InvalidPageSize(u32),

    #[error("Invalid header value for {header}: {reason}")]
    InvalidHeaderValue { header: &'static str, reason: String },
}
