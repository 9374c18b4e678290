// src/lib.rs
//! notion-typed: a typed client for the Notion REST API.
//!
//! Responses are decoded into closed Rust enums by reading each object's
//! discriminator (`type` or `object`) and dispatching to the matching
//! variant. Unknown tags fail with an error that names the tag and the
//! field path, never silently.
//!
//! # Public API
//!
//! - **Client**: [`NotionClient`] with [`Pages`], [`Databases`], [`Blocks`],
//!   [`Users`] and [`Search`] accessors
//! - **Transport**: the [`Transport`] seam and the default [`ReqwestTransport`]
//! - **Model**: [`Page`], [`Database`], [`Block`], [`PropertyValue`],
//!   [`PropertySchema`], [`RichText`], [`User`], [`Parent`]
//! - **Codec**: [`Decoder`] for decoding JSON you already hold
//! - **Errors**: [`ClientError`] and its parts
//!
//! ```no_run
//! use notion_typed::{ApiKey, BlockId, ClientConfig, NotionClient};
//!
//! # async fn run() -> Result<(), notion_typed::ClientError> {
//! let client = NotionClient::new(ClientConfig::new(ApiKey::new("secret_xyz")?))?;
//! let id = BlockId::parse("b55c9c91-384d-452b-81db-d1ef79372b75")?;
//! let children = client.blocks().list_children(&id).await?;
//! for block in children.iter() {
//!     println!("{}", block.block_type());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod codec;
mod config;
pub mod constants;
mod error;
pub mod model;
pub mod types;

// --- Client ---
pub use crate::api::{
    Blocks, CreatePageRequest, DatabaseQuery, Databases, HttpRequest, HttpResponse, NotionClient,
    PageRequest, Pages, RateLimit, ReqwestTransport, Search, SearchFilter, SearchRequest, Sort,
    SortDirection, SortTimestamp, Transport, UpdatePageRequest, Users,
};
pub use crate::codec::Decoder;
pub use crate::config::ClientConfig;

// --- Error Handling ---
pub use crate::error::{
    ApiError, ClientError, DecodeError, DecodeErrorKind, ErrorCode, Result, TransportError,
};
pub use crate::types::ValidationError;

// --- Domain model ---
pub use crate::model::{
    plain_text, Annotations, Block, BlockContent, BlockType, Color, Database, DateValue,
    FileObject, FileSource, FormulaValue, Mention, NotionObject, ObjectType, Page, PaginatedList,
    Parent, Property, PropertyConfig, PropertyContext, PropertyData, PropertySchema, PropertyType,
    PropertyValue, RichText, RichTextContent, RollupValue, SelectOption, User, UserKind,
};

// --- Domain types ---
pub use crate::types::{ApiKey, BlockId, DatabaseId, PageId, PropertyName, UserId};
