// src/api/mod.rs
//! Notion API interaction.
//!
//! [`NotionClient`] builds requests, sends them through a [`Transport`],
//! records rate-limit headers, and decodes responses with the
//! [`codec`](crate::codec). Each resource family has its own accessor.

mod blocks;
mod client;
mod databases;
mod pages;
mod parser;
mod rate_limit;
mod requests;
mod search;
mod transport;
mod users;

pub use blocks::Blocks;
pub use client::NotionClient;
pub use databases::Databases;
pub use pages::Pages;
pub use rate_limit::{RateLimit, RateLimitState};
pub use requests::{
    CreatePageRequest, DatabaseQuery, PageRequest, SearchFilter, SearchRequest, SearchSort, Sort,
    SortDirection, SortTimestamp, UpdatePageRequest,
};
pub use search::Search;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use users::Users;
