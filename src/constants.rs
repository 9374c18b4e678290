// src/constants.rs
//! Domain constants that define the operational boundaries of the client.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API endpoint
// ---------------------------------------------------------------------------

/// Root of every endpoint path. Must end with a slash so relative paths join.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1/";

/// API version sent in the `Notion-Version` header unless configured.
pub const DEFAULT_API_VERSION: &str = "2021-05-13";

/// User agent sent with every request unless configured.
pub const DEFAULT_USER_AGENT: &str = concat!("notion-typed/", env!("CARGO_PKG_VERSION"));

/// The Notion API maximum for `page_size`.
pub const NOTION_API_MAX_PAGE_SIZE: u32 = 100;

// ---------------------------------------------------------------------------
// Header names
// ---------------------------------------------------------------------------

/// Header names are lowercase so they can be used as static `HeaderName`s.
pub const HEADER_NOTION_VERSION: &str = "notion-version";
pub const HEADER_RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
pub const HEADER_RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
pub const HEADER_RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

// ---------------------------------------------------------------------------
// Rate limiting
// ---------------------------------------------------------------------------

/// Limit and remaining count assumed before the first response arrives.
pub const DEFAULT_RATE_LIMIT: u64 = 10_000;

// ---------------------------------------------------------------------------
// Decoding boundaries
// ---------------------------------------------------------------------------

/// How many polymorphic values may nest inside one another while decoding.
///
/// Block children and rollup arrays are the recursive families. Parsing
/// stops at 128 nested JSON values before decoding starts, and each block
/// level spends three of them, so this stays below about 40 block levels.
pub const DEFAULT_MAX_DECODE_DEPTH: usize = 32;

/// How much of an unparseable error body is kept for logging.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
