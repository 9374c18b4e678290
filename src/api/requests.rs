// src/api/requests.rs
//! Request bodies and pagination parameters.

use crate::constants::NOTION_API_MAX_PAGE_SIZE;
use crate::model::{Block, Parent, PropertyValue};
use crate::types::{PropertyName, ValidationError};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Cursor and size for a paginated GET listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub start_cursor: Option<String>,
    pub page_size: Option<u32>,
}

impl PageRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.start_cursor = Some(cursor.into());
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Query-string pairs for this request, validating the page size.
    pub(crate) fn query(&self) -> Result<Vec<(&'static str, String)>, ValidationError> {
        validate_page_size(self.page_size)?;
        let mut query = Vec::new();
        if let Some(cursor) = &self.start_cursor {
            query.push(("start_cursor", cursor.clone()));
        }
        if let Some(size) = self.page_size {
            query.push(("page_size", size.to_string()));
        }
        Ok(query)
    }
}

pub(crate) fn validate_page_size(page_size: Option<u32>) -> Result<(), ValidationError> {
    match page_size {
        Some(size) if size == 0 || size > NOTION_API_MAX_PAGE_SIZE => {
            Err(ValidationError::InvalidPageSize(size))
        }
        _ => Ok(()),
    }
}

/// Body of a page creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePageRequest {
    pub parent: Parent,
    pub properties: IndexMap<PropertyName, PropertyValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl CreatePageRequest {
    pub fn new(parent: impl Into<Parent>) -> Self {
        Self {
            parent: parent.into(),
            properties: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn property(mut self, name: impl Into<PropertyName>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn child(mut self, block: Block) -> Self {
        self.children.push(block);
        self
    }
}

/// Body of a partial property update. Only the listed properties change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePageRequest {
    pub properties: IndexMap<PropertyName, PropertyValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl UpdatePageRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, name: impl Into<PropertyName>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortTimestamp {
    CreatedTime,
    LastEditedTime,
}

/// One entry of a database query's `sorts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sort {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<SortTimestamp>,
    pub direction: SortDirection,
}

impl Sort {
    pub fn by_property(property: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            property: Some(property.into()),
            timestamp: None,
            direction,
        }
    }

    pub fn by_timestamp(timestamp: SortTimestamp, direction: SortDirection) -> Self {
        Self {
            property: None,
            timestamp: Some(timestamp),
            direction,
        }
    }
}

/// Body of a database query.
///
/// Filters are passed through as JSON; build them with `serde_json::json!`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl DatabaseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn start_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.start_cursor = Some(cursor.into());
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }
}

/// Restricts search results to one object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    Pages,
    Databases,
}

impl Serialize for SearchFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = match self {
            SearchFilter::Pages => "page",
            SearchFilter::Databases => "database",
        };
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("property", "object")?;
        map.serialize_entry("value", value)?;
        map.end()
    }
}

/// Search results are sortable by last edit time only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSort {
    pub direction: SortDirection,
}

impl Serialize for SearchSort {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("direction", &self.direction)?;
        map.serialize_entry("timestamp", &SortTimestamp::LastEditedTime)?;
        map.end()
    }
}

/// Body of a search request. An empty request matches everything shared
/// with the integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SearchSort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<SearchFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn sort(mut self, direction: SortDirection) -> Self {
        self.sort = Some(SearchSort { direction });
        self
    }

    pub fn filter(mut self, filter: SearchFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn start_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.start_cursor = Some(cursor.into());
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }
}

/// Body of an append-children request.
#[derive(Debug, Serialize)]
pub(crate) struct AppendChildren<'a> {
    pub children: &'a [Block],
}
