//! The typed Notion object model.
//!
//! Types here are plain data. Wire decoding and encoding live in
//! [`crate::codec`], which also provides the serde impls.

mod block;
pub mod kinds;
mod parent;
mod property;
mod rich_text;
mod user;

pub use block::{Block, BlockContent, ChildPageBlock, HeadingBlock, TextBlock, ToDoBlock};
pub use kinds::{
    BlockType, Color, Discriminator, FileType, FormulaType, MentionType, ObjectType, ParentType,
    PropertyType, RichTextType, RollupType, UserType,
};
pub use parent::Parent;
pub use property::{
    DateValue, FileObject, FileSource, FormulaValue, PageReference, Property, PropertyConfig,
    PropertyContext, PropertyData, PropertySchema, PropertyValue, RelationConfig, RollupConfig,
    RollupValue, SelectOption,
};
pub use rich_text::{
    plain_text, Annotations, Equation, Link, Mention, RichText, RichTextContent, TextContent,
};
pub use user::{Bot, Person, User, UserKind};

use crate::types::{DatabaseId, PageId, PropertyName};
use indexmap::IndexMap;

/// A Notion page. Property order follows the server's response.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub created_time: String,
    pub last_edited_time: String,
    pub archived: bool,
    pub url: Option<String>,
    pub parent: Parent,
    pub properties: IndexMap<PropertyName, PropertyValue>,
}

impl Page {
    /// Plain text of the page's title property, if it has one.
    pub fn title(&self) -> Option<String> {
        self.properties
            .values()
            .find(|value| value.property_type() == PropertyType::Title)
            .and_then(|value| value.data.as_plain_text())
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

/// A Notion database and its property schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub id: DatabaseId,
    pub created_time: String,
    pub last_edited_time: String,
    pub title: Vec<RichText>,
    pub parent: Option<Parent>,
    pub url: Option<String>,
    pub properties: IndexMap<PropertyName, PropertySchema>,
}

impl Database {
    pub fn title_text(&self) -> String {
        plain_text(&self.title)
    }
}

/// Either a page or a database, as returned by search and database queries.
#[derive(Debug, Clone, PartialEq)]
pub enum NotionObject {
    Page(Page),
    Database(Database),
}

impl NotionObject {
    pub fn object_type(&self) -> ObjectType {
        match self {
            NotionObject::Page(_) => ObjectType::Page,
            NotionObject::Database(_) => ObjectType::Database,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            NotionObject::Page(page) => page.id.as_str(),
            NotionObject::Database(database) => database.id.as_str(),
        }
    }

    pub fn as_page(&self) -> Option<&Page> {
        match self {
            NotionObject::Page(page) => Some(page),
            NotionObject::Database(_) => None,
        }
    }

    pub fn as_database(&self) -> Option<&Database> {
        match self {
            NotionObject::Page(_) => None,
            NotionObject::Database(database) => Some(database),
        }
    }
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedList<T> {
    pub results: Vec<T>,
    /// Cursor for the next page. `None` when `has_more` is false.
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> PaginatedList<T> {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.results.iter()
    }
}

impl<T> IntoIterator for PaginatedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
