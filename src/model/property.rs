//! Property values on pages and property schemas on databases.
//!
//! The wire uses the same `type` tags for both. A page carries values
//! (`"title": [..spans..]`); a database carries descriptors
//! (`"title": {}`). The two never share a Rust type.

use super::kinds::{FormulaType, PropertyType, RollupType};
use super::rich_text::{plain_text, RichText};
use super::user::User;
use super::Color;
use crate::types::{DatabaseId, PageId};
use serde::{Deserialize, Serialize};

/// A property value attached to a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    /// Server-assigned property id. Absent on values built for requests.
    pub id: Option<String>,
    pub data: PropertyData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyData {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Number(Option<f64>),
    Select(Option<SelectOption>),
    MultiSelect(Vec<SelectOption>),
    Date(Option<DateValue>),
    People(Vec<User>),
    Files(Vec<FileObject>),
    Checkbox(bool),
    Url(Option<String>),
    Email(Option<String>),
    PhoneNumber(Option<String>),
    Formula(FormulaValue),
    Relation(Vec<PageReference>),
    Rollup(RollupValue),
    CreatedTime(String),
    CreatedBy(User),
    LastEditedTime(String),
    LastEditedBy(User),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// A date or date range. Timestamps are kept exactly as the server wrote them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileObject {
    pub name: String,
    pub source: FileSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    External { url: String },
    Hosted { url: String, expiry_time: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageReference {
    pub id: PageId,
}

/// The computed result of a formula property.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    String(Option<String>),
    Number(Option<f64>),
    Boolean(Option<bool>),
    Date(Option<DateValue>),
}

/// The aggregated result of a rollup property.
#[derive(Debug, Clone, PartialEq)]
pub enum RollupValue {
    Number(Option<f64>),
    Date(Option<DateValue>),
    Array(Vec<PropertyData>),
}

/// A property descriptor in a database schema.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    pub id: Option<String>,
    pub name: Option<String>,
    pub config: PropertyConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyConfig {
    Title,
    RichText,
    Number { format: Option<String> },
    Select { options: Vec<SelectOption> },
    MultiSelect { options: Vec<SelectOption> },
    Date,
    People,
    Files,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Formula { expression: String },
    Relation(RelationConfig),
    Rollup(RollupConfig),
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_id: Option<DatabaseId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synced_property_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synced_property_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollupConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_property_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_property_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollup_property_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollup_property_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

/// Which side of the schema/value split a property payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyContext {
    /// A value on a page.
    Value,
    /// A descriptor in a database schema.
    Schema,
}

/// A property decoded without knowing where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Value(PropertyValue),
    Schema(PropertySchema),
}

impl PropertyValue {
    pub fn new(data: PropertyData) -> Self {
        Self { id: None, data }
    }

    pub fn property_type(&self) -> PropertyType {
        self.data.property_type()
    }
}

impl PropertyData {
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyData::Title(_) => PropertyType::Title,
            PropertyData::RichText(_) => PropertyType::RichText,
            PropertyData::Number(_) => PropertyType::Number,
            PropertyData::Select(_) => PropertyType::Select,
            PropertyData::MultiSelect(_) => PropertyType::MultiSelect,
            PropertyData::Date(_) => PropertyType::Date,
            PropertyData::People(_) => PropertyType::People,
            PropertyData::Files(_) => PropertyType::Files,
            PropertyData::Checkbox(_) => PropertyType::Checkbox,
            PropertyData::Url(_) => PropertyType::Url,
            PropertyData::Email(_) => PropertyType::Email,
            PropertyData::PhoneNumber(_) => PropertyType::PhoneNumber,
            PropertyData::Formula(_) => PropertyType::Formula,
            PropertyData::Relation(_) => PropertyType::Relation,
            PropertyData::Rollup(_) => PropertyType::Rollup,
            PropertyData::CreatedTime(_) => PropertyType::CreatedTime,
            PropertyData::CreatedBy(_) => PropertyType::CreatedBy,
            PropertyData::LastEditedTime(_) => PropertyType::LastEditedTime,
            PropertyData::LastEditedBy(_) => PropertyType::LastEditedBy,
        }
    }

    /// Plain text of title and rich text values.
    pub fn as_plain_text(&self) -> Option<String> {
        match self {
            PropertyData::Title(spans) | PropertyData::RichText(spans) => Some(plain_text(spans)),
            _ => None,
        }
    }
}

impl FormulaValue {
    pub fn formula_type(&self) -> FormulaType {
        match self {
            FormulaValue::String(_) => FormulaType::String,
            FormulaValue::Number(_) => FormulaType::Number,
            FormulaValue::Boolean(_) => FormulaType::Boolean,
            FormulaValue::Date(_) => FormulaType::Date,
        }
    }
}

impl RollupValue {
    pub fn rollup_type(&self) -> RollupType {
        match self {
            RollupValue::Number(_) => RollupType::Number,
            RollupValue::Date(_) => RollupType::Date,
            RollupValue::Array(_) => RollupType::Array,
        }
    }
}

impl FileObject {
    pub fn url(&self) -> &str {
        match &self.source {
            FileSource::External { url } | FileSource::Hosted { url, .. } => url,
        }
    }
}

impl PropertySchema {
    pub fn new(config: PropertyConfig) -> Self {
        Self {
            id: None,
            name: None,
            config,
        }
    }

    pub fn property_type(&self) -> PropertyType {
        self.config.property_type()
    }
}

impl PropertyConfig {
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyConfig::Title => PropertyType::Title,
            PropertyConfig::RichText => PropertyType::RichText,
            PropertyConfig::Number { .. } => PropertyType::Number,
            PropertyConfig::Select { .. } => PropertyType::Select,
            PropertyConfig::MultiSelect { .. } => PropertyType::MultiSelect,
            PropertyConfig::Date => PropertyType::Date,
            PropertyConfig::People => PropertyType::People,
            PropertyConfig::Files => PropertyType::Files,
            PropertyConfig::Checkbox => PropertyType::Checkbox,
            PropertyConfig::Url => PropertyType::Url,
            PropertyConfig::Email => PropertyType::Email,
            PropertyConfig::PhoneNumber => PropertyType::PhoneNumber,
            PropertyConfig::Formula { .. } => PropertyType::Formula,
            PropertyConfig::Relation(_) => PropertyType::Relation,
            PropertyConfig::Rollup(_) => PropertyType::Rollup,
            PropertyConfig::CreatedTime => PropertyType::CreatedTime,
            PropertyConfig::CreatedBy => PropertyType::CreatedBy,
            PropertyConfig::LastEditedTime => PropertyType::LastEditedTime,
            PropertyConfig::LastEditedBy => PropertyType::LastEditedBy,
        }
    }
}

impl Property {
    pub fn property_type(&self) -> PropertyType {
        match self {
            Property::Value(value) => value.property_type(),
            Property::Schema(schema) => schema.property_type(),
        }
    }

    pub fn context(&self) -> PropertyContext {
        match self {
            Property::Value(_) => PropertyContext::Value,
            Property::Schema(_) => PropertyContext::Schema,
        }
    }
}
