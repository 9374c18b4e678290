//! Wire codec: JSON trees to the typed model and back.
//!
//! Decoding is two-stage. Response bodies are parsed into a neutral
//! [`serde_json::Value`] tree; each polymorphic family then reads its
//! discriminator and dispatches to exactly one variant decoder. Failures
//! carry the field path where they happened, e.g.
//! `results[1].paragraph.children[0].type`.
//!
//! Encoding mirrors decoding: `encode(decode(x))` reproduces the fields
//! the model knows about.

/// Implements serde traits for a model type by delegating to its codec.
macro_rules! serde_via_codec {
    ($ty:ty, $encode:path, $decode:path) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&$encode(self), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                let scope = $crate::codec::Scope::root($crate::constants::DEFAULT_MAX_DECODE_DEPTH);
                $decode(&value, &scope).map_err(serde::de::Error::custom)
            }
        }
    };
}

mod block;
mod object;
mod parent;
mod property;
mod rich_text;
mod user;

use crate::constants::DEFAULT_MAX_DECODE_DEPTH;
use crate::error::{DecodeError, DecodeErrorKind};
use crate::model::{
    Block, Database, Discriminator, NotionObject, Page, PaginatedList, Parent, Property,
    PropertyContext, PropertySchema, PropertyValue, RichText, User,
};
use serde::de::DeserializeOwned;
use serde::Deserialize as _;
use serde_json::{Map, Value};
use std::fmt::Write as _;

/// Decodes API payloads into the typed model.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DECODE_DEPTH)
    }
}

impl Decoder {
    /// `max_depth` bounds how far polymorphic values may nest.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse raw bytes into a JSON tree.
    pub fn parse(&self, body: &[u8]) -> Result<Value, DecodeError> {
        serde_json::from_slice(body).map_err(|e| DecodeError::new(ROOT, DecodeErrorKind::Malformed(e)))
    }

    pub fn block(&self, value: &Value) -> Result<Block, DecodeError> {
        block::decode(value, &self.root())
    }

    pub fn rich_text(&self, value: &Value) -> Result<RichText, DecodeError> {
        rich_text::decode(value, &self.root())
    }

    pub fn parent(&self, value: &Value) -> Result<Parent, DecodeError> {
        parent::decode(value, &self.root())
    }

    /// Decode a user from the Users endpoints, where the kind is required.
    pub fn user(&self, value: &Value) -> Result<User, DecodeError> {
        user::decode(value, &self.root(), user::KindRequirement::Required)
    }

    /// Decode a property value as found on a page.
    pub fn property_value(&self, value: &Value) -> Result<PropertyValue, DecodeError> {
        property::decode_value(value, &self.root())
    }

    /// Decode a property descriptor as found in a database schema.
    pub fn property_schema(&self, value: &Value) -> Result<PropertySchema, DecodeError> {
        property::decode_schema(value, &self.root())
    }

    /// Decode a property whose origin is unknown.
    ///
    /// The context is inferred from the payload's shape. Prefer
    /// [`property_value`](Self::property_value) or
    /// [`property_schema`](Self::property_schema) when the container is known.
    pub fn property(&self, value: &Value) -> Result<Property, DecodeError> {
        let scope = self.root();
        match property::sniff_context(value, &scope)? {
            PropertyContext::Value => property::decode_value(value, &scope).map(Property::Value),
            PropertyContext::Schema => property::decode_schema(value, &scope).map(Property::Schema),
        }
    }

    pub fn page(&self, value: &Value) -> Result<Page, DecodeError> {
        object::decode_page(value, &self.root())
    }

    pub fn database(&self, value: &Value) -> Result<Database, DecodeError> {
        object::decode_database(value, &self.root())
    }

    /// Decode a page-or-database union by its `object` tag.
    pub fn object(&self, value: &Value) -> Result<NotionObject, DecodeError> {
        object::decode_object(value, &self.root())
    }

    pub fn block_list(&self, value: &Value) -> Result<PaginatedList<Block>, DecodeError> {
        object::decode_list(value, &self.root(), block::decode)
    }

    pub fn object_list(&self, value: &Value) -> Result<PaginatedList<NotionObject>, DecodeError> {
        object::decode_list(value, &self.root(), object::decode_object)
    }

    pub fn database_list(&self, value: &Value) -> Result<PaginatedList<Database>, DecodeError> {
        object::decode_list(value, &self.root(), object::decode_database)
    }

    pub fn user_list(&self, value: &Value) -> Result<PaginatedList<User>, DecodeError> {
        object::decode_list(value, &self.root(), |item, scope| {
            user::decode(item, scope, user::KindRequirement::Required)
        })
    }

    fn root(&self) -> Scope<'static> {
        Scope::root(self.max_depth)
    }
}

// ---------------------------------------------------------------------------
// Decode scope: the path from the document root to the current value
// ---------------------------------------------------------------------------

const ROOT: &str = "<root>";

#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Root,
    Field(&'a str),
    Index(usize),
}

/// A position in the document being decoded.
///
/// Scopes form a linked list through the call stack; the path string is
/// only built when an error is reported.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope<'a> {
    parent: Option<&'a Scope<'a>>,
    segment: Segment<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Scope<'a> {
    pub(crate) fn root(max_depth: usize) -> Scope<'static> {
        Scope {
            parent: None,
            segment: Segment::Root,
            depth: 0,
            max_depth,
        }
    }

    pub(crate) fn field<'b>(&'b self, name: &'b str) -> Scope<'b> {
        Scope {
            parent: Some(self),
            segment: Segment::Field(name),
            depth: self.depth,
            max_depth: self.max_depth,
        }
    }

    pub(crate) fn index(&self, index: usize) -> Scope<'_> {
        Scope {
            parent: Some(self),
            segment: Segment::Index(index),
            depth: self.depth,
            max_depth: self.max_depth,
        }
    }

    /// Enter one more level of polymorphic nesting.
    pub(crate) fn nested(self) -> Result<Scope<'a>, DecodeError> {
        if self.depth >= self.max_depth {
            return Err(self.error(DecodeErrorKind::TooDeeplyNested {
                limit: self.max_depth,
            }));
        }
        Ok(Scope {
            depth: self.depth + 1,
            ..self
        })
    }

    pub(crate) fn path(&self) -> String {
        let mut segments = Vec::new();
        let mut current = Some(self);
        while let Some(scope) = current {
            segments.push(scope.segment);
            current = scope.parent;
        }

        let mut path = String::new();
        for segment in segments.into_iter().rev() {
            match segment {
                Segment::Root => {}
                Segment::Field(name) => {
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(name);
                }
                Segment::Index(index) => {
                    let _ = write!(path, "[{}]", index);
                }
            }
        }
        if path.is_empty() {
            path.push_str(ROOT);
        }
        path
    }

    pub(crate) fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(self.path(), kind)
    }
}

// ---------------------------------------------------------------------------
// Shared decode helpers
// ---------------------------------------------------------------------------

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn as_object<'v>(
    value: &'v Value,
    scope: &Scope<'_>,
) -> Result<&'v Map<String, Value>, DecodeError> {
    value.as_object().ok_or_else(|| {
        scope.error(DecodeErrorKind::TypeMismatch {
            expected: "object",
            found: json_kind(value).to_string(),
        })
    })
}

/// Read a family's discriminator and resolve it to its tag enum.
///
/// Returns the raw tag as well, since aliased tags name their own
/// payload field.
pub(crate) fn discriminant<'v, K: Discriminator>(
    map: &'v Map<String, Value>,
    field: &'static str,
    scope: &Scope<'_>,
) -> Result<(K, &'v str), DecodeError> {
    let tag_scope = scope.field(field);
    let tag = match map.get(field) {
        None | Some(Value::Null) => {
            return Err(tag_scope.error(DecodeErrorKind::MissingDiscriminator { field }))
        }
        Some(Value::String(tag)) => tag.as_str(),
        Some(other) => {
            return Err(tag_scope.error(DecodeErrorKind::TypeMismatch {
                expected: "string",
                found: json_kind(other).to_string(),
            }))
        }
    };
    match K::from_tag(tag) {
        Some(kind) => {
            log::trace!("{} dispatch at {}: {}", K::FAMILY, scope.path(), tag);
            Ok((kind, tag))
        }
        None => Err(tag_scope.error(DecodeErrorKind::UnsupportedKind {
            family: K::FAMILY,
            tag: tag.to_string(),
        })),
    }
}

/// The field a variant keeps its payload under. Absent is an error; null
/// is passed through for the variant to interpret.
pub(crate) fn payload<'v>(
    map: &'v Map<String, Value>,
    tag: &str,
    scope: &Scope<'_>,
) -> Result<&'v Value, DecodeError> {
    map.get(tag).ok_or_else(|| {
        scope.error(DecodeErrorKind::MissingField {
            field: tag.to_string(),
        })
    })
}

/// Decode a fixed-shape value through its serde derive.
pub(crate) fn structural<T: DeserializeOwned>(
    value: &Value,
    scope: &Scope<'_>,
) -> Result<T, DecodeError> {
    T::deserialize(value).map_err(|e| {
        let message = e.to_string();
        match message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
        {
            Some(field) => scope.error(DecodeErrorKind::MissingField {
                field: field.to_string(),
            }),
            None => scope.error(DecodeErrorKind::TypeMismatch {
                expected: std::any::type_name::<T>()
                    .rsplit("::")
                    .next()
                    .unwrap_or("value"),
                found: message,
            }),
        }
    })
}

/// Like [`structural`], with absent and null both reading as `None`.
/// `deserialize_with` for defaulted fields that the API may also send as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn nullable<T: DeserializeOwned>(
    value: Option<&Value>,
    scope: &Scope<'_>,
) -> Result<Option<T>, DecodeError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => structural(value, scope).map(Some),
    }
}

/// Decode every element of an array field. Absent and null read as empty.
pub(crate) fn each<T>(
    value: Option<&Value>,
    scope: &Scope<'_>,
    mut decode: impl FnMut(&Value, &Scope<'_>) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| decode(item, &scope.index(index)))
            .collect(),
        Some(other) => Err(scope.error(DecodeErrorKind::TypeMismatch {
            expected: "array",
            found: json_kind(other).to_string(),
        })),
    }
}

pub(crate) fn opt_string(
    map: &Map<String, Value>,
    key: &str,
    scope: &Scope<'_>,
) -> Result<Option<String>, DecodeError> {
    nullable(map.get(key), &scope.field(key))
}

pub(crate) fn flag(
    map: &Map<String, Value>,
    key: &str,
    scope: &Scope<'_>,
) -> Result<bool, DecodeError> {
    Ok(nullable(map.get(key), &scope.field(key))?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockType;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn nested_toggles(levels: usize) -> String {
        let mut body = r#"{"type":"paragraph","paragraph":{"text":[]}}"#.to_string();
        for _ in 0..levels {
            body = format!(r#"{{"type":"toggle","toggle":{{"text":[],"children":[{}]}}}}"#, body);
        }
        body
    }

    #[test]
    fn test_default_depth_limit_fires_before_parser_limit() {
        let decoder = Decoder::default();
        let value = decoder.parse(nested_toggles(40).as_bytes()).unwrap();
        let err = decoder.block(&value).unwrap_err();
        assert!(matches!(
            err.kind,
            DecodeErrorKind::TooDeeplyNested { limit } if limit == DEFAULT_MAX_DECODE_DEPTH
        ));

        let value = decoder.parse(nested_toggles(20).as_bytes()).unwrap();
        assert!(decoder.block(&value).is_ok());
    }

    #[test]
    fn test_scope_path_rendering() {
        let root = Scope::root(4);
        let results = root.field("results");
        let item = results.index(1);
        let payload = item.field("paragraph");
        let children = payload.field("children");
        let child = children.index(0);
        assert_eq!(child.field("type").path(), "results[1].paragraph.children[0].type");
        assert_eq!(root.path(), "<root>");
    }

    #[test]
    fn test_nesting_limit() {
        let scope = Scope::root(1);
        let once = scope.nested().unwrap();
        let err = once.nested().unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::TooDeeplyNested { limit: 1 }));
    }

    #[test]
    fn test_discriminant_errors() {
        let scope = Scope::root(4);
        let missing = json!({ "id": "x" });
        let err = discriminant::<BlockType>(missing.as_object().unwrap(), "type", &scope)
            .unwrap_err();
        assert!(matches!(
            err.kind,
            DecodeErrorKind::MissingDiscriminator { field: "type" }
        ));

        let unknown = json!({ "type": "hologram" });
        let err = discriminant::<BlockType>(unknown.as_object().unwrap(), "type", &scope)
            .unwrap_err();
        assert_eq!(err.path, "type");
        assert_eq!(err.unsupported_tag(), Some("hologram"));
    }

    #[test]
    fn test_structural_reports_missing_field() {
        #[derive(Debug, serde::Deserialize)]
        struct Needs {
            #[allow(dead_code)]
            start: String,
        }
        let scope = Scope::root(4);
        let value = json!({});
        let err = structural::<Needs>(&value, &scope.field("date")).unwrap_err();
        assert_eq!(err.path, "date");
        assert!(matches!(err.kind, DecodeErrorKind::MissingField { ref field } if field == "start"));
    }

    #[test]
    fn test_each_treats_null_as_empty() {
        let scope = Scope::root(4);
        let items: Vec<String> = each(Some(&Value::Null), &scope, structural::<String>).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_malformed_body() {
        let err = Decoder::default().parse(b"{not json").unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::Malformed(_)));
    }
}
