use super::parent::{self, decode_map as decode_parent};
use super::property::{decode_schema, decode_value, encode_schema, encode_value};
use super::rich_text::{decode_spans, encode_spans};
use super::{as_object, discriminant, structural, Scope};
use crate::error::{DecodeError, DecodeErrorKind};
use crate::model::{Database, NotionObject, ObjectType, Page, PaginatedList};
use crate::types::{DatabaseId, PageId, PropertyName};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{json, Map, Value};

serde_via_codec!(Page, encode_page, decode_page);
serde_via_codec!(Database, encode_database, decode_database);
serde_via_codec!(NotionObject, encode_object, decode_object);

/// Page fields with the polymorphic parts left as untyped maps.
#[derive(Deserialize)]
struct RawPage {
    #[serde(default)]
    object: Option<String>,
    id: PageId,
    #[serde(default, deserialize_with = "super::null_as_default")]
    created_time: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    last_edited_time: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    archived: bool,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    parent: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    properties: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawDatabase {
    #[serde(default)]
    object: Option<String>,
    id: DatabaseId,
    #[serde(default, deserialize_with = "super::null_as_default")]
    created_time: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    last_edited_time: String,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    parent: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    properties: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawList {
    #[serde(default)]
    results: Option<Value>,
    #[serde(default)]
    next_cursor: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    has_more: bool,
}

fn expect_object(
    found: Option<&str>,
    expected: ObjectType,
    scope: &Scope<'_>,
) -> Result<(), DecodeError> {
    match found {
        Some(found) if found != expected.as_str() => {
            Err(scope.field("object").error(DecodeErrorKind::UnexpectedObject {
                expected: expected.as_str(),
                found: found.to_string(),
            }))
        }
        _ => Ok(()),
    }
}

fn decode_properties<T>(
    properties: &Map<String, Value>,
    scope: &Scope<'_>,
    decode: impl Fn(&Value, &Scope<'_>) -> Result<T, DecodeError>,
) -> Result<IndexMap<PropertyName, T>, DecodeError> {
    let scope = scope.field("properties");
    properties
        .iter()
        .map(|(name, value)| {
            let decoded = decode(value, &scope.field(name))?;
            Ok::<_, DecodeError>((PropertyName::from(name.as_str()), decoded))
        })
        .collect()
}

pub(crate) fn decode_page(value: &Value, scope: &Scope<'_>) -> Result<Page, DecodeError> {
    let raw: RawPage = structural(value, scope)?;
    expect_object(raw.object.as_deref(), ObjectType::Page, scope)?;
    let parent = match &raw.parent {
        Some(parent) => decode_parent(parent, &scope.field("parent"))?,
        None => {
            return Err(scope.error(DecodeErrorKind::MissingField {
                field: "parent".to_string(),
            }))
        }
    };
    Ok(Page {
        properties: decode_properties(&raw.properties, scope, decode_value)?,
        id: raw.id,
        created_time: raw.created_time,
        last_edited_time: raw.last_edited_time,
        archived: raw.archived,
        url: raw.url,
        parent,
    })
}

pub(crate) fn decode_database(value: &Value, scope: &Scope<'_>) -> Result<Database, DecodeError> {
    let raw: RawDatabase = structural(value, scope)?;
    expect_object(raw.object.as_deref(), ObjectType::Database, scope)?;
    let parent = match &raw.parent {
        Some(parent) => Some(decode_parent(parent, &scope.field("parent"))?),
        None => None,
    };
    Ok(Database {
        title: decode_spans(raw.title.as_ref(), &scope.field("title"))?,
        properties: decode_properties(&raw.properties, scope, decode_schema)?,
        id: raw.id,
        created_time: raw.created_time,
        last_edited_time: raw.last_edited_time,
        parent,
        url: raw.url,
    })
}

/// Decode a search or query result, which may be a page or a database.
pub(crate) fn decode_object(value: &Value, scope: &Scope<'_>) -> Result<NotionObject, DecodeError> {
    let map = as_object(value, scope)?;
    let (object_type, tag) = discriminant::<ObjectType>(map, "object", scope)?;
    match object_type {
        ObjectType::Page => decode_page(value, scope).map(NotionObject::Page),
        ObjectType::Database => decode_database(value, scope).map(NotionObject::Database),
        ObjectType::Block | ObjectType::User | ObjectType::List | ObjectType::Error => {
            Err(scope.field("object").error(DecodeErrorKind::UnexpectedObject {
                expected: "page or database",
                found: tag.to_string(),
            }))
        }
    }
}

/// Decode one page of a cursor-paginated listing.
pub(crate) fn decode_list<T>(
    value: &Value,
    scope: &Scope<'_>,
    decode: impl FnMut(&Value, &Scope<'_>) -> Result<T, DecodeError>,
) -> Result<PaginatedList<T>, DecodeError> {
    let raw: RawList = structural(value, scope)?;
    let results = super::each(raw.results.as_ref(), &scope.field("results"), decode)?;
    Ok(PaginatedList {
        results,
        // An empty cursor means the same as none.
        next_cursor: raw.next_cursor.filter(|cursor| !cursor.is_empty()),
        has_more: raw.has_more,
    })
}

fn encode_properties<T>(
    properties: &IndexMap<PropertyName, T>,
    encode: impl Fn(&T) -> Value,
) -> Value {
    Value::Object(
        properties
            .iter()
            .map(|(name, value)| (name.as_str().to_string(), encode(value)))
            .collect(),
    )
}

pub(crate) fn encode_page(page: &Page) -> Value {
    json!({
        "object": ObjectType::Page.as_str(),
        "id": page.id,
        "created_time": page.created_time,
        "last_edited_time": page.last_edited_time,
        "archived": page.archived,
        "url": page.url,
        "parent": parent::encode(&page.parent),
        "properties": encode_properties(&page.properties, encode_value),
    })
}

pub(crate) fn encode_database(database: &Database) -> Value {
    let mut map = Map::new();
    map.insert("object".to_string(), json!(ObjectType::Database.as_str()));
    map.insert("id".to_string(), json!(database.id));
    map.insert("created_time".to_string(), json!(database.created_time));
    map.insert("last_edited_time".to_string(), json!(database.last_edited_time));
    map.insert("title".to_string(), encode_spans(&database.title));
    map.insert(
        "properties".to_string(),
        encode_properties(&database.properties, encode_schema),
    );
    if let Some(parent) = &database.parent {
        map.insert("parent".to_string(), parent::encode(parent));
    }
    if let Some(url) = &database.url {
        map.insert("url".to_string(), json!(url));
    }
    Value::Object(map)
}

pub(crate) fn encode_object(object: &NotionObject) -> Value {
    match object {
        NotionObject::Page(page) => encode_page(page),
        NotionObject::Database(database) => encode_database(database),
    }
}
