use super::rich_text::{decode_spans, encode_spans};
use super::user::{self, decode_reference};
use super::{
    as_object, discriminant, each, nullable, opt_string, payload, structural, Scope,
};
use crate::error::{DecodeError, DecodeErrorKind};
use crate::model::{
    FileObject, FileSource, FileType, FormulaType, FormulaValue, PropertyConfig, PropertyContext,
    PropertyData, PropertySchema, PropertyType, PropertyValue, RollupType, RollupValue,
    SelectOption,
};
use serde_json::{json, Map, Value};

serde_via_codec!(PropertyValue, encode_value, decode_value);
serde_via_codec!(PropertySchema, encode_schema, decode_schema);

// ---------------------------------------------------------------------------
// Values (pages)
// ---------------------------------------------------------------------------

pub(crate) fn decode_value(value: &Value, scope: &Scope<'_>) -> Result<PropertyValue, DecodeError> {
    let map = as_object(value, scope)?;
    Ok(PropertyValue {
        id: opt_string(map, "id", scope)?,
        data: decode_data(map, scope)?,
    })
}

fn decode_data(map: &Map<String, Value>, scope: &Scope<'_>) -> Result<PropertyData, DecodeError> {
    let (property_type, tag) = discriminant::<PropertyType>(map, "type", scope)?;
    let body_scope = scope.field(tag);
    let body = payload(map, tag, scope)?;
    let body_scope = &body_scope;

    Ok(match property_type {
        PropertyType::Title => PropertyData::Title(decode_spans(Some(body), body_scope)?),
        PropertyType::RichText => PropertyData::RichText(decode_spans(Some(body), body_scope)?),
        PropertyType::Number => PropertyData::Number(nullable(Some(body), body_scope)?),
        PropertyType::Select => PropertyData::Select(nullable(Some(body), body_scope)?),
        PropertyType::MultiSelect => {
            PropertyData::MultiSelect(each(Some(body), body_scope, structural)?)
        }
        PropertyType::Date => PropertyData::Date(nullable(Some(body), body_scope)?),
        PropertyType::People => {
            PropertyData::People(each(Some(body), body_scope, decode_reference)?)
        }
        PropertyType::Files => PropertyData::Files(each(Some(body), body_scope, decode_file)?),
        PropertyType::Checkbox => {
            PropertyData::Checkbox(nullable(Some(body), body_scope)?.unwrap_or(false))
        }
        PropertyType::Url => PropertyData::Url(nullable(Some(body), body_scope)?),
        PropertyType::Email => PropertyData::Email(nullable(Some(body), body_scope)?),
        PropertyType::PhoneNumber => PropertyData::PhoneNumber(nullable(Some(body), body_scope)?),
        PropertyType::Formula => PropertyData::Formula(decode_formula(body, body_scope)?),
        PropertyType::Relation => PropertyData::Relation(each(Some(body), body_scope, structural)?),
        PropertyType::Rollup => PropertyData::Rollup(decode_rollup(body, body_scope)?),
        PropertyType::CreatedTime => PropertyData::CreatedTime(structural(body, body_scope)?),
        PropertyType::CreatedBy => PropertyData::CreatedBy(decode_reference(body, body_scope)?),
        PropertyType::LastEditedTime => {
            PropertyData::LastEditedTime(structural(body, body_scope)?)
        }
        PropertyType::LastEditedBy => {
            PropertyData::LastEditedBy(decode_reference(body, body_scope)?)
        }
    })
}

fn decode_file(value: &Value, scope: &Scope<'_>) -> Result<FileObject, DecodeError> {
    let map = as_object(value, scope)?;
    let (file_type, tag) = discriminant::<FileType>(map, "type", scope)?;
    let body_scope = scope.field(tag);
    let body = as_object(payload(map, tag, scope)?, &body_scope)?;
    let url = opt_string(body, "url", &body_scope)?.unwrap_or_default();
    let source = match file_type {
        FileType::External => FileSource::External { url },
        FileType::Hosted => FileSource::Hosted {
            url,
            expiry_time: opt_string(body, "expiry_time", &body_scope)?,
        },
    };
    Ok(FileObject {
        name: opt_string(map, "name", scope)?.unwrap_or_default(),
        source,
    })
}

fn decode_formula(value: &Value, scope: &Scope<'_>) -> Result<FormulaValue, DecodeError> {
    let map = as_object(value, scope)?;
    let (formula_type, tag) = discriminant::<FormulaType>(map, "type", scope)?;
    let body_scope = scope.field(tag);
    let body = map.get(tag);
    Ok(match formula_type {
        FormulaType::String => FormulaValue::String(nullable(body, &body_scope)?),
        FormulaType::Number => FormulaValue::Number(nullable(body, &body_scope)?),
        FormulaType::Boolean => FormulaValue::Boolean(nullable(body, &body_scope)?),
        FormulaType::Date => FormulaValue::Date(nullable(body, &body_scope)?),
    })
}

fn decode_rollup(value: &Value, scope: &Scope<'_>) -> Result<RollupValue, DecodeError> {
    let map = as_object(value, scope)?;
    let (rollup_type, tag) = discriminant::<RollupType>(map, "type", scope)?;
    let body_scope = scope.field(tag);
    let body = map.get(tag);
    Ok(match rollup_type {
        RollupType::Number => RollupValue::Number(nullable(body, &body_scope)?),
        RollupType::Date => RollupValue::Date(nullable(body, &body_scope)?),
        RollupType::Array => RollupValue::Array(each(body, &body_scope, |item, item_scope| {
            let item_scope = item_scope.nested()?;
            decode_data(as_object(item, &item_scope)?, &item_scope)
        })?),
    })
}

pub(crate) fn encode_value(value: &PropertyValue) -> Value {
    let mut map = match encode_data(&value.data) {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Some(id) = &value.id {
        map.insert("id".to_string(), json!(id));
    }
    Value::Object(map)
}

fn encode_data(data: &PropertyData) -> Value {
    let tag = data.property_type().as_str();
    let body = match data {
        PropertyData::Title(spans) | PropertyData::RichText(spans) => encode_spans(spans),
        PropertyData::Number(number) => json!(number),
        PropertyData::Select(option) => json!(option),
        PropertyData::MultiSelect(options) => json!(options),
        PropertyData::Date(date) => json!(date),
        PropertyData::People(people) => Value::Array(people.iter().map(user::encode).collect()),
        PropertyData::Files(files) => Value::Array(files.iter().map(encode_file).collect()),
        PropertyData::Checkbox(checked) => json!(checked),
        PropertyData::Url(text) | PropertyData::Email(text) | PropertyData::PhoneNumber(text) => {
            json!(text)
        }
        PropertyData::Formula(formula) => encode_formula(formula),
        PropertyData::Relation(pages) => json!(pages),
        PropertyData::Rollup(rollup) => encode_rollup(rollup),
        PropertyData::CreatedTime(time) | PropertyData::LastEditedTime(time) => json!(time),
        PropertyData::CreatedBy(user) | PropertyData::LastEditedBy(user) => user::encode(user),
    };
    tagged(tag, body)
}

fn encode_file(file: &FileObject) -> Value {
    let (file_type, body) = match &file.source {
        FileSource::External { url } => (FileType::External, json!({ "url": url })),
        FileSource::Hosted { url, expiry_time } => (
            FileType::Hosted,
            json!({ "url": url, "expiry_time": expiry_time }),
        ),
    };
    let mut value = tagged(file_type.as_str(), body);
    if let Value::Object(map) = &mut value {
        map.insert("name".to_string(), json!(file.name));
    }
    value
}

fn encode_formula(formula: &FormulaValue) -> Value {
    let body = match formula {
        FormulaValue::String(text) => json!(text),
        FormulaValue::Number(number) => json!(number),
        FormulaValue::Boolean(flag) => json!(flag),
        FormulaValue::Date(date) => json!(date),
    };
    tagged(formula.formula_type().as_str(), body)
}

fn encode_rollup(rollup: &RollupValue) -> Value {
    let body = match rollup {
        RollupValue::Number(number) => json!(number),
        RollupValue::Date(date) => json!(date),
        RollupValue::Array(items) => Value::Array(items.iter().map(encode_data).collect()),
    };
    tagged(rollup.rollup_type().as_str(), body)
}

fn tagged(tag: &str, body: Value) -> Value {
    let mut map = Map::new();
    map.insert("type".to_string(), json!(tag));
    map.insert(tag.to_string(), body);
    Value::Object(map)
}

// ---------------------------------------------------------------------------
// Schemas (databases)
// ---------------------------------------------------------------------------

pub(crate) fn decode_schema(
    value: &Value,
    scope: &Scope<'_>,
) -> Result<PropertySchema, DecodeError> {
    let map = as_object(value, scope)?;
    let (property_type, tag) = discriminant::<PropertyType>(map, "type", scope)?;
    let body_scope = scope.field(tag);
    let empty = Map::new();
    // Descriptors without options may arrive as null or not at all.
    let body = match map.get(tag) {
        None | Some(Value::Null) => &empty,
        Some(body) => as_object(body, &body_scope)?,
    };
    let options = |key: &str| -> Result<Vec<SelectOption>, DecodeError> {
        each(body.get(key), &body_scope.field(key), structural)
    };

    let config = match property_type {
        PropertyType::Title => PropertyConfig::Title,
        PropertyType::RichText => PropertyConfig::RichText,
        PropertyType::Number => PropertyConfig::Number {
            format: opt_string(body, "format", &body_scope)?,
        },
        PropertyType::Select => PropertyConfig::Select {
            options: options("options")?,
        },
        PropertyType::MultiSelect => PropertyConfig::MultiSelect {
            options: options("options")?,
        },
        PropertyType::Date => PropertyConfig::Date,
        PropertyType::People => PropertyConfig::People,
        PropertyType::Files => PropertyConfig::Files,
        PropertyType::Checkbox => PropertyConfig::Checkbox,
        PropertyType::Url => PropertyConfig::Url,
        PropertyType::Email => PropertyConfig::Email,
        PropertyType::PhoneNumber => PropertyConfig::PhoneNumber,
        PropertyType::Formula => PropertyConfig::Formula {
            expression: opt_string(body, "expression", &body_scope)?.unwrap_or_default(),
        },
        PropertyType::Relation => {
            PropertyConfig::Relation(structural(&Value::Object(body.clone()), &body_scope)?)
        }
        PropertyType::Rollup => {
            PropertyConfig::Rollup(structural(&Value::Object(body.clone()), &body_scope)?)
        }
        PropertyType::CreatedTime => PropertyConfig::CreatedTime,
        PropertyType::CreatedBy => PropertyConfig::CreatedBy,
        PropertyType::LastEditedTime => PropertyConfig::LastEditedTime,
        PropertyType::LastEditedBy => PropertyConfig::LastEditedBy,
    };

    Ok(PropertySchema {
        id: opt_string(map, "id", scope)?,
        name: opt_string(map, "name", scope)?,
        config,
    })
}

pub(crate) fn encode_schema(schema: &PropertySchema) -> Value {
    let tag = schema.property_type().as_str();
    let body = match &schema.config {
        PropertyConfig::Number { format } => match format {
            Some(format) => json!({ "format": format }),
            None => json!({}),
        },
        PropertyConfig::Select { options } | PropertyConfig::MultiSelect { options } => {
            json!({ "options": options })
        }
        PropertyConfig::Formula { expression } => json!({ "expression": expression }),
        PropertyConfig::Relation(relation) => json!(relation),
        PropertyConfig::Rollup(rollup) => json!(rollup),
        PropertyConfig::Title
        | PropertyConfig::RichText
        | PropertyConfig::Date
        | PropertyConfig::People
        | PropertyConfig::Files
        | PropertyConfig::Checkbox
        | PropertyConfig::Url
        | PropertyConfig::Email
        | PropertyConfig::PhoneNumber
        | PropertyConfig::CreatedTime
        | PropertyConfig::CreatedBy
        | PropertyConfig::LastEditedTime
        | PropertyConfig::LastEditedBy => json!({}),
    };
    let mut value = tagged(tag, body);
    if let Value::Object(map) = &mut value {
        if let Some(id) = &schema.id {
            map.insert("id".to_string(), json!(id));
        }
        if let Some(name) = &schema.name {
            map.insert("name".to_string(), json!(name));
        }
    }
    value
}

// ---------------------------------------------------------------------------
// Context inference
// ---------------------------------------------------------------------------

/// Guess whether a property payload is a page value or a schema descriptor.
///
/// Descriptors are always objects. Values are arrays, scalars, or null,
/// except for the few kinds whose values are themselves objects; those are
/// told apart by the fields only a value carries.
pub(crate) fn sniff_context(
    value: &Value,
    scope: &Scope<'_>,
) -> Result<PropertyContext, DecodeError> {
    let map = as_object(value, scope)?;
    let (property_type, tag) = discriminant::<PropertyType>(map, "type", scope)?;
    let body = match map.get(tag) {
        Some(Value::Object(body)) => body,
        Some(_) => return Ok(PropertyContext::Value),
        None => {
            return Err(scope.error(DecodeErrorKind::MissingField {
                field: tag.to_string(),
            }))
        }
    };

    let is_value = match property_type {
        PropertyType::Select => body.contains_key("name"),
        PropertyType::Date => body.contains_key("start"),
        PropertyType::Formula | PropertyType::Rollup => body.contains_key("type"),
        PropertyType::CreatedBy | PropertyType::LastEditedBy => body.contains_key("id"),
        PropertyType::Title
        | PropertyType::RichText
        | PropertyType::Number
        | PropertyType::MultiSelect
        | PropertyType::People
        | PropertyType::Files
        | PropertyType::Checkbox
        | PropertyType::Url
        | PropertyType::Email
        | PropertyType::PhoneNumber
        | PropertyType::Relation
        | PropertyType::CreatedTime
        | PropertyType::LastEditedTime => false,
    };

    Ok(if is_value {
        PropertyContext::Value
    } else {
        PropertyContext::Schema
    })
}
