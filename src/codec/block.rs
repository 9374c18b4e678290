use super::rich_text::{decode_spans, encode_spans};
use super::{as_object, discriminant, each, flag, opt_string, payload, structural, Scope};
use crate::error::{DecodeError, DecodeErrorKind};
use crate::model::{
    Block, BlockContent, BlockType, ChildPageBlock, HeadingBlock, ObjectType, RichText, TextBlock,
    ToDoBlock,
};
use crate::types::BlockId;
use serde::Deserialize;
use serde_json::{json, Map, Value};

serde_via_codec!(Block, encode, decode);

/// Fields every block shares, read before dispatching on `type`.
#[derive(Deserialize)]
struct RawBlock {
    #[serde(default)]
    object: Option<String>,
    #[serde(default)]
    id: Option<BlockId>,
    #[serde(default)]
    created_time: Option<String>,
    #[serde(default)]
    last_edited_time: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    has_children: bool,
}

pub(crate) fn decode(value: &Value, scope: &Scope<'_>) -> Result<Block, DecodeError> {
    let scope = scope.nested()?;
    let map = as_object(value, &scope)?;
    let raw: RawBlock = structural(value, &scope)?;
    if let Some(object) = raw.object.as_deref() {
        if object != ObjectType::Block.as_str() {
            return Err(scope.field("object").error(DecodeErrorKind::UnexpectedObject {
                expected: ObjectType::Block.as_str(),
                found: object.to_string(),
            }));
        }
    }

    let (block_type, tag) = discriminant::<BlockType>(map, "type", &scope)?;
    let body_scope = scope.field(tag);

    let content = match block_type {
        BlockType::Paragraph => BlockContent::Paragraph(text_block(map, tag, &scope)?),
        BlockType::Heading1 => BlockContent::Heading1(heading(map, tag, &scope)?),
        BlockType::Heading2 => BlockContent::Heading2(heading(map, tag, &scope)?),
        BlockType::Heading3 => BlockContent::Heading3(heading(map, tag, &scope)?),
        BlockType::BulletedListItem => {
            BlockContent::BulletedListItem(text_block(map, tag, &scope)?)
        }
        BlockType::NumberedListItem => {
            BlockContent::NumberedListItem(text_block(map, tag, &scope)?)
        }
        BlockType::ToDo => {
            let body = as_object(payload(map, tag, &scope)?, &body_scope)?;
            let TextBlock { text, children } = text_block(map, tag, &scope)?;
            BlockContent::ToDo(ToDoBlock {
                text,
                checked: flag(body, "checked", &body_scope)?,
                children,
            })
        }
        BlockType::Toggle => BlockContent::Toggle(text_block(map, tag, &scope)?),
        BlockType::ChildPage => {
            let body = as_object(payload(map, tag, &scope)?, &body_scope)?;
            BlockContent::ChildPage(ChildPageBlock {
                title: opt_string(body, "title", &body_scope)?.unwrap_or_default(),
            })
        }
        BlockType::Unsupported => BlockContent::Unsupported,
    };

    Ok(Block {
        id: raw.id,
        created_time: raw.created_time,
        last_edited_time: raw.last_edited_time,
        has_children: raw.has_children,
        content,
    })
}

/// Spans live under `rich_text`; older API versions call the field `text`.
fn spans(body: &Map<String, Value>, scope: &Scope<'_>) -> Result<Vec<RichText>, DecodeError> {
    let key = if body.contains_key("rich_text") {
        "rich_text"
    } else {
        "text"
    };
    decode_spans(body.get(key), &scope.field(key))
}

fn heading(
    map: &Map<String, Value>,
    tag: &str,
    scope: &Scope<'_>,
) -> Result<HeadingBlock, DecodeError> {
    let body_scope = scope.field(tag);
    let body = as_object(payload(map, tag, scope)?, &body_scope)?;
    Ok(HeadingBlock {
        text: spans(body, &body_scope)?,
    })
}

/// Children sit inside the type payload; some producers put them beside it.
fn text_block(
    map: &Map<String, Value>,
    tag: &str,
    scope: &Scope<'_>,
) -> Result<TextBlock, DecodeError> {
    let body_scope = scope.field(tag);
    let body = as_object(payload(map, tag, scope)?, &body_scope)?;
    let text = spans(body, &body_scope)?;
    let children = match body.get("children") {
        Some(children) => each(Some(children), &body_scope.field("children"), decode)?,
        None => each(map.get("children"), &scope.field("children"), decode)?,
    };
    Ok(TextBlock { text, children })
}

pub(crate) fn encode(block: &Block) -> Value {
    let tag = block.block_type().as_str();
    let mut map = Map::new();
    map.insert("object".to_string(), json!(ObjectType::Block.as_str()));
    // Metadata belongs to the server; request-built blocks carry none.
    if let Some(id) = &block.id {
        map.insert("id".to_string(), json!(id));
        if let Some(created_time) = &block.created_time {
            map.insert("created_time".to_string(), json!(created_time));
        }
        if let Some(last_edited_time) = &block.last_edited_time {
            map.insert("last_edited_time".to_string(), json!(last_edited_time));
        }
        map.insert("has_children".to_string(), json!(block.has_children));
    }
    map.insert("type".to_string(), json!(tag));
    map.insert(tag.to_string(), encode_content(&block.content));
    Value::Object(map)
}

fn encode_content(content: &BlockContent) -> Value {
    match content {
        BlockContent::Paragraph(block)
        | BlockContent::BulletedListItem(block)
        | BlockContent::NumberedListItem(block)
        | BlockContent::Toggle(block) => text_body(&block.text, &block.children),
        BlockContent::Heading1(block)
        | BlockContent::Heading2(block)
        | BlockContent::Heading3(block) => json!({ "text": encode_spans(&block.text) }),
        BlockContent::ToDo(block) => {
            let mut body = text_body(&block.text, &block.children);
            if let Value::Object(map) = &mut body {
                map.insert("checked".to_string(), json!(block.checked));
            }
            body
        }
        BlockContent::ChildPage(block) => json!({ "title": block.title }),
        BlockContent::Unsupported => json!({}),
    }
}

fn text_body(text: &[RichText], children: &[Block]) -> Value {
    let mut body = Map::new();
    body.insert("text".to_string(), encode_spans(text));
    if !children.is_empty() {
        body.insert(
            "children".to_string(),
            Value::Array(children.iter().map(encode).collect()),
        );
    }
    Value::Object(body)
}
