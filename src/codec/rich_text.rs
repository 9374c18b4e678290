use super::user::{self, KindRequirement};
use super::{as_object, discriminant, nullable, opt_string, payload, structural, Scope};
use crate::error::DecodeError;
use crate::model::{Mention, MentionType, PageReference, RichText, RichTextContent, RichTextType};
use crate::types::DatabaseId;
use serde::Deserialize;
use serde_json::{json, Map, Value};

serde_via_codec!(RichText, encode, decode);

#[derive(Deserialize)]
struct DatabaseReference {
    id: DatabaseId,
}

pub(crate) fn decode(value: &Value, scope: &Scope<'_>) -> Result<RichText, DecodeError> {
    let map = as_object(value, scope)?;
    let (rich_text_type, tag) = discriminant::<RichTextType>(map, "type", scope)?;
    let body_scope = scope.field(tag);
    let body = payload(map, tag, scope)?;

    let content = match rich_text_type {
        RichTextType::Text => RichTextContent::Text(structural(body, &body_scope)?),
        RichTextType::Mention => RichTextContent::Mention(decode_mention(body, &body_scope)?),
        RichTextType::Equation => RichTextContent::Equation(structural(body, &body_scope)?),
    };

    // Spans built by hand may omit plain_text; fall back to the content.
    let plain_text = match opt_string(map, "plain_text", scope)? {
        Some(text) => text,
        None => match &content {
            RichTextContent::Text(text) => text.content.clone(),
            RichTextContent::Equation(equation) => equation.expression.clone(),
            RichTextContent::Mention(_) => String::new(),
        },
    };

    Ok(RichText {
        plain_text,
        href: opt_string(map, "href", scope)?,
        annotations: nullable(map.get("annotations"), &scope.field("annotations"))?
            .unwrap_or_default(),
        content,
    })
}

/// Decode an array of spans. Absent and null read as no spans.
pub(crate) fn decode_spans(
    value: Option<&Value>,
    scope: &Scope<'_>,
) -> Result<Vec<RichText>, DecodeError> {
    super::each(value, scope, decode)
}

fn decode_mention(value: &Value, scope: &Scope<'_>) -> Result<Mention, DecodeError> {
    let map = as_object(value, scope)?;
    let (mention_type, tag) = discriminant::<MentionType>(map, "type", scope)?;
    let body_scope = scope.field(tag);
    let body = payload(map, tag, scope)?;

    Ok(match mention_type {
        MentionType::User => {
            Mention::User(user::decode(body, &body_scope, KindRequirement::Optional)?)
        }
        MentionType::Page => Mention::Page {
            id: structural::<PageReference>(body, &body_scope)?.id,
        },
        MentionType::Database => Mention::Database {
            id: structural::<DatabaseReference>(body, &body_scope)?.id,
        },
        MentionType::Date => Mention::Date(structural(body, &body_scope)?),
    })
}

pub(crate) fn encode(span: &RichText) -> Value {
    let tag = span.rich_text_type().as_str();
    let body = match &span.content {
        RichTextContent::Text(text) => json!(text),
        RichTextContent::Mention(mention) => encode_mention(mention),
        RichTextContent::Equation(equation) => json!(equation),
    };

    let mut map = Map::new();
    map.insert("type".to_string(), json!(tag));
    map.insert(tag.to_string(), body);
    map.insert("annotations".to_string(), json!(span.annotations));
    map.insert("plain_text".to_string(), json!(span.plain_text));
    map.insert("href".to_string(), json!(span.href));
    Value::Object(map)
}

pub(crate) fn encode_spans(spans: &[RichText]) -> Value {
    Value::Array(spans.iter().map(encode).collect())
}

fn encode_mention(mention: &Mention) -> Value {
    let tag = mention.mention_type().as_str();
    let body = match mention {
        Mention::User(user) => user::encode(user),
        Mention::Page { id } => json!({ "id": id }),
        Mention::Database { id } => json!({ "id": id }),
        Mention::Date(date) => json!(date),
    };
    let mut map = Map::new();
    map.insert("type".to_string(), json!(tag));
    map.insert(tag.to_string(), body);
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;
    use crate::model::{Annotations, DateValue, Link, TextContent};
    use crate::model::Color;
    use pretty_assertions::assert_eq;

    fn root() -> Scope<'static> {
        Scope::root(8)
    }

    #[test]
    fn test_text_span_round_trip() {
        let value = json!({
            "type": "text",
            "text": { "content": "Lacinato kale", "link": { "url": "https://example.com" } },
            "annotations": {
                "bold": true,
                "italic": false,
                "strikethrough": false,
                "underline": false,
                "code": false,
                "color": "green"
            },
            "plain_text": "Lacinato kale",
            "href": "https://example.com"
        });
        let span = decode(&value, &root()).unwrap();
        assert_eq!(
            span.content,
            RichTextContent::Text(TextContent {
                content: "Lacinato kale".to_string(),
                link: Some(Link {
                    url: "https://example.com".to_string()
                }),
            })
        );
        assert_eq!(
            span.annotations,
            Annotations {
                bold: true,
                color: Color::Green,
                ..Annotations::default()
            }
        );
        assert_eq!(encode(&span), value);
    }

    #[test]
    fn test_missing_annotations_default_to_plain() {
        let value = json!({ "type": "text", "text": { "content": "hi" } });
        let span = decode(&value, &root()).unwrap();
        assert_eq!(span.annotations, Annotations::default());
        assert_eq!(span.plain_text, "hi");
        assert_eq!(span.href, None);
    }

    #[test]
    fn test_mentions() {
        let value = json!([
            { "type": "mention", "plain_text": "@Jane",
              "mention": { "type": "user", "user": { "object": "user", "id": "u1" } } },
            { "type": "mention", "plain_text": "Notes",
              "mention": { "type": "page", "page": { "id": "p1" } } },
            { "type": "mention", "plain_text": "2021-05-13",
              "mention": { "type": "date", "date": { "start": "2021-05-13", "end": null } } }
        ]);
        let spans = decode_spans(Some(&value), &root()).unwrap();
        assert_eq!(spans.len(), 3);
        assert!(matches!(
            &spans[0].content,
            RichTextContent::Mention(Mention::User(user)) if user.id.as_str() == "u1"
        ));
        assert!(matches!(
            &spans[1].content,
            RichTextContent::Mention(Mention::Page { id }) if id.as_str() == "p1"
        ));
        assert_eq!(
            spans[2].content,
            RichTextContent::Mention(Mention::Date(DateValue {
                start: "2021-05-13".to_string(),
                end: None,
                time_zone: None,
            }))
        );
    }

    #[test]
    fn test_equation() {
        let value = json!({ "type": "equation", "equation": { "expression": "e=mc^2" } });
        let span = decode(&value, &root()).unwrap();
        assert_eq!(span.plain_text, "e=mc^2");
        assert_eq!(span.rich_text_type(), RichTextType::Equation);
    }

    #[test]
    fn test_unknown_mention_type_names_path() {
        let value = json!([
            { "type": "text", "text": { "content": "ok" } },
            { "type": "mention", "mention": { "type": "template_mention" } }
        ]);
        let err = decode_spans(Some(&value), &root().field("title")).unwrap_err();
        assert_eq!(err.path, "title[1].mention.type");
        assert!(matches!(
            err.kind,
            DecodeErrorKind::UnsupportedKind { family: "mention", .. }
        ));
    }
}
