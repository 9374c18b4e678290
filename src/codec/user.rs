use super::{as_object, discriminant, nullable, opt_string, payload, structural, Scope};
use crate::error::DecodeError;
use crate::model::{User, UserKind, UserType};
use serde_json::{json, Map, Value};

serde_via_codec!(User, encode, decode_reference);

/// Whether a user payload must say what kind of user it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KindRequirement {
    /// Users endpoints always return full objects.
    Required,
    /// Property values and mentions may carry only an id.
    Optional,
}

pub(crate) fn decode(
    value: &Value,
    scope: &Scope<'_>,
    requirement: KindRequirement,
) -> Result<User, DecodeError> {
    let map = as_object(value, scope)?;
    let id = structural(payload(map, "id", scope)?, &scope.field("id"))?;

    let kind = match (map.get("type"), requirement) {
        (None | Some(Value::Null), KindRequirement::Optional) => None,
        _ => {
            let (user_type, tag) = discriminant::<UserType>(map, "type", scope)?;
            let body_scope = scope.field(tag);
            Some(match user_type {
                UserType::Person => {
                    UserKind::Person(nullable(map.get(tag), &body_scope)?.unwrap_or_default())
                }
                UserType::Bot => {
                    UserKind::Bot(nullable(map.get(tag), &body_scope)?.unwrap_or_default())
                }
            })
        }
    };

    Ok(User {
        id,
        name: opt_string(map, "name", scope)?,
        avatar_url: opt_string(map, "avatar_url", scope)?,
        kind,
    })
}

pub(crate) fn decode_reference(value: &Value, scope: &Scope<'_>) -> Result<User, DecodeError> {
    decode(value, scope, KindRequirement::Optional)
}

pub(crate) fn encode(user: &User) -> Value {
    let mut map = Map::new();
    map.insert("object".to_string(), json!("user"));
    map.insert("id".to_string(), json!(user.id));
    if let Some(name) = &user.name {
        map.insert("name".to_string(), json!(name));
    }
    if let Some(avatar_url) = &user.avatar_url {
        map.insert("avatar_url".to_string(), json!(avatar_url));
    }
    if let Some(kind) = &user.kind {
        let tag = kind.user_type().as_str();
        let body = match kind {
            UserKind::Person(person) => json!(person),
            UserKind::Bot(bot) => json!(bot),
        };
        map.insert("type".to_string(), json!(tag));
        map.insert(tag.to_string(), body);
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;
    use crate::model::Person;
    use pretty_assertions::assert_eq;

    fn root() -> Scope<'static> {
        Scope::root(8)
    }

    #[test]
    fn test_person_with_email() {
        let value = json!({
            "object": "user",
            "id": "be32e790-8292-46df-a248-b784fdf483cf",
            "name": "Jane Doe",
            "avatar_url": "https://example.com/image.png",
            "type": "person",
            "person": { "email": "jane@example.com" }
        });
        let user = decode(&value, &root(), KindRequirement::Required).unwrap();
        assert_eq!(user.name.as_deref(), Some("Jane Doe"));
        assert_eq!(user.email(), Some("jane@example.com"));
        assert_eq!(
            user.kind,
            Some(UserKind::Person(Person {
                email: Some("jane@example.com".to_string())
            }))
        );
        assert_eq!(encode(&user), value);
    }

    #[test]
    fn test_bot() {
        let value = json!({ "id": "u1", "type": "bot", "bot": {} });
        let user = decode(&value, &root(), KindRequirement::Required).unwrap();
        assert_eq!(user.user_type(), Some(UserType::Bot));
    }

    #[test]
    fn test_reference_without_kind() {
        let value = json!({ "object": "user", "id": "u1" });
        let user = decode_reference(&value, &root()).unwrap();
        assert_eq!(user.kind, None);

        let err = decode(&value, &root(), KindRequirement::Required).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::MissingDiscriminator { .. }));
    }

    #[test]
    fn test_unknown_user_type() {
        let value = json!({ "id": "u1", "type": "group" });
        let err = decode(&value, &root(), KindRequirement::Required).unwrap_err();
        assert_eq!(err.path, "type");
        assert_eq!(err.unsupported_tag(), Some("group"));
    }
}
