use super::{as_object, discriminant, payload, structural, Scope};
use crate::error::DecodeError;
use crate::model::{Parent, ParentType};
use serde_json::{json, Map, Value};

serde_via_codec!(Parent, encode, decode);

pub(crate) fn decode(value: &Value, scope: &Scope<'_>) -> Result<Parent, DecodeError> {
    decode_map(as_object(value, scope)?, scope)
}

pub(crate) fn decode_map(
    map: &Map<String, Value>,
    scope: &Scope<'_>,
) -> Result<Parent, DecodeError> {
    let (parent_type, tag) = discriminant::<ParentType>(map, "type", scope)?;
    let id_scope = scope.field(tag);
    Ok(match parent_type {
        ParentType::Database => Parent::Database {
            database_id: structural(payload(map, tag, scope)?, &id_scope)?,
        },
        ParentType::Page => Parent::Page {
            page_id: structural(payload(map, tag, scope)?, &id_scope)?,
        },
        ParentType::Workspace => Parent::Workspace,
    })
}

pub(crate) fn encode(parent: &Parent) -> Value {
    match parent {
        Parent::Database { database_id } => json!({
            "type": ParentType::Database.as_str(),
            "database_id": database_id,
        }),
        Parent::Page { page_id } => json!({
            "type": ParentType::Page.as_str(),
            "page_id": page_id,
        }),
        Parent::Workspace => json!({
            "type": ParentType::Workspace.as_str(),
            "workspace": true,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;
    use crate::types::DatabaseId;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_database_parent() {
        let value = json!({
            "type": "database_id",
            "database_id": "48f8fee9-cd79-4180-bc2f-ec0398253067"
        });
        let parent = decode(&value, &Scope::root(8)).unwrap();
        assert_eq!(
            parent,
            Parent::Database {
                database_id: DatabaseId::from_normalized(
                    "48f8fee9-cd79-4180-bc2f-ec0398253067".to_string()
                )
            }
        );
        assert_eq!(encode(&parent), value);
    }

    #[test]
    fn test_workspace_parent() {
        let value = json!({ "type": "workspace", "workspace": true });
        assert_eq!(decode(&value, &Scope::root(8)).unwrap(), Parent::Workspace);
    }

    #[test]
    fn test_page_parent_missing_id() {
        let value = json!({ "type": "page_id" });
        let err = decode(&value, &Scope::root(8)).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::MissingField { ref field } if field == "page_id"));
    }
}
