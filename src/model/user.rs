use super::kinds::UserType;
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// A workspace member or integration.
///
/// Property values and mentions often carry only a reference (`id` alone);
/// `kind` is `None` there. Users fetched from the Users endpoints always
/// carry a kind.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub kind: Option<UserKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserKind {
    Person(Person),
    Bot(Bot),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {}

impl User {
    /// A bare reference, as used when assigning people to a property.
    pub fn reference(id: UserId) -> Self {
        Self {
            id,
            name: None,
            avatar_url: None,
            kind: None,
        }
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.kind.as_ref().map(UserKind::user_type)
    }

    pub fn email(&self) -> Option<&str> {
        match &self.kind {
            Some(UserKind::Person(person)) => person.email.as_deref(),
            _ => None,
        }
    }
}

impl UserKind {
    pub fn user_type(&self) -> UserType {
        match self {
            UserKind::Person(_) => UserType::Person,
            UserKind::Bot(_) => UserType::Bot,
        }
    }
}
