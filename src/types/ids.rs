//! Object IDs, typed by the kind of object they name.

use super::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use url::Url;

/// Names the object kind an [`Id`] refers to.
pub trait IdKind {
    /// Used in validation messages.
    const LABEL: &'static str;
}

macro_rules! id_kinds {
    ($($marker:ident => $alias:ident, $label:literal;)+) => {
        $(
            #[derive(Debug)]
            pub enum $marker {}

            impl IdKind for $marker {
                const LABEL: &'static str = $label;
            }

            pub type $alias = Id<$marker>;
        )+
    };
}

id_kinds! {
    PageObject => PageId, "page";
    BlockObject => BlockId, "block";
    DatabaseObject => DatabaseId, "database";
    UserObject => UserId, "user";
}

/// A Notion object ID.
///
/// IDs decoded from responses are kept exactly as the server sent them.
/// IDs built with [`Id::parse`] are normalized to 32 lowercase hex digits.
/// Either form is rendered with dashes when used in a request path.
pub struct Id<K> {
    value: String,
    kind: PhantomData<fn() -> K>,
}

impl<K: IdKind> Id<K> {
    /// Accepts a bare ID, a dashed UUID, or a Notion URL whose last path
    /// segment ends in an ID.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        let candidate = match Url::parse(input) {
            Ok(url) if url.has_host() => last_segment(&url)
                .ok_or_else(|| invalid::<K>(input, "URL has no path segment"))?,
            _ => input.to_string(),
        };

        let hex: String = candidate.chars().filter(|c| *c != '-').collect();
        // Page URLs prefix the ID with a slug: "Weekly-Plan-<id>".
        let tail = match hex.len().checked_sub(32) {
            Some(start) if hex.is_char_boundary(start) => &hex[start..],
            _ => return Err(invalid::<K>(input, "expected 32 hex digits")),
        };
        if input == candidate && hex.len() != 32 {
            return Err(invalid::<K>(input, "expected 32 hex digits"));
        }
        if !tail.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid::<K>(input, "contains non-hex characters"));
        }
        Ok(Self::from_normalized(tail.to_ascii_lowercase()))
    }
}

impl<K> Id<K> {
    pub(crate) fn from_normalized(value: String) -> Self {
        Self {
            value,
            kind: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The 8-4-4-4-12 form used in request paths. Values that are not 32 hex
    /// digits are returned unchanged.
    pub fn to_dashed(&self) -> String {
        if self.value.len() != 32 || !self.value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return self.value.clone();
        }
        let v = &self.value;
        format!("{}-{}-{}-{}-{}", &v[..8], &v[8..12], &v[12..16], &v[16..20], &v[20..])
    }
}

fn invalid<K: IdKind>(input: &str, reason: &'static str) -> ValidationError {
    ValidationError::InvalidId {
        kind: K::LABEL,
        input: input.to_string(),
        reason,
    }
}

fn last_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}

/// Pages are blocks too; their children are listed through the blocks API.
impl From<PageId> for BlockId {
    fn from(id: PageId) -> Self {
        Self::from_normalized(id.value)
    }
}

impl<K> Clone for Id<K> {
    fn clone(&self) -> Self {
        Self::from_normalized(self.value.clone())
    }
}

impl<K> PartialEq for Id<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K> Eq for Id<K> {}

impl<K> Hash for Id<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<K: IdKind> fmt::Debug for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&K::LABEL).field(&self.value).finish()
    }
}

impl<K> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<K> Serialize for Id<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, K> Deserialize<'de> for Id<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from_normalized)
    }
}
