// src/model/kinds.rs
//! Discriminator vocabularies.
//!
//! Every polymorphic family on the wire carries a tag string that selects
//! its variant. Each family gets a closed enum here; the decoder matches on
//! it exhaustively, so adding a tag without handling it is a compile error.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A closed set of wire tags for one polymorphic family.
pub trait Discriminator: Sized + Copy + fmt::Debug + 'static {
    /// Family name used in error messages, e.g. `"block"`.
    const FAMILY: &'static str;

    fn from_tag(tag: &str) -> Option<Self>;

    fn as_str(&self) -> &'static str;

    fn all() -> &'static [Self];
}

/// Declares a tag enum together with its wire spelling.
///
/// Extra spellings after `|` are accepted when decoding and never emitted.
macro_rules! discriminator {
    (
        $(#[$meta:meta])*
        $name:ident as $family:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }
        }

        impl Discriminator for $name {
            const FAMILY: &'static str = $family;

            fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $($tag $(| $alias)* => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn as_str(&self) -> &'static str {
                $name::as_str(self)
            }

            fn all() -> &'static [Self] {
                Self::ALL
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let tag = String::deserialize(deserializer)?;
                <$name as Discriminator>::from_tag(&tag).ok_or_else(|| {
                    D::Error::custom(format!("{} kind not supported: {:?}", $family, tag))
                })
            }
        }
    };
}

discriminator! {
    /// Top-level `object` tag.
    ObjectType as "object" {
        Page => "page",
        Database => "database",
        Block => "block",
        User => "user",
        List => "list",
        Error => "error",
    }
}

discriminator! {
    BlockType as "block" {
        Paragraph => "paragraph",
        Heading1 => "heading_1",
        Heading2 => "heading_2",
        Heading3 => "heading_3",
        BulletedListItem => "bulleted_list_item",
        NumberedListItem => "numbered_list_item",
        ToDo => "to_do",
        Toggle => "toggle",
        ChildPage => "child_page",
        /// Server-side placeholder for block types the API cannot express.
        Unsupported => "unsupported",
    }
}

discriminator! {
    /// Property kinds, shared by page values and database schemas.
    PropertyType as "property" {
        Title => "title",
        /// Older API versions spell this `text`.
        RichText => "rich_text" | "text",
        Number => "number",
        Select => "select",
        MultiSelect => "multi_select",
        Date => "date",
        People => "people",
        Files => "files",
        Checkbox => "checkbox",
        Url => "url",
        Email => "email",
        PhoneNumber => "phone_number",
        Formula => "formula",
        Relation => "relation",
        Rollup => "rollup",
        CreatedTime => "created_time",
        CreatedBy => "created_by",
        LastEditedTime => "last_edited_time",
        LastEditedBy => "last_edited_by",
    }
}

discriminator! {
    RichTextType as "rich text" {
        Text => "text",
        Mention => "mention",
        Equation => "equation",
    }
}

discriminator! {
    MentionType as "mention" {
        User => "user",
        Page => "page",
        Database => "database",
        Date => "date",
    }
}

discriminator! {
    /// The parent tag doubles as the name of the field holding the payload.
    ParentType as "parent" {
        Database => "database_id",
        Page => "page_id",
        Workspace => "workspace",
    }
}

discriminator! {
    UserType as "user" {
        Person => "person",
        Bot => "bot",
    }
}

discriminator! {
    FormulaType as "formula" {
        String => "string",
        Number => "number",
        Boolean => "boolean",
        Date => "date",
    }
}

discriminator! {
    RollupType as "rollup" {
        Number => "number",
        Date => "date",
        Array => "array",
    }
}

discriminator! {
    FileType as "file" {
        External => "external",
        Hosted => "file",
    }
}

discriminator! {
    /// Text and option colors. Not a discriminator on the wire, but the same
    /// closed vocabulary of tag strings.
    #[derive(Default)]
    Color as "color" {
        #[default]
        Default => "default",
        Gray => "gray",
        Brown => "brown",
        Orange => "orange",
        Yellow => "yellow",
        Green => "green",
        Blue => "blue",
        Purple => "purple",
        Pink => "pink",
        Red => "red",
        GrayBackground => "gray_background",
        BrownBackground => "brown_background",
        OrangeBackground => "orange_background",
        YellowBackground => "yellow_background",
        GreenBackground => "green_background",
        BlueBackground => "blue_background",
        PurpleBackground => "purple_background",
        PinkBackground => "pink_background",
        RedBackground => "red_background",
    }
}

impl Color {
    pub fn is_background(&self) -> bool {
        self.as_str().ends_with("_background")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_tags_round_trip<K: Discriminator + PartialEq>() {
        for kind in K::all() {
            assert_eq!(K::from_tag(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn test_every_tag_round_trips() {
        assert_tags_round_trip::<ObjectType>();
        assert_tags_round_trip::<BlockType>();
        assert_tags_round_trip::<PropertyType>();
        assert_tags_round_trip::<RichTextType>();
        assert_tags_round_trip::<MentionType>();
        assert_tags_round_trip::<ParentType>();
        assert_tags_round_trip::<UserType>();
        assert_tags_round_trip::<FormulaType>();
        assert_tags_round_trip::<RollupType>();
        assert_tags_round_trip::<FileType>();
        assert_tags_round_trip::<Color>();
    }

    #[test]
    fn test_legacy_text_alias() {
        assert_eq!(PropertyType::from_tag("text"), Some(PropertyType::RichText));
        assert_eq!(PropertyType::RichText.as_str(), "rich_text");
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(BlockType::from_tag("synced_block"), None);
        let err = serde_json::from_str::<BlockType>("\"synced_block\"").unwrap_err();
        assert!(err.to_string().contains("block kind not supported"));
    }

    #[test]
    fn test_colors() {
        assert!(Color::RedBackground.is_background());
        assert!(!Color::Red.is_background());
        assert_eq!(Color::default(), Color::Default);
        assert_eq!(
            serde_json::to_string(&Color::PinkBackground).unwrap(),
            "\"pink_background\""
        );
        assert!(serde_json::from_str::<Color>("\"ping\"").is_err());
    }

    #[test]
    fn test_block_type_count() {
        assert_eq!(BlockType::ALL.len(), 10);
        assert_eq!(PropertyType::ALL.len(), 19);
    }
}
