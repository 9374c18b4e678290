use super::kinds::{MentionType, RichTextType};
use super::property::DateValue;
use super::user::User;
use super::Color;
use crate::types::{DatabaseId, PageId};
use serde::{Deserialize, Serialize};

/// One styled span of text.
#[derive(Debug, Clone, PartialEq)]
pub struct RichText {
    pub plain_text: String,
    pub href: Option<String>,
    pub annotations: Annotations,
    pub content: RichTextContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RichTextContent {
    Text(TextContent),
    Mention(Mention),
    Equation(Equation),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mention {
    User(User),
    Page { id: PageId },
    Database { id: DatabaseId },
    Date(DateValue),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    pub expression: String,
}

/// Text styling. Missing flags read as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl RichText {
    /// An unstyled text span.
    pub fn text(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            plain_text: content.clone(),
            href: None,
            annotations: Annotations::default(),
            content: RichTextContent::Text(TextContent {
                content,
                link: None,
            }),
        }
    }

    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        let mut span = Self::text(content);
        span.href = Some(url.clone());
        if let RichTextContent::Text(text) = &mut span.content {
            text.link = Some(Link { url });
        }
        span
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        let expression = expression.into();
        Self {
            plain_text: expression.clone(),
            href: None,
            annotations: Annotations::default(),
            content: RichTextContent::Equation(Equation { expression }),
        }
    }

    pub fn bold(mut self) -> Self {
        self.annotations.bold = true;
        self
    }

    pub fn rich_text_type(&self) -> RichTextType {
        match &self.content {
            RichTextContent::Text(_) => RichTextType::Text,
            RichTextContent::Mention(_) => RichTextType::Mention,
            RichTextContent::Equation(_) => RichTextType::Equation,
        }
    }
}

impl Mention {
    pub fn mention_type(&self) -> MentionType {
        match self {
            Mention::User(_) => MentionType::User,
            Mention::Page { .. } => MentionType::Page,
            Mention::Database { .. } => MentionType::Database,
            Mention::Date(_) => MentionType::Date,
        }
    }
}

/// Concatenate the plain text of a run of spans.
pub fn plain_text(spans: &[RichText]) -> String {
    spans.iter().map(|span| span.plain_text.as_str()).collect()
}
