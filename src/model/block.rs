use super::kinds::BlockType;
use super::rich_text::RichText;
use crate::types::BlockId;

/// Expands to a match over every block variant that carries text.
///
/// Child pages and the unsupported placeholder take the fallback arm.
macro_rules! match_text_blocks {
    ($content:expr, $text:ident => $result:expr, _ => $fallback:expr) => {
        match $content {
            BlockContent::Paragraph(TextBlock { text: $text, .. })
            | BlockContent::BulletedListItem(TextBlock { text: $text, .. })
            | BlockContent::NumberedListItem(TextBlock { text: $text, .. })
            | BlockContent::Toggle(TextBlock { text: $text, .. })
            | BlockContent::Heading1(HeadingBlock { text: $text })
            | BlockContent::Heading2(HeadingBlock { text: $text })
            | BlockContent::Heading3(HeadingBlock { text: $text })
            | BlockContent::ToDo(ToDoBlock { text: $text, .. }) => $result,
            BlockContent::ChildPage(_) | BlockContent::Unsupported => $fallback,
        }
    };
}

/// A unit of page content.
///
/// Server-originated blocks carry an id and timestamps. Blocks built for
/// an append request leave them empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: Option<BlockId>,
    pub created_time: Option<String>,
    pub last_edited_time: Option<String>,
    /// Whether the server holds children for this block. Children are not
    /// embedded in list responses; fetch them with another list call.
    pub has_children: bool,
    pub content: BlockContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Paragraph(TextBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo(ToDoBlock),
    Toggle(TextBlock),
    ChildPage(ChildPageBlock),
    Unsupported,
}

/// Text with optional nested blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBlock {
    pub text: Vec<RichText>,
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadingBlock {
    pub text: Vec<RichText>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToDoBlock {
    pub text: Vec<RichText>,
    pub checked: bool,
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildPageBlock {
    pub title: String,
}

impl Block {
    /// A block ready to append. The server assigns id and timestamps.
    pub fn new(content: BlockContent) -> Self {
        let has_children = !content.children().is_empty();
        Self {
            id: None,
            created_time: None,
            last_edited_time: None,
            has_children,
            content,
        }
    }

    pub fn paragraph(text: Vec<RichText>) -> Self {
        Self::new(BlockContent::Paragraph(TextBlock {
            text,
            children: Vec::new(),
        }))
    }

    pub fn heading_1(text: Vec<RichText>) -> Self {
        Self::new(BlockContent::Heading1(HeadingBlock { text }))
    }

    pub fn heading_2(text: Vec<RichText>) -> Self {
        Self::new(BlockContent::Heading2(HeadingBlock { text }))
    }

    pub fn heading_3(text: Vec<RichText>) -> Self {
        Self::new(BlockContent::Heading3(HeadingBlock { text }))
    }

    pub fn to_do(text: Vec<RichText>, checked: bool) -> Self {
        Self::new(BlockContent::ToDo(ToDoBlock {
            text,
            checked,
            children: Vec::new(),
        }))
    }

    pub fn block_type(&self) -> BlockType {
        self.content.block_type()
    }

    pub fn text(&self) -> &[RichText] {
        self.content.text()
    }

    pub fn children(&self) -> &[Block] {
        self.content.children()
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self.content, BlockContent::Unsupported)
    }
}

impl BlockContent {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockContent::Paragraph(_) => BlockType::Paragraph,
            BlockContent::Heading1(_) => BlockType::Heading1,
            BlockContent::Heading2(_) => BlockType::Heading2,
            BlockContent::Heading3(_) => BlockType::Heading3,
            BlockContent::BulletedListItem(_) => BlockType::BulletedListItem,
            BlockContent::NumberedListItem(_) => BlockType::NumberedListItem,
            BlockContent::ToDo(_) => BlockType::ToDo,
            BlockContent::Toggle(_) => BlockType::Toggle,
            BlockContent::ChildPage(_) => BlockType::ChildPage,
            BlockContent::Unsupported => BlockType::Unsupported,
        }
    }

    /// The block's spans; empty for variants without text.
    pub fn text(&self) -> &[RichText] {
        match_text_blocks!(self, text => text.as_slice(), _ => &[])
    }

    pub fn children(&self) -> &[Block] {
        self.children_slot().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mutable access to nested blocks, for variants that can hold them.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Block>> {
        match self {
            BlockContent::Paragraph(block)
            | BlockContent::BulletedListItem(block)
            | BlockContent::NumberedListItem(block)
            | BlockContent::Toggle(block) => Some(&mut block.children),
            BlockContent::ToDo(block) => Some(&mut block.children),
            BlockContent::Heading1(_)
            | BlockContent::Heading2(_)
            | BlockContent::Heading3(_)
            | BlockContent::ChildPage(_)
            | BlockContent::Unsupported => None,
        }
    }

    fn children_slot(&self) -> Option<&Vec<Block>> {
        match self {
            BlockContent::Paragraph(block)
            | BlockContent::BulletedListItem(block)
            | BlockContent::NumberedListItem(block)
            | BlockContent::Toggle(block) => Some(&block.children),
            BlockContent::ToDo(block) => Some(&block.children),
            BlockContent::Heading1(_)
            | BlockContent::Heading2(_)
            | BlockContent::Heading3(_)
            | BlockContent::ChildPage(_)
            | BlockContent::Unsupported => None,
        }
    }
}
