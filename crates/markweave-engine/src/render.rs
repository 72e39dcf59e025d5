//! Block-level rendering: source text to a [`Document`] of blocks.
//!
//! The renderer owns the full pipeline: preprocess thinking tags, parse,
//! then fold the tree's top-level nodes into blocks a host can lay out.
//! Inline content inside each block is rendered with the walker from
//! [`crate::annotate`]; block structure (list grouping, table rows,
//! collapsible thinking bodies) is decided here.

use markweave_syntax::{SyntaxKind, SyntaxNode, parse};

use crate::annotate::{NodeAnnotator, Walker};
use crate::text::{RunStyle, StyledText, StyledTextBuilder};
use crate::theme::Theme;
use crate::thinking;

/// A rendered document: a flat list of blocks in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        level: u8,
        content: StyledText,
    },
    Paragraph {
        content: StyledText,
    },
    Quote {
        content: StyledText,
    },
    List {
        items: Vec<ListItem>,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    Thinking(ThinkingBlock),
    Table {
        header: Vec<StyledText>,
        rows: Vec<Vec<StyledText>>,
    },
    ThematicBreak,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    /// Nesting level, zero-based. Two spaces of indent per level.
    pub depth: usize,
    pub marker: Marker,
    /// `Some` for task-list items.
    pub checked: Option<bool>,
    pub content: StyledText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Bullet,
    Ordered(u64),
}

/// A collapsible reasoning block. Starts closed; the host flips `open` on
/// interaction and renders `body` when it is.
#[derive(Debug, Clone, PartialEq)]
pub struct ThinkingBlock {
    pub title: String,
    pub open: bool,
    pub body: Document,
}

impl ThinkingBlock {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }
}

pub struct Renderer<'a> {
    theme: &'a Theme,
    annotators: Vec<Box<dyn NodeAnnotator>>,
}

impl<'a> Renderer<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            annotators: Vec::new(),
        }
    }

    pub fn with_annotator(mut self, annotator: Box<dyn NodeAnnotator>) -> Self {
        self.annotators.push(annotator);
        self
    }

    /// Render Markdown (possibly containing thinking tags) into a document.
    pub fn render(&self, source: &str) -> Document {
        let source = thinking::preprocess(source);
        let tree = parse(&source);
        Document {
            blocks: self.blocks(&tree),
        }
    }

    fn blocks(&self, root: &SyntaxNode) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut items: Vec<ListItem> = Vec::new();
        for child in root.children() {
            if child.kind() == SyntaxKind::LIST_ITEM {
                items.push(self.list_item(&child));
                continue;
            }
            if !items.is_empty() {
                blocks.push(Block::List {
                    items: std::mem::take(&mut items),
                });
            }
            blocks.push(self.block(&child));
        }
        if !items.is_empty() {
            blocks.push(Block::List { items });
        }
        blocks
    }

    fn block(&self, node: &SyntaxNode) -> Block {
        match node.kind() {
            SyntaxKind::HEADING => self.heading(node),
            SyntaxKind::BLOCK_QUOTE => Block::Quote {
                content: self.inline(node, Some(self.theme.quote())),
            },
            SyntaxKind::FENCED_CODE => self.fence(node),
            SyntaxKind::TABLE => self.table(node),
            SyntaxKind::THEMATIC_BREAK => Block::ThematicBreak,
            _ => Block::Paragraph {
                content: self.inline(node, None),
            },
        }
    }

    fn inline(&self, node: &SyntaxNode, style: Option<RunStyle>) -> StyledText {
        let mut out = StyledTextBuilder::new();
        if let Some(style) = style {
            out.push_style(style);
        }
        Walker::new(self.theme, &self.annotators).append(&mut out, node);
        out.build()
    }

    fn heading(&self, node: &SyntaxNode) -> Block {
        let level = node
            .children_with_tokens()
            .filter(|e| e.kind() == SyntaxKind::HASH)
            .count()
            .clamp(1, 6) as u8;
        let content = match child_of(node, SyntaxKind::INLINE) {
            Some(inline) => self.inline(&inline, Some(self.theme.heading(level))),
            None => StyledText::default(),
        };
        Block::Heading { level, content }
    }

    fn list_item(&self, node: &SyntaxNode) -> ListItem {
        let mut depth = 0;
        let mut marker = Marker::Bullet;
        for element in node.children_with_tokens() {
            match element.kind() {
                SyntaxKind::WHITESPACE => {
                    depth = element.to_string().chars().count() / 2;
                }
                SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::PLUS => break,
                SyntaxKind::TEXT => {
                    let text = element.to_string();
                    let digits: String =
                        text.chars().take_while(char::is_ascii_digit).collect();
                    if let Ok(n) = digits.parse() {
                        marker = Marker::Ordered(n);
                    }
                    break;
                }
                _ => break,
            }
        }
        let checked = child_of(node, SyntaxKind::CHECKBOX)
            .map(|c| c.text().to_string().contains(['x', 'X']));
        let content = match child_of(node, SyntaxKind::INLINE) {
            Some(inline) => self.inline(&inline, None),
            None => StyledText::default(),
        };
        ListItem {
            depth,
            marker,
            checked,
            content,
        }
    }

    fn fence(&self, node: &SyntaxNode) -> Block {
        let info = thinking::fence_info(node).unwrap_or_default();
        let content = thinking::fence_content(node);
        if thinking::is_thinking(&info) {
            return Block::Thinking(ThinkingBlock {
                title: thinking::fence_title(&info),
                open: false,
                body: self.render(&content),
            });
        }
        Block::CodeBlock {
            language: info.split_whitespace().next().map(str::to_owned),
            code: content,
        }
    }

    fn table(&self, node: &SyntaxNode) -> Block {
        let mut rows: Vec<Vec<StyledText>> = node
            .children()
            .filter(|n| n.kind() == SyntaxKind::TABLE_ROW)
            .map(|row| {
                row.children()
                    .filter(|n| n.kind() == SyntaxKind::TABLE_CELL)
                    .map(|cell| self.inline(&cell, None).trim_end())
                    .collect()
            })
            .collect();
        let header = if rows.is_empty() {
            Vec::new()
        } else {
            rows.remove(0)
        };
        Block::Table { header, rows }
    }
}

fn child_of(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|c| c.kind() == kind)
}
