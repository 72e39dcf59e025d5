//! Markdown to styled, inline-annotated text for streaming chat UIs.
//!
//! The pipeline, front to back:
//!
//! 1. [`thinking`] rewrites `<thinking>` tag pairs into fenced blocks so
//!    model reasoning flows through Markdown parsing unchanged.
//! 2. `markweave-syntax` parses the result into a lossless tree.
//! 3. [`annotate`] walks inline syntax into [`text::StyledText`]: flat
//!    strings with style spans, URL annotations, and inline-object anchors.
//! 4. [`render`] folds the tree's top level into [`render::Document`]
//!    blocks (headings, lists, tables, collapsible thinking blocks).
//! 5. [`registry`] resolves inline-object anchors against host-registered
//!    renderers, and [`fade`] overlays the streaming fade on block tails.
//!
//! ```
//! use markweave_engine::prelude::*;
//!
//! let theme = Theme::default();
//! let doc = Renderer::new(&theme).render("Hello **world**");
//! let Block::Paragraph { content } = &doc.blocks[0] else { unreachable!() };
//! assert_eq!(content.text(), "Hello world");
//! ```

pub mod annotate;
pub mod fade;
pub mod registry;
pub mod render;
pub mod text;
pub mod theme;
pub mod thinking;

pub mod prelude {
    pub use crate::annotate::{MARKDOWN_IMAGE_URL, MARKDOWN_URL, NodeAnnotator};
    pub use crate::fade::{FadeSettings, FadeState, apply_fade};
    pub use crate::registry::{InlineObjectRegistry, PlaceholderSize};
    pub use crate::render::{Block, Document, ListItem, Marker, Renderer, ThinkingBlock};
    pub use crate::text::{Color, FontWeight, RunStyle, StyledText, StyledTextBuilder};
    pub use crate::theme::Theme;
}
