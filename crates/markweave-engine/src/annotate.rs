//! Token-level walker from syntax trees to [`StyledText`].
//!
//! Inline text is re-synthesized token by token rather than sliced from the
//! source: whitespace runs collapse to a single space, marker characters are
//! dropped only when their parent node actually consumed them, and escapes
//! lose their backslash. An unmatched `*` therefore renders as a literal
//! star because the parser left it outside any EMPHASIS node, not because
//! of any special-casing here.

use std::borrow::Cow;

use markweave_syntax::{SyntaxElement, SyntaxKind, SyntaxNode};

use crate::text::{RunStyle, StyledText, StyledTextBuilder};
use crate::theme::Theme;

/// Annotation tag carrying a link destination.
pub const MARKDOWN_URL: &str = "MARKDOWN_URL";
/// Annotation tag and inline-object key carrying an image source.
pub const MARKDOWN_IMAGE_URL: &str = "MARKDOWN_IMAGE_URL";

/// A hook that may take over rendering of an element.
///
/// Annotators are consulted in order for every child the walker visits,
/// nodes and tokens alike, before the built-in dispatch; the first one to
/// return `true` wins and the element is not processed further.
pub trait NodeAnnotator {
    fn annotate(&self, element: &SyntaxElement, out: &mut StyledTextBuilder, theme: &Theme)
    -> bool;
}

/// Walks inline syntax and appends styled runs to a builder.
pub struct Walker<'a> {
    theme: &'a Theme,
    annotators: &'a [Box<dyn NodeAnnotator>],
    skip_next_whitespace: bool,
}

/// Render a node's inline content with the default dispatch.
pub fn styled_text(node: &SyntaxNode, theme: &Theme) -> StyledText {
    let mut out = StyledTextBuilder::new();
    Walker::new(theme, &[]).append(&mut out, node);
    out.build()
}

impl<'a> Walker<'a> {
    pub fn new(theme: &'a Theme, annotators: &'a [Box<dyn NodeAnnotator>]) -> Self {
        Self {
            theme,
            annotators,
            skip_next_whitespace: false,
        }
    }

    /// Append the inline rendering of `node`'s children.
    pub fn append(&mut self, out: &mut StyledTextBuilder, node: &SyntaxNode) {
        for child in node.children_with_tokens() {
            self.append_element(out, &child);
        }
    }

    fn append_element(&mut self, out: &mut StyledTextBuilder, element: &SyntaxElement) {
        for annotator in self.annotators {
            if annotator.annotate(element, out, self.theme) {
                return;
            }
        }
        match element {
            SyntaxElement::Node(node) => self.append_node(out, node),
            SyntaxElement::Token(token) => self.append_token(out, token),
        }
    }

    fn append_node(&mut self, out: &mut StyledTextBuilder, node: &SyntaxNode) {
        match node.kind() {
            SyntaxKind::EMPHASIS => {
                self.styled(out, RunStyle::italic(), node);
            }
            SyntaxKind::STRONG => {
                self.styled(out, RunStyle::bold(), node);
            }
            SyntaxKind::STRIKETHROUGH => {
                self.styled(out, RunStyle::strikethrough(), node);
            }
            SyntaxKind::CODE_SPAN => self.code_span(out, node),
            SyntaxKind::INLINE_LINK | SyntaxKind::FULL_REF_LINK | SyntaxKind::SHORT_REF_LINK => {
                self.link(out, node);
            }
            SyntaxKind::IMAGE => self.image(out, node),
            SyntaxKind::AUTOLINK => self.autolink(out, node),
            SyntaxKind::GFM_AUTOLINK => self.gfm_autolink(out, node),
            SyntaxKind::CHECKBOX => {}
            _ => self.append(out, node),
        }
    }

    fn append_token(
        &mut self,
        out: &mut StyledTextBuilder,
        token: &markweave_syntax::SyntaxToken,
    ) {
        let parent = token.parent().map(|p| p.kind());
        match token.kind() {
            SyntaxKind::TEXT => out.append(&decode_entities(token.text())),
            SyntaxKind::WHITESPACE => {
                if self.skip_next_whitespace {
                    self.skip_next_whitespace = false;
                } else if !out.is_empty() {
                    out.append_char(' ');
                }
            }
            SyntaxKind::NEWLINE => out.append_char('\n'),
            SyntaxKind::HARD_BREAK => out.append("\n\n"),
            SyntaxKind::ESCAPED => {
                // drop the backslash, keep the escaped character
                out.append(&token.text()[1..]);
            }
            SyntaxKind::STAR | SyntaxKind::UNDERSCORE => {
                if !matches!(parent, Some(SyntaxKind::EMPHASIS | SyntaxKind::STRONG)) {
                    out.append(token.text());
                }
            }
            SyntaxKind::TILDE => {
                if parent != Some(SyntaxKind::STRIKETHROUGH) {
                    out.append(token.text());
                }
            }
            SyntaxKind::GT => {
                if parent == Some(SyntaxKind::BLOCK_QUOTE) {
                    self.skip_next_whitespace = true;
                } else {
                    out.append_char('>');
                }
            }
            SyntaxKind::FENCE_MARKER | SyntaxKind::FENCE_LANG | SyntaxKind::EOF => {}
            _ => out.append(token.text()),
        }
    }

    fn styled(&mut self, out: &mut StyledTextBuilder, style: RunStyle, node: &SyntaxNode) {
        out.push_style(style);
        self.append(out, node);
        out.pop_style();
    }

    /// Code spans render verbatim between the delimiter runs, padded with a
    /// single space either side so the background has breathing room.
    fn code_span(&mut self, out: &mut StyledTextBuilder, node: &SyntaxNode) {
        let children: Vec<SyntaxElement> = node.children_with_tokens().collect();
        let first = children
            .iter()
            .position(|e| e.kind() != SyntaxKind::BACKTICK)
            .unwrap_or(children.len());
        let last = children
            .iter()
            .rposition(|e| e.kind() != SyntaxKind::BACKTICK)
            .map_or(first, |i| i + 1);
        out.push_style(self.theme.inline_code());
        out.append_char(' ');
        for element in &children[first..last] {
            match element {
                SyntaxElement::Token(t) => out.append(t.text()),
                SyntaxElement::Node(n) => out.append(&n.text().to_string()),
            }
        }
        out.append_char(' ');
        out.pop_style();
    }

    fn link(&mut self, out: &mut StyledTextBuilder, node: &SyntaxNode) {
        // a reference with no link text degrades to its verbatim source
        let Some(text) = child_of(node, SyntaxKind::LINK_TEXT) else {
            out.append(&node.text().to_string());
            return;
        };
        let annotation = child_of(node, SyntaxKind::LINK_DESTINATION)
            .map(|d| d.text().to_string())
            .or_else(|| child_of(node, SyntaxKind::LINK_LABEL).map(|l| bracket_inner(&l)));
        if let Some(annotation) = &annotation {
            out.push_annotation(MARKDOWN_URL, annotation);
        }
        out.push_style(self.theme.link());
        self.bracket_content(out, &text);
        out.pop_style();
        if annotation.is_some() {
            out.pop_annotation();
        }
    }

    fn image(&mut self, out: &mut StyledTextBuilder, node: &SyntaxNode) {
        if let Some(dest) = node
            .descendants()
            .find(|n| n.kind() == SyntaxKind::LINK_DESTINATION)
        {
            out.append_inline_object(MARKDOWN_IMAGE_URL, &dest.text().to_string());
        }
    }

    fn autolink(&mut self, out: &mut StyledTextBuilder, node: &SyntaxNode) {
        let text = node.text().to_string();
        let url = text
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .unwrap_or(&text);
        out.push_annotation(MARKDOWN_URL, url);
        out.push_style(self.theme.link());
        out.append(url);
        out.pop_style();
        out.pop_annotation();
    }

    fn gfm_autolink(&mut self, out: &mut StyledTextBuilder, node: &SyntaxNode) {
        let url = node.text().to_string();
        // inside link text the surrounding link already owns the styling
        if node.parent().map(|p| p.kind()) == Some(SyntaxKind::LINK_TEXT) {
            out.append(&url);
            return;
        }
        out.push_annotation(MARKDOWN_URL, &url);
        out.push_style(self.theme.link());
        out.append(&url);
        out.pop_style();
        out.pop_annotation();
    }

    /// Append a bracketed node's content without its enclosing brackets.
    fn bracket_content(&mut self, out: &mut StyledTextBuilder, node: &SyntaxNode) {
        let children: Vec<SyntaxElement> = node.children_with_tokens().collect();
        let mut slice = children.as_slice();
        if let [SyntaxElement::Token(t), rest @ ..] = slice {
            if t.kind() == SyntaxKind::LBRACKET {
                slice = rest;
            }
        }
        if let [rest @ .., SyntaxElement::Token(t)] = slice {
            if t.kind() == SyntaxKind::RBRACKET {
                slice = rest;
            }
        }
        for element in slice {
            self.append_element(out, element);
        }
    }
}

fn child_of(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|c| c.kind() == kind)
}

/// Text of a `[...]` node without the brackets.
fn bracket_inner(node: &SyntaxNode) -> String {
    let text = node.text().to_string();
    text.strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(&text)
        .to_string()
}

fn decode_entities(text: &str) -> Cow<'_, str> {
    if text.contains('&') {
        html_escape::decode_html_entities(text)
    } else {
        Cow::Borrowed(text)
    }
}
