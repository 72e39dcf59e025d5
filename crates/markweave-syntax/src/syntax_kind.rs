//! SyntaxKind enum for all tokens and nodes in the Markdown CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the Markdown CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser
/// output). The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output, plus composites fused by the parser) ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// Plain text content
    TEXT,
    /// A backslash escape fused into one token (`\*`, `\[`, ...)
    ESCAPED,
    /// Hard line break (trailing spaces + newline, or backslash + newline)
    HARD_BREAK,
    /// A run of fence characters opening or closing a fenced code block
    FENCE_MARKER,
    /// The info string of a fenced code block, fused into one token
    FENCE_LANG,
    /// `>` for blockquotes (or a literal `>` in inline text)
    GT,
    /// `<` opening an autolink (or a literal `<`)
    LT,
    /// `-` for lists and thematic breaks
    DASH,
    /// `*` for lists, emphasis, and thematic breaks
    STAR,
    /// `_` for emphasis
    UNDERSCORE,
    /// `+` for lists
    PLUS,
    /// Single backtick for code spans
    BACKTICK,
    /// `~` for fenced code and strikethrough
    TILDE,
    /// `[` for links
    LBRACKET,
    /// `]` for links
    RBRACKET,
    /// `|` for tables
    PIPE,
    /// `(` for link URLs
    LPAREN,
    /// `)` for link URLs
    RPAREN,
    /// `#` for headings
    HASH,
    /// `:` (autolink schemes, fence-language separators, plain text)
    COLON,
    /// `!` opening an image
    EXCLAIM,
    /// `'`
    SQUOTE,
    /// `"`
    DQUOTE,
    /// `\` not part of a recognized escape
    BACKSLASH,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    ROOT,
    /// Paragraph block
    PARAGRAPH,
    /// ATX heading (`# ...`)
    HEADING,
    /// Blockquote container (`> ...`)
    BLOCK_QUOTE,
    /// Individual list item (bullet or ordered)
    LIST_ITEM,
    /// Task-list checkbox marker (`[ ]` / `[x]`)
    CHECKBOX,
    /// Fenced code block
    FENCED_CODE,
    /// Thematic break (`---`, `***`, etc.)
    THEMATIC_BREAK,
    /// Pipe table
    TABLE,
    /// Table row
    TABLE_ROW,
    /// Table delimiter row (`| --- | :--: |`)
    TABLE_DELIM_ROW,
    /// Table cell
    TABLE_CELL,
    /// Inline content wrapper used for degraded constructs
    INLINE,
    /// Emphasis `*text*`
    EMPHASIS,
    /// Strong emphasis `**text**`
    STRONG,
    /// Strikethrough `~~text~~`
    STRIKETHROUGH,
    /// Inline code span
    CODE_SPAN,
    /// Standard link `[text](url)`
    INLINE_LINK,
    /// Full reference link `[text][label]`
    FULL_REF_LINK,
    /// Short reference link `[label]`
    SHORT_REF_LINK,
    /// The bracketed text of a link, brackets included
    LINK_TEXT,
    /// The destination of a link or image
    LINK_DESTINATION,
    /// The bracketed label of a reference link, brackets included
    LINK_LABEL,
    /// Image `![alt](url)`
    IMAGE,
    /// Autolink `<scheme:...>`
    AUTOLINK,
    /// Bare `www.` / `http(s)://` autolink in plain text
    GFM_AUTOLINK,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkdownLang {}

impl rowan::Language for MarkdownLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<MarkdownLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<MarkdownLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<MarkdownLang>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn token_kinds_are_tokens() {
        assert!(SyntaxKind::WHITESPACE.is_token());
        assert!(SyntaxKind::TEXT.is_token());
        assert!(SyntaxKind::FENCE_LANG.is_token());
        assert!(SyntaxKind::EOF.is_token());
    }

    #[test]
    fn node_kinds_are_nodes() {
        assert!(SyntaxKind::ROOT.is_node());
        assert!(SyntaxKind::PARAGRAPH.is_node());
        assert!(SyntaxKind::STRIKETHROUGH.is_node());
        assert!(SyntaxKind::ERROR.is_node());
    }

    #[test]
    fn rowan_conversion_roundtrip() {
        let kind = SyntaxKind::PARAGRAPH;
        let raw: rowan::SyntaxKind = kind.into();
        let back = MarkdownLang::kind_from_raw(raw);
        assert_eq!(kind, back);
    }
}
