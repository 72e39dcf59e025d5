//! Tokenizing Markdown source with [Logos].
//!
//! [Logos]: https://docs.rs/logos
//!
//! The one property everything downstream depends on is losslessness: **every
//! byte in the input appears in exactly one token**. Concatenating all token
//! texts reproduces the input, which is what makes offset-based extraction
//! (fence bodies, link destinations) and round-tripping possible.
//!
//! ```
//! use markweave_syntax::lexer::lex;
//!
//! let input = "# Hello, world!\n";
//! let tokens = lex(input);
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! Tokens are minimal and context-free: the lexer doesn't know whether `*`
//! starts a list, emphasis, or a thematic break — that's the parser's job.
//! Every character the styled-text layer has to re-synthesize individually
//! (quotes, brackets, `<`, `>`, `:`, `!`, backticks) gets its own token type;
//! everything else becomes runs of `TEXT`.
//!
//! There are two enums ([`TokenKind`] here and [`SyntaxKind`]) because Logos
//! needs its own derive target while rowan stores `SyntaxKind`s;
//! [`TokenKind::to_syntax_kind`] converts between them.
//!
//! [`SyntaxKind`]: crate::syntax_kind::SyntaxKind

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// The `#[logos(skip r"")]` attribute means "skip nothing" — all input is
/// explicitly handled rather than letting Logos discard anything.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"")]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    /// `>` for blockquotes and autolink closers
    #[token(">")]
    Gt,

    /// `<` for autolink openers
    #[token("<")]
    Lt,

    /// `-` for lists and thematic breaks
    #[token("-")]
    Dash,

    /// `*` for lists, emphasis, thematic breaks
    #[token("*")]
    Star,

    /// `_` for emphasis
    #[token("_")]
    Underscore,

    /// `+` for lists
    #[token("+")]
    Plus,

    /// Single backtick
    #[token("`")]
    Backtick,

    /// Tilde for fenced code and strikethrough
    #[token("~")]
    Tilde,

    /// `[` for links
    #[token("[")]
    LBracket,

    /// `]` for links
    #[token("]")]
    RBracket,

    /// `|` for tables
    #[token("|")]
    Pipe,

    /// `(` for link URLs
    #[token("(")]
    LParen,

    /// `)` for link URLs
    #[token(")")]
    RParen,

    /// `#` for headings
    #[token("#")]
    Hash,

    /// `:` for autolink schemes and fence-language separators
    #[token(":")]
    Colon,

    /// `!` for images
    #[token("!")]
    Exclaim,

    /// `'`
    #[token("'")]
    SQuote,

    /// `"`
    #[token("\"")]
    DQuote,

    /// `\` for escapes and hard breaks
    #[token("\\")]
    Backslash,

    /// Plain text - anything not matched by other rules
    #[regex(r#"[^ \t\r\n><\[\]()'"`*+#|~_:!\\-]+"#)]
    Text,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::Dash => SyntaxKind::DASH,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Underscore => SyntaxKind::UNDERSCORE,
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Backtick => SyntaxKind::BACKTICK,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::LParen => SyntaxKind::LPAREN,
            TokenKind::RParen => SyntaxKind::RPAREN,
            TokenKind::Hash => SyntaxKind::HASH,
            TokenKind::Colon => SyntaxKind::COLON,
            TokenKind::Exclaim => SyntaxKind::EXCLAIM,
            TokenKind::SQuote => SyntaxKind::SQUOTE,
            TokenKind::DQuote => SyntaxKind::DQUOTE,
            TokenKind::Backslash => SyntaxKind::BACKSLASH,
            TokenKind::Text => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            Err(()) => {
                // Logos error means unrecognized character - treat as TEXT
                SyntaxKind::TEXT
            }
        };
        tokens.push(Token { kind, text });
    }

    tokens
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            Err(()) => SyntaxKind::TEXT,
        };
        tokens.push((Token { kind, text }, span));
    }

    tokens
}
