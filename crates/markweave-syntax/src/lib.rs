//! Lossless Markdown parsing for styled-text rendering.
//!
//! This crate turns Markdown source into a rowan syntax tree in which every
//! byte of the input is present as a token. Downstream styling walks the
//! tree token by token, so nothing is normalized away at this layer: marker
//! characters, whitespace runs, and newlines all survive as tokens, and
//! unmatched delimiters stay exactly where they were typed.
//!
//! ```
//! use markweave_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("a *b* c");
//! assert_eq!(tree.text().to_string(), "a *b* c");
//! let emphasis = tree
//!     .descendants()
//!     .find(|n| n.kind() == SyntaxKind::EMPHASIS)
//!     .unwrap();
//! assert_eq!(emphasis.text().to_string(), "*b*");
//! ```

pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use parser::parse;
pub use syntax_kind::{MarkdownLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_round_trip() {
        let input = "# T\n\n> q\n\n- [ ] task\n";
        assert_eq!(parse(input).text().to_string(), input);
    }

    #[test]
    fn tokens_expose_parents() {
        let tree = parse("*x*");
        let star = tree
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::STAR)
            .unwrap();
        assert_eq!(star.parent().unwrap().kind(), SyntaxKind::EMPHASIS);
    }
}
