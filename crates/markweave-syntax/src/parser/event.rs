//! Parser events — the flat intermediate representation between grammar code
//! and tree building.
//!
//! Grammar rules never touch rowan directly; they emit `Start`/`Token`/
//! `Finish` events describing the tree, and the parser replays the list into
//! a green tree once the grammar is done. Grammar rules decide node kinds by
//! lookahead before starting a node, so the replay is strictly linear: no
//! event ever reorders or re-parents an earlier one.

use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node of the given kind.
    Start { kind: SyntaxKind },

    /// Add a token to the current node.
    ///
    /// `n_raw_tokens` is how many lexer tokens this event consumes. Usually 1,
    /// but composite tokens (fence markers, info strings, escapes, hard
    /// breaks) fuse several raw tokens into one semantic token.
    Token { kind: SyntaxKind, n_raw_tokens: u8 },

    /// Finish the current node. Paired with a preceding `Start`.
    Finish,

    /// A placeholder that is either replaced by `Start` when a marker is
    /// completed, or left behind by an abandoned marker and skipped during
    /// replay.
    Placeholder,
}

impl Event {
    /// Create a start event.
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start { kind }
    }

    /// Create a token event for a single raw token.
    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token {
            kind,
            n_raw_tokens: 1,
        }
    }
}
