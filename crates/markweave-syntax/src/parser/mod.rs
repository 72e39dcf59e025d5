//! Event-based Markdown parser following the rust-analyzer architecture.
//!
//! The parser never builds trees directly. Grammar rules drive a small state
//! machine (`Parser`) that emits a flat list of [`Event`]s; [`Parser::parse`]
//! then replays the events against the lexed tokens to produce the rowan
//! tree in one pass.
//!
//! Tree construction is kept consistent by the [`Marker`] discipline: every
//! `parser.start()` hands out a marker that **must** be completed with a node
//! kind or abandoned. Dropping a live marker panics, so a grammar rule cannot
//! accidentally leave a half-open node behind.
//!
//! Parsing is total: any input produces a ROOT node covering every byte.
//!
//! ```
//! use markweave_syntax::parse;
//!
//! let tree = parse("# Hello\n");
//! assert_eq!(tree.text().to_string(), "# Hello\n");
//! ```

pub mod event;

mod grammar;

use rowan::GreenNodeBuilder;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;

/// The parser state machine.
///
/// Grammar functions receive `&mut Parser` and use it to inspect tokens
/// (`current`, `nth`, `at`, `at_end`), consume them (`bump`, `eat`,
/// `bump_n`), and build structure (`start` → `Marker` → `complete` /
/// `abandon`).
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
        }
    }

    /// Parse the tokens and return a syntax tree.
    pub fn parse(mut self) -> SyntaxNode {
        grammar::root(&mut self);
        build_tree(self.tokens, self.events)
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Consume n raw tokens as a single composite token of the given kind.
    pub fn bump_n(&mut self, n: usize, kind: SyntaxKind) {
        if n > 0 && self.pos + n <= self.tokens.len() {
            self.events.push(Event::Token {
                kind,
                n_raw_tokens: n as u8,
            });
            self.pos += n;
        }
    }

    /// Get the text of the current token.
    pub fn current_text(&self) -> &'input str {
        self.nth_text(0)
    }

    /// Get the text of the token n positions ahead ("" past the end).
    pub fn nth_text(&self, n: usize) -> &'input str {
        self.tokens.get(self.pos + n).map(|t| t.text).unwrap_or("")
    }

    /// Check if we're at the start of a line (after newline or at start).
    pub fn at_line_start(&self) -> bool {
        if self.pos == 0 {
            return true;
        }
        self.tokens
            .get(self.pos - 1)
            .map(|t| t.kind == SyntaxKind::NEWLINE)
            .unwrap_or(false)
    }
}

/// A marker for a node being constructed.
///
/// Returned by `parser.start()`. Must be either completed with
/// `complete(parser, KIND)` or abandoned with `abandon(parser)`; dropping a
/// marker that is neither panics, catching tree-corruption bugs at the site
/// of the offending grammar rule.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start { kind };
        p.events.push(Event::Finish);
    }

    /// Abandon this marker without creating a node.
    ///
    /// Only removes the placeholder when it is still the last event;
    /// otherwise the placeholder stays and the replay skips it.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// Replay the event stream against the raw tokens, producing the tree.
///
/// Replay is strictly linear; grammar rules commit to node kinds up front,
/// so no event reorders an earlier one. A `Token` spanning several raw
/// tokens fuses their texts into one green token.
fn build_tree(tokens: &[Token<'_>], events: Vec<Event>) -> SyntaxNode {
    let mut builder = GreenNodeBuilder::new();
    let mut cursor = 0;
    for event in events {
        match event {
            Event::Start { kind } => builder.start_node(kind.into()),
            Event::Token { kind, n_raw_tokens } => {
                let n = usize::from(n_raw_tokens);
                if n == 1 {
                    builder.token(kind.into(), tokens[cursor].text);
                } else {
                    let fused: String =
                        tokens[cursor..cursor + n].iter().map(|t| t.text).collect();
                    builder.token(kind.into(), &fused);
                }
                cursor += n;
            }
            Event::Finish => builder.finish_node(),
            // left behind by abandoned markers
            Event::Placeholder => {}
        }
    }
    SyntaxNode::new_root(builder.finish())
}

/// Parse markdown source into a syntax tree.
pub fn parse(source: &str) -> SyntaxNode {
    let tokens = lex(source);
    let parser = Parser::new(&tokens);
    parser.parse()
}
