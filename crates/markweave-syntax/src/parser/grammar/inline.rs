//! Inline grammar.
//!
//! Delimited constructs (emphasis, strong, strikethrough, code spans, links)
//! pre-scan for their closing delimiter before committing to a node. When no
//! closer exists on the line the opening token is bumped as-is, so downstream
//! consumers see it verbatim instead of an half-open construct.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse inline elements until a newline, end of input, or a stop token.
pub(super) fn inline_until(p: &mut Parser, stops: &[SyntaxKind]) {
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) && !stops.contains(&p.current()) {
        inline_element(p, stops);
    }
}

fn inline_element(p: &mut Parser, stops: &[SyntaxKind]) {
    match p.current() {
        SyntaxKind::BACKSLASH => escape(p),
        SyntaxKind::WHITESPACE => whitespace(p),
        SyntaxKind::STAR => delimited(p, SyntaxKind::STAR, stops),
        SyntaxKind::UNDERSCORE => delimited(p, SyntaxKind::UNDERSCORE, stops),
        SyntaxKind::TILDE => strikethrough(p, stops),
        SyntaxKind::BACKTICK => code_span(p),
        // no links inside link text
        SyntaxKind::LBRACKET if !stops.contains(&SyntaxKind::RBRACKET) => {
            link_or_ref(p, stops);
        }
        SyntaxKind::EXCLAIM if p.nth(1) == SyntaxKind::LBRACKET => image(p, stops),
        SyntaxKind::LT => autolink(p),
        SyntaxKind::TEXT => text(p),
        _ => p.bump(),
    }
}

fn escape(p: &mut Parser) {
    match p.nth(1) {
        SyntaxKind::NEWLINE => p.bump_n(2, SyntaxKind::HARD_BREAK),
        SyntaxKind::TEXT | SyntaxKind::WHITESPACE | SyntaxKind::EOF => p.bump(),
        k if k.is_token() => p.bump_n(2, SyntaxKind::ESCAPED),
        _ => p.bump(),
    }
}

fn whitespace(p: &mut Parser) {
    // two or more trailing spaces make a hard break
    if p.current_text().ends_with("  ") && p.nth(1) == SyntaxKind::NEWLINE {
        p.bump_n(2, SyntaxKind::HARD_BREAK);
    } else {
        p.bump();
    }
}

fn delimited(p: &mut Parser, kind: SyntaxKind, stops: &[SyntaxKind]) {
    if p.nth(1) == kind {
        if can_open(p, 2) && close_offset(p, kind, 2, 2).is_some() {
            let m = p.start();
            p.bump();
            p.bump();
            while !p.at_end()
                && !p.at(SyntaxKind::NEWLINE)
                && !(p.at(kind) && p.nth(1) == kind)
            {
                inline_element(p, stops);
            }
            p.eat(kind);
            p.eat(kind);
            m.complete(p, SyntaxKind::STRONG);
            return;
        }
    } else if can_open(p, 1) && close_offset(p, kind, 1, 2).is_some() {
        let m = p.start();
        p.bump();
        while !p.at_end() && !p.at(SyntaxKind::NEWLINE) && !p.at(kind) {
            inline_element(p, stops);
        }
        p.eat(kind);
        m.complete(p, SyntaxKind::EMPHASIS);
        return;
    }
    p.bump();
}

fn strikethrough(p: &mut Parser, stops: &[SyntaxKind]) {
    if p.nth(1) == SyntaxKind::TILDE
        && can_open(p, 2)
        && close_offset(p, SyntaxKind::TILDE, 2, 2).is_some()
    {
        let m = p.start();
        p.bump();
        p.bump();
        while !p.at_end()
            && !p.at(SyntaxKind::NEWLINE)
            && !(p.at(SyntaxKind::TILDE) && p.nth(1) == SyntaxKind::TILDE)
        {
            inline_element(p, stops);
        }
        p.eat(SyntaxKind::TILDE);
        p.eat(SyntaxKind::TILDE);
        m.complete(p, SyntaxKind::STRIKETHROUGH);
    } else {
        p.bump();
    }
}

/// An opener may not be followed by whitespace or end of line.
fn can_open(p: &Parser, after: usize) -> bool {
    !matches!(
        p.nth(after),
        SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
    )
}

/// Find a closing run of `run` adjacent `kind` tokens, not preceded by
/// whitespace, before the end of the line.
fn close_offset(p: &Parser, kind: SyntaxKind, run: usize, from: usize) -> Option<usize> {
    let mut n = from;
    loop {
        match p.nth(n) {
            SyntaxKind::NEWLINE | SyntaxKind::EOF => return None,
            k if k == kind => {
                let mut len = 1;
                while p.nth(n + len) == kind {
                    len += 1;
                }
                if len >= run && p.nth(n - 1) != SyntaxKind::WHITESPACE {
                    return Some(n);
                }
                n += len;
            }
            _ => n += 1,
        }
    }
}

fn backtick_run(p: &Parser, base: usize) -> usize {
    let mut n = 0;
    while p.nth(base + n) == SyntaxKind::BACKTICK {
        n += 1;
    }
    n
}

fn code_span(p: &mut Parser) {
    let open = backtick_run(p, 0);
    // the closing run must have exactly the opening's length
    let mut n = open;
    let found = loop {
        match p.nth(n) {
            SyntaxKind::NEWLINE | SyntaxKind::EOF => break false,
            SyntaxKind::BACKTICK => {
                let run = backtick_run(p, n);
                if run == open {
                    break true;
                }
                n += run;
            }
            _ => n += 1,
        }
    };
    if !found {
        for _ in 0..open {
            p.bump();
        }
        return;
    }
    let m = p.start();
    for _ in 0..open {
        p.bump();
    }
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        if p.at(SyntaxKind::BACKTICK) {
            let run = backtick_run(p, 0);
            if run == open {
                break;
            }
            for _ in 0..run {
                p.bump();
            }
        } else {
            p.bump();
        }
    }
    for _ in 0..open {
        p.bump();
    }
    m.complete(p, SyntaxKind::CODE_SPAN);
}

/// Offset of the `]` closing the bracket at `open_at`, if on this line.
fn bracket_close_offset(p: &Parser, open_at: usize) -> Option<usize> {
    let mut n = open_at + 1;
    loop {
        match p.nth(n) {
            SyntaxKind::NEWLINE | SyntaxKind::EOF => return None,
            SyntaxKind::RBRACKET => return Some(n),
            _ => n += 1,
        }
    }
}

fn paren_close_exists(p: &Parser, open_at: usize) -> bool {
    let mut n = open_at + 1;
    loop {
        match p.nth(n) {
            SyntaxKind::NEWLINE | SyntaxKind::EOF => return false,
            SyntaxKind::RPAREN => return true,
            _ => n += 1,
        }
    }
}

fn link_or_ref(p: &mut Parser, stops: &[SyntaxKind]) {
    let close = match bracket_close_offset(p, 0) {
        Some(n) => n,
        None => {
            p.bump();
            return;
        }
    };
    match p.nth(close + 1) {
        SyntaxKind::LPAREN if paren_close_exists(p, close + 1) => inline_link(p, stops),
        SyntaxKind::LBRACKET if bracket_close_offset(p, close + 1).is_some() => {
            let m = p.start();
            link_text(p, stops);
            link_label(p);
            m.complete(p, SyntaxKind::FULL_REF_LINK);
        }
        _ => {
            let m = p.start();
            link_label(p);
            m.complete(p, SyntaxKind::SHORT_REF_LINK);
        }
    }
}

fn inline_link(p: &mut Parser, stops: &[SyntaxKind]) {
    let m = p.start();
    link_text(p, stops);
    p.bump(); // `(`
    if !matches!(
        p.current(),
        SyntaxKind::RPAREN | SyntaxKind::NEWLINE | SyntaxKind::EOF
    ) {
        let d = p.start();
        while !matches!(
            p.current(),
            SyntaxKind::RPAREN | SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
        ) {
            p.bump();
        }
        d.complete(p, SyntaxKind::LINK_DESTINATION);
        // optional title
        while !matches!(
            p.current(),
            SyntaxKind::RPAREN | SyntaxKind::NEWLINE | SyntaxKind::EOF
        ) {
            p.bump();
        }
    }
    p.eat(SyntaxKind::RPAREN);
    m.complete(p, SyntaxKind::INLINE_LINK);
}

/// `[...]`, brackets included; the content is full inline markup.
fn link_text(p: &mut Parser, stops: &[SyntaxKind]) {
    let m = p.start();
    p.bump(); // `[`
    let mut inner: Vec<SyntaxKind> = stops.to_vec();
    inner.push(SyntaxKind::RBRACKET);
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) && !p.at(SyntaxKind::RBRACKET) {
        inline_element(p, &inner);
    }
    p.eat(SyntaxKind::RBRACKET);
    m.complete(p, SyntaxKind::LINK_TEXT);
}

/// `[...]`, brackets included; the content is taken verbatim.
fn link_label(p: &mut Parser) {
    let m = p.start();
    p.bump(); // `[`
    while !matches!(
        p.current(),
        SyntaxKind::RBRACKET | SyntaxKind::NEWLINE | SyntaxKind::EOF
    ) {
        p.bump();
    }
    p.eat(SyntaxKind::RBRACKET);
    m.complete(p, SyntaxKind::LINK_LABEL);
}

fn image(p: &mut Parser, stops: &[SyntaxKind]) {
    if bracket_close_offset(p, 1).is_none() {
        p.bump(); // literal `!`
        return;
    }
    let m = p.start();
    p.bump(); // `!`
    link_or_ref(p, stops);
    m.complete(p, SyntaxKind::IMAGE);
}

/// `<scheme:rest>`; without a colon the angle brackets are plain text,
/// which keeps stray HTML-ish tags rendering verbatim.
fn autolink(p: &mut Parser) {
    let mut n = 1;
    let mut saw_colon = false;
    let ok = loop {
        match p.nth(n) {
            SyntaxKind::GT => break n > 1 && saw_colon,
            SyntaxKind::COLON => saw_colon = true,
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF | SyntaxKind::LT => {
                break false;
            }
            _ => {}
        }
        n += 1;
    };
    if !ok {
        p.bump();
        return;
    }
    let m = p.start();
    for _ in 0..=n {
        p.bump();
    }
    m.complete(p, SyntaxKind::AUTOLINK);
}

fn text(p: &mut Parser) {
    let t = p.current_text();
    let scheme = matches!(t, "http" | "https")
        && p.nth(1) == SyntaxKind::COLON
        && p.nth(2) == SyntaxKind::TEXT
        && p.nth_text(2).len() > 2
        && p.nth_text(2).starts_with("//");
    let www = t.starts_with("www.") && t.len() > 4;
    if !scheme && !www {
        p.bump();
        return;
    }
    let m = p.start();
    loop {
        match p.current() {
            SyntaxKind::TEXT
            | SyntaxKind::DASH
            | SyntaxKind::UNDERSCORE
            | SyntaxKind::HASH
            | SyntaxKind::PLUS => p.bump(),
            // a colon ending the URL is sentence punctuation, not part of it
            SyntaxKind::COLON
                if !matches!(
                    p.nth(1),
                    SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
                ) =>
            {
                p.bump();
            }
            _ => break,
        }
    }
    m.complete(p, SyntaxKind::GFM_AUTOLINK);
}
