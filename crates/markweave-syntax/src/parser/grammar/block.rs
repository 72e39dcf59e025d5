//! Block-level grammar.
//!
//! Detection helpers all take a token offset so the same predicates drive
//! both block dispatch (offset 0) and the paragraph-interruption check
//! (offset 1, looking past the pending newline).

use super::inline;
use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

pub(super) fn block(p: &mut Parser) {
    if let Some(level) = heading_level_at(p, 0) {
        heading(p, level);
    } else if let Some((kind, len)) = fence_at(p, 0) {
        fenced_code(p, kind, len);
    } else if let Some(n) = thematic_break_at(p, 0) {
        thematic_break(p, n);
    } else if p.at(SyntaxKind::GT) {
        block_quote(p);
    } else if list_start_at(p, 0) {
        list_item(p);
    } else if table_at(p, 0) {
        table(p);
    } else {
        paragraph(p);
    }
}

/// Would the line starting at `base` terminate a paragraph?
fn interrupts_paragraph_at(p: &Parser, base: usize) -> bool {
    matches!(p.nth(base), SyntaxKind::NEWLINE | SyntaxKind::EOF | SyntaxKind::GT)
        || heading_level_at(p, base).is_some()
        || fence_at(p, base).is_some()
        || thematic_break_at(p, base).is_some()
        || list_start_at(p, base)
        || table_at(p, base)
}

fn heading_level_at(p: &Parser, base: usize) -> Option<usize> {
    let mut n = 0;
    while p.nth(base + n) == SyntaxKind::HASH {
        n += 1;
    }
    if n == 0 || n > 6 {
        return None;
    }
    match p.nth(base + n) {
        SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF => Some(n),
        _ => None,
    }
}

fn fence_at(p: &Parser, base: usize) -> Option<(SyntaxKind, usize)> {
    let kind = p.nth(base);
    if !matches!(kind, SyntaxKind::BACKTICK | SyntaxKind::TILDE) {
        return None;
    }
    let mut n = 0;
    while p.nth(base + n) == kind {
        n += 1;
    }
    (n >= 3).then_some((kind, n))
}

/// Returns the number of tokens the break occupies, newline excluded.
fn thematic_break_at(p: &Parser, base: usize) -> Option<usize> {
    let kind = p.nth(base);
    if !matches!(
        kind,
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::UNDERSCORE
    ) {
        return None;
    }
    let mut n = 0;
    let mut count = 0;
    loop {
        match p.nth(base + n) {
            k if k == kind => count += 1,
            SyntaxKind::WHITESPACE => {}
            SyntaxKind::NEWLINE | SyntaxKind::EOF => break,
            _ => return None,
        }
        n += 1;
    }
    (count >= 3).then_some(n)
}

fn list_start_at(p: &Parser, base: usize) -> bool {
    let base = if p.nth(base) == SyntaxKind::WHITESPACE {
        base + 1
    } else {
        base
    };
    marker_tokens_at(p, base).is_some()
}

/// How many tokens the list marker occupies (`-` is one, `1)` is two),
/// or None if no marker starts at `base`.
fn marker_tokens_at(p: &Parser, base: usize) -> Option<usize> {
    match p.nth(base) {
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::PLUS => {
            (p.nth(base + 1) == SyntaxKind::WHITESPACE).then_some(1)
        }
        SyntaxKind::TEXT => {
            let text = p.nth_text(base);
            if let Some(digits) = text.strip_suffix('.') {
                if !digits.is_empty()
                    && digits.bytes().all(|b| b.is_ascii_digit())
                    && p.nth(base + 1) == SyntaxKind::WHITESPACE
                {
                    return Some(1);
                }
            }
            if !text.is_empty()
                && text.bytes().all(|b| b.is_ascii_digit())
                && p.nth(base + 1) == SyntaxKind::RPAREN
                && p.nth(base + 2) == SyntaxKind::WHITESPACE
            {
                return Some(2);
            }
            None
        }
        _ => None,
    }
}

fn table_at(p: &Parser, base: usize) -> bool {
    let mut n = base;
    let mut saw_pipe = false;
    loop {
        match p.nth(n) {
            SyntaxKind::PIPE => saw_pipe = true,
            SyntaxKind::NEWLINE => break,
            SyntaxKind::EOF => return false,
            _ => {}
        }
        n += 1;
    }
    saw_pipe && delim_row_at(p, n + 1)
}

fn delim_row_at(p: &Parser, base: usize) -> bool {
    let mut n = base;
    let mut dashes = 0;
    let mut pipes = 0;
    loop {
        match p.nth(n) {
            SyntaxKind::DASH => dashes += 1,
            SyntaxKind::PIPE => pipes += 1,
            SyntaxKind::WHITESPACE | SyntaxKind::COLON => {}
            SyntaxKind::NEWLINE | SyntaxKind::EOF => break,
            _ => return false,
        }
        n += 1;
    }
    dashes > 0 && pipes > 0
}

fn heading(p: &mut Parser, level: usize) {
    let m = p.start();
    for _ in 0..level {
        p.bump();
    }
    p.eat(SyntaxKind::WHITESPACE);
    let content = p.start();
    inline::inline_until(p, &[]);
    content.complete(p, SyntaxKind::INLINE);
    m.complete(p, SyntaxKind::HEADING);
}

fn thematic_break(p: &mut Parser, tokens: usize) {
    let m = p.start();
    for _ in 0..tokens {
        p.bump();
    }
    m.complete(p, SyntaxKind::THEMATIC_BREAK);
}

fn block_quote(p: &mut Parser) {
    let m = p.start();
    loop {
        p.bump(); // `>`
        inline::inline_until(p, &[]);
        if p.at(SyntaxKind::NEWLINE) && p.nth(1) == SyntaxKind::GT {
            p.bump();
        } else {
            break;
        }
    }
    m.complete(p, SyntaxKind::BLOCK_QUOTE);
}

fn list_item(p: &mut Parser) {
    let m = p.start();
    if p.at(SyntaxKind::WHITESPACE) {
        p.bump();
    }
    if let Some(marker) = marker_tokens_at(p, 0) {
        for _ in 0..marker {
            p.bump();
        }
    }
    p.eat(SyntaxKind::WHITESPACE);
    if checkbox_at(p) {
        let c = p.start();
        p.bump();
        p.bump();
        p.bump();
        c.complete(p, SyntaxKind::CHECKBOX);
        p.eat(SyntaxKind::WHITESPACE);
    }
    let content = p.start();
    inline::inline_until(p, &[]);
    content.complete(p, SyntaxKind::INLINE);
    m.complete(p, SyntaxKind::LIST_ITEM);
}

fn checkbox_at(p: &Parser) -> bool {
    p.at(SyntaxKind::LBRACKET)
        && match p.nth(1) {
            SyntaxKind::WHITESPACE => true,
            SyntaxKind::TEXT => matches!(p.nth_text(1), "x" | "X"),
            _ => false,
        }
        && p.nth(2) == SyntaxKind::RBRACKET
        && matches!(
            p.nth(3),
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
        )
}

fn fenced_code(p: &mut Parser, fence: SyntaxKind, open_len: usize) {
    let m = p.start();
    p.bump_n(open_len, SyntaxKind::FENCE_MARKER);
    let mut info = 0;
    while !matches!(p.nth(info), SyntaxKind::NEWLINE | SyntaxKind::EOF) {
        info += 1;
    }
    if info > 0 {
        p.bump_n(info, SyntaxKind::FENCE_LANG);
    }
    p.eat(SyntaxKind::NEWLINE);
    while !p.at_end() {
        if p.at_line_start() {
            if let Some((kind, len)) = fence_at(p, 0) {
                if kind == fence && len >= open_len && fence_close_line(p, len) {
                    p.bump_n(len, SyntaxKind::FENCE_MARKER);
                    p.eat(SyntaxKind::WHITESPACE);
                    break;
                }
            }
        }
        p.bump();
    }
    m.complete(p, SyntaxKind::FENCED_CODE);
}

fn fence_close_line(p: &Parser, len: usize) -> bool {
    let mut n = len;
    while p.nth(n) == SyntaxKind::WHITESPACE {
        n += 1;
    }
    matches!(p.nth(n), SyntaxKind::NEWLINE | SyntaxKind::EOF)
}

fn table(p: &mut Parser) {
    let m = p.start();
    table_row(p);
    if p.at(SyntaxKind::NEWLINE) {
        p.bump();
        let d = p.start();
        while !matches!(p.current(), SyntaxKind::NEWLINE | SyntaxKind::EOF) {
            p.bump();
        }
        d.complete(p, SyntaxKind::TABLE_DELIM_ROW);
        while p.at(SyntaxKind::NEWLINE) && row_ahead(p, 1) {
            p.bump();
            table_row(p);
        }
    }
    m.complete(p, SyntaxKind::TABLE);
}

fn row_ahead(p: &Parser, base: usize) -> bool {
    let mut n = base;
    loop {
        match p.nth(n) {
            SyntaxKind::PIPE => return true,
            SyntaxKind::NEWLINE | SyntaxKind::EOF => return false,
            _ => n += 1,
        }
    }
}

fn table_row(p: &mut Parser) {
    let m = p.start();
    p.eat(SyntaxKind::WHITESPACE);
    p.eat(SyntaxKind::PIPE);
    while !matches!(p.current(), SyntaxKind::NEWLINE | SyntaxKind::EOF) {
        let cell = p.start();
        inline::inline_until(p, &[SyntaxKind::PIPE]);
        cell.complete(p, SyntaxKind::TABLE_CELL);
        if !p.eat(SyntaxKind::PIPE) {
            break;
        }
        // trailing pipe: whitespace-only remainder closes the row
        if p.at(SyntaxKind::WHITESPACE)
            && matches!(p.nth(1), SyntaxKind::NEWLINE | SyntaxKind::EOF)
        {
            p.bump();
        }
    }
    m.complete(p, SyntaxKind::TABLE_ROW);
}

fn paragraph(p: &mut Parser) {
    let m = p.start();
    loop {
        inline::inline_until(p, &[]);
        if !p.at(SyntaxKind::NEWLINE) || interrupts_paragraph_at(p, 1) {
            break;
        }
        p.bump(); // soft break stays inside the paragraph
    }
    m.complete(p, SyntaxKind::PARAGRAPH);
}
