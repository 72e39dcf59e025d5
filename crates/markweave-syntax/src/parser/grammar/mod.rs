//! Grammar rules.
//!
//! Split between block structure (headings, quotes, lists, fences, tables)
//! and inline structure (emphasis, code spans, links, escapes). Block rules
//! leave each block's terminating newline unconsumed; `root` bumps it, so
//! blank lines and block separators end up as direct children of ROOT and
//! composite nodes never carry a trailing newline.

mod block;
mod inline;

use super::Parser;
use crate::syntax_kind::SyntaxKind;

pub(super) fn root(p: &mut Parser) {
    let m = p.start();
    while !p.at_end() {
        if p.at(SyntaxKind::NEWLINE) {
            p.bump();
            continue;
        }
        block::block(p);
        p.eat(SyntaxKind::NEWLINE);
    }
    m.complete(p, SyntaxKind::ROOT);
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::syntax_kind::{SyntaxKind, SyntaxNode};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn find(root: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
        root.descendants()
            .find(|n| n.kind() == kind)
            .unwrap_or_else(|| panic!("no {kind:?} in {root:#?}"))
    }

    fn has(root: &SyntaxNode, kind: SyntaxKind) -> bool {
        root.descendants().any(|n| n.kind() == kind)
    }

    #[rstest]
    #[case("plain text")]
    #[case("# Heading\n\nBody *with* emphasis.\n")]
    #[case("> quoted\n> more\n\n- item\n  - nested\n")]
    #[case("```rust\nfn main() {}\n```\n")]
    #[case("| a | b |\n| --- | --- |\n| 1 | 2 |\n")]
    #[case("weird \\* stuff `code` ~~gone~~ <https://x.y>\n")]
    fn every_byte_survives(#[case] input: &str) {
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn heading_wraps_content_in_inline() {
        let tree = parse("## Two words\n");
        let heading = find(&tree, SyntaxKind::HEADING);
        let hashes = heading
            .children_with_tokens()
            .filter(|e| e.kind() == SyntaxKind::HASH)
            .count();
        assert_eq!(hashes, 2);
        let inline = find(&heading, SyntaxKind::INLINE);
        assert_eq!(inline.text().to_string(), "Two words");
    }

    #[test]
    fn hash_without_space_is_a_paragraph() {
        let tree = parse("#hashtag\n");
        assert!(!has(&tree, SyntaxKind::HEADING));
        assert!(has(&tree, SyntaxKind::PARAGRAPH));
    }

    #[test]
    fn heading_terminator_stays_outside_the_node() {
        let tree = parse("# Title\n");
        let heading = find(&tree, SyntaxKind::HEADING);
        assert_eq!(heading.text().to_string(), "# Title");
    }

    #[test]
    fn block_quote_spans_continuation_lines() {
        let tree = parse("> one\n> two\n\nafter\n");
        let quote = find(&tree, SyntaxKind::BLOCK_QUOTE);
        assert_eq!(quote.text().to_string(), "> one\n> two");
        let gts = quote
            .children_with_tokens()
            .filter(|e| e.kind() == SyntaxKind::GT)
            .count();
        assert_eq!(gts, 2);
    }

    #[test]
    fn bullet_list_item_with_checkbox() {
        let tree = parse("- [x] done\n");
        let item = find(&tree, SyntaxKind::LIST_ITEM);
        let checkbox = find(&item, SyntaxKind::CHECKBOX);
        assert_eq!(checkbox.text().to_string(), "[x]");
        let inline = find(&item, SyntaxKind::INLINE);
        assert_eq!(inline.text().to_string(), "done");
    }

    #[test]
    fn nested_item_keeps_its_indent() {
        let tree = parse("- outer\n  - inner\n");
        let items: Vec<_> = tree
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::LIST_ITEM)
            .collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].text().to_string(), "  - inner");
    }

    #[rstest]
    #[case("1. first\n")]
    #[case("2) second\n")]
    fn ordered_markers_make_list_items(#[case] input: &str) {
        let tree = parse(input);
        assert!(has(&tree, SyntaxKind::LIST_ITEM));
    }

    #[test]
    fn dash_without_space_is_not_a_list() {
        let tree = parse("-not a list\n");
        assert!(!has(&tree, SyntaxKind::LIST_ITEM));
    }

    #[test]
    fn fence_fuses_marker_and_info_string() {
        let tree = parse("```thinking:My Title\nbody line\n```\n");
        let fence = find(&tree, SyntaxKind::FENCED_CODE);
        let kinds: Vec<_> = fence
            .children_with_tokens()
            .map(|e| e.kind())
            .take(3)
            .collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::FENCE_MARKER,
                SyntaxKind::FENCE_LANG,
                SyntaxKind::NEWLINE
            ]
        );
        let lang = fence
            .children_with_tokens()
            .find(|e| e.kind() == SyntaxKind::FENCE_LANG)
            .unwrap();
        assert_eq!(lang.to_string(), "thinking:My Title");
    }

    #[test]
    fn unclosed_fence_runs_to_end_of_input() {
        let tree = parse("```\ncode forever");
        let fence = find(&tree, SyntaxKind::FENCED_CODE);
        assert_eq!(fence.text().to_string(), "```\ncode forever");
    }

    #[test]
    fn fence_marker_inside_body_does_not_close() {
        let tree = parse("````\n```\nstill code\n````\n");
        let fence = find(&tree, SyntaxKind::FENCED_CODE);
        assert!(fence.text().to_string().contains("still code"));
    }

    #[rstest]
    #[case("---\n")]
    #[case("***\n")]
    #[case("- - -\n")]
    fn thematic_breaks(#[case] input: &str) {
        let tree = parse(input);
        assert!(has(&tree, SyntaxKind::THEMATIC_BREAK));
        assert!(!has(&tree, SyntaxKind::LIST_ITEM));
    }

    #[test]
    fn paragraph_continues_over_soft_break() {
        let tree = parse("line one\nline two\n\nnext para\n");
        let paras: Vec<_> = tree
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::PARAGRAPH)
            .collect();
        assert_eq!(paras.len(), 2);
        assert_eq!(paras[0].text().to_string(), "line one\nline two");
    }

    #[test]
    fn heading_interrupts_paragraph() {
        let tree = parse("text\n# Heading\n");
        let para = find(&tree, SyntaxKind::PARAGRAPH);
        assert_eq!(para.text().to_string(), "text");
        assert!(has(&tree, SyntaxKind::HEADING));
    }

    #[test]
    fn emphasis_and_strong() {
        let tree = parse("a *b* and **c**\n");
        let em = find(&tree, SyntaxKind::EMPHASIS);
        assert_eq!(em.text().to_string(), "*b*");
        let strong = find(&tree, SyntaxKind::STRONG);
        assert_eq!(strong.text().to_string(), "**c**");
    }

    #[test]
    fn underscore_emphasis() {
        let tree = parse("_hi_\n");
        assert!(has(&tree, SyntaxKind::EMPHASIS));
    }

    #[test]
    fn unmatched_star_stays_a_token() {
        let tree = parse("2 * 3 = 6\n");
        assert!(!has(&tree, SyntaxKind::EMPHASIS));
        assert!(!has(&tree, SyntaxKind::STRONG));
    }

    #[test]
    fn strikethrough_needs_double_tilde() {
        let tree = parse("~~dead~~ but ~alive~\n");
        let strike = find(&tree, SyntaxKind::STRIKETHROUGH);
        assert_eq!(strike.text().to_string(), "~~dead~~");
        assert_eq!(
            tree.descendants()
                .filter(|n| n.kind() == SyntaxKind::STRIKETHROUGH)
                .count(),
            1
        );
    }

    #[test]
    fn code_span_matches_run_length() {
        let tree = parse("``a ` b``\n");
        let span = find(&tree, SyntaxKind::CODE_SPAN);
        assert_eq!(span.text().to_string(), "``a ` b``");
    }

    #[test]
    fn unclosed_backtick_is_literal() {
        let tree = parse("a ` b\n");
        assert!(!has(&tree, SyntaxKind::CODE_SPAN));
    }

    #[test]
    fn inline_link_structure() {
        let tree = parse("[text](https://example.com)\n");
        let link = find(&tree, SyntaxKind::INLINE_LINK);
        let text = find(&link, SyntaxKind::LINK_TEXT);
        assert_eq!(text.text().to_string(), "[text]");
        let dest = find(&link, SyntaxKind::LINK_DESTINATION);
        assert_eq!(dest.text().to_string(), "https://example.com");
    }

    #[test]
    fn full_and_short_reference_links() {
        let tree = parse("[text][label] and [short]\n");
        let full = find(&tree, SyntaxKind::FULL_REF_LINK);
        assert_eq!(full.text().to_string(), "[text][label]");
        let short = find(&tree, SyntaxKind::SHORT_REF_LINK);
        assert_eq!(short.text().to_string(), "[short]");
        assert_eq!(
            find(&short, SyntaxKind::LINK_LABEL).text().to_string(),
            "[short]"
        );
    }

    #[test]
    fn unclosed_bracket_is_literal() {
        let tree = parse("[oops\n");
        assert!(!has(&tree, SyntaxKind::SHORT_REF_LINK));
        assert!(!has(&tree, SyntaxKind::INLINE_LINK));
    }

    #[test]
    fn image_wraps_a_link() {
        let tree = parse("![alt](pic.png)\n");
        let image = find(&tree, SyntaxKind::IMAGE);
        let dest = find(&image, SyntaxKind::LINK_DESTINATION);
        assert_eq!(dest.text().to_string(), "pic.png");
    }

    #[test]
    fn autolink_requires_a_scheme_colon() {
        let tree = parse("<https://x.y> but <thinking> is literal\n");
        let auto = find(&tree, SyntaxKind::AUTOLINK);
        assert_eq!(auto.text().to_string(), "<https://x.y>");
        assert_eq!(
            tree.descendants()
                .filter(|n| n.kind() == SyntaxKind::AUTOLINK)
                .count(),
            1
        );
    }

    #[rstest]
    #[case("see https://example.com/a-b today", "https://example.com/a-b")]
    #[case("at www.example.com now", "www.example.com")]
    fn bare_urls_become_gfm_autolinks(#[case] input: &str, #[case] url: &str) {
        let tree = parse(input);
        let auto = find(&tree, SyntaxKind::GFM_AUTOLINK);
        assert_eq!(auto.text().to_string(), url);
    }

    #[test]
    fn escape_fuses_to_one_token() {
        let tree = parse("a \\* b\n");
        let para = find(&tree, SyntaxKind::PARAGRAPH);
        let escaped = para
            .children_with_tokens()
            .find(|e| e.kind() == SyntaxKind::ESCAPED)
            .unwrap();
        assert_eq!(escaped.to_string(), "\\*");
        assert!(!has(&tree, SyntaxKind::EMPHASIS));
    }

    #[rstest]
    #[case("line  \nnext\n")]
    #[case("line\\\nnext\n")]
    fn hard_breaks(#[case] input: &str) {
        let tree = parse(input);
        let para = find(&tree, SyntaxKind::PARAGRAPH);
        assert!(
            para.children_with_tokens()
                .any(|e| e.kind() == SyntaxKind::HARD_BREAK)
        );
    }

    #[test]
    fn table_structure() {
        let tree = parse("| a | b |\n| --- | --- |\n| 1 | 2 |\n");
        let table = find(&tree, SyntaxKind::TABLE);
        let rows = table
            .children()
            .filter(|n| n.kind() == SyntaxKind::TABLE_ROW)
            .count();
        assert_eq!(rows, 2);
        assert!(has(&table, SyntaxKind::TABLE_DELIM_ROW));
        let first_row = find(&table, SyntaxKind::TABLE_ROW);
        let cells = first_row
            .children()
            .filter(|n| n.kind() == SyntaxKind::TABLE_CELL)
            .count();
        assert_eq!(cells, 2);
    }

    #[test]
    fn pipe_line_without_delimiter_row_is_a_paragraph() {
        let tree = parse("a | b\nplain\n");
        assert!(!has(&tree, SyntaxKind::TABLE));
        assert!(has(&tree, SyntaxKind::PARAGRAPH));
    }
}
