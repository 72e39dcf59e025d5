//! Thinking tags: `<thinking>` spans rewritten into fenced code blocks.
//!
//! Streaming model output wraps its reasoning in `<thinking>` or
//! `<thinking title="...">` tags. Markdown has no such construct, so before
//! parsing we rewrite each tag pair into a fence with a `thinking` info
//! string (`thinking:Title` when a title was given). The fence then flows
//! through the normal pipeline and the renderer turns it into a collapsible
//! block instead of a code block.
//!
//! Matching is case-insensitive and non-greedy: the first closing tag wins,
//! so a nested opener simply becomes part of the body. An opener without a
//! closer (a tag still streaming in) is left alone and renders literally.

use std::borrow::Cow;
use std::sync::LazyLock;

use markweave_syntax::{SyntaxKind, SyntaxNode, SyntaxToken};
use regex::Regex;

/// Title used when the tag carries none.
pub const DEFAULT_TITLE: &str = "Thinking...";

static TITLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<thinking\s+title="([^"]*)">([\s\S]*?)</thinking>"#)
        .expect("titled thinking pattern")
});

static PLAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<thinking>([\s\S]*?)</thinking>").expect("plain thinking pattern")
});

/// Rewrite thinking tags into `thinking` fences. Input without tags is
/// returned unchanged, without allocating.
pub fn preprocess(input: &str) -> Cow<'_, str> {
    let pass = TITLED.replace_all(input, "```thinking:${1}\n${2}\n```");
    if PLAIN.is_match(&pass) {
        Cow::Owned(
            PLAIN
                .replace_all(&pass, "```thinking\n${1}\n```")
                .into_owned(),
        )
    } else {
        pass
    }
}

/// Does this fence info string mark a thinking block?
pub fn is_thinking(info: &str) -> bool {
    info == "thinking" || info.starts_with("thinking:")
}

/// Display title for a thinking fence info string.
pub fn fence_title(info: &str) -> String {
    let title = info
        .strip_prefix("thinking")
        .map(|rest| rest.strip_prefix(':').unwrap_or(rest).trim())
        .unwrap_or("");
    if title.is_empty() {
        DEFAULT_TITLE.to_owned()
    } else {
        title.to_owned()
    }
}

/// The info string of a fenced code block, if present.
pub fn fence_info(node: &SyntaxNode) -> Option<String> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == SyntaxKind::FENCE_LANG)
        .map(|t| t.text().trim().to_owned())
}

/// The body of a fenced code block: everything between the line of the
/// opening fence and the closing fence, dedented. Degenerate fences (no
/// content line at all) yield an empty string.
pub fn fence_content(node: &SyntaxNode) -> String {
    let tokens: Vec<SyntaxToken> = node
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .collect();
    let Some(first_newline) = tokens.iter().position(|t| t.kind() == SyntaxKind::NEWLINE) else {
        return String::new();
    };
    let body_start = first_newline + 1;
    let mut end = tokens.len();
    if end > body_start && tokens[end - 1].kind() == SyntaxKind::WHITESPACE {
        end -= 1;
    }
    if end > body_start && tokens[end - 1].kind() == SyntaxKind::FENCE_MARKER {
        end -= 1;
        if end > body_start && tokens[end - 1].kind() == SyntaxKind::NEWLINE {
            end -= 1;
        }
    }
    let body: String = tokens[body_start..end].iter().map(|t| t.text()).collect();
    dedent(&body)
}

/// Strip the longest common leading whitespace from every non-blank line.
fn dedent(s: &str) -> String {
    let min_indent = s
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    if min_indent == 0 {
        return s.to_owned();
    }
    s.lines()
        .map(|line| {
            if line.len() >= min_indent {
                &line[min_indent..]
            } else {
                line.trim_start()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use markweave_syntax::parse;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn text_without_tags_is_borrowed() {
        let input = "just *markdown*, nothing else";
        let out = preprocess(input);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, input);
    }

    #[test]
    fn plain_tag_becomes_fence() {
        let out = preprocess("<thinking>let me see</thinking>");
        insta::assert_snapshot!(out, @r"
        ```thinking
        let me see
        ```
        ");
    }

    #[test]
    fn titled_tag_keeps_its_title() {
        let out = preprocess("<thinking title=\"Deep Thought\">hmm</thinking>");
        insta::assert_snapshot!(out, @r"
        ```thinking:Deep Thought
        hmm
        ```
        ");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let out = preprocess("<THINKING>loud</Thinking>");
        assert!(out.starts_with("```thinking\n"));
    }

    #[test]
    fn surrounding_text_survives() {
        let out = preprocess("before <thinking>x</thinking> after");
        assert_eq!(out, "before ```thinking\nx\n``` after");
    }

    #[test]
    fn unclosed_tag_is_left_alone() {
        let input = "<thinking>still streaming";
        assert_eq!(preprocess(input), input);
    }

    #[test]
    fn first_closing_tag_wins() {
        let out = preprocess("<thinking>a<thinking>b</thinking>c</thinking>");
        assert_eq!(out, "```thinking\na<thinking>b\n```c</thinking>");
    }

    #[rstest]
    #[case("thinking", DEFAULT_TITLE)]
    #[case("thinking:Custom Title", "Custom Title")]
    #[case("thinking:  padded  ", "padded")]
    #[case("thinking:", DEFAULT_TITLE)]
    fn titles_from_info_strings(#[case] info: &str, #[case] expected: &str) {
        assert_eq!(fence_title(info), expected);
        assert!(is_thinking(info));
    }

    #[test]
    fn rust_fence_is_not_thinking() {
        assert!(!is_thinking("rust"));
        assert!(!is_thinking("thinkingly"));
    }

    #[test]
    fn title_and_body_round_trip_through_the_parser() {
        let source = preprocess("<thinking title=\"Plan\">step one\nstep two</thinking>");
        let tree = parse(&source);
        let fence = tree
            .descendants()
            .find(|n| n.kind() == SyntaxKind::FENCED_CODE)
            .unwrap();
        let info = fence_info(&fence).unwrap();
        assert!(is_thinking(&info));
        assert_eq!(fence_title(&info), "Plan");
        assert_eq!(fence_content(&fence), "step one\nstep two");
    }

    #[test]
    fn fence_content_extracts_code() {
        let tree = parse("```rust\nfn main() {\n    body();\n}\n```\n");
        let fence = tree
            .descendants()
            .find(|n| n.kind() == SyntaxKind::FENCED_CODE)
            .unwrap();
        assert_eq!(fence_content(&fence), "fn main() {\n    body();\n}");
    }

    #[test]
    fn indented_body_is_dedented() {
        let tree = parse("```\n    a\n      b\n```\n");
        let fence = tree
            .descendants()
            .find(|n| n.kind() == SyntaxKind::FENCED_CODE)
            .unwrap();
        assert_eq!(fence_content(&fence), "a\n  b");
    }

    #[rstest]
    #[case("```")]
    #[case("```thinking")]
    fn degenerate_fences_have_empty_content(#[case] input: &str) {
        let tree = parse(input);
        let fence = tree
            .descendants()
            .find(|n| n.kind() == SyntaxKind::FENCED_CODE)
            .unwrap();
        assert_eq!(fence_content(&fence), "");
    }

    #[test]
    fn unclosed_fence_content_runs_to_the_end() {
        let tree = parse("```thinking\npartial body");
        let fence = tree
            .descendants()
            .find(|n| n.kind() == SyntaxKind::FENCED_CODE)
            .unwrap();
        assert_eq!(fence_content(&fence), "partial body");
    }
}
