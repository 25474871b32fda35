use super::*;
use crate::style::Styles;

fn plain(lines: &[StyledLine]) -> Vec<String> {
    lines.iter().map(StyledLine::plain).collect()
}

#[test]
fn test_detect_syntax() {
    assert_eq!(detect_syntax("src/main.rs"), Some("Rust"));
    assert_eq!(detect_syntax("README.MD"), Some("Markdown"));
    assert_eq!(detect_syntax("Makefile"), None);
    assert_eq!(syntax_from_fence("rust"), Some("Rust"));
    assert_eq!(syntax_from_fence("json"), Some("JSON"));
    assert_eq!(syntax_from_fence("klingon"), None);
}

#[test]
fn test_highlight_keeps_line_count_and_text() {
    let source = "fn main() {\n    println!(\"hi\");\n}";
    let lines = SyntectHighlighter
        .highlight(source, "main.rs", None)
        .unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(plain(&lines).join("\n"), source);
}

#[test]
fn test_highlight_trailing_newline_adds_empty_line() {
    let lines = SyntectHighlighter.highlight("a\n", "x.txt", None).unwrap();
    assert_eq!(plain(&lines), vec!["a", ""]);
}

#[test]
fn test_highlight_applies_background() {
    let bg = crossterm::style::Color::Black;
    let lines = SyntectHighlighter
        .highlight("let x = 1;", "x.rs", Some(bg))
        .unwrap();
    assert!(
        lines[0]
            .spans
            .iter()
            .all(|s| s.style.background_color == Some(bg))
    );
}

#[test]
fn test_highlight_unknown_extension_is_plain() {
    let lines = SyntectHighlighter
        .highlight("just words", "notes.zzz", None)
        .unwrap();
    assert_eq!(plain(&lines), vec!["just words"]);
}

fn diff(before: &str, after: &str, width: usize, layout: DiffLayout) -> Vec<String> {
    let styles = Styles::default();
    plain(&SimilarDiff.format(DiffRequest {
        file: "a.txt",
        before,
        after,
        width,
        layout,
        styles: &styles,
    }))
}

#[test]
fn test_unified_diff() {
    let lines = diff("a\nb\nc\n", "a\nB\nc\n", 40, DiffLayout::Unified);
    assert!(lines[0].starts_with("@@ -1,3 +1,3 @@"));
    let removed = lines.iter().position(|l| l.contains("- b")).unwrap();
    let added = lines.iter().position(|l| l.contains("+ B")).unwrap();
    assert!(removed < added);
    assert!(lines.iter().all(|l| crate::text::display_width(l) <= 40));
}

#[test]
fn test_split_diff_pairs_changes() {
    let lines = diff("a\nb\n", "a\nB\n", 60, DiffLayout::Split);
    let row = lines.iter().find(|l| l.contains("- b")).unwrap();
    assert!(row.contains("+ B"));
    assert!(lines.iter().all(|l| crate::text::display_width(l) <= 60));
}

#[test]
fn test_identical_inputs_produce_no_lines() {
    assert!(diff("same\n", "same\n", 40, DiffLayout::Unified).is_empty());
}

#[test]
fn test_unified_text_counts() {
    let (text, additions, removals) = unified_text("a.txt", "a\nb\n", "a\nc\nd\n");
    assert_eq!((additions, removals), (2, 1));
    assert!(text.contains("--- a/a.txt"));
    assert!(text.contains("+c"));
}

fn md(text: &str, width: usize) -> Vec<String> {
    plain(&CmarkRenderer.render(text, width).unwrap())
}

#[test]
fn test_markdown_heading_and_paragraph() {
    let lines = md("# Title\n\nSome text here.", 40);
    assert_eq!(lines, vec!["# Title", "", "Some text here."]);
}

#[test]
fn test_markdown_wraps_to_width() {
    let lines = md("one two three four five six seven eight nine ten", 12);
    assert!(lines.len() > 1);
    assert!(lines.iter().all(|l| crate::text::display_width(l) <= 12));
}

#[test]
fn test_markdown_lists() {
    let lines = md("- first\n- second\n\n1. one\n2. two", 40);
    assert!(lines.contains(&"- first".to_string()));
    assert!(lines.contains(&"- second".to_string()));
    assert!(lines.contains(&"1. one".to_string()));
    assert!(lines.contains(&"2. two".to_string()));
}

#[test]
fn test_markdown_wrapped_list_item_hangs() {
    let lines = md("- alpha beta gamma delta", 12);
    assert_eq!(lines[0], "- alpha beta");
    assert!(lines[1].starts_with("  "));
}

#[test]
fn test_markdown_code_block_indentation_preserved() {
    let input = "Text before\n\n```rust\nfn f() {\n    if true {}\n}\n```\n\nText after";
    let lines = md(input, 60);
    let if_line = lines.iter().find(|l| l.contains("if true")).unwrap();
    assert!(if_line.contains("    if true"));
    let after = lines.iter().position(|l| l == "Text after").unwrap();
    assert!(lines[after - 1].is_empty());
}

#[test]
fn test_markdown_table() {
    let lines = md("| a | b |\n|---|---|\n| 1 | 2 |", 60);
    assert!(lines.iter().any(|l| l.starts_with('┌')));
    assert!(lines.iter().any(|l| l.contains(" 1 ")));
}

#[test]
fn test_markdown_blockquote_and_code_span() {
    let lines = md("> quoted `code`", 40);
    assert_eq!(lines, vec!["│ quoted `code`"]);
}
