//! Syntax highlighting using syntect.

use super::SyntaxHighlighter;
use crate::error::{RenderError, Result};
use crate::terminal::{StyledLine, StyledSpan};
use crossterm::style::{Attribute, Attributes, Color, ContentStyle};
use std::sync::LazyLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Lazily loaded syntax and theme sets.
pub static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
pub static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const THEME: &str = "base16-ocean.dark";

/// Detect syntax from file extension.
pub fn detect_syntax(path: &str) -> Option<&'static str> {
    let ext = path.rsplit('.').next()?;
    match ext.to_lowercase().as_str() {
        "rs" => Some("Rust"),
        "py" => Some("Python"),
        "js" | "mjs" | "cjs" | "jsx" => Some("JavaScript"),
        "ts" | "mts" | "cts" | "tsx" => Some("TypeScript"),
        "json" => Some("JSON"),
        "toml" => Some("TOML"),
        "yaml" | "yml" => Some("YAML"),
        "md" | "markdown" => Some("Markdown"),
        "sh" | "bash" | "zsh" => Some("Bourne Again Shell (bash)"),
        "go" => Some("Go"),
        "c" | "h" => Some("C"),
        "cpp" | "cc" | "cxx" | "hpp" => Some("C++"),
        "java" => Some("Java"),
        "rb" => Some("Ruby"),
        "html" | "htm" => Some("HTML"),
        "css" => Some("CSS"),
        "sql" => Some("SQL"),
        "xml" => Some("XML"),
        "lua" => Some("Lua"),
        _ => None,
    }
}

/// Detect syntax from a markdown code fence language identifier.
pub fn syntax_from_fence(lang: &str) -> Option<&'static str> {
    match lang.to_lowercase().as_str() {
        "rust" | "rs" => Some("Rust"),
        "python" | "py" => Some("Python"),
        "javascript" | "js" | "jsx" => Some("JavaScript"),
        "typescript" | "ts" | "tsx" => Some("TypeScript"),
        "bash" | "sh" | "shell" | "zsh" => Some("Bourne Again Shell (bash)"),
        "golang" => Some("Go"),
        "c++" => Some("C++"),
        "ruby" => Some("Ruby"),
        "diff" | "patch" => Some("Diff"),
        other => detect_syntax(&format!("x.{other}")),
    }
}

/// Grammar for a file: extension table first, then syntect's own extension
/// lookup, then the first line (shebangs, modelines).
fn find_syntax(file_hint: &str, first_line: &str) -> &'static SyntaxReference {
    let set: &'static SyntaxSet = &SYNTAX_SET;
    detect_syntax(file_hint)
        .and_then(|name| set.find_syntax_by_name(name))
        .or_else(|| {
            let ext = file_hint.rsplit('.').next()?;
            set.find_syntax_by_extension(ext)
        })
        .or_else(|| set.find_syntax_by_first_line(first_line))
        .unwrap_or_else(|| set.find_syntax_plain_text())
}

fn theme() -> Option<&'static Theme> {
    let set: &'static ThemeSet = &THEME_SET;
    set.themes
        .get(THEME)
        .or_else(|| set.themes.values().next())
}

/// Convert a syntect style to a terminal style.
fn to_content_style(style: syntect::highlighting::Style, bg: Option<Color>) -> ContentStyle {
    let mut attributes = Attributes::default();
    if style.font_style.contains(FontStyle::BOLD) {
        attributes.set(Attribute::Bold);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        attributes.set(Attribute::Italic);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        attributes.set(Attribute::Underlined);
    }
    ContentStyle {
        foreground_color: Some(Color::Rgb {
            r: style.foreground.r,
            g: style.foreground.g,
            b: style.foreground.b,
        }),
        background_color: bg,
        attributes,
        ..ContentStyle::default()
    }
}

/// Default highlighter backed by syntect's bundled grammars.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntectHighlighter;

impl SyntaxHighlighter for SyntectHighlighter {
    fn highlight(
        &self,
        source: &str,
        file_hint: &str,
        bg: Option<Color>,
    ) -> Result<Vec<StyledLine>> {
        let first_line = source.lines().next().unwrap_or_default();
        let syntax = find_syntax(file_hint, first_line);
        let theme = theme().ok_or_else(|| RenderError::Highlight("no theme loaded".into()))?;
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut lines = Vec::new();
        for line in LinesWithEndings::from(source) {
            let ranges = highlighter
                .highlight_line(line, &SYNTAX_SET)
                .map_err(|e| RenderError::Highlight(e.to_string()))?;
            let spans = ranges
                .into_iter()
                .map(|(style, text)| {
                    StyledSpan::new(text.trim_end_matches(['\n', '\r']), to_content_style(style, bg))
                })
                .filter(|s| !s.content.is_empty())
                .collect();
            lines.push(StyledLine::new(spans));
        }
        if source.is_empty() || source.ends_with('\n') {
            lines.push(StyledLine::empty());
        }
        Ok(lines)
    }
}
