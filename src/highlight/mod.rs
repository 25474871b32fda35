//! Highlighting collaborators: syntax, diff and markdown.
//!
//! Renderers only see the traits; the default engines are zero-sized statics
//! wired in by `RenderContext::new`.

mod diff;
mod markdown;
mod syntax;
mod table;
#[cfg(test)]
mod tests;

pub use diff::{SimilarDiff, unified_text};
pub use markdown::CmarkRenderer;
pub use syntax::{SyntectHighlighter, detect_syntax, syntax_from_fence};
pub use table::Table;

use crate::error::Result;
use crate::style::Styles;
use crate::terminal::StyledLine;
use crossterm::style::Color;

/// Syntax highlighting engine.
pub trait SyntaxHighlighter {
    /// Highlight `source`, picking a grammar from `file_hint`. One output line
    /// per input line; `bg` is applied to every span when given.
    fn highlight(&self, source: &str, file_hint: &str, bg: Option<Color>)
    -> Result<Vec<StyledLine>>;
}

/// Markdown renderer used for prose bodies.
pub trait MarkdownRenderer {
    /// Render `text` word-wrapped to `width`.
    fn render(&self, text: &str, width: usize) -> Result<Vec<StyledLine>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLayout {
    Unified,
    Split,
}

/// Everything a diff formatter needs for one file.
#[derive(Debug, Clone, Copy)]
pub struct DiffRequest<'a> {
    pub file: &'a str,
    pub before: &'a str,
    pub after: &'a str,
    pub width: usize,
    pub layout: DiffLayout,
    pub styles: &'a Styles,
}

/// Diff engine.
pub trait DiffFormatter {
    fn format(&self, request: DiffRequest<'_>) -> Vec<StyledLine>;
}
