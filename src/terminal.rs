//! Styled text primitives shared by every formatter.
//!
//! Rendering never touches the terminal directly: formatters build
//! `StyledLine`s and the consumer decides how to draw them. `to_ansi` is the
//! only place escape sequences are produced.

use crate::text::{display_width, truncate_str};
use crossterm::style::{Attribute, Color, ContentStyle, StyledContent};
use std::fmt::Write as _;
use std::io::{self, Write};
use unicode_segmentation::UnicodeSegmentation;

/// A styled span of text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyledSpan {
    pub content: String,
    pub style: ContentStyle,
}

impl StyledSpan {
    /// Create a new styled span.
    pub fn new(content: impl Into<String>, style: ContentStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    /// Create an unstyled span.
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: ContentStyle::new(),
        }
    }

    /// Create a span with foreground color.
    pub fn colored(content: impl Into<String>, color: Color) -> Self {
        Self {
            content: content.into(),
            style: ContentStyle {
                foreground_color: Some(color),
                ..ContentStyle::default()
            },
        }
    }

    /// Create a dim span.
    pub fn dim(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: ContentStyle {
                attributes: Attribute::Dim.into(),
                ..ContentStyle::default()
            },
        }
    }

    /// Create a bold span.
    pub fn bold(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: ContentStyle {
                attributes: Attribute::Bold.into(),
                ..ContentStyle::default()
            },
        }
    }

    /// Display width in terminal cells.
    pub fn width(&self) -> usize {
        display_width(&self.content)
    }

    /// Write this span to a writer.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let styled = StyledContent::new(self.style, &self.content);
        write!(w, "{styled}")
    }
}

/// A line of styled text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    /// Create a new line from spans.
    pub fn new(spans: Vec<StyledSpan>) -> Self {
        Self { spans }
    }

    /// Create an empty line.
    pub fn empty() -> Self {
        Self { spans: Vec::new() }
    }

    /// Create a line from a single raw string.
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            spans: vec![StyledSpan::raw(content)],
        }
    }

    /// Create a line from a single string with one style.
    pub fn styled(content: impl Into<String>, style: ContentStyle) -> Self {
        Self {
            spans: vec![StyledSpan::new(content, style)],
        }
    }

    /// Create a single-color line.
    pub fn colored(content: impl Into<String>, color: Color) -> Self {
        Self {
            spans: vec![StyledSpan::colored(content, color)],
        }
    }

    /// Create a dim line.
    pub fn dim(content: impl Into<String>) -> Self {
        Self {
            spans: vec![StyledSpan::dim(content)],
        }
    }

    /// Push a span to this line.
    pub fn push(&mut self, span: StyledSpan) {
        self.spans.push(span);
    }

    /// Append text, merging into the last span when the style matches.
    pub fn push_str(&mut self, content: &str, style: ContentStyle) {
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.content.push_str(content),
            _ => self.spans.push(StyledSpan::new(content, style)),
        }
    }

    /// Append all spans of another line.
    pub fn extend(&mut self, other: StyledLine) {
        self.spans.extend(other.spans);
    }

    /// True if the line has no visible content.
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.content.is_empty())
    }

    /// Display width in terminal cells.
    pub fn width(&self) -> usize {
        self.spans.iter().map(StyledSpan::width).sum()
    }

    /// Text content without styling.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.content.as_str()).collect()
    }

    /// Prepend a span.
    pub fn prepend(mut self, span: StyledSpan) -> Self {
        self.spans.insert(0, span);
        self
    }

    /// Cut the line to `width` cells, ending with `tail` when anything was
    /// dropped. Styles of the kept spans are preserved; the tail takes the
    /// style of the span it replaces.
    pub fn truncate(&self, width: usize, tail: &str) -> StyledLine {
        if self.width() <= width {
            return self.clone();
        }
        let tail_width = display_width(tail);
        if width < tail_width {
            return StyledLine::raw(truncate_str(tail, width, ""));
        }
        let budget = width - tail_width;
        let mut out = StyledLine::empty();
        let mut used = 0;
        let mut tail_style = ContentStyle::new();
        for span in &self.spans {
            let w = span.width();
            if used + w <= budget {
                out.push(span.clone());
                used += w;
                continue;
            }
            let kept = truncate_str(&span.content, budget - used, "");
            if !kept.is_empty() {
                out.push(StyledSpan::new(kept, span.style));
            }
            tail_style = span.style;
            break;
        }
        out.push(StyledSpan::new(tail, tail_style));
        out
    }

    /// Word-wrap to `width` cells. Breaking whitespace is dropped; words wider
    /// than the line are split on grapheme boundaries.
    pub fn wrap(&self, width: usize) -> Vec<StyledLine> {
        if width == 0 || self.width() <= width {
            return vec![self.clone()];
        }
        let mut lines = Vec::new();
        let mut current = StyledLine::empty();
        let mut used = 0;
        for span in &self.spans {
            for word in span.content.split_word_bounds() {
                let w = display_width(word);
                if used + w <= width {
                    current.push_str(word, span.style);
                    used += w;
                    continue;
                }
                if word.trim().is_empty() {
                    if used > 0 {
                        lines.push(std::mem::take(&mut current).trim_end());
                        used = 0;
                    }
                    continue;
                }
                if used > 0 {
                    lines.push(std::mem::take(&mut current).trim_end());
                    used = 0;
                }
                for g in word.graphemes(true) {
                    let gw = display_width(g);
                    if used + gw > width && used > 0 {
                        lines.push(std::mem::take(&mut current));
                        used = 0;
                    }
                    current.push_str(g, span.style);
                    used += gw;
                }
            }
        }
        if !current.spans.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Drop trailing whitespace.
    pub fn trim_end(mut self) -> StyledLine {
        while let Some(last) = self.spans.last_mut() {
            let trimmed = last.content.trim_end().len();
            last.content.truncate(trimmed);
            if !last.content.is_empty() {
                break;
            }
            self.spans.pop();
        }
        self
    }

    /// Pad with spaces in `style` until the line is `width` cells wide.
    pub fn pad_to(mut self, width: usize, style: ContentStyle) -> StyledLine {
        let w = self.width();
        if w < width {
            self.spans
                .push(StyledSpan::new(" ".repeat(width - w), style));
        }
        self
    }

    /// Render with ANSI escapes.
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            let _ = write!(out, "{}", StyledContent::new(span.style, &span.content));
        }
        out
    }

    /// Write this line to a writer.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for span in &self.spans {
            span.write_to(w)?;
        }
        Ok(())
    }
}

impl From<&str> for StyledLine {
    fn from(s: &str) -> Self {
        StyledLine::raw(s)
    }
}

impl From<String> for StyledLine {
    fn from(s: String) -> Self {
        StyledLine::raw(s)
    }
}

/// A rendered, width-constrained block of lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedBlock {
    pub lines: Vec<StyledLine>,
}

impl RenderedBlock {
    pub fn new(lines: Vec<StyledLine>) -> Self {
        Self { lines }
    }

    /// Number of terminal rows.
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Widest line in cells.
    pub fn width(&self) -> usize {
        self.lines.iter().map(StyledLine::width).max().unwrap_or(0)
    }

    /// Text without escapes, one row per line.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(StyledLine::plain)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Text with ANSI styling, one row per line.
    pub fn to_ansi(&self) -> String {
        self.lines
            .iter()
            .map(StyledLine::to_ansi)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write every line followed by a newline.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for line in &self.lines {
            line.write_to(w)?;
            writeln!(w)?;
        }
        Ok(())
    }
}

/// Builder for creating styled lines.
pub struct LineBuilder {
    line: StyledLine,
}

impl LineBuilder {
    /// Create a new line builder.
    pub fn new() -> Self {
        Self {
            line: StyledLine::empty(),
        }
    }

    /// Add a raw (unstyled) span.
    pub fn raw(mut self, content: impl Into<String>) -> Self {
        self.line.push(StyledSpan::raw(content));
        self
    }

    /// Add a colored span.
    pub fn colored(mut self, content: impl Into<String>, color: Color) -> Self {
        self.line.push(StyledSpan::colored(content, color));
        self
    }

    /// Add a dim span.
    pub fn dim(mut self, content: impl Into<String>) -> Self {
        self.line.push(StyledSpan::dim(content));
        self
    }

    /// Add a bold span.
    pub fn bold(mut self, content: impl Into<String>) -> Self {
        self.line.push(StyledSpan::bold(content));
        self
    }

    /// Add a span with an explicit style.
    pub fn styled(mut self, content: impl Into<String>, style: ContentStyle) -> Self {
        self.line.push(StyledSpan::new(content, style));
        self
    }

    /// Add an already built span.
    pub fn span(mut self, span: StyledSpan) -> Self {
        self.line.push(span);
        self
    }

    /// Add every span of a line.
    pub fn line(mut self, line: StyledLine) -> Self {
        self.line.extend(line);
        self
    }

    /// Build the line.
    pub fn build(self) -> StyledLine {
        self.line
    }
}

impl Default for LineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
