//! Markdown rendering using pulldown-cmark.
//!
//! Tool output is rendered without colors: emphasis maps to terminal
//! attributes and fenced code goes through the syntax highlighter.

use super::table::Table;
use super::{MarkdownRenderer, SyntaxHighlighter, SyntectHighlighter, syntax_from_fence};
use crate::error::Result;
use crate::terminal::{StyledLine, StyledSpan};
use crate::text::{ELLIPSIS, display_width};
use crossterm::style::{Attribute, Attributes, ContentStyle};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Default markdown renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct CmarkRenderer;

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, text: &str, width: usize) -> Result<Vec<StyledLine>> {
        let mut writer = Writer::new(width);
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        for event in Parser::new_ext(text, options) {
            writer.event(event)?;
        }
        Ok(writer.finish())
    }
}

#[derive(Default)]
struct TableState {
    table: Table,
    row: Vec<String>,
    cell: String,
    in_head: bool,
}

struct Writer {
    width: usize,
    out: Vec<StyledLine>,
    line: StyledLine,
    /// Prefix for the first line of the current block (list marker).
    first_prefix: Option<String>,
    /// Indent for wrapped and following lines of the current block.
    indent: String,
    bold: bool,
    italic: bool,
    strike: bool,
    quote_depth: usize,
    lists: Vec<Option<u64>>,
    code: Option<(Option<&'static str>, String)>,
    table: Option<TableState>,
    link_dest: Option<String>,
}

impl Writer {
    fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            out: Vec::new(),
            line: StyledLine::empty(),
            first_prefix: None,
            indent: String::new(),
            bold: false,
            italic: false,
            strike: false,
            quote_depth: 0,
            lists: Vec::new(),
            code: None,
            table: None,
            link_dest: None,
        }
    }

    fn style(&self) -> ContentStyle {
        let mut attributes = Attributes::default();
        if self.bold {
            attributes.set(Attribute::Bold);
        }
        if self.italic || self.quote_depth > 0 {
            attributes.set(Attribute::Italic);
        }
        if self.strike {
            attributes.set(Attribute::CrossedOut);
        }
        ContentStyle {
            attributes,
            ..ContentStyle::default()
        }
    }

    fn quote_prefix(&self) -> String {
        "│ ".repeat(self.quote_depth)
    }

    /// Emit the current line, wrapped, with list and quote prefixes.
    fn flush(&mut self) {
        let line = std::mem::take(&mut self.line);
        if line.is_empty() {
            return;
        }
        let quote = self.quote_prefix();
        let first = self.first_prefix.take().unwrap_or_else(|| self.indent.clone());
        let hang = " ".repeat(display_width(&first));
        let avail = self
            .width
            .saturating_sub(display_width(&quote) + display_width(&first))
            .max(1);
        for (i, part) in line.wrap(avail).into_iter().enumerate() {
            let lead = if i == 0 { first.as_str() } else { hang.as_str() };
            let mut out = StyledLine::empty();
            if !quote.is_empty() {
                out.push(StyledSpan::dim(quote.clone()));
            }
            if !lead.is_empty() {
                out.push(StyledSpan::raw(lead));
            }
            out.extend(part);
            self.out.push(out);
        }
    }

    fn blank(&mut self) {
        if self.out.last().is_some_and(|l| !l.is_empty()) {
            self.out.push(StyledLine::empty());
        }
    }

    fn push_text(&mut self, text: &str) {
        let style = self.style();
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.flush();
            }
            if !part.is_empty() {
                self.line.push_str(part, style);
            }
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        if let Some(state) = self.table.as_mut() {
            match event {
                Event::Text(t) | Event::Code(t) => {
                    state.cell.push_str(&t);
                    return Ok(());
                }
                Event::Start(Tag::TableHead) => {
                    state.in_head = true;
                    return Ok(());
                }
                Event::End(TagEnd::TableCell) => {
                    let cell = std::mem::take(&mut state.cell);
                    state.row.push(cell);
                    return Ok(());
                }
                Event::End(TagEnd::TableHead) => {
                    state.table.headers = std::mem::take(&mut state.row);
                    state.in_head = false;
                    return Ok(());
                }
                Event::End(TagEnd::TableRow) => {
                    let row = std::mem::take(&mut state.row);
                    if state.in_head {
                        state.table.headers = row;
                    } else {
                        state.table.rows.push(row);
                    }
                    return Ok(());
                }
                Event::End(TagEnd::Table) => {
                    if let Some(state) = self.table.take() {
                        self.out.extend(state.table.render(self.width));
                        self.out.push(StyledLine::empty());
                    }
                    return Ok(());
                }
                _ => return Ok(()),
            }
        }

        if let Some((_, buf)) = self.code.as_mut() {
            match event {
                Event::Text(t) => {
                    buf.push_str(&t);
                    return Ok(());
                }
                Event::End(TagEnd::CodeBlock) => {
                    self.end_code_block()?;
                    return Ok(());
                }
                _ => return Ok(()),
            }
        }

        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(t) => self.push_text(&t),
            Event::Code(code) => {
                let style = ContentStyle {
                    attributes: Attribute::Dim.into(),
                    ..ContentStyle::default()
                };
                self.line.push_str(&format!("`{code}`"), style);
            }
            Event::SoftBreak => {
                let style = self.style();
                self.line.push_str(" ", style);
            }
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.out.push(StyledLine::dim("─".repeat(self.width.min(40))));
                self.out.push(StyledLine::empty());
            }
            Event::TaskListMarker(done) => {
                let style = self.style();
                self.line.push_str(if done { "[x] " } else { "[ ] " }, style);
            }
            _ => {}
        }
        Ok(())
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Strong => self.bold = true,
            Tag::Emphasis => self.italic = true,
            Tag::Strikethrough => self.strike = true,
            Tag::Heading { level, .. } => {
                self.flush();
                let prefix = match level {
                    HeadingLevel::H1 => "# ",
                    HeadingLevel::H2 => "## ",
                    HeadingLevel::H3 => "### ",
                    _ => "#### ",
                };
                self.bold = true;
                let style = self.style();
                self.line.push_str(prefix, style);
            }
            Tag::Paragraph => self.flush(),
            Tag::BlockQuote(_) => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let pad = "  ".repeat(depth);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{pad}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{pad}- "),
                };
                self.indent = " ".repeat(display_width(&marker));
                self.first_prefix = Some(marker);
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) => syntax_from_fence(&lang),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((lang, String::new()));
            }
            Tag::Table(alignments) => {
                self.flush();
                let mut state = TableState::default();
                state.table.alignments = alignments;
                self.table = Some(state);
            }
            Tag::Link { dest_url, .. } => self.link_dest = Some(dest_url.to_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Strong => self.bold = false,
            TagEnd::Emphasis => self.italic = false,
            TagEnd::Strikethrough => self.strike = false,
            TagEnd::Heading(_) => {
                self.flush();
                self.bold = false;
                self.blank();
            }
            TagEnd::Paragraph => {
                self.flush();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            TagEnd::Item => {
                self.flush();
                self.first_prefix = None;
                let depth = self.lists.len().saturating_sub(1);
                self.indent = "  ".repeat(depth);
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.indent.clear();
                    self.blank();
                }
            }
            TagEnd::Link => {
                if let Some(dest) = self.link_dest.take()
                    && !self.line.plain().ends_with(&dest)
                {
                    let style = ContentStyle {
                        attributes: Attribute::Underlined.into(),
                        ..ContentStyle::default()
                    };
                    self.line.push_str(&format!(" ({dest})"), style);
                }
            }
            _ => {}
        }
    }

    fn end_code_block(&mut self) -> Result<()> {
        let Some((lang, buf)) = self.code.take() else {
            return Ok(());
        };
        let source = buf.trim_end_matches('\n');
        let lines = match lang {
            Some(name) => {
                SyntectHighlighter.highlight(source, &format!("x.{}", fence_ext(name)), None)?
            }
            None => source.lines().map(StyledLine::dim).collect(),
        };
        let quote = self.quote_prefix();
        let avail = self.width.saturating_sub(display_width(&quote) + 2);
        for line in lines {
            let mut out = StyledLine::empty();
            if !quote.is_empty() {
                out.push(StyledSpan::dim(quote.clone()));
            }
            out.push(StyledSpan::raw("  "));
            out.extend(line.truncate(avail, ELLIPSIS));
            self.out.push(out);
        }
        self.out.push(StyledLine::empty());
        Ok(())
    }

    fn finish(mut self) -> Vec<StyledLine> {
        self.flush();
        while self.out.last().is_some_and(StyledLine::is_empty) {
            self.out.pop();
        }
        self.out
    }
}

/// File extension that resolves back to a syntax name.
fn fence_ext(syntax: &str) -> &'static str {
    match syntax {
        "Rust" => "rs",
        "Python" => "py",
        "JavaScript" => "js",
        "TypeScript" => "ts",
        "JSON" => "json",
        "TOML" => "toml",
        "YAML" => "yaml",
        "Markdown" => "md",
        "Bourne Again Shell (bash)" => "sh",
        "Go" => "go",
        "C" => "c",
        "C++" => "cpp",
        "Java" => "java",
        "Ruby" => "rb",
        "HTML" => "html",
        "CSS" => "css",
        "SQL" => "sql",
        "XML" => "xml",
        "Lua" => "lua",
        "Diff" => "diff",
        _ => "txt",
    }
}
