//! Body formatters shared by the tool renderers.
//!
//! Every formatter works at body width (the tool indents the result) and
//! applies the same line cap: collapsed bodies keep `line_cap` lines and add
//! a notice counting the rest, expanded bodies keep everything.

use crate::context::RenderContext;
use crate::highlight::{DiffLayout, DiffRequest};
use crate::terminal::{StyledLine, StyledSpan};
use crate::text::{ELLIPSIS, digits, format_size, normalize, split_lines};
use crossterm::style::ContentStyle;

/// Formatted body lines and how many source lines the cap hid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formatted {
    pub lines: Vec<StyledLine>,
    pub hidden: usize,
}

impl Formatted {
    pub fn is_truncated(&self) -> bool {
        self.hidden > 0
    }
}

/// Text of the notice shown under a collapsed body.
pub fn truncation_notice(hidden: usize) -> String {
    format!("{ELLIPSIS} ({hidden} lines hidden) [click or space to expand]")
}

fn notice(hidden: usize, width: usize, style: ContentStyle) -> StyledLine {
    StyledLine::styled(truncation_notice(hidden), style)
        .truncate(width, ELLIPSIS)
        .pad_to(width, style)
}

/// Lines kept and lines hidden for a body of `total` lines.
fn cap(ctx: &RenderContext<'_>, total: usize, expanded: bool) -> (usize, usize) {
    if expanded || total <= ctx.config.line_cap {
        (total, 0)
    } else {
        (ctx.config.line_cap, total - ctx.config.line_cap)
    }
}

/// Plain text: one space of indent per line, each line cut and padded to
/// `width`.
pub fn plain(ctx: &RenderContext<'_>, content: &str, width: usize, expanded: bool) -> Formatted {
    let styles = ctx.styles;
    let normalized = normalize(content);
    let lines = split_lines(normalized.trim());
    let (shown, hidden) = cap(ctx, lines.len(), expanded);

    let mut out: Vec<StyledLine> = lines[..shown]
        .iter()
        .map(|ln| {
            StyledLine::styled(format!(" {ln}"), styles.content_line)
                .truncate(width, ELLIPSIS)
                .pad_to(width, styles.content_line)
        })
        .collect();
    if hidden > 0 {
        out.push(notice(hidden, width, styles.content_truncation));
    }
    Formatted { lines: out, hidden }
}

/// Highlighted code with a line-number column starting after `offset`.
pub fn code(
    ctx: &RenderContext<'_>,
    path: &str,
    content: &str,
    offset: usize,
    width: usize,
    expanded: bool,
) -> Formatted {
    let styles = ctx.styles;
    let normalized = normalize(content);
    let lines = split_lines(&normalized);
    let (shown, hidden) = cap(ctx, lines.len(), expanded);
    let source = lines[..shown].join("\n");

    let highlighted = match ctx.highlighter.highlight(&source, path, Some(styles.code_bg)) {
        Ok(lines) => lines,
        Err(err) => {
            tracing::debug!(path, %err, "highlight failed, showing raw code");
            source
                .split('\n')
                .map(|ln| StyledLine::styled(ln, styles.code_line))
                .collect()
        }
    };

    let gutter = digits(shown + offset);
    // " N " then two columns of padding before the code.
    let code_width = width.saturating_sub(gutter + 4);
    let mut out: Vec<StyledLine> = highlighted
        .into_iter()
        .enumerate()
        .map(|(i, ln)| {
            let mut line = StyledLine::new(vec![
                StyledSpan::new(
                    format!(" {:>gutter$} ", offset + i + 1),
                    styles.code_line_number,
                ),
                StyledSpan::new("  ", styles.code_line),
            ]);
            line.extend(
                ln.truncate(code_width, ELLIPSIS)
                    .pad_to(code_width, styles.code_line),
            );
            line
        })
        .collect();
    if hidden > 0 {
        out.push(notice(hidden, width, styles.code_truncation));
    }
    Formatted { lines: out, hidden }
}

/// Diff of `before` and `after`. The notice goes above the kept lines so
/// the hunk header stays visible.
pub fn diff(
    ctx: &RenderContext<'_>,
    file: &str,
    before: &str,
    after: &str,
    width: usize,
    layout: DiffLayout,
    expanded: bool,
) -> Formatted {
    let mut lines = ctx.diff.format(DiffRequest {
        file,
        before,
        after,
        width,
        layout,
        styles: ctx.styles,
    });
    let (shown, hidden) = cap(ctx, lines.len(), expanded);
    if hidden == 0 {
        return Formatted { lines, hidden };
    }
    lines.truncate(shown);
    let mut out = Vec::with_capacity(shown + 1);
    out.push(notice(hidden, width, ctx.styles.diff_truncation));
    out.extend(lines);
    Formatted { lines: out, hidden }
}

/// ` Note ` tag reporting a partially applied edit batch.
pub fn multi_edit_note(ctx: &RenderContext<'_>, applied: usize, total: usize) -> StyledLine {
    let styles = ctx.styles;
    StyledLine::new(vec![
        styles.tag("Note", styles.note_tag),
        StyledSpan::raw(" "),
        StyledSpan::new(
            format!("{applied} of {total} edits succeeded"),
            styles.note_message,
        ),
    ])
}

/// Markdown at reading width. Falls back to plain text when the renderer
/// fails.
pub fn markdown(ctx: &RenderContext<'_>, content: &str, width: usize, expanded: bool) -> Formatted {
    let normalized = normalize(content);
    let text = normalized.trim();
    let capped = width.min(ctx.config.max_text_width);
    let mut lines = match ctx.markdown.render(text, capped) {
        Ok(lines) => lines,
        Err(err) => {
            tracing::debug!(%err, "markdown render failed, falling back to plain");
            return plain(ctx, text, width, expanded);
        }
    };
    let (shown, hidden) = cap(ctx, lines.len(), expanded);
    lines.truncate(shown);
    if hidden > 0 {
        lines.push(notice(hidden, capped, ctx.styles.content_truncation));
    }
    Formatted { lines, hidden }
}

/// One-line summary of a media payload: `Loaded → image/png 1.5 KB`.
pub fn image(ctx: &RenderContext<'_>, data: &str, mime_type: &str) -> Formatted {
    let styles = ctx.styles;
    let size = data.len() * 3 / 4;
    let line = StyledLine::new(vec![
        StyledSpan::new("Loaded", styles.image_loaded),
        StyledSpan::raw(" "),
        StyledSpan::new(styles.glyphs.arrow, styles.image_arrow),
        StyledSpan::raw(" "),
        StyledSpan::new(mime_type, styles.base),
        StyledSpan::raw(" "),
        StyledSpan::new(format_size(size), styles.subtle),
    ]);
    Formatted {
        lines: vec![line],
        hidden: 0,
    }
}
