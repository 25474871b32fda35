//! Pieces every tool renderer is assembled from: pending line, header with
//! parameter summary, early status line, error block and body framing.

use crate::anim::Anim;
use crate::content::Formatted;
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::item::ToolItem;
use crate::message::{ToolCall, ToolResult};
use crate::status::ToolStatus;
use crate::terminal::{StyledLine, StyledSpan};
use crate::text::{ELLIPSIS, display_width, pretty_path, truncate_str};

/// Everything a renderer may look at for one render.
pub struct RenderOpts<'a> {
    pub call: &'a ToolCall,
    pub result: Option<&'a ToolResult>,
    /// Effective status: the result decides once there is one.
    pub status: ToolStatus,
    pub expanded: bool,
    pub compact: bool,
    pub spinning: bool,
    pub anim: &'a Anim,
    /// Nested tool items of a container, empty for everything else.
    pub children: &'a mut [ToolItem],
}

impl RenderOpts<'_> {
    /// Still streaming and nobody canceled it.
    pub fn is_pending(&self) -> bool {
        !self.call.finished && !self.is_canceled()
    }

    pub fn is_canceled(&self) -> bool {
        self.status == ToolStatus::Canceled
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    /// No result, or a result without text.
    pub fn has_empty_result(&self) -> bool {
        self.result.is_none_or(|r| r.content.is_empty())
    }

    /// Result text, empty when there is no result.
    pub fn content(&self) -> &str {
        self.result.map_or("", |r| r.content.as_str())
    }
}

/// Main parameter plus optional `key=value` pairs for a header.
#[derive(Debug, Clone, Default)]
pub struct Params {
    main: String,
    pairs: Vec<(&'static str, String)>,
}

impl Params {
    pub fn new(main: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            pairs: Vec::new(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Add a pair. Empty values are skipped.
    #[must_use]
    pub fn pair(mut self, key: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.pairs.push((key, value));
        }
        self
    }

    /// Add `key=true` when `on`.
    #[must_use]
    pub fn flag(self, key: &'static str, on: bool) -> Self {
        if on { self.pair(key, "true") } else { self }
    }

    fn is_empty(&self) -> bool {
        self.main.is_empty() && self.pairs.is_empty()
    }

    /// `main (k=v, k=v)`, dropping the pairs when they would leave less than
    /// `min_budget` columns, then cut to `width`.
    pub fn format(&self, width: usize, min_budget: usize) -> String {
        let mut out = self.main.clone();
        if !self.pairs.is_empty() {
            let parts = self
                .pairs
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(", ");
            let remaining = width as isize - display_width(&parts) as isize - 3;
            if remaining >= min_budget as isize {
                out = format!("{out} ({parts})");
            }
        }
        truncate_str(&out, width, ELLIPSIS)
    }
}

/// Path as shown in headers, home directory folded to `~`.
pub fn display_path(ctx: &RenderContext<'_>, path: &str) -> String {
    pretty_path(path, ctx.config.home_dir.as_deref())
}

/// Tool name styled for a top-level or nested header.
pub fn name_label(ctx: &RenderContext<'_>, name: &str, nested: bool) -> StyledLine {
    let style = if nested {
        ctx.styles.name_nested
    } else {
        ctx.styles.name_normal
    };
    StyledLine::styled(name, style)
}

/// One-line block shown while the call is still streaming.
pub fn pending(
    ctx: &RenderContext<'_>,
    opts: &RenderOpts<'_>,
    name: &str,
    width: usize,
) -> Vec<StyledLine> {
    pending_labeled(ctx, opts, name_label(ctx, name, false), width)
}

pub fn pending_labeled(
    ctx: &RenderContext<'_>,
    opts: &RenderOpts<'_>,
    label: StyledLine,
    width: usize,
) -> Vec<StyledLine> {
    let mut line = StyledLine::new(vec![ctx.styles.icon(ToolStatus::Running), StyledSpan::raw(" ")]);
    line.extend(label);
    line.push(StyledSpan::raw(" "));
    line.push(opts.anim.render(ctx.styles));
    vec![line.truncate(width, ELLIPSIS)]
}

/// `● Name params`, never wider than `width`.
pub fn header(
    ctx: &RenderContext<'_>,
    opts: &RenderOpts<'_>,
    name: &str,
    width: usize,
    params: &Params,
) -> StyledLine {
    labeled_header(ctx, opts, name_label(ctx, name, opts.compact), width, params)
}

pub fn labeled_header(
    ctx: &RenderContext<'_>,
    opts: &RenderOpts<'_>,
    label: StyledLine,
    width: usize,
    params: &Params,
) -> StyledLine {
    let mut line = StyledLine::new(vec![ctx.styles.icon(opts.status), StyledSpan::raw(" ")]);
    line.extend(label);
    if !params.is_empty() {
        line.push(StyledSpan::raw(" "));
        let remaining = width.saturating_sub(line.width());
        line.push(StyledSpan::new(
            params.format(remaining, ctx.config.min_param_budget),
            ctx.styles.param_main,
        ));
    }
    line.truncate(width, ELLIPSIS)
}

/// ` ERROR ` tag followed by `content` folded onto one line.
pub fn error_line(ctx: &RenderContext<'_>, content: &str, width: usize) -> StyledLine {
    let styles = ctx.styles;
    let tag = styles.tag("ERROR", styles.error_tag);
    let budget = width.saturating_sub(tag.width() + 3);
    let message = truncate_str(&content.replace('\n', " "), budget, ELLIPSIS);
    StyledLine::new(vec![
        tag,
        StyledSpan::raw(" "),
        StyledSpan::new(message, styles.error_message),
    ])
}

/// Error block replacing the whole render when the input does not parse.
pub fn invalid_params(ctx: &RenderContext<'_>, err: &RenderError, width: usize) -> Vec<StyledLine> {
    tracing::debug!(%err, "rendering invalid parameters block");
    vec![error_line(ctx, "Invalid parameters", width)]
}

/// Status line shown instead of a body while there is nothing to format.
/// Success has none.
pub fn early_state(ctx: &RenderContext<'_>, opts: &RenderOpts<'_>, width: usize) -> Option<StyledLine> {
    let styles = ctx.styles;
    match opts.status {
        ToolStatus::Error => Some(match opts.result {
            Some(r) => error_line(ctx, &r.content, width),
            None => StyledLine::empty(),
        }),
        ToolStatus::Canceled => Some(StyledLine::styled("Canceled.", styles.state_canceled)),
        ToolStatus::AwaitingPermission => Some(StyledLine::styled(
            "Requesting permission...",
            styles.state_waiting,
        )),
        ToolStatus::Running => Some(StyledLine::styled(
            "Waiting for tool response...",
            styles.state_waiting,
        )),
        ToolStatus::Success => None,
    }
}

/// Header, blank line, body.
pub fn join(mut head: Vec<StyledLine>, body: Vec<StyledLine>) -> Vec<StyledLine> {
    head.push(StyledLine::empty());
    head.extend(body);
    head
}

/// Indent formatted lines by the body padding.
pub fn body(ctx: &RenderContext<'_>, formatted: Formatted) -> Vec<StyledLine> {
    let pad = " ".repeat(ctx.config.body_padding);
    formatted
        .lines
        .into_iter()
        .map(|line| line.prepend(StyledSpan::raw(pad.clone())))
        .collect()
}

/// The common tail of a render: compact stops at the header, an early
/// status line replaces the body, an empty result leaves the header alone.
pub fn finish(
    ctx: &RenderContext<'_>,
    opts: &RenderOpts<'_>,
    header: StyledLine,
    width: usize,
    render_body: impl FnOnce() -> Vec<StyledLine>,
) -> Vec<StyledLine> {
    if !opts.compact && early_state(ctx, opts, width).is_none() && opts.has_empty_result() {
        return vec![header];
    }
    finish_any(ctx, opts, header, width, render_body)
}

/// Like [`finish`], but the body alone decides whether there is anything to
/// show: an empty body leaves the header alone.
pub fn finish_any(
    ctx: &RenderContext<'_>,
    opts: &RenderOpts<'_>,
    header: StyledLine,
    width: usize,
    render_body: impl FnOnce() -> Vec<StyledLine>,
) -> Vec<StyledLine> {
    if opts.compact {
        return vec![header];
    }
    if let Some(state) = early_state(ctx, opts, width) {
        return join(vec![header], vec![state]);
    }
    let body = render_body();
    if body.is_empty() {
        return vec![header];
    }
    join(vec![header], body)
}
