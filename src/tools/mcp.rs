//! Tools registered at runtime by MCP servers, named `mcp_<group>_<tool>`.

use super::ToolRenderer;
use super::render::{
    Params, RenderOpts, body, error_line, finish, invalid_params, labeled_header, pending_labeled,
};
use crate::content;
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::terminal::{StyledLine, StyledSpan};
use crate::text::pretty_name;
use serde_json::{Map, Value};

const MARKDOWN_HINTS: [&str; 9] = ["# ", "## ", "**", "```", "- ", "1. ", "> ", "---", "***"];

/// Cheap guess whether text is worth highlighting as markdown.
pub(crate) fn looks_like_markdown(content: &str) -> bool {
    MARKDOWN_HINTS.iter().any(|p| content.contains(p))
}

/// Group and tool segments of an MCP tool name.
pub(crate) fn split_name(name: &str) -> Result<(&str, &str), RenderError> {
    let mut parts = name.splitn(3, '_');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(group), Some(tool)) => Ok((group, tool)),
        _ => Err(RenderError::InvalidToolName(name.to_string())),
    }
}

fn label(ctx: &RenderContext<'_>, group: &str, tool: &str) -> StyledLine {
    let styles = ctx.styles;
    StyledLine::new(vec![
        StyledSpan::new(pretty_name(group), styles.mcp_group),
        StyledSpan::raw(" "),
        StyledSpan::new(styles.glyphs.arrow, styles.mcp_arrow),
        StyledSpan::raw(" "),
        StyledSpan::new(pretty_name(tool), styles.mcp_tool),
    ])
}

fn result_body(ctx: &RenderContext<'_>, text: &str, width: usize, expanded: bool) -> Vec<StyledLine> {
    let formatted = match serde_json::from_str::<Value>(text) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(pretty) => content::code(ctx, "result.json", &pretty, 0, width, expanded),
            Err(_) => content::plain(ctx, text, width, expanded),
        },
        Err(_) if looks_like_markdown(text) => {
            content::code(ctx, "result.md", text, 0, width, expanded)
        }
        Err(_) => content::plain(ctx, text, width, expanded),
    };
    body(ctx, formatted)
}

pub(super) struct Mcp;
pub(super) static MCP: Mcp = Mcp;

impl ToolRenderer for Mcp {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine> {
        let (group, tool) = match split_name(&opts.call.name) {
            Ok(parts) => parts,
            Err(err) => {
                tracing::debug!(%err, "unroutable mcp tool");
                return vec![error_line(ctx, "Invalid tool name", width)];
            }
        };
        let name = label(ctx, group, tool);
        if opts.is_pending() {
            return pending_labeled(ctx, opts, name, width);
        }
        let input = match opts.call.params::<Map<String, Value>>() {
            Ok(input) => input,
            Err(err) => return invalid_params(ctx, &err, width),
        };
        let summary = if input.is_empty() {
            Params::none()
        } else {
            Params::new(serde_json::to_string(&input).unwrap_or_default())
        };
        let head = labeled_header(ctx, opts, name, width, &summary);
        finish(ctx, opts, head, width, || {
            result_body(
                ctx,
                opts.content(),
                ctx.config.body_width(width),
                opts.expanded,
            )
        })
    }
}
