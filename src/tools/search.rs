//! Search and listing tools. Their output is always shown as plain text.

use super::ToolRenderer;
use super::render::{Params, RenderOpts, body, display_path, finish, header, invalid_params, pending};
use crate::content;
use crate::context::RenderContext;
use crate::error::Result;
use crate::message::ToolCall;
use crate::terminal::StyledLine;
use crate::text::format_non_zero;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GlobParams {
    pub pattern: String,
    pub path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GrepParams {
    pub pattern: String,
    pub path: String,
    pub include: String,
    #[serde(alias = "literalText")]
    pub literal_text: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LsParams {
    pub path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SourcegraphParams {
    pub query: String,
    pub count: usize,
    #[serde(alias = "contextWindow")]
    pub context_window: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DiagnosticsParams {
    #[serde(alias = "filePath")]
    pub file_path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReferencesParams {
    symbol: String,
    path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LspRestartParams {
    name: String,
}

pub(super) type Summary = fn(&RenderContext<'_>, &ToolCall) -> Result<Params>;

/// A tool whose body is the raw result as plain text. Only the header
/// summary differs between them.
pub(super) struct PlainTool {
    pub(super) name: &'static str,
    pub(super) summary: Summary,
}

impl ToolRenderer for PlainTool {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine> {
        if opts.is_pending() {
            return pending(ctx, opts, self.name, width);
        }
        let summary = match (self.summary)(ctx, opts.call) {
            Ok(summary) => summary,
            Err(err) => return invalid_params(ctx, &err, width),
        };
        let header = header(ctx, opts, self.name, width, &summary);
        finish(ctx, opts, header, width, || {
            let body_width = ctx.config.body_width(width);
            body(
                ctx,
                content::plain(ctx, opts.content(), body_width, opts.expanded),
            )
        })
    }
}

pub(super) static GLOB: PlainTool = PlainTool {
    name: "Glob",
    summary: |_, call| {
        let p: GlobParams = call.params()?;
        Ok(Params::new(p.pattern).pair("path", p.path))
    },
};

pub(super) static GREP: PlainTool = PlainTool {
    name: "Grep",
    summary: |_, call| {
        let p: GrepParams = call.params()?;
        Ok(Params::new(p.pattern)
            .pair("path", p.path)
            .pair("include", p.include)
            .flag("literal", p.literal_text))
    },
};

pub(super) static LS: PlainTool = PlainTool {
    name: "List",
    summary: |ctx, call| {
        let p: LsParams = call.params()?;
        let path = if p.path.is_empty() { "." } else { p.path.as_str() };
        Ok(Params::new(display_path(ctx, path)))
    },
};

pub(super) static SOURCEGRAPH: PlainTool = PlainTool {
    name: "Sourcegraph",
    summary: |_, call| {
        let p: SourcegraphParams = call.params()?;
        Ok(Params::new(p.query)
            .pair("count", format_non_zero(p.count))
            .pair("context", format_non_zero(p.context_window)))
    },
};

// The LSP tools render even when their input does not parse.

pub(super) static DIAGNOSTICS: PlainTool = PlainTool {
    name: "Diagnostics",
    summary: |ctx, call| {
        let p: DiagnosticsParams = call.params().unwrap_or_default();
        if p.file_path.is_empty() {
            Ok(Params::new("project"))
        } else {
            Ok(Params::new(display_path(ctx, &p.file_path)))
        }
    },
};

pub(super) static REFERENCES: PlainTool = PlainTool {
    name: "Find References",
    summary: |ctx, call| {
        let p: ReferencesParams = call.params().unwrap_or_default();
        let path = if p.path.is_empty() {
            String::new()
        } else {
            display_path(ctx, &p.path)
        };
        Ok(Params::new(p.symbol).pair("path", path))
    },
};

pub(super) static LSP_RESTART: PlainTool = PlainTool {
    name: "Restart LSP",
    summary: |_, call| {
        let p: LspRestartParams = call.params().unwrap_or_default();
        Ok(Params::new(p.name))
    },
};
