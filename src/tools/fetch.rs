//! Web tools: download, fetch, web fetch and web search.

use super::ToolRenderer;
use super::render::{Params, RenderOpts, body, display_path, finish, header, invalid_params, pending};
use super::search::PlainTool;
use crate::content;
use crate::context::RenderContext;
use crate::terminal::StyledLine;
use crate::text::format_timeout;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DownloadParams {
    pub url: String,
    #[serde(alias = "filePath")]
    pub file_path: String,
    pub timeout: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FetchParams {
    pub url: String,
    pub format: String,
    pub timeout: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WebFetchParams {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WebSearchParams {
    query: String,
}

pub(super) static DOWNLOAD: PlainTool = PlainTool {
    name: "Download",
    summary: |ctx, call| {
        let p: DownloadParams = call.params()?;
        let file_path = if p.file_path.is_empty() {
            String::new()
        } else {
            display_path(ctx, &p.file_path)
        };
        Ok(Params::new(p.url)
            .pair("file_path", file_path)
            .pair("timeout", format_timeout(p.timeout)))
    },
};

/// File name whose extension picks the highlighter for fetched content.
pub(crate) fn format_hint(format: &str) -> &'static str {
    match format {
        "text" => "fetch.txt",
        "html" => "fetch.html",
        _ => "fetch.md",
    }
}

pub(super) struct Fetch;
pub(super) static FETCH: Fetch = Fetch;

impl ToolRenderer for Fetch {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine> {
        if opts.is_pending() {
            return pending(ctx, opts, "Fetch", width);
        }
        let params = match opts.call.params::<FetchParams>() {
            Ok(p) => p,
            Err(err) => return invalid_params(ctx, &err, width),
        };
        let summary = Params::new(params.url.as_str())
            .pair("format", params.format.as_str())
            .pair("timeout", format_timeout(params.timeout));
        let header = header(ctx, opts, "Fetch", width, &summary);
        finish(ctx, opts, header, width, || {
            let body_width = ctx.config.body_width(width);
            body(
                ctx,
                content::code(
                    ctx,
                    format_hint(&params.format),
                    opts.content(),
                    0,
                    body_width,
                    opts.expanded,
                ),
            )
        })
    }
}

/// Markdown-bodied web tools; `web_fetch` and `web_search` differ only in
/// label and main parameter.
pub(super) struct WebTool {
    name: &'static str,
    main: fn(&RenderOpts<'_>) -> crate::error::Result<String>,
}

pub(super) static WEB_FETCH: WebTool = WebTool {
    name: "Fetch",
    main: |opts| Ok(opts.call.params::<WebFetchParams>()?.url),
};

pub(super) static WEB_SEARCH: WebTool = WebTool {
    name: "Search",
    main: |opts| Ok(opts.call.params::<WebSearchParams>()?.query),
};

impl ToolRenderer for WebTool {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine> {
        if opts.is_pending() {
            return pending(ctx, opts, self.name, width);
        }
        let main = match (self.main)(opts) {
            Ok(main) => main,
            Err(err) => return invalid_params(ctx, &err, width),
        };
        let header = header(ctx, opts, self.name, width, &Params::new(main));
        finish(ctx, opts, header, width, || {
            let body_width = ctx.config.body_width(width);
            body(
                ctx,
                content::markdown(ctx, opts.content(), body_width, opts.expanded),
            )
        })
    }
}
