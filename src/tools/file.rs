//! File tools: view, write, edit and multi-edit.

use super::ToolRenderer;
use super::render::{Params, RenderOpts, body, display_path, finish_any, header, invalid_params, pending};
use crate::content;
use crate::context::RenderContext;
use crate::highlight::DiffLayout;
use crate::terminal::StyledLine;
use crate::text::format_non_zero;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ViewParams {
    #[serde(alias = "filePath")]
    pub file_path: String,
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ViewMetadata {
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WriteParams {
    #[serde(alias = "filePath")]
    pub file_path: String,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct EditParams {
    #[serde(alias = "filePath")]
    pub file_path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct EditMetadata {
    #[serde(alias = "oldContent")]
    pub old_content: String,
    #[serde(alias = "newContent")]
    pub new_content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct MultiEditParams {
    #[serde(alias = "filePath")]
    pub file_path: String,
    pub edits: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct MultiEditMetadata {
    #[serde(alias = "oldContent")]
    pub old_content: String,
    #[serde(alias = "newContent")]
    pub new_content: String,
    #[serde(alias = "editsApplied")]
    pub edits_applied: usize,
    #[serde(alias = "editsFailed")]
    pub edits_failed: Vec<serde_json::Value>,
}

/// Side by side once the item is wider than the split threshold.
fn diff_layout(ctx: &RenderContext<'_>, width: usize) -> DiffLayout {
    if width > ctx.config.split_diff_width {
        DiffLayout::Split
    } else {
        DiffLayout::Unified
    }
}

pub(super) struct View;
pub(super) static VIEW: View = View;

impl ToolRenderer for View {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine> {
        if opts.is_pending() {
            return pending(ctx, opts, "View", width);
        }
        let params = match opts.call.params::<ViewParams>() {
            Ok(p) => p,
            Err(err) => return invalid_params(ctx, &err, width),
        };
        let summary = Params::new(display_path(ctx, &params.file_path))
            .pair("limit", format_non_zero(params.limit))
            .pair("offset", format_non_zero(params.offset));
        let header = header(ctx, opts, "View", width, &summary);
        finish_any(ctx, opts, header, width, || {
            let Some(result) = opts.result else {
                return Vec::new();
            };
            let body_width = ctx.config.body_width(width);
            if result.is_image() {
                return body(ctx, content::image(ctx, &result.data, &result.mime_type));
            }
            let meta: ViewMetadata = result.metadata_or_default();
            let text = if meta.content.is_empty() {
                result.content.as_str()
            } else {
                meta.content.as_str()
            };
            if text.is_empty() {
                return Vec::new();
            }
            body(
                ctx,
                content::code(
                    ctx,
                    &params.file_path,
                    text,
                    params.offset,
                    body_width,
                    opts.expanded,
                ),
            )
        })
    }
}

pub(super) struct Write;
pub(super) static WRITE: Write = Write;

impl ToolRenderer for Write {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine> {
        if opts.is_pending() {
            return pending(ctx, opts, "Write", width);
        }
        let params = match opts.call.params::<WriteParams>() {
            Ok(p) => p,
            Err(err) => return invalid_params(ctx, &err, width),
        };
        let summary = Params::new(display_path(ctx, &params.file_path));
        let header = header(ctx, opts, "Write", width, &summary);
        finish_any(ctx, opts, header, width, || {
            if params.content.is_empty() {
                return Vec::new();
            }
            let body_width = ctx.config.body_width(width);
            body(
                ctx,
                content::code(
                    ctx,
                    &params.file_path,
                    &params.content,
                    0,
                    body_width,
                    opts.expanded,
                ),
            )
        })
    }
}

/// Plain result text for edits whose metadata did not come through.
fn edit_fallback(ctx: &RenderContext<'_>, opts: &RenderOpts<'_>, width: usize) -> Vec<StyledLine> {
    let body_width = ctx.config.body_width(width);
    body(
        ctx,
        content::plain(ctx, opts.content(), body_width, opts.expanded),
    )
}

pub(super) struct Edit;
pub(super) static EDIT: Edit = Edit;

impl ToolRenderer for Edit {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine> {
        if opts.is_pending() {
            return pending(ctx, opts, "Edit", width);
        }
        let params = match opts.call.params::<EditParams>() {
            Ok(p) => p,
            Err(err) => return invalid_params(ctx, &err, width),
        };
        let file = display_path(ctx, &params.file_path);
        let header = header(ctx, opts, "Edit", width, &Params::new(file.as_str()));
        finish_any(ctx, opts, header, width, || {
            let Some(result) = opts.result else {
                return Vec::new();
            };
            let meta = match result.metadata::<EditMetadata>() {
                Ok(meta) => meta,
                Err(err) => {
                    tracing::debug!(%err, "edit metadata unreadable, showing raw result");
                    return edit_fallback(ctx, opts, width);
                }
            };
            body(
                ctx,
                content::diff(
                    ctx,
                    &file,
                    &meta.old_content,
                    &meta.new_content,
                    ctx.config.body_width(width),
                    diff_layout(ctx, width),
                    opts.expanded,
                ),
            )
        })
    }

    fn uses_full_width(&self) -> bool {
        true
    }
}

pub(super) struct MultiEdit;
pub(super) static MULTI_EDIT: MultiEdit = MultiEdit;

impl ToolRenderer for MultiEdit {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine> {
        if opts.is_pending() {
            return pending(ctx, opts, "Multi-Edit", width);
        }
        let params = match opts.call.params::<MultiEditParams>() {
            Ok(p) => p,
            Err(err) => return invalid_params(ctx, &err, width),
        };
        let file = display_path(ctx, &params.file_path);
        let edits = if params.edits.is_empty() {
            String::new()
        } else {
            params.edits.len().to_string()
        };
        let summary = Params::new(file.as_str()).pair("edits", edits);
        let header = header(ctx, opts, "Multi-Edit", width, &summary);
        finish_any(ctx, opts, header, width, || {
            let Some(result) = opts.result else {
                return Vec::new();
            };
            let meta = match result.metadata::<MultiEditMetadata>() {
                Ok(meta) => meta,
                Err(err) => {
                    tracing::debug!(%err, "multi-edit metadata unreadable, showing raw result");
                    return edit_fallback(ctx, opts, width);
                }
            };
            let mut formatted = content::diff(
                ctx,
                &file,
                &meta.old_content,
                &meta.new_content,
                ctx.config.body_width(width),
                diff_layout(ctx, width),
                opts.expanded,
            );
            if !meta.edits_failed.is_empty() {
                formatted.lines.push(StyledLine::empty());
                formatted.lines.push(content::multi_edit_note(
                    ctx,
                    meta.edits_applied,
                    params.edits.len(),
                ));
            }
            body(ctx, formatted)
        })
    }

    fn uses_full_width(&self) -> bool {
        true
    }
}
