use super::ToolRenderer;
use super::render::RenderOpts;
use crate::context::RenderContext;
use crate::terminal::StyledLine;
use crate::text::ELLIPSIS;

/// Placeholder for tool names nothing else claims.
pub(super) struct Generic;
pub(super) static GENERIC: Generic = Generic;

impl ToolRenderer for Generic {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine> {
        let text = format!("Unsupported tool: {}", opts.call.name);
        vec![StyledLine::styled(text, ctx.styles.subtle).truncate(width, ELLIPSIS)]
    }
}
