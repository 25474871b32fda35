//! Sub-agent tools. Their nested tool calls are drawn as a tree under the
//! prompt.

use super::ToolRenderer;
use super::render::{Params, RenderOpts, body, header, join, pending};
use crate::content;
use crate::context::RenderContext;
use crate::status::SpinRule;
use crate::terminal::{StyledLine, StyledSpan};
use crossterm::style::ContentStyle;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AgentParams {
    pub prompt: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AgenticFetchParams {
    pub url: String,
    pub prompt: String,
}

/// A tool that delegates to a sub-agent.
pub(super) struct AgentTool {
    name: &'static str,
    tag: &'static str,
    tag_style: fn(&RenderContext<'_>) -> ContentStyle,
    /// Prompt and header parameter.
    input: fn(&RenderOpts<'_>) -> (String, Params),
}

pub(super) static AGENT: AgentTool = AgentTool {
    name: "Agent",
    tag: "Task",
    tag_style: |ctx| ctx.styles.task_tag,
    input: |opts| {
        // A broken prompt still renders the tree.
        let p: AgentParams = opts.call.params().unwrap_or_default();
        (p.prompt, Params::none())
    },
};

pub(super) static AGENTIC_FETCH: AgentTool = AgentTool {
    name: "Agentic Fetch",
    tag: "Prompt",
    tag_style: |ctx| ctx.styles.prompt_tag,
    input: |opts| {
        let p: AgenticFetchParams = opts.call.params().unwrap_or_default();
        (p.prompt, Params::new(p.url))
    },
};

impl AgentTool {
    /// Tag followed by the prompt wrapped to `width`; continuation rows line
    /// up under the prompt.
    fn prompt_rows(&self, ctx: &RenderContext<'_>, prompt: &str, width: usize) -> Vec<StyledLine> {
        let tag = ctx.styles.tag(self.tag, (self.tag_style)(ctx));
        let indent = " ".repeat(tag.width() + 1);
        let text = StyledLine::styled(prompt.replace('\n', " "), ctx.styles.agent_prompt);
        let mut rows = Vec::new();
        for (i, line) in text.wrap(width).into_iter().enumerate() {
            let lead = if i == 0 {
                StyledLine::new(vec![tag.clone(), StyledSpan::raw(" ")])
            } else {
                StyledLine::raw(indent.clone())
            };
            let mut row = lead;
            row.extend(line);
            rows.push(row);
        }
        rows
    }

    /// Nested items, each rendered compact at `width` and hung off a branch.
    fn tree(ctx: &RenderContext<'_>, opts: &mut RenderOpts<'_>, width: usize) -> Vec<StyledLine> {
        let glyphs = &ctx.styles.glyphs;
        let style = ctx.styles.tree;
        let count = opts.children.len();
        let mut lines = Vec::new();
        for (i, child) in opts.children.iter_mut().enumerate() {
            let last = i + 1 == count;
            let (branch, cont) = if last {
                (glyphs.tree_last, " ".repeat(glyphs.tree_last.chars().count()))
            } else {
                (
                    glyphs.tree_branch,
                    format!("{:<w$}", glyphs.tree_pipe, w = glyphs.tree_branch.chars().count()),
                )
            };
            let block = child.render(ctx, width);
            for (j, line) in block.lines.into_iter().enumerate() {
                let lead = if j == 0 { branch.to_string() } else { cont.clone() };
                let mut row = StyledLine::new(vec![
                    StyledSpan::raw("  "),
                    StyledSpan::new(lead, style),
                    StyledSpan::raw(" "),
                ]);
                row.extend(line);
                lines.push(row);
            }
        }
        lines
    }
}

impl ToolRenderer for AgentTool {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine> {
        if opts.is_pending() && opts.children.is_empty() {
            return pending(ctx, opts, self.name, width);
        }
        let (prompt, summary) = (self.input)(opts);
        let head = header(ctx, opts, self.name, width, &summary);
        if opts.compact {
            return vec![head];
        }

        let tag_width = ctx.styles.tag(self.tag, (self.tag_style)(ctx)).width();
        let remaining = width
            .min(ctx.config.max_text_width)
            .saturating_sub(tag_width + 3);

        let mut lines = vec![head, StyledLine::empty()];
        lines.extend(self.prompt_rows(ctx, &prompt, remaining));
        lines.extend(Self::tree(ctx, opts, remaining));

        if opts.spinning {
            lines.push(StyledLine::empty());
            lines.push(StyledLine::new(vec![opts.anim.render(ctx.styles)]));
        }

        if opts.has_empty_result() {
            return lines;
        }
        let body_width = ctx.config.body_width(width);
        join(
            lines,
            body(
                ctx,
                content::markdown(ctx, opts.content(), body_width, opts.expanded),
            ),
        )
    }

    fn spin_rule(&self) -> SpinRule {
        SpinRule::UntilNestedSettled
    }

    fn is_container(&self) -> bool {
        true
    }
}
