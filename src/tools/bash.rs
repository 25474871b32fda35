//! Shell commands and the background jobs they start.

use super::ToolRenderer;
use super::render::{Params, RenderOpts, body, finish_any, header, invalid_params, pending};
use crate::content;
use crate::context::RenderContext;
use crate::status::{SpinRule, ToolStatus};
use crate::terminal::{StyledLine, StyledSpan};
use crate::text::{ELLIPSIS, single_line, truncate_str};
use serde::Deserialize;

/// Content the executor reports for a command that printed nothing.
pub const NO_OUTPUT: &str = "no output";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct BashParams {
    pub command: String,
    #[serde(alias = "runInBackground")]
    pub run_in_background: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct BashMetadata {
    pub background: bool,
    #[serde(alias = "shellId")]
    pub shell_id: String,
    pub description: String,
    pub output: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct JobParams {
    #[serde(alias = "shellId")]
    pub shell_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JobMetadata {
    description: String,
    command: String,
}

pub(super) struct Bash;
pub(super) static BASH: Bash = Bash;

impl ToolRenderer for Bash {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine> {
        if opts.is_pending() {
            return pending(ctx, opts, "Bash", width);
        }
        let params = opts.call.params::<BashParams>().unwrap_or_else(|err| {
            tracing::debug!(%err, "bash parameters unreadable");
            BashParams {
                command: "failed to parse command".to_string(),
                ..BashParams::default()
            }
        });
        let meta: BashMetadata = opts
            .result
            .map(|r| r.metadata_or_default())
            .unwrap_or_default();

        if meta.background {
            let description = if meta.description.is_empty() {
                params.command.clone()
            } else {
                meta.description
            };
            let content = format!("Command: {}\n{}", params.command, opts.content());
            return job(
                ctx,
                opts,
                width,
                &JobHeader {
                    action: "Start",
                    shell_id: &meta.shell_id,
                    description: &description,
                },
                &content,
            );
        }

        let params_line = Params::new(single_line(&params.command))
            .flag("background", params.run_in_background);
        let header = header(ctx, opts, "Bash", width, &params_line);
        finish_any(ctx, opts, header, width, || {
            let Some(result) = opts.result else {
                return Vec::new();
            };
            let output = if !meta.output.is_empty() {
                meta.output.as_str()
            } else if result.content != NO_OUTPUT {
                result.content.as_str()
            } else {
                ""
            };
            if output.is_empty() {
                return Vec::new();
            }
            let body_width = ctx.config.body_width(width);
            body(ctx, content::plain(ctx, output, body_width, opts.expanded))
        })
    }
}

/// `job_output` and `job_kill`.
pub(super) struct JobTool {
    action: &'static str,
    spin_rule: SpinRule,
}

pub(super) static JOB_OUTPUT: JobTool = JobTool {
    action: "Output",
    spin_rule: SpinRule::UntilResult,
};

pub(super) static JOB_KILL: JobTool = JobTool {
    action: "Kill",
    spin_rule: SpinRule::UntilFinished,
};

impl ToolRenderer for JobTool {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine> {
        if opts.is_pending() {
            return pending(ctx, opts, "Job", width);
        }
        let params = match opts.call.params::<JobParams>() {
            Ok(p) => p,
            Err(err) => return invalid_params(ctx, &err, width),
        };
        let description = opts
            .result
            .filter(|r| !r.metadata.is_empty())
            .and_then(|r| r.metadata::<JobMetadata>().ok())
            .map(|m| {
                if m.description.is_empty() {
                    m.command
                } else {
                    m.description
                }
            })
            .unwrap_or_default();
        let content = opts.content().to_string();
        job(
            ctx,
            opts,
            width,
            &JobHeader {
                action: self.action,
                shell_id: &params.shell_id,
                description: &description,
            },
            &content,
        )
    }

    fn spin_rule(&self) -> SpinRule {
        self.spin_rule
    }
}

struct JobHeader<'a> {
    action: &'a str,
    shell_id: &'a str,
    description: &'a str,
}

impl JobHeader<'_> {
    /// `● Job (Action) PID id description`. The description is dropped when
    /// too little room is left for it.
    fn line(&self, ctx: &RenderContext<'_>, status: ToolStatus, width: usize) -> StyledLine {
        let styles = ctx.styles;
        let mut line = StyledLine::new(vec![
            styles.icon(status),
            StyledSpan::raw(" "),
            StyledSpan::new("Job", styles.job_name),
            StyledSpan::raw(" "),
            StyledSpan::new(format!("({})", self.action), styles.job_action),
            StyledSpan::raw(" "),
            StyledSpan::new(format!("PID {}", self.shell_id), styles.job_pid),
        ]);
        if !self.description.is_empty() {
            let available = width as isize - line.width() as isize - 1;
            if available >= ctx.config.job_description_min as isize {
                let text = truncate_str(
                    &single_line(self.description),
                    available as usize,
                    ELLIPSIS,
                );
                line.push(StyledSpan::raw(" "));
                line.push(StyledSpan::new(text, styles.job_description));
            }
        }
        line.truncate(width, ELLIPSIS)
    }
}

fn job(
    ctx: &RenderContext<'_>,
    opts: &RenderOpts<'_>,
    width: usize,
    job: &JobHeader<'_>,
    content: &str,
) -> Vec<StyledLine> {
    let header = job.line(ctx, opts.status, width);
    finish_any(ctx, opts, header, width, || {
        if content.is_empty() {
            return Vec::new();
        }
        let body_width = ctx.config.body_width(width);
        body(ctx, content::plain(ctx, content, body_width, opts.expanded))
    })
}
