//! To-do list tool.

use super::ToolRenderer;
use super::render::{Params, RenderOpts, finish_any, header, pending};
use crate::context::RenderContext;
use crate::terminal::{StyledLine, StyledSpan};
use crate::text::ELLIPSIS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    InProgress,
    Completed,
    /// Also any status string not listed here.
    #[default]
    #[serde(other)]
    Pending,
}

impl TodoStatus {
    fn order(self) -> u8 {
        match self {
            Self::Completed => 0,
            Self::InProgress => 1,
            Self::Pending => 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Todo {
    pub content: String,
    pub status: TodoStatus,
    #[serde(alias = "activeForm")]
    pub active_form: String,
}

impl Todo {
    /// Text shown for the item: the active form while it is being worked on.
    pub fn label(&self) -> &str {
        if self.status == TodoStatus::InProgress && !self.active_form.is_empty() {
            &self.active_form
        } else {
            &self.content
        }
    }
}

/// Completed first, then in progress, then pending. Stable within a group.
pub fn sort_todos(todos: &mut [Todo]) {
    todos.sort_by_key(|t| t.status.order());
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TodosParams {
    pub todos: Vec<Todo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TodosMetadata {
    #[serde(alias = "isNew")]
    is_new: bool,
    todos: Vec<Todo>,
    #[serde(alias = "justCompleted")]
    just_completed: Vec<String>,
    #[serde(alias = "justStarted")]
    just_started: String,
    completed: usize,
    total: usize,
}

/// Header text and body lines derived from the input and, once there is one,
/// the result metadata.
struct Summary {
    text: String,
    body: Vec<StyledLine>,
}

fn summarize(ctx: &RenderContext<'_>, opts: &RenderOpts<'_>, width: usize) -> Summary {
    let params: TodosParams = opts.call.params().unwrap_or_default();
    let completed = params
        .todos
        .iter()
        .filter(|t| t.status == TodoStatus::Completed)
        .count();
    let ratio = format!("{completed}/{}", params.todos.len());
    let active = params
        .todos
        .iter()
        .rfind(|t| t.status == TodoStatus::InProgress)
        .map(Todo::label);
    let text = match active {
        Some(task) => format!("{ratio} · {task}"),
        None => ratio,
    };
    let mut summary = Summary {
        text,
        body: Vec::new(),
    };

    let Some(result) = opts.result.filter(|r| !r.metadata.is_empty()) else {
        return summary;
    };
    let meta = match result.metadata::<TodosMetadata>() {
        Ok(meta) => meta,
        Err(err) => {
            tracing::debug!(%err, "todo metadata ignored");
            return summary;
        }
    };

    let started = !meta.just_started.is_empty();
    if meta.is_new {
        summary.text = if started {
            format!("created {} todos, starting first", meta.total)
        } else {
            format!("created {} todos", meta.total)
        };
        summary.body = todo_list(ctx, &meta.todos, width);
        return summary;
    }

    let all_done = meta.completed == meta.total;
    let ratio = format!("{}/{}", meta.completed, meta.total);
    let done = meta.just_completed.len();
    summary.text = match (done > 0, started) {
        (true, true) => format!("{ratio} · completed {done}, starting next"),
        (true, false) if all_done => format!("{ratio} · completed all"),
        (true, false) => format!("{ratio} · completed {done}"),
        (false, true) => format!("{ratio} · starting task"),
        (false, false) => ratio,
    };
    if all_done {
        summary.body = todo_list(ctx, &meta.todos, width);
    } else if started {
        let styles = ctx.styles;
        let line = StyledLine::new(vec![
            StyledSpan::new(format!("{} ", styles.glyphs.arrow), styles.todo_in_progress),
            StyledSpan::new(meta.just_started, styles.base),
        ]);
        summary.body = vec![line.truncate(width, ELLIPSIS)];
    }
    summary
}

/// Sorted list, one item per line, each cut to `width`.
fn todo_list(ctx: &RenderContext<'_>, todos: &[Todo], width: usize) -> Vec<StyledLine> {
    let styles = ctx.styles;
    let mut sorted = todos.to_vec();
    sort_todos(&mut sorted);
    sorted
        .iter()
        .map(|todo| {
            let icon = match todo.status {
                TodoStatus::Completed => {
                    StyledSpan::new(format!("{} ", styles.glyphs.todo_completed), styles.todo_completed)
                }
                TodoStatus::InProgress => {
                    StyledSpan::new(format!("{} ", styles.glyphs.arrow), styles.todo_in_progress)
                }
                TodoStatus::Pending => {
                    StyledSpan::new(format!("{} ", styles.glyphs.todo_pending), styles.todo_pending)
                }
            };
            StyledLine::new(vec![icon, StyledSpan::new(todo.label(), styles.base)])
                .truncate(width, ELLIPSIS)
        })
        .collect()
}

pub(super) struct Todos;
pub(super) static TODOS: Todos = Todos;

impl ToolRenderer for Todos {
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine> {
        if opts.is_pending() {
            return pending(ctx, opts, "To-Do", width);
        }
        let body_width = ctx.config.body_width(width);
        let summary = summarize(ctx, opts, body_width);
        let head = header(ctx, opts, "To-Do", width, &Params::new(summary.text));
        let pad = " ".repeat(ctx.config.body_padding);
        finish_any(ctx, opts, head, width, || {
            summary
                .body
                .into_iter()
                .map(|line| line.prepend(StyledSpan::raw(pad.clone())))
                .collect()
        })
    }
}
