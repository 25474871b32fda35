//! Symbolic style table.
//!
//! Formatters only ever refer to these named styles; colors live here and
//! nowhere else. The table is borrowed for every render and never cloned.

use crate::status::ToolStatus;
use crate::terminal::StyledSpan;
use crossterm::style::{Attribute, Attributes, Color, ContentStyle};

/// Glyphs used by headers, lists and trees.
#[derive(Clone, Debug)]
pub struct Glyphs {
    pub pending: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    pub arrow: &'static str,
    pub todo_completed: &'static str,
    pub todo_pending: &'static str,
    pub border: &'static str,
    pub tree_branch: &'static str,
    pub tree_last: &'static str,
    pub tree_pipe: &'static str,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            pending: "●",
            success: "✓",
            error: "×",
            arrow: "→",
            todo_completed: "✓",
            todo_pending: "•",
            border: "│",
            tree_branch: "├──",
            tree_last: "╰──",
            tree_pipe: "│",
        }
    }
}

/// Named styles for every element the renderers draw.
#[derive(Clone, Debug)]
pub struct Styles {
    pub glyphs: Glyphs,

    pub base: ContentStyle,
    pub subtle: ContentStyle,

    // Header
    pub icon_pending: ContentStyle,
    pub icon_success: ContentStyle,
    pub icon_error: ContentStyle,
    pub icon_canceled: ContentStyle,
    pub name_normal: ContentStyle,
    pub name_nested: ContentStyle,
    pub param_main: ContentStyle,

    // Early states
    pub state_waiting: ContentStyle,
    pub state_canceled: ContentStyle,
    pub error_tag: ContentStyle,
    pub error_message: ContentStyle,
    pub note_tag: ContentStyle,
    pub note_message: ContentStyle,

    // Bodies
    pub content_line: ContentStyle,
    pub content_truncation: ContentStyle,
    pub code_bg: Color,
    pub code_line: ContentStyle,
    pub code_line_number: ContentStyle,
    pub code_truncation: ContentStyle,
    pub diff_truncation: ContentStyle,
    pub image_loaded: ContentStyle,
    pub image_arrow: ContentStyle,

    // Diff
    pub diff_added: ContentStyle,
    pub diff_removed: ContentStyle,
    pub diff_context: ContentStyle,
    pub diff_hunk: ContentStyle,
    pub diff_line_number: ContentStyle,
    pub diff_divider: ContentStyle,

    // Jobs
    pub job_name: ContentStyle,
    pub job_action: ContentStyle,
    pub job_pid: ContentStyle,
    pub job_description: ContentStyle,

    // Nested containers
    pub task_tag: ContentStyle,
    pub prompt_tag: ContentStyle,
    pub agent_prompt: ContentStyle,
    pub tree: ContentStyle,

    // MCP
    pub mcp_group: ContentStyle,
    pub mcp_tool: ContentStyle,
    pub mcp_arrow: ContentStyle,

    // Todos
    pub todo_ratio: ContentStyle,
    pub todo_completed: ContentStyle,
    pub todo_in_progress: ContentStyle,
    pub todo_pending: ContentStyle,

    // Frame
    pub spinner: ContentStyle,
    pub focus_border: ContentStyle,
}

fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..ContentStyle::default()
    }
}

fn fg_attr(color: Color, attr: Attribute) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        attributes: Attributes::from(attr),
        ..ContentStyle::default()
    }
}

fn tag(fg: Color, bg: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(fg),
        background_color: Some(bg),
        attributes: Attributes::from(Attribute::Bold),
        ..ContentStyle::default()
    }
}

fn dim() -> ContentStyle {
    ContentStyle {
        attributes: Attributes::from(Attribute::Dim),
        ..ContentStyle::default()
    }
}

impl Styles {
    /// Dark palette used by default.
    pub fn dark() -> Self {
        let code_bg = Color::Rgb {
            r: 0x20,
            g: 0x1f,
            b: 0x26,
        };
        let code_line = ContentStyle {
            background_color: Some(code_bg),
            ..ContentStyle::default()
        };
        Self {
            glyphs: Glyphs::default(),
            base: ContentStyle::new(),
            subtle: dim(),

            icon_pending: fg(Color::DarkGreen),
            icon_success: fg(Color::Green),
            icon_error: fg(Color::Red),
            icon_canceled: dim(),
            name_normal: fg_attr(Color::Blue, Attribute::Bold),
            name_nested: fg(Color::Blue),
            param_main: dim(),

            state_waiting: dim(),
            state_canceled: dim(),
            error_tag: tag(Color::White, Color::DarkRed),
            error_message: fg(Color::Red),
            note_tag: tag(Color::Black, Color::Yellow),
            note_message: fg(Color::Yellow),

            content_line: dim(),
            content_truncation: fg_attr(Color::DarkGrey, Attribute::Italic),
            code_bg,
            code_line,
            code_line_number: ContentStyle {
                foreground_color: Some(Color::DarkGrey),
                background_color: Some(code_bg),
                ..ContentStyle::default()
            },
            code_truncation: fg_attr(Color::DarkGrey, Attribute::Italic),
            diff_truncation: fg_attr(Color::DarkGrey, Attribute::Italic),
            image_loaded: fg(Color::Green),
            image_arrow: fg(Color::DarkGreen),

            diff_added: fg(Color::Green),
            diff_removed: fg(Color::Red),
            diff_context: dim(),
            diff_hunk: fg(Color::Cyan),
            diff_line_number: fg(Color::DarkGrey),
            diff_divider: fg(Color::DarkGrey),

            job_name: fg_attr(Color::Blue, Attribute::Bold),
            job_action: fg(Color::Magenta),
            job_pid: fg(Color::DarkGrey),
            job_description: dim(),

            task_tag: tag(Color::Black, Color::Blue),
            prompt_tag: tag(Color::Black, Color::Green),
            agent_prompt: ContentStyle::new(),
            tree: fg(Color::DarkGrey),

            mcp_group: fg_attr(Color::Blue, Attribute::Bold),
            mcp_tool: fg(Color::Cyan),
            mcp_arrow: fg(Color::DarkGrey),

            todo_ratio: fg(Color::Cyan),
            todo_completed: fg(Color::Green),
            todo_in_progress: fg(Color::Yellow),
            todo_pending: fg(Color::DarkGrey),

            spinner: fg(Color::Magenta),
            focus_border: fg(Color::Magenta),
        }
    }

    /// Status icon for a header.
    pub fn icon(&self, status: ToolStatus) -> StyledSpan {
        let g = &self.glyphs;
        match status {
            ToolStatus::Success => StyledSpan::new(g.success, self.icon_success),
            ToolStatus::Error => StyledSpan::new(g.error, self.icon_error),
            ToolStatus::Canceled => StyledSpan::new(g.pending, self.icon_canceled),
            ToolStatus::Running | ToolStatus::AwaitingPermission => {
                StyledSpan::new(g.pending, self.icon_pending)
            }
        }
    }

    /// Padded tag label such as ` ERROR `.
    pub fn tag(&self, label: &str, style: ContentStyle) -> StyledSpan {
        StyledSpan::new(format!(" {label} "), style)
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::dark()
    }
}
