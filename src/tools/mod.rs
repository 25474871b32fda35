//! Tool renderers and the registry that picks one per tool name.
//!
//! Each renderer is a stateless unit struct behind a `&'static dyn
//! ToolRenderer`; the name is resolved once when an item is created.

pub(crate) mod agent;
pub(crate) mod bash;
pub(crate) mod fetch;
pub(crate) mod file;
mod generic;
pub(crate) mod mcp;
pub mod render;
pub(crate) mod search;
pub(crate) mod todos;

#[cfg(test)]
mod tests;

pub use bash::NO_OUTPUT;
pub use render::{Params, RenderOpts};
pub use todos::{Todo, TodoStatus, sort_todos};

use crate::context::RenderContext;
use crate::status::SpinRule;
use crate::terminal::StyledLine;

/// Names of dynamically registered tools start with this.
pub const MCP_PREFIX: &str = "mcp_";

/// Rendering strategy for one kind of tool.
pub trait ToolRenderer: Sync {
    /// Lines for the call at `width`. Always displayable: failures become
    /// error blocks or plain-text fallbacks.
    fn render(
        &self,
        ctx: &RenderContext<'_>,
        width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine>;

    /// When the progress animation runs.
    fn spin_rule(&self) -> SpinRule {
        SpinRule::UntilFinished
    }

    /// Owns nested tool items shown as a tree.
    fn is_container(&self) -> bool {
        false
    }

    /// Renders at the full item width instead of the capped reading width.
    fn uses_full_width(&self) -> bool {
        false
    }
}

/// Every tool the renderer knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Bash,
    JobOutput,
    JobKill,
    View,
    Write,
    Edit,
    MultiEdit,
    Download,
    Fetch,
    WebFetch,
    WebSearch,
    AgenticFetch,
    Agent,
    Glob,
    Grep,
    Ls,
    Sourcegraph,
    LspDiagnostics,
    LspReferences,
    LspRestart,
    Todos,
    Mcp,
    Unknown,
}

impl ToolKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "bash" => Self::Bash,
            "job_output" => Self::JobOutput,
            "job_kill" => Self::JobKill,
            "view" => Self::View,
            "write" => Self::Write,
            "edit" => Self::Edit,
            "multiedit" => Self::MultiEdit,
            "download" => Self::Download,
            "fetch" => Self::Fetch,
            "web_fetch" => Self::WebFetch,
            "web_search" => Self::WebSearch,
            "agentic_fetch" => Self::AgenticFetch,
            "agent" => Self::Agent,
            "glob" => Self::Glob,
            "grep" => Self::Grep,
            "ls" => Self::Ls,
            "sourcegraph" => Self::Sourcegraph,
            "lsp_diagnostics" => Self::LspDiagnostics,
            "lsp_references" => Self::LspReferences,
            "lsp_restart" => Self::LspRestart,
            "todos" => Self::Todos,
            n if n.starts_with(MCP_PREFIX) => Self::Mcp,
            _ => Self::Unknown,
        }
    }

    pub fn renderer(self) -> &'static dyn ToolRenderer {
        match self {
            Self::Bash => &bash::BASH,
            Self::JobOutput => &bash::JOB_OUTPUT,
            Self::JobKill => &bash::JOB_KILL,
            Self::View => &file::VIEW,
            Self::Write => &file::WRITE,
            Self::Edit => &file::EDIT,
            Self::MultiEdit => &file::MULTI_EDIT,
            Self::Download => &fetch::DOWNLOAD,
            Self::Fetch => &fetch::FETCH,
            Self::WebFetch => &fetch::WEB_FETCH,
            Self::WebSearch => &fetch::WEB_SEARCH,
            Self::AgenticFetch => &agent::AGENTIC_FETCH,
            Self::Agent => &agent::AGENT,
            Self::Glob => &search::GLOB,
            Self::Grep => &search::GREP,
            Self::Ls => &search::LS,
            Self::Sourcegraph => &search::SOURCEGRAPH,
            Self::LspDiagnostics => &search::DIAGNOSTICS,
            Self::LspReferences => &search::REFERENCES,
            Self::LspRestart => &search::LSP_RESTART,
            Self::Todos => &todos::TODOS,
            Self::Mcp => &mcp::MCP,
            Self::Unknown => &generic::GENERIC,
        }
    }
}

/// Renderer for a tool name.
pub fn resolve(name: &str) -> &'static dyn ToolRenderer {
    ToolKind::from_name(name).renderer()
}
