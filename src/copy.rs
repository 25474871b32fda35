//! Clipboard export: a tool call and its result as markdown.
//!
//! Independent of width and styling; the output is meant to be pasted.

use crate::highlight::unified_text;
use crate::message::{ToolCall, ToolResult};
use crate::status::ToolStatus;
use crate::text::{capitalize, format_duration, pretty_path, single_line};
use crate::tools::NO_OUTPUT;
use crate::tools::agent::{AgentParams, AgenticFetchParams};
use crate::tools::bash::{BashMetadata, BashParams};
use crate::tools::fetch::{DownloadParams, FetchParams, WebFetchParams};
use crate::tools::file::{
    EditMetadata, EditParams, MultiEditMetadata, MultiEditParams, ViewMetadata, ViewParams,
    WriteParams,
};
use crate::tools::search::{GlobParams, GrepParams, LsParams, SourcegraphParams};
use serde_json::{Map, Value};
use std::path::Path;

/// Markdown sections for `call`: name, parameters, then the result, error
/// or status, separated by blank lines. Paths under `home` are shown with `~`.
pub fn format_tool_for_copy(
    call: &ToolCall,
    result: Option<&ToolResult>,
    status: ToolStatus,
    home: Option<&Path>,
) -> String {
    let mut parts = vec![format!("## {} Tool Call", tool_title(&call.name))];

    if !call.input.is_empty() {
        let params = parameters(call, home);
        if !params.is_empty() {
            parts.push("### Parameters:".to_string());
            parts.push(params);
        }
    }

    match result {
        Some(r) if r.is_error => {
            parts.push("### Error:".to_string());
            parts.push(r.content.clone());
        }
        Some(r) => {
            parts.push("### Result:".to_string());
            let content = result_text(call, r, home);
            if !content.is_empty() {
                parts.push(content);
            }
        }
        None if status == ToolStatus::Canceled => {
            parts.push("### Status:".to_string());
            parts.push("Cancelled".to_string());
        }
        None => {
            parts.push("### Status:".to_string());
            parts.push("Pending...".to_string());
        }
    }

    parts.join("\n\n")
}

/// Human name used in the copy heading.
pub fn tool_title(name: &str) -> &str {
    match name {
        "agent" => "Agent",
        "bash" => "Bash",
        "job_output" => "Job: Output",
        "job_kill" => "Job: Kill",
        "download" => "Download",
        "edit" => "Edit",
        "multiedit" => "Multi-Edit",
        "fetch" | "web_fetch" => "Fetch",
        "agentic_fetch" => "Agentic Fetch",
        "web_search" => "Search",
        "glob" => "Glob",
        "grep" => "Grep",
        "ls" => "List",
        "sourcegraph" => "Sourcegraph",
        "todos" => "To-Do",
        "view" => "View",
        "write" => "Write",
        other => other,
    }
}

fn home_path(path: &str, home: Option<&Path>) -> String {
    pretty_path(path, home)
}

fn parameters(call: &ToolCall, home: Option<&Path>) -> String {
    let specific = match call.name.as_str() {
        "bash" => call
            .params::<BashParams>()
            .ok()
            .map(|p| vec![format!("**Command:** {}", single_line(&p.command))]),
        "view" => call.params::<ViewParams>().ok().map(|p| {
            let mut lines = vec![format!("**File:** {}", home_path(&p.file_path, home))];
            if p.limit > 0 {
                lines.push(format!("**Limit:** {}", p.limit));
            }
            if p.offset > 0 {
                lines.push(format!("**Offset:** {}", p.offset));
            }
            lines
        }),
        "edit" => call
            .params::<EditParams>()
            .ok()
            .map(|p| vec![format!("**File:** {}", home_path(&p.file_path, home))]),
        "multiedit" => call.params::<MultiEditParams>().ok().map(|p| {
            vec![
                format!("**File:** {}", home_path(&p.file_path, home)),
                format!("**Edits:** {}", p.edits.len()),
            ]
        }),
        "write" => call
            .params::<WriteParams>()
            .ok()
            .map(|p| vec![format!("**File:** {}", home_path(&p.file_path, home))]),
        "fetch" => call.params::<FetchParams>().ok().map(|p| {
            let mut lines = vec![format!("**URL:** {}", p.url)];
            if !p.format.is_empty() {
                lines.push(format!("**Format:** {}", p.format));
            }
            if p.timeout > 0 {
                lines.push(format!("**Timeout:** {}s", p.timeout));
            }
            lines
        }),
        "agentic_fetch" => call.params::<AgenticFetchParams>().ok().map(|p| {
            let mut lines = Vec::new();
            if !p.url.is_empty() {
                lines.push(format!("**URL:** {}", p.url));
            }
            if !p.prompt.is_empty() {
                lines.push(format!("**Prompt:** {}", p.prompt));
            }
            lines
        }),
        "web_fetch" => call
            .params::<WebFetchParams>()
            .ok()
            .map(|p| vec![format!("**URL:** {}", p.url)]),
        "grep" => call.params::<GrepParams>().ok().map(|p| {
            let mut lines = vec![format!("**Pattern:** {}", p.pattern)];
            if !p.path.is_empty() {
                lines.push(format!("**Path:** {}", p.path));
            }
            if !p.include.is_empty() {
                lines.push(format!("**Include:** {}", p.include));
            }
            if p.literal_text {
                lines.push("**Literal:** true".to_string());
            }
            lines
        }),
        "glob" => call.params::<GlobParams>().ok().map(|p| {
            let mut lines = vec![format!("**Pattern:** {}", p.pattern)];
            if !p.path.is_empty() {
                lines.push(format!("**Path:** {}", p.path));
            }
            lines
        }),
        "ls" => call.params::<LsParams>().ok().map(|p| {
            let path = if p.path.is_empty() { "." } else { p.path.as_str() };
            vec![format!("**Path:** {}", home_path(path, home))]
        }),
        "download" => call.params::<DownloadParams>().ok().map(|p| {
            let mut lines = vec![
                format!("**URL:** {}", p.url),
                format!("**File Path:** {}", home_path(&p.file_path, home)),
            ];
            if p.timeout > 0 {
                lines.push(format!("**Timeout:** {}", format_duration(p.timeout)));
            }
            lines
        }),
        "sourcegraph" => call.params::<SourcegraphParams>().ok().map(|p| {
            let mut lines = vec![format!("**Query:** {}", p.query)];
            if p.count > 0 {
                lines.push(format!("**Count:** {}", p.count));
            }
            if p.context_window > 0 {
                lines.push(format!("**Context:** {}", p.context_window));
            }
            lines
        }),
        "lsp_diagnostics" => Some(vec!["**Project:** diagnostics".to_string()]),
        "agent" => call
            .params::<AgentParams>()
            .ok()
            .map(|p| vec![format!("**Task:**\n{}", p.prompt)]),
        _ => None,
    };
    match specific {
        Some(lines) => lines.join("\n"),
        None => generic_parameters(call),
    }
}

/// Every input key humanised, in key order.
fn generic_parameters(call: &ToolCall) -> String {
    let Ok(input) = call.params::<Map<String, Value>>() else {
        return String::new();
    };
    let mut entries: Vec<(&String, &Value)> = input.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .map(|(key, value)| {
            let key = capitalize(&key.replace('_', " "));
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("**{key}:** {value}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fence language for a file name, empty when unknown.
fn fence_lang(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "go" => "go",
        "js" | "mjs" => "javascript",
        "ts" => "typescript",
        "py" => "python",
        "rs" => "rust",
        "java" => "java",
        "c" => "c",
        "cpp" | "cc" | "cxx" => "cpp",
        "sh" | "bash" => "bash",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "xml" => "xml",
        "html" => "html",
        "css" => "css",
        "md" => "markdown",
        _ => "",
    }
}

fn fenced(lang: &str, body: &str) -> String {
    format!("```{lang}\n{body}\n```")
}

fn result_text(call: &ToolCall, result: &ToolResult, home: Option<&Path>) -> String {
    if !result.data.is_empty() {
        return if result.mime_type.starts_with("image/") {
            format!("[Image: {}]", result.mime_type)
        } else {
            format!("[Media: {}]", result.mime_type)
        };
    }
    let content = &result.content;
    match call.name.as_str() {
        "bash" => {
            let meta: BashMetadata = result.metadata_or_default();
            let output = if !meta.output.is_empty() {
                meta.output
            } else if content != NO_OUTPUT {
                content.clone()
            } else {
                String::new()
            };
            if output.is_empty() {
                String::new()
            } else {
                fenced("bash", &output)
            }
        }
        "view" => {
            let meta: ViewMetadata = result.metadata_or_default();
            if meta.content.is_empty() {
                return content.clone();
            }
            let path = call
                .params::<ViewParams>()
                .map(|p| p.file_path)
                .unwrap_or_default();
            fenced(fence_lang(&path), &meta.content)
        }
        "edit" => {
            let path = call
                .params::<EditParams>()
                .map(|p| p.file_path)
                .unwrap_or_default();
            match result.metadata::<EditMetadata>() {
                Ok(meta) => changes(&path, &meta.old_content, &meta.new_content, home),
                Err(_) => content.clone(),
            }
        }
        "multiedit" => {
            let path = call
                .params::<MultiEditParams>()
                .map(|p| p.file_path)
                .unwrap_or_default();
            match result.metadata::<MultiEditMetadata>() {
                Ok(meta) => changes(&path, &meta.old_content, &meta.new_content, home),
                Err(_) => content.clone(),
            }
        }
        "write" => match call.params::<WriteParams>() {
            Ok(p) => format!(
                "File: {}\n{}",
                home_path(&p.file_path, home),
                fenced(fence_lang(&p.file_path), &p.content)
            ),
            Err(_) => content.clone(),
        },
        "fetch" => match call.params::<FetchParams>() {
            Ok(p) => {
                let mut out = String::new();
                if !p.url.is_empty() {
                    out.push_str(&format!("URL: {}\n", p.url));
                }
                if !p.format.is_empty() {
                    out.push_str(&format!("Format: {}\n", p.format));
                }
                if p.timeout > 0 {
                    out.push_str(&format!("Timeout: {}s\n", p.timeout));
                }
                out.push('\n');
                out.push_str(content);
                out
            }
            Err(_) => content.clone(),
        },
        "agentic_fetch" => match call.params::<AgenticFetchParams>() {
            Ok(p) => {
                let mut out = String::new();
                if !p.url.is_empty() {
                    out.push_str(&format!("URL: {}\n", p.url));
                }
                if !p.prompt.is_empty() {
                    out.push_str(&format!("Prompt: {}\n\n", p.prompt));
                }
                out.push_str(&fenced("markdown", content));
                out
            }
            Err(_) => content.clone(),
        },
        "web_fetch" => match call.params::<WebFetchParams>() {
            Ok(p) => format!("URL: {}\n\n{}", p.url, fenced("markdown", content)),
            Err(_) => content.clone(),
        },
        "agent" if content.is_empty() => String::new(),
        "agent" => fenced("markdown", content),
        "download" | "grep" | "glob" | "ls" | "sourcegraph" | "lsp_diagnostics" | "todos" => {
            fenced("", content)
        }
        _ => content.clone(),
    }
}

/// `Changes: +a -r` followed by a fenced unified diff; empty when both
/// sides are empty.
fn changes(path: &str, before: &str, after: &str, home: Option<&Path>) -> String {
    if before.is_empty() && after.is_empty() {
        return String::new();
    }
    let file = if path.is_empty() {
        String::new()
    } else {
        home_path(path, home)
    };
    let (diff, additions, removals) = unified_text(&file, before, after);
    format!("Changes: +{additions} -{removals}\n{}", fenced("diff", &diff))
}
