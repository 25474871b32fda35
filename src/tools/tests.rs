use super::*;
use crate::anim::contains_frame;
use crate::config::RenderConfig;
use crate::item::{Expandable, ToolItem};
use crate::message::{ToolCall, ToolResult};
use crate::status::ToolStatus;
use crate::style::Styles;
use crate::text::display_width;

fn config() -> RenderConfig {
    RenderConfig::default()
}

/// Plain text rows of a render, trailing padding dropped.
fn rows(item: &mut ToolItem, width: usize) -> Vec<String> {
    let styles = Styles::default();
    let config = config();
    let ctx = RenderContext::new(&styles, &config);
    item.render(&ctx, width)
        .lines
        .iter()
        .map(|l| l.plain().trim_end().to_string())
        .collect()
}

fn done(id: &str, name: &str, input: &str, result: ToolResult) -> ToolItem {
    ToolItem::new(ToolCall::new(id, name, input).finished(), Some(result), false)
}

#[test]
fn test_resolve_known_and_unknown() {
    assert_eq!(ToolKind::from_name("bash"), ToolKind::Bash);
    assert_eq!(ToolKind::from_name("multiedit"), ToolKind::MultiEdit);
    assert_eq!(ToolKind::from_name("mcp_github_search"), ToolKind::Mcp);
    assert_eq!(ToolKind::from_name("foo"), ToolKind::Unknown);
    assert!(resolve("agent").is_container());
    assert!(!resolve("bash").is_container());
    assert!(resolve("edit").uses_full_width());
}

#[test]
fn test_bash_pending_is_one_line_with_frame() {
    let mut item = ToolItem::new(ToolCall::new("1", "bash", r#"{"command":"ls"}"#), None, false);
    let out = rows(&mut item, 80);
    assert_eq!(out.len(), 1);
    assert!(out[0].contains("Bash"));
    assert!(contains_frame(&out[0]));
}

#[test]
fn test_bash_no_output_is_header_only() {
    let result = ToolResult::success("1", NO_OUTPUT).with_metadata(r#"{"background":false}"#);
    let mut item = done("1", "bash", r#"{"command":"true"}"#, result);
    let out = rows(&mut item, 80);
    assert_eq!(out, vec!["  ✓ Bash true"]);
}

#[test]
fn test_bash_output_body() {
    let result = ToolResult::success("1", "one\ntwo");
    let mut item = done("1", "bash", r#"{"command":"printf"}"#, result);
    let out = rows(&mut item, 80);
    assert_eq!(out, vec!["  ✓ Bash printf", "", "     one", "     two"]);
}

#[test]
fn test_bash_background_uses_job_header() {
    let result = ToolResult::success("1", "started")
        .with_metadata(r#"{"background":true,"shell_id":"42","description":"dev server"}"#);
    let mut item = done("1", "bash", r#"{"command":"npm run dev"}"#, result);
    let out = rows(&mut item, 80);
    assert_eq!(out[0], "  ✓ Job (Start) PID 42 dev server");
    assert!(out.iter().any(|l| l.contains("Command: npm run dev")));
}

#[test]
fn test_job_output_header() {
    let result = ToolResult::success("1", "listening").with_metadata(r#"{"description":"dev server"}"#);
    let mut item = done("1", "job_output", r#"{"shell_id":"7"}"#, result);
    let out = rows(&mut item, 80);
    assert_eq!(out[0], "  ✓ Job (Output) PID 7 dev server");
    assert!(out.iter().any(|l| l.contains("listening")));
}

#[test]
fn test_job_description_dropped_when_narrow() {
    let result = ToolResult::success("1", "").with_metadata(r#"{"description":"a long description"}"#);
    let mut item = done("1", "job_kill", r#"{"shell_id":"7"}"#, result);
    // 28 inner columns minus an 18-column header leaves 9 for the description.
    let out = rows(&mut item, 30);
    assert_eq!(out[0], "  ✓ Job (Kill) PID 7");
}

#[test]
fn test_job_output_spins_until_result() {
    let item = ToolItem::new(
        ToolCall::new("1", "job_output", r#"{"shell_id":"7"}"#).finished(),
        None,
        false,
    );
    assert!(item.is_spinning());
    let bash = ToolItem::new(ToolCall::new("2", "bash", "{}").finished(), None, false);
    assert!(!bash.is_spinning());
}

#[test]
fn test_multi_edit_partial_note() {
    let result = ToolResult::success("1", "applied").with_metadata(
        r#"{"oldContent":"a\n","newContent":"b\n","editsFailed":[{"old_string":"x"}],"editsApplied":1}"#,
    );
    let mut item = done("1", "multiedit", r#"{"file_path":"a.txt","edits":[{},{}]}"#, result);
    let out = rows(&mut item, 100);
    assert!(out[0].contains("Multi-Edit a.txt"));
    assert!(out.len() > 4);
    assert!(out.last().unwrap().contains("1 of 2 edits succeeded"));
    assert!(out.last().unwrap().contains("Note"));
}

#[test]
fn test_edit_bad_metadata_falls_back_to_content() {
    let result = ToolResult::success("1", "edited fine").with_metadata("not json");
    let mut item = done("1", "edit", r#"{"file_path":"a.txt"}"#, result);
    let out = rows(&mut item, 80);
    assert!(out[0].contains("Edit a.txt"));
    assert!(out.iter().any(|l| l.contains("edited fine")));
}

#[test]
fn test_todos_created() {
    let input = r#"{"todos":[
        {"content":"write docs","status":"pending"},
        {"content":"fix bug","status":"completed"},
        {"content":"run tests","status":"in_progress","active_form":"running tests"}]}"#;
    let meta = r#"{"is_new":true,"total":3,"completed":1,"todos":[
        {"content":"write docs","status":"pending"},
        {"content":"fix bug","status":"completed"},
        {"content":"run tests","status":"in_progress","active_form":"running tests"}]}"#;
    let result = ToolResult::success("1", "ok").with_metadata(meta);
    let mut item = done("1", "todos", input, result);
    let out = rows(&mut item, 80);
    assert_eq!(
        out,
        vec![
            "  ✓ To-Do created 3 todos",
            "",
            "    ✓ fix bug",
            "    → running tests",
            "    • write docs",
        ]
    );
}

#[test]
fn test_todos_progress_headers() {
    let input = r#"{"todos":[{"content":"a","status":"completed"},{"content":"b","status":"in_progress"}]}"#;
    let meta = r#"{"total":2,"completed":1,"just_completed":["a"],"just_started":"b","todos":[]}"#;
    let mut item = done("1", "todos", input, ToolResult::success("1", "ok").with_metadata(meta));
    let out = rows(&mut item, 80);
    assert_eq!(out[0], "  ✓ To-Do 1/2 · completed 1, starting next");
    assert_eq!(out[2], "    → b");

    let meta = r#"{"total":1,"completed":1,"justCompleted":["a"],"todos":[{"content":"a","status":"completed"}]}"#;
    let mut item = done("2", "todos", input, ToolResult::success("2", "ok").with_metadata(meta));
    let out = rows(&mut item, 80);
    assert_eq!(out[0], "  ✓ To-Do 1/1 · completed all");
    assert_eq!(out[2], "    ✓ a");
}

#[test]
fn test_todos_without_metadata_uses_input() {
    let input = r#"{"todos":[{"content":"a","status":"completed"},{"content":"b","status":"in_progress","activeForm":"doing b"}]}"#;
    let mut item = done("1", "todos", input, ToolResult::success("1", "ok"));
    let out = rows(&mut item, 80);
    assert_eq!(out, vec!["  ✓ To-Do 1/2 · doing b"]);
}

#[test]
fn test_todos_unknown_status_keeps_count() {
    let input = r#"{"todos":[{"content":"a","status":"completed"},{"content":"b","status":"cancelled"}]}"#;
    let mut item = done("1", "todos", input, ToolResult::success("1", "ok"));
    let out = rows(&mut item, 80);
    assert_eq!(out, vec!["  ✓ To-Do 1/2"]);
}

#[test]
fn test_unknown_tool_placeholder() {
    let mut item = done("1", "foo", "{}", ToolResult::success("1", "x"));
    let out = rows(&mut item, 80);
    assert_eq!(out, vec!["  Unsupported tool: foo"]);
}

#[test]
fn test_header_never_exceeds_width() {
    let styles = Styles::default();
    let config = config();
    let ctx = RenderContext::new(&styles, &config);
    let input = r#"{"pattern":"a very long pattern that keeps going and going","path":"some/deeply/nested/directory","include":"*.rs"}"#;
    for width in 20..=140 {
        let mut item = done("1", "grep", input, ToolResult::success("1", "match"));
        let block = item.render(&ctx, width);
        assert!(block.lines[0].width() <= width, "width {width}");
    }
}

#[test]
fn test_invalid_params_block() {
    let mut item = done("1", "view", "{not json", ToolResult::success("1", "x"));
    let out = rows(&mut item, 80);
    assert_eq!(out.len(), 1);
    assert!(out[0].contains("ERROR"));
    assert!(out[0].contains("Invalid parameters"));
}

#[test]
fn test_lsp_tools_ignore_bad_params() {
    let mut item = done("1", "lsp_diagnostics", "{not json", ToolResult::success("1", "clean"));
    let out = rows(&mut item, 80);
    assert_eq!(out[0], "  ✓ Diagnostics project");
}

#[test]
fn test_bash_bad_params_shows_placeholder_command() {
    let mut item = done("1", "bash", "{not json", ToolResult::success("1", "x"));
    let out = rows(&mut item, 80);
    assert!(out[0].contains("failed to parse command"));
}

#[test]
fn test_mcp_invalid_name() {
    let mut item = done("1", "mcp_github", "{}", ToolResult::success("1", "x"));
    let out = rows(&mut item, 80);
    assert_eq!(out.len(), 1);
    assert!(out[0].contains("Invalid tool name"));
}

#[test]
fn test_pending_line_fits_width() {
    let name = "mcp_some_very_long_group_name_with_many_words_that_goes_on";
    let mut item = ToolItem::new(ToolCall::new("1", name, "{}"), None, false);
    let out = rows(&mut item, 30);
    assert_eq!(out.len(), 1);
    assert!(display_width(&out[0]) <= 30);
    assert!(out[0].starts_with("  ● Some → "));

    let mut item = ToolItem::new(ToolCall::new("1", "multiedit", "{}"), None, false);
    let out = rows(&mut item, 12);
    assert!(display_width(&out[0]) <= 12);
}

#[test]
fn test_mcp_json_result() {
    let result = ToolResult::success("1", r#"{"count":1}"#);
    let mut item = done("1", "mcp_github_list_issues", r#"{"state":"open"}"#, result);
    let out = rows(&mut item, 80);
    assert!(out[0].contains("Github → List issues"));
    assert!(out[0].contains(r#"{"state":"open"}"#));
    assert!(out.iter().any(|l| l.contains(r#""count": 1"#)));
}

#[test]
fn test_early_states() {
    let call = ToolCall::new("1", "glob", r#"{"pattern":"*.rs"}"#).finished();

    let mut item = ToolItem::new(call.clone(), None, false);
    assert_eq!(rows(&mut item, 80)[2], "  Waiting for tool response...");

    item.set_status(ToolStatus::AwaitingPermission);
    assert_eq!(rows(&mut item, 80)[2], "  Requesting permission...");

    let mut item = ToolItem::new(call.clone(), None, true);
    assert_eq!(rows(&mut item, 80)[2], "  Canceled.");

    let mut item = ToolItem::new(call, Some(ToolResult::error("1", "no such\ndir")), false);
    let out = rows(&mut item, 80);
    assert!(out[0].starts_with("  × Glob"));
    assert!(out[2].contains("ERROR"));
    assert!(out[2].contains("no such dir"));
}

#[test]
fn test_plain_truncation_and_expand() {
    let content = (1..=15).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let mut item = done("1", "glob", r#"{"pattern":"*"}"#, ToolResult::success("1", content));
    let collapsed = rows(&mut item, 80);
    // header, blank, 10 lines, notice
    assert_eq!(collapsed.len(), 13);
    assert!(collapsed[12].contains("(5 lines hidden)"));

    item.toggle_expanded();
    let expanded = rows(&mut item, 80);
    assert_eq!(expanded.len(), 17);
    assert!(!expanded.iter().any(|l| l.contains("lines hidden")));

    item.toggle_expanded();
    assert_eq!(rows(&mut item, 80), collapsed);
}

#[test]
fn test_view_image_summary() {
    let result = ToolResult::success("1", "").with_data("A".repeat(2048), "image/png");
    let mut item = done("1", "view", r#"{"file_path":"logo.png"}"#, result);
    let out = rows(&mut item, 80);
    assert_eq!(out[2], "    Loaded → image/png 1.5 KB");
}

#[test]
fn test_view_uses_offset_line_numbers() {
    let result = ToolResult::success("1", "fn a() {}");
    let mut item = done("1", "view", r#"{"file_path":"a.rs","offset":41}"#, result);
    let out = rows(&mut item, 80);
    assert!(out[0].contains("View a.rs (offset=41)"));
    assert!(out[2].starts_with("     42   fn a() {}"));
}

#[test]
fn test_download_pairs() {
    let input = r#"{"url":"https://x.dev/f.zip","file_path":"/tmp/f.zip","timeout":30}"#;
    let mut item = done("1", "download", input, ToolResult::success("1", "saved"));
    let out = rows(&mut item, 120);
    assert_eq!(
        out[0],
        "  ✓ Download https://x.dev/f.zip (file_path=/tmp/f.zip, timeout=30s)"
    );
}

#[test]
fn test_web_search_markdown_body() {
    let result = ToolResult::success("1", "Found **three** results");
    let mut item = done("1", "web_search", r#"{"query":"rust tui"}"#, result);
    let out = rows(&mut item, 80);
    assert_eq!(out[0], "  ✓ Search rust tui");
    assert!(out.iter().any(|l| l.contains("three")));
}

#[test]
fn test_agent_pending_without_children() {
    let call = ToolCall::new("1", "agent", r#"{"prompt":"look"}"#);
    let mut item = ToolItem::new(call, None, false);
    let out = rows(&mut item, 80);
    assert_eq!(out.len(), 1);
    assert!(out[0].contains("Agent"));
}

#[test]
fn test_agent_tree() {
    let call = ToolCall::new("1", "agent", r#"{"prompt":"find the\nbug"}"#).finished();
    let mut item = ToolItem::new(call, None, false);
    {
        let container = item.as_container_mut().unwrap();
        container.add_nested_tool(done(
            "2",
            "glob",
            r#"{"pattern":"*.rs"}"#,
            ToolResult::success("2", "a.rs"),
        ));
        container.add_nested_tool(done(
            "3",
            "grep",
            r#"{"pattern":"panic"}"#,
            ToolResult::success("3", "a.rs:1"),
        ));
        assert!(container.nested_tools().iter().all(ToolItem::is_compact));
    }
    let out = rows(&mut item, 80);
    assert_eq!(out[0], "  ● Agent");
    assert_eq!(out[1], "");
    assert_eq!(out[2], "   Task  find the bug");
    assert_eq!(out[3], "    ├── ✓ Glob *.rs");
    assert_eq!(out[4], "    ╰── ✓ Grep panic");
    assert_eq!(out[5], "");
    assert!(contains_frame(&out[6]));

    item.set_result(ToolResult::success("1", "Found it."));
    let out = rows(&mut item, 80);
    assert_eq!(out[0], "  ✓ Agent");
    assert!(!out.iter().any(|l| contains_frame(l)));
    assert!(out.last().unwrap().contains("Found it."));
}

#[test]
fn test_agent_keeps_animating_while_child_runs() {
    let call = ToolCall::new("1", "agent", r#"{"prompt":"go"}"#).finished();
    let mut item = ToolItem::new(call, Some(ToolResult::success("1", "done")), false);
    item.as_container_mut()
        .unwrap()
        .add_nested_tool(ToolItem::new(ToolCall::new("2", "bash", "{}"), None, false));
    assert!(item.is_spinning());

    let out = rows(&mut item, 80);
    assert_eq!(out[0], "  ✓ Agent");
    assert!(out[3].starts_with("    ╰── ● Bash"));
    assert_eq!(out[4], "");
    assert!(contains_frame(&out[5]));
    assert!(out.last().unwrap().contains("done"));

    let child = item.nested_tool_mut("2").unwrap();
    child.set_tool_call(ToolCall::new("2", "bash", "{}").finished());
    assert!(!item.is_spinning());
    let out = rows(&mut item, 80);
    assert!(!out[4..].iter().any(|l| contains_frame(l)));
}

#[test]
fn test_agentic_fetch_prompt_tag() {
    let call = ToolCall::new("1", "agentic_fetch", r#"{"url":"https://x.dev","prompt":"summarize"}"#)
        .finished();
    let mut item = ToolItem::new(call, Some(ToolResult::success("1", "")), false);
    let out = rows(&mut item, 80);
    assert_eq!(out[0], "  ✓ Agentic Fetch https://x.dev");
    assert_eq!(out[2], "   Prompt  summarize");
}

#[test]
fn test_non_containers_have_no_container_view() {
    let mut item = done("1", "bash", "{}", ToolResult::success("1", "x"));
    assert!(item.as_container_mut().is_none());
}
