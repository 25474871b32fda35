use super::*;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::highlight::MarkdownRenderer;
use crate::status::SpinRule;
use crate::style::Styles;
use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Markdown engine that counts how often it is asked to render.
#[derive(Default)]
struct CountingMarkdown {
    calls: Cell<usize>,
}

impl MarkdownRenderer for CountingMarkdown {
    fn render(&self, text: &str, _width: usize) -> Result<Vec<StyledLine>> {
        self.calls.set(self.calls.get() + 1);
        Ok(text.lines().map(StyledLine::raw).collect())
    }
}

/// Renderer that counts calls and spins until the call finishes.
struct CountingRenderer {
    calls: AtomicUsize,
}

impl ToolRenderer for CountingRenderer {
    fn render(
        &self,
        _ctx: &RenderContext<'_>,
        _width: usize,
        opts: &mut RenderOpts<'_>,
    ) -> Vec<StyledLine> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        vec![StyledLine::raw(format!("{} {n}", opts.call.name))]
    }

    fn spin_rule(&self) -> SpinRule {
        SpinRule::UntilFinished
    }
}

fn config() -> RenderConfig {
    RenderConfig::default()
}

fn plain(block: &RenderedBlock) -> Vec<String> {
    block
        .lines
        .iter()
        .map(|l| l.plain().trim_end().to_string())
        .collect()
}

fn web_fetch(result: Option<ToolResult>) -> ToolItem {
    let call = ToolCall::new("1", "web_fetch", r#"{"url":"https://x.dev"}"#).finished();
    ToolItem::new(call, result, false)
}

#[test]
fn test_second_render_is_served_from_cache() {
    let styles = Styles::default();
    let config = config();
    let markdown = CountingMarkdown::default();
    let ctx = RenderContext::new(&styles, &config).with_markdown(&markdown);

    let mut item = web_fetch(Some(ToolResult::success("1", "hello")));
    let first = item.render(&ctx, 80);
    let second = item.render(&ctx, 80);
    assert_eq!(first, second);
    assert_eq!(markdown.calls.get(), 1);
}

#[test]
fn test_width_change_and_mutations_rerender() {
    let styles = Styles::default();
    let config = config();
    let markdown = CountingMarkdown::default();
    let ctx = RenderContext::new(&styles, &config).with_markdown(&markdown);

    let mut item = web_fetch(Some(ToolResult::success("1", "hello")));
    item.render(&ctx, 80);
    item.render(&ctx, 60);
    assert_eq!(markdown.calls.get(), 2);

    item.set_result(ToolResult::success("1", "hello again"));
    let block = item.render(&ctx, 60);
    assert_eq!(markdown.calls.get(), 3);
    assert!(plain(&block).iter().any(|l| l.contains("hello again")));

    item.toggle_expanded();
    item.render(&ctx, 60);
    assert_eq!(markdown.calls.get(), 4);
}

#[test]
fn test_focus_does_not_invalidate_cache() {
    let styles = Styles::default();
    let config = config();
    let markdown = CountingMarkdown::default();
    let ctx = RenderContext::new(&styles, &config).with_markdown(&markdown);

    let mut item = web_fetch(Some(ToolResult::success("1", "hello")));
    let blurred = plain(&item.render(&ctx, 80));
    item.set_focused(true);
    let focused = plain(&item.render(&ctx, 80));
    assert_eq!(markdown.calls.get(), 1);
    assert!(blurred[0].starts_with("  ✓ Fetch"));
    assert!(focused[0].starts_with("│ ✓ Fetch"));
    assert!(focused.iter().all(|l| l.starts_with('│')));
}

#[test]
fn test_spinning_bypasses_cache_but_writes_back() {
    static RENDERER: CountingRenderer = CountingRenderer {
        calls: AtomicUsize::new(0),
    };
    let styles = Styles::default();
    let config = config();
    let ctx = RenderContext::new(&styles, &config);

    let call = ToolCall::new("1", "custom", "{}");
    let mut item = ToolItem::with_renderer(call.clone(), None, false, &RENDERER);
    assert!(item.is_spinning());
    item.render(&ctx, 80);
    item.render(&ctx, 80);
    assert_eq!(RENDERER.calls.load(Ordering::SeqCst), 2);

    item.set_tool_call(call.finished());
    assert!(!item.is_spinning());
    let first = item.render(&ctx, 80);
    let second = item.render(&ctx, 80);
    assert_eq!(RENDERER.calls.load(Ordering::SeqCst), 3);
    assert_eq!(plain(&first), vec!["  custom 3"]);
    assert_eq!(first, second);
}

#[test]
fn test_result_overrides_stored_status() {
    let mut item = web_fetch(None);
    item.set_status(ToolStatus::Canceled);
    assert_eq!(item.status(), ToolStatus::Canceled);

    item.set_result(ToolResult::success("1", "done"));
    assert_eq!(item.status(), ToolStatus::Success);
    for stale in [
        ToolStatus::Running,
        ToolStatus::AwaitingPermission,
        ToolStatus::Canceled,
    ] {
        item.set_status(stale);
        assert_eq!(item.status(), ToolStatus::Success);
    }

    item.set_result(ToolResult::error("1", "failed"));
    item.set_status(ToolStatus::Running);
    assert_eq!(item.status(), ToolStatus::Error);
}

#[test]
fn test_finished_flag_is_sticky() {
    let mut item = ToolItem::new(ToolCall::new("1", "bash", "{}"), None, false);
    assert!(item.is_pending());
    item.set_tool_call(ToolCall::new("1", "bash", r#"{"command":"ls"}"#).finished());
    item.set_tool_call(ToolCall::new("1", "bash", r#"{"command":"ls -la"}"#));
    assert!(item.call().finished);
    assert_eq!(item.call().input, r#"{"command":"ls -la"}"#);
    assert!(!item.is_pending());
}

#[test]
fn test_canceled_at_creation() {
    let item = ToolItem::new(ToolCall::new("1", "bash", "{}"), None, true);
    assert_eq!(item.status(), ToolStatus::Canceled);
    assert!(!item.is_pending());
    assert!(!item.is_spinning());
    assert!(item.start_animation().is_none());
}

#[test]
fn test_compact_has_no_gutter_and_no_body() {
    let styles = Styles::default();
    let config = config();
    let ctx = RenderContext::new(&styles, &config);
    let mut item = web_fetch(Some(ToolResult::success("1", "hello")));
    item.set_compact(true);
    assert_eq!(plain(&item.render(&ctx, 80)), vec!["✓ Fetch https://x.dev"]);
}

#[test]
fn test_expand_toggle_is_reversible() {
    let styles = Styles::default();
    let config = config();
    let ctx = RenderContext::new(&styles, &config);
    let content = (1..=12).map(|i| format!("row {i}")).collect::<Vec<_>>().join("\n");
    let call = ToolCall::new("1", "ls", "{}").finished();
    let mut item = ToolItem::new(call, Some(ToolResult::success("1", content)), false);

    let collapsed = item.render(&ctx, 80).height();
    assert!(item.handle_click(MouseButton::Left));
    assert!(item.is_expanded());
    let expanded = item.render(&ctx, 80).height();
    assert!(item.handle_click(MouseButton::Left));
    assert_eq!(item.render(&ctx, 80).height(), collapsed);
    assert_eq!(expanded, collapsed + 1);

    assert!(!item.handle_click(MouseButton::Right));
    assert!(!item.is_expanded());
}

#[test]
fn test_copy_uses_configured_home() {
    let styles = Styles::default();
    let config = RenderConfig {
        home_dir: Some("/home/dev".into()),
        ..RenderConfig::default()
    };
    let ctx = RenderContext::new(&styles, &config);
    let call = ToolCall::new("1", "view", r#"{"file_path":"/home/dev/src/lib.rs"}"#).finished();
    let item = ToolItem::new(call, None, false);

    let action = item.handle_key(&ctx, &KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
    let Some(ItemAction::Copy(text)) = action else {
        panic!("expected copy action");
    };
    assert!(text.contains("**File:** ~/src/lib.rs"));
}

#[test]
fn test_copy_key() {
    let styles = Styles::default();
    let config = config();
    let ctx = RenderContext::new(&styles, &config);
    let call = ToolCall::new("1", "bash", r#"{"command":"ls"}"#).finished();
    let item = ToolItem::new(call, Some(ToolResult::success("1", "a.rs")), false);

    let action = item.handle_key(&ctx, &KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE));
    let Some(ItemAction::Copy(text)) = action else {
        panic!("expected copy action");
    };
    assert!(text.starts_with("## Bash Tool Call"));
    assert!(text.contains("```bash\na.rs\n```"));

    assert!(
        item.handle_key(&ctx, &KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE))
            .is_some()
    );
    assert!(
        item.handle_key(&ctx, &KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .is_none()
    );
    assert!(
        item.handle_key(&ctx, &KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))
            .is_none()
    );
}

#[test]
fn test_ticks_route_to_children() {
    let styles = Styles::default();
    let config = config();
    let ctx = RenderContext::new(&styles, &config);

    let parent_call = ToolCall::new("p", "agent", r#"{"prompt":"go"}"#).finished();
    let mut parent = ToolItem::new(parent_call, None, false);
    let child = ToolItem::new(ToolCall::new("c", "bash", r#"{"command":"ls"}"#), None, false);
    let child_step = child.start_animation().unwrap();
    parent.as_container_mut().unwrap().add_nested_tool(child);

    let before = plain(&parent.render(&ctx, 80));
    assert_eq!(parent.animate(&child_step), Some(child_step.clone()));
    let after = plain(&parent.render(&ctx, 80));
    assert_ne!(before[3], after[3]);
    assert!(after[3].contains("Bash"));

    assert!(parent.animate(&AnimStep { id: "other".into() }).is_none());
    let own = parent.start_animation().unwrap();
    assert_eq!(own.id, "p");
    assert!(parent.animate(&own).is_some());
}

#[test]
fn test_container_spins_until_children_settle() {
    let parent_call = ToolCall::new("p", "agent", r#"{"prompt":"go"}"#).finished();
    let mut parent = ToolItem::new(parent_call, None, false);
    parent
        .as_container_mut()
        .unwrap()
        .add_nested_tool(ToolItem::new(ToolCall::new("c", "bash", "{}"), None, false));
    parent.set_result(ToolResult::success("p", "done"));
    assert!(parent.is_spinning());

    let child = parent.nested_tool_mut("c").unwrap();
    child.set_tool_call(ToolCall::new("c", "bash", "{}").finished());
    assert!(!parent.is_spinning());
    assert!(parent.start_animation().is_none());
}

#[test]
fn test_set_nested_tools_forces_compact() {
    let mut parent = ToolItem::new(
        ToolCall::new("p", "agentic_fetch", "{}").finished(),
        None,
        false,
    );
    let children = vec![
        ToolItem::new(ToolCall::new("a", "ls", "{}"), None, false),
        ToolItem::new(ToolCall::new("b", "glob", "{}"), None, false),
    ];
    let container = parent.as_container_mut().unwrap();
    container.set_nested_tools(children);
    assert_eq!(container.nested_tools().len(), 2);
    assert!(container.nested_tools().iter().all(ToolItem::is_compact));
}
