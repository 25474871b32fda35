//! Render state for one displayed tool call.
//!
//! A `ToolItem` owns the call, its result, the lifecycle, a single-entry
//! render cache and, for container tools, the nested child items. Every
//! mutation invalidates the cache; reads bypass it while the item spins.

#[cfg(test)]
mod tests;

use crate::anim::{Anim, AnimStep};
use crate::cache::RenderCache;
use crate::context::RenderContext;
use crate::copy::format_tool_for_copy;
use crate::message::{ToolCall, ToolResult};
use crate::status::{Lifecycle, SpinState, ToolStatus};
use crate::terminal::{RenderedBlock, StyledLine, StyledSpan};
use crate::tools::{RenderOpts, ToolKind, ToolRenderer};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton};

/// Something the surrounding view should do in response to input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemAction {
    /// Put this text on the clipboard.
    Copy(String),
}

/// Single-line rendering for items nested in another tool.
pub trait Compactable {
    fn set_compact(&mut self, compact: bool);
}

/// Collapsed bodies stop at the line cap; expanded ones show everything.
pub trait Expandable {
    fn toggle_expanded(&mut self);
}

pub trait Animatable {
    /// First tick to schedule, if the item is spinning.
    fn start_animation(&self) -> Option<AnimStep>;
    /// Advance on a tick addressed to this item (or one of its children).
    /// Returns the next tick to schedule.
    fn animate(&mut self, step: &AnimStep) -> Option<AnimStep>;
}

pub trait Focusable {
    fn set_focused(&mut self, focused: bool);
}

/// Tools that show other tool calls as a tree.
pub trait NestedToolContainer {
    fn nested_tools(&self) -> &[ToolItem];
    fn set_nested_tools(&mut self, tools: Vec<ToolItem>);
    /// Append a child. Children always render compact.
    fn add_nested_tool(&mut self, tool: ToolItem);
}

pub struct ToolItem {
    call: ToolCall,
    result: Option<ToolResult>,
    lifecycle: Lifecycle,
    kind: ToolKind,
    renderer: &'static dyn ToolRenderer,
    compact: bool,
    expanded: bool,
    focused: bool,
    cache: RenderCache,
    anim: Anim,
    children: Vec<ToolItem>,
}

impl std::fmt::Debug for ToolItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolItem")
            .field("id", &self.call.id)
            .field("kind", &self.kind)
            .field("status", &self.status())
            .field("compact", &self.compact)
            .field("expanded", &self.expanded)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

impl ToolItem {
    /// Item for a call as it first appears. `canceled` comes from the owning
    /// message's finish reason.
    pub fn new(call: ToolCall, result: Option<ToolResult>, canceled: bool) -> Self {
        let kind = ToolKind::from_name(&call.name);
        Self::build(call, result, canceled, kind, kind.renderer())
    }

    /// Item rendered by a caller-supplied strategy instead of the registry.
    pub fn with_renderer(
        call: ToolCall,
        result: Option<ToolResult>,
        canceled: bool,
        renderer: &'static dyn ToolRenderer,
    ) -> Self {
        let kind = ToolKind::from_name(&call.name);
        Self::build(call, result, canceled, kind, renderer)
    }

    fn build(
        call: ToolCall,
        result: Option<ToolResult>,
        canceled: bool,
        kind: ToolKind,
        renderer: &'static dyn ToolRenderer,
    ) -> Self {
        let anim = Anim::new(call.id.clone());
        Self {
            call,
            result,
            lifecycle: Lifecycle::new(canceled),
            kind,
            renderer,
            compact: false,
            expanded: false,
            focused: false,
            cache: RenderCache::new(),
            anim,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.call.id
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn call(&self) -> &ToolCall {
        &self.call
    }

    pub fn result(&self) -> Option<&ToolResult> {
        self.result.as_ref()
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Replace the call record. A finished call stays finished.
    pub fn set_tool_call(&mut self, mut call: ToolCall) {
        if self.call.finished && !call.finished {
            tracing::debug!(id = %call.id, "stale update would unfinish call, keeping finished");
            call.finished = true;
        }
        if call == self.call {
            return;
        }
        self.call = call;
        self.cache.invalidate();
    }

    pub fn set_result(&mut self, result: ToolResult) {
        self.result = Some(result);
        self.cache.invalidate();
    }

    pub fn set_status(&mut self, status: ToolStatus) {
        if self.result.is_some() {
            tracing::debug!(
                id = %self.call.id,
                %status,
                "status stored but superseded by result"
            );
        }
        self.lifecycle.set(status);
        self.cache.invalidate();
    }

    /// Effective status: the result decides once there is one.
    pub fn status(&self) -> ToolStatus {
        self.lifecycle.effective(self.result.as_ref())
    }

    pub fn is_pending(&self) -> bool {
        self.lifecycle.is_pending(&self.call, self.result.as_ref())
    }

    pub fn is_spinning(&self) -> bool {
        let state = SpinState {
            finished: self.call.finished,
            has_result: self.result.is_some(),
            canceled: self.lifecycle.is_canceled(self.result.as_ref()),
            children_spinning: self.children.iter().any(ToolItem::is_spinning),
        };
        self.renderer.spin_rule().is_spinning(state)
    }

    /// Width handed to the renderer. Compact items sit inside another
    /// tool's column and get no gutter.
    fn inner_width(&self, ctx: &RenderContext<'_>, width: usize) -> usize {
        let full = self.renderer.uses_full_width();
        if !self.compact {
            return ctx.config.item_width(width, full);
        }
        if full {
            width
        } else {
            width.min(ctx.config.max_text_width)
        }
    }

    /// Lines for `width` columns, gutter included.
    pub fn render(&mut self, ctx: &RenderContext<'_>, width: usize) -> RenderedBlock {
        let inner = self.inner_width(ctx, width);
        let spinning = self.is_spinning();
        if !spinning && let Some(block) = self.cache.get(inner) {
            let lines = block.lines.clone();
            return self.frame(ctx, lines);
        }

        let status = self.status();
        let renderer = self.renderer;
        let mut opts = RenderOpts {
            call: &self.call,
            result: self.result.as_ref(),
            status,
            expanded: self.expanded,
            compact: self.compact,
            spinning,
            anim: &self.anim,
            children: &mut self.children,
        };
        let lines = renderer.render(ctx, inner, &mut opts);
        let lines = self.cache.set(lines, inner).lines.clone();
        self.frame(ctx, lines)
    }

    /// Prefix every line with the gutter: a border while focused, blank
    /// otherwise, nothing in compact mode.
    fn frame(&self, ctx: &RenderContext<'_>, lines: Vec<StyledLine>) -> RenderedBlock {
        if self.compact {
            return RenderedBlock::new(lines);
        }
        let pad = ctx.config.message_padding;
        let gutter = if self.focused {
            let border = ctx.styles.glyphs.border;
            let rest = pad.saturating_sub(crate::text::display_width(border));
            StyledSpan::new(format!("{border}{}", " ".repeat(rest)), ctx.styles.focus_border)
        } else {
            StyledSpan::raw(" ".repeat(pad))
        };
        RenderedBlock::new(
            lines
                .into_iter()
                .map(|line| line.prepend(gutter.clone()))
                .collect(),
        )
    }

    /// Child with the given call id, for updating it in place. The parent
    /// shows the child's render, so its own cache is dropped.
    pub fn nested_tool_mut(&mut self, id: &str) -> Option<&mut ToolItem> {
        let child = self.children.iter_mut().find(|c| c.call.id == id)?;
        self.cache.invalidate();
        Some(child)
    }

    /// Container view of this item, for container kinds only.
    pub fn as_container_mut(&mut self) -> Option<&mut dyn NestedToolContainer> {
        if self.renderer.is_container() {
            Some(self)
        } else {
            None
        }
    }

    /// `c` or `y` copies the call and its result.
    pub fn handle_key(&self, ctx: &RenderContext<'_>, key: &KeyEvent) -> Option<ItemAction> {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        match key.code {
            KeyCode::Char('c' | 'y') => Some(ItemAction::Copy(format_tool_for_copy(
                &self.call,
                self.result.as_ref(),
                self.status(),
                ctx.config.home_dir.as_deref(),
            ))),
            _ => None,
        }
    }

    /// A left click toggles expansion. Returns whether the click was used.
    pub fn handle_click(&mut self, button: MouseButton) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        self.toggle_expanded();
        true
    }
}

impl Compactable for ToolItem {
    fn set_compact(&mut self, compact: bool) {
        if self.compact != compact {
            self.compact = compact;
            self.cache.invalidate();
        }
    }
}

impl Expandable for ToolItem {
    fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
        self.cache.invalidate();
    }
}

impl Focusable for ToolItem {
    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl Animatable for ToolItem {
    fn start_animation(&self) -> Option<AnimStep> {
        self.is_spinning().then(|| self.anim.start())
    }

    fn animate(&mut self, step: &AnimStep) -> Option<AnimStep> {
        if step.id == self.anim.id() {
            if !self.is_spinning() {
                return None;
            }
            return self.anim.animate(step);
        }
        self.children
            .iter_mut()
            .find(|child| child.id() == step.id)
            .and_then(|child| child.animate(step))
    }
}

impl NestedToolContainer for ToolItem {
    fn nested_tools(&self) -> &[ToolItem] {
        &self.children
    }

    fn set_nested_tools(&mut self, tools: Vec<ToolItem>) {
        self.children = tools;
        for child in &mut self.children {
            child.set_compact(true);
        }
        self.cache.invalidate();
    }

    fn add_nested_tool(&mut self, mut tool: ToolItem) {
        tool.set_compact(true);
        self.children.push(tool);
        self.cache.invalidate();
    }
}
