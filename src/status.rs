//! Tool call lifecycle.
//!
//! The stored status only matters until a result arrives; after that the
//! result decides. Pending and spinning are derived, never stored.

use crate::message::{ToolCall, ToolResult};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToolStatus {
    AwaitingPermission,
    #[default]
    Running,
    Success,
    Error,
    Canceled,
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AwaitingPermission => "awaiting permission",
            Self::Running => "running",
            Self::Success => "success",
            Self::Error => "error",
            Self::Canceled => "canceled",
        };
        f.write_str(s)
    }
}

/// When a tool shows its progress animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpinRule {
    /// Until the call has finished streaming.
    #[default]
    UntilFinished,
    /// Until a result exists, whatever the finished flag says.
    UntilResult,
    /// Until a result exists and every nested child has settled.
    UntilNestedSettled,
}

/// Inputs to the spin predicate.
#[derive(Debug, Clone, Copy)]
pub struct SpinState {
    pub finished: bool,
    pub has_result: bool,
    pub canceled: bool,
    pub children_spinning: bool,
}

impl SpinRule {
    pub fn is_spinning(self, state: SpinState) -> bool {
        match self {
            Self::UntilFinished => !state.finished && !state.canceled,
            Self::UntilResult => !state.has_result && !state.canceled,
            Self::UntilNestedSettled => {
                (!state.has_result && !state.canceled) || state.children_spinning
            }
        }
    }
}

/// Externally driven status plus the derivations built on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lifecycle {
    status: ToolStatus,
}

impl Lifecycle {
    /// Initial state: canceled when the owning message was canceled.
    pub fn new(canceled: bool) -> Self {
        let status = if canceled {
            ToolStatus::Canceled
        } else {
            ToolStatus::Running
        };
        Self { status }
    }

    /// Status as last set by the producer.
    pub fn stored(&self) -> ToolStatus {
        self.status
    }

    pub fn set(&mut self, status: ToolStatus) {
        self.status = status;
    }

    /// A result always wins; without one the stored status stands.
    pub fn effective(&self, result: Option<&ToolResult>) -> ToolStatus {
        match result {
            Some(r) if r.is_error => ToolStatus::Error,
            Some(_) => ToolStatus::Success,
            None => self.status,
        }
    }

    /// Canceled as far as spinning and pending are concerned.
    pub fn is_canceled(&self, result: Option<&ToolResult>) -> bool {
        self.effective(result) == ToolStatus::Canceled
    }

    /// The call is still streaming and nobody canceled it.
    pub fn is_pending(&self, call: &ToolCall, result: Option<&ToolResult>) -> bool {
        !call.finished && !self.is_canceled(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(finished: bool, has_result: bool, canceled: bool, children: bool) -> SpinState {
        SpinState {
            finished,
            has_result,
            canceled,
            children_spinning: children,
        }
    }

    #[test]
    fn test_initial_status() {
        assert_eq!(Lifecycle::new(false).stored(), ToolStatus::Running);
        assert_eq!(Lifecycle::new(true).stored(), ToolStatus::Canceled);
    }

    #[test]
    fn test_result_overrides_every_stored_status() {
        let ok = ToolResult::success("1", "done");
        let failed = ToolResult::error("1", "boom");
        for stored in [
            ToolStatus::AwaitingPermission,
            ToolStatus::Running,
            ToolStatus::Canceled,
            ToolStatus::Error,
        ] {
            let mut lc = Lifecycle::default();
            lc.set(stored);
            assert_eq!(lc.effective(Some(&ok)), ToolStatus::Success);
            assert_eq!(lc.effective(Some(&failed)), ToolStatus::Error);
        }
    }

    #[test]
    fn test_canceled_sticks_without_result() {
        let lc = Lifecycle::new(true);
        assert_eq!(lc.effective(None), ToolStatus::Canceled);
        let call = ToolCall::new("1", "bash", "{}");
        assert!(!lc.is_pending(&call, None));
    }

    #[test]
    fn test_pending() {
        let lc = Lifecycle::default();
        let call = ToolCall::new("1", "bash", "{}");
        assert!(lc.is_pending(&call, None));
        assert!(!lc.is_pending(&call.clone().finished(), None));
    }

    #[test]
    fn test_spin_rules() {
        assert!(SpinRule::UntilFinished.is_spinning(state(false, false, false, false)));
        assert!(!SpinRule::UntilFinished.is_spinning(state(true, false, false, false)));
        assert!(!SpinRule::UntilFinished.is_spinning(state(false, false, true, false)));

        assert!(SpinRule::UntilResult.is_spinning(state(true, false, false, false)));
        assert!(!SpinRule::UntilResult.is_spinning(state(false, true, false, false)));

        assert!(SpinRule::UntilNestedSettled.is_spinning(state(true, false, false, false)));
        assert!(SpinRule::UntilNestedSettled.is_spinning(state(true, true, false, true)));
        assert!(!SpinRule::UntilNestedSettled.is_spinning(state(true, true, false, false)));
        assert!(!SpinRule::UntilNestedSettled.is_spinning(state(false, false, true, false)));
    }
}
