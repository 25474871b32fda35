//! Spinner animation keyed by item id.

use crate::style::Styles;
use crate::terminal::StyledSpan;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Tick addressed to one animated item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimStep {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct Anim {
    id: String,
    frame_count: u64,
}

impl Anim {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            frame_count: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// First tick to schedule.
    pub fn start(&self) -> AnimStep {
        AnimStep {
            id: self.id.clone(),
        }
    }

    /// Advance one frame if the tick is ours. Returns the next tick.
    pub fn animate(&mut self, step: &AnimStep) -> Option<AnimStep> {
        if step.id != self.id {
            return None;
        }
        self.frame_count = self.frame_count.wrapping_add(1);
        tracing::trace!(id = %self.id, frame = self.frame_count, "anim step");
        Some(self.start())
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn frame(&self) -> &'static str {
        SPINNER[(self.frame_count % SPINNER.len() as u64) as usize]
    }

    pub fn render(&self, styles: &Styles) -> StyledSpan {
        StyledSpan::new(self.frame(), styles.spinner)
    }
}

/// True if `s` contains one of the spinner frames.
pub fn contains_frame(s: &str) -> bool {
    SPINNER.iter().any(|f| s.contains(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animate_only_own_id() {
        let mut anim = Anim::new("a");
        let first = anim.frame();
        assert!(anim.animate(&AnimStep { id: "b".into() }).is_none());
        assert_eq!(anim.frame(), first);
        let next = anim.animate(&anim.start());
        assert_eq!(next, Some(AnimStep { id: "a".into() }));
        assert_ne!(anim.frame(), first);
    }

    #[test]
    fn test_frames_cycle() {
        let mut anim = Anim::new("a");
        let step = anim.start();
        for _ in 0..SPINNER.len() {
            anim.animate(&step);
        }
        assert_eq!(anim.frame(), SPINNER[0]);
        assert!(contains_frame(anim.frame()));
    }
}
