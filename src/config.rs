use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Layout limits shared by every renderer.
///
/// Defaults match the chat view; tests shrink them to keep fixtures small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Body lines shown before the truncation notice.
    pub line_cap: usize,
    /// Maximum reading width for prose and most tool bodies.
    pub max_text_width: usize,
    /// Left indent applied to tool bodies.
    pub body_padding: usize,
    /// Gutter reserved left of every tool block.
    pub message_padding: usize,
    /// Space that must remain after `key=value` pairs for them to be shown.
    pub min_param_budget: usize,
    /// Diffs wider than this render side by side.
    pub split_diff_width: usize,
    /// Job descriptions narrower than this are dropped.
    pub job_description_min: usize,
    /// Replaced by `~` when paths are displayed. None disables shortening;
    /// the host fills it in.
    pub home_dir: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            line_cap: 10,
            max_text_width: 120,
            body_padding: 2,
            message_padding: 2,
            min_param_budget: 30,
            split_diff_width: 120,
            job_description_min: 10,
            home_dir: None,
        }
    }
}

impl RenderConfig {
    /// Parse overrides from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Width available to a tool item after the gutter, capped for reading
    /// unless the tool needs the full width.
    pub fn item_width(&self, width: usize, full_width: bool) -> usize {
        let inner = width.saturating_sub(self.message_padding);
        if full_width {
            inner
        } else {
            inner.min(self.max_text_width)
        }
    }

    /// Width left for a tool body after its indent.
    pub fn body_width(&self, width: usize) -> usize {
        width.saturating_sub(self.body_padding)
    }
}
