//! Single-entry render cache.

use crate::terminal::{RenderedBlock, StyledLine};

#[derive(Debug)]
struct Entry {
    block: RenderedBlock,
    width: usize,
}

/// Last render of one item, valid only for the exact width it was made at.
/// Owners call `invalidate` on every state change.
#[derive(Debug, Default)]
pub struct RenderCache {
    entry: Option<Entry>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached block for `width`, if any.
    pub fn get(&self, width: usize) -> Option<&RenderedBlock> {
        match &self.entry {
            Some(e) if e.width == width && e.block.height() > 0 => {
                tracing::trace!(width, "render cache hit");
                Some(&e.block)
            }
            _ => {
                tracing::trace!(width, "render cache miss");
                None
            }
        }
    }

    pub fn set(&mut self, lines: Vec<StyledLine>, width: usize) -> &RenderedBlock {
        let entry = self.entry.insert(Entry {
            block: RenderedBlock::new(lines),
            width,
        });
        &entry.block
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}
