#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod anim;
pub mod cache;
pub mod config;
pub mod content;
pub mod context;
pub mod copy;
pub mod error;
pub mod highlight;
pub mod item;
pub mod message;
pub mod status;
pub mod style;
pub mod terminal;
pub mod text;
pub mod tools;

pub use config::RenderConfig;
pub use context::RenderContext;
pub use copy::format_tool_for_copy;
pub use error::{RenderError, Result};
pub use item::{
    Animatable, Compactable, Expandable, Focusable, ItemAction, NestedToolContainer, ToolItem,
};
pub use message::{ToolCall, ToolResult};
pub use status::ToolStatus;
pub use style::Styles;
pub use terminal::{RenderedBlock, StyledLine, StyledSpan};
