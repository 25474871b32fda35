//! Tool call and result records as produced by the executor.

use crate::error::{RenderError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A single tool invocation streamed from the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// JSON-encoded parameters. May be partial while streaming.
    #[serde(default)]
    pub input: String,
    /// Set once the producer has stopped streaming the call.
    #[serde(default)]
    pub finished: bool,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input: input.into(),
            finished: false,
        }
    }

    /// Mark the call as fully streamed.
    #[must_use]
    pub fn finished(mut self) -> Self {
        self.finished = true;
        self
    }

    /// Decode the parameters. An empty input is treated as `{}`.
    pub fn params<T: DeserializeOwned>(&self) -> Result<T> {
        let input = if self.input.trim().is_empty() {
            "{}"
        } else {
            self.input.as_str()
        };
        serde_json::from_str(input).map_err(RenderError::InvalidParameters)
    }
}

/// Outcome of a tool call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolResult {
    #[serde(alias = "toolCallId")]
    pub tool_call_id: String,
    pub content: String,
    /// Base64 payload for media results.
    pub data: String,
    #[serde(alias = "mimeType")]
    pub mime_type: String,
    /// JSON-encoded, tool-specific metadata.
    pub metadata: String,
    #[serde(alias = "isError")]
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn error(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
            is_error: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = metadata.into();
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        self.data = data.into();
        self.mime_type = mime_type.into();
        self
    }

    /// Decode the metadata into a tool-specific shape.
    pub fn metadata<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.metadata).map_err(RenderError::Metadata)
    }

    /// Metadata decoded, or the default shape when it is absent or malformed.
    pub fn metadata_or_default<T: DeserializeOwned + Default>(&self) -> T {
        if self.metadata.is_empty() {
            return T::default();
        }
        self.metadata().unwrap_or_else(|e| {
            tracing::debug!(tool_call_id = %self.tool_call_id, "metadata ignored: {e}");
            T::default()
        })
    }

    pub fn is_image(&self) -> bool {
        !self.data.is_empty() && self.mime_type.starts_with("image/")
    }
}
