use thiserror::Error;

/// Failures raised while preparing a render. None of them escape the public
/// render path: each is turned into an error block or a plain-text fallback.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[source] serde_json::Error),

    #[error("Invalid tool name: {0}")]
    InvalidToolName(String),

    #[error("Invalid metadata: {0}")]
    Metadata(#[source] serde_json::Error),

    #[error("Markdown error: {0}")]
    Markdown(String),

    #[error("Highlight error: {0}")]
    Highlight(String),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
