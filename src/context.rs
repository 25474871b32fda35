use crate::config::RenderConfig;
use crate::highlight::{
    CmarkRenderer, DiffFormatter, MarkdownRenderer, SimilarDiff, SyntaxHighlighter,
    SyntectHighlighter,
};
use crate::style::Styles;

static HIGHLIGHTER: SyntectHighlighter = SyntectHighlighter;
static MARKDOWN: CmarkRenderer = CmarkRenderer;
static DIFF: SimilarDiff = SimilarDiff;

/// Borrowed collaborators for one render pass.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub styles: &'a Styles,
    pub config: &'a RenderConfig,
    pub highlighter: &'a dyn SyntaxHighlighter,
    pub markdown: &'a dyn MarkdownRenderer,
    pub diff: &'a dyn DiffFormatter,
}

impl<'a> RenderContext<'a> {
    /// Context using the bundled syntect, pulldown-cmark and similar engines.
    pub fn new(styles: &'a Styles, config: &'a RenderConfig) -> Self {
        Self {
            styles,
            config,
            highlighter: &HIGHLIGHTER,
            markdown: &MARKDOWN,
            diff: &DIFF,
        }
    }

    #[must_use]
    pub fn with_highlighter(mut self, highlighter: &'a dyn SyntaxHighlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    #[must_use]
    pub fn with_markdown(mut self, markdown: &'a dyn MarkdownRenderer) -> Self {
        self.markdown = markdown;
        self
    }

    #[must_use]
    pub fn with_diff(mut self, diff: &'a dyn DiffFormatter) -> Self {
        self.diff = diff;
        self
    }
}
