//! Markdown renderer with heading demotion and sanitization.

use pulldown_cmark::{Event, Options, Parser, html};

use crate::heading::{HeadingRewriter, TocEntry};
use crate::sanitize::SanitizePolicy;

/// Default heading offset: `#` renders as `<h2>`.
const DEFAULT_HEADING_OFFSET: u8 = 1;

/// Result of rendering markdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered (and, unless disabled, sanitized) HTML.
    pub html: String,
    /// Table of contents entries in document order.
    pub toc: Vec<TocEntry>,
}

/// Markdown to HTML renderer.
///
/// Raw HTML in the source is passed through to the output and then subjected
/// to the same sanitization as generated markup, so callers may embed
/// pre-rendered fragments as long as the [`SanitizePolicy`] permits their
/// tags and attributes.
///
/// # Example
///
/// ```
/// use vt_markdown::{MarkdownRenderer, SanitizePolicy};
///
/// let renderer = MarkdownRenderer::new()
///     .with_heading_offset(2)
///     .with_policy(SanitizePolicy::default());
/// let result = renderer.render_markdown("# Title");
/// assert_eq!(result.html, "<h3 id=\"title\">Title</h3>\n");
/// ```
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    heading_offset: u8,
    sanitize: bool,
    policy: SanitizePolicy,
}

impl MarkdownRenderer {
    /// Create a renderer with the default offset and allow-list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heading_offset: DEFAULT_HEADING_OFFSET,
            sanitize: true,
            policy: SanitizePolicy::default(),
        }
    }

    /// Shift every heading down by `offset` levels (clamped at `h6`).
    #[must_use]
    pub fn with_heading_offset(mut self, offset: u8) -> Self {
        self.heading_offset = offset;
        self
    }

    /// Enable or disable sanitization of the produced HTML.
    ///
    /// Sanitization is enabled by default. Disable it only for trusted input.
    #[must_use]
    pub fn with_sanitize(mut self, enabled: bool) -> Self {
        self.sanitize = enabled;
        self
    }

    /// Replace the sanitization allow-list.
    #[must_use]
    pub fn with_policy(mut self, policy: SanitizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Whether output is sanitized.
    #[must_use]
    pub fn sanitizes(&self) -> bool {
        self.sanitize
    }

    /// The allow-list applied when sanitizing.
    #[must_use]
    pub fn policy(&self) -> &SanitizePolicy {
        &self.policy
    }

    /// Parser options used for every render.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_DEFINITION_LIST
    }

    /// Render markdown text.
    ///
    /// Empty input yields an empty result.
    #[must_use]
    pub fn render_markdown(&self, markdown: &str) -> RenderResult {
        if markdown.is_empty() {
            return RenderResult::default();
        }

        let mut events: Vec<Event<'_>> =
            Parser::new_ext(markdown, self.parser_options()).collect();
        let toc = HeadingRewriter::new(self.heading_offset).rewrite(&mut events);

        let mut output = String::with_capacity(markdown.len() + markdown.len() / 2);
        html::push_html(&mut output, events.into_iter());

        let html = if self.sanitize {
            self.policy.clean(&output)
        } else {
            output
        };

        RenderResult { html, toc }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
