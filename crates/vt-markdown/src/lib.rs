//! Markdown to sanitized HTML for post content.
//!
//! This crate provides [`MarkdownRenderer`], a builder-configured converter
//! built on `pulldown-cmark` that:
//!
//! - demotes heading levels by a fixed offset so that `#` in a post becomes
//!   an `<h2>` inside the page (the page itself owns the `<h1>`);
//! - assigns stable `id` anchors to headings and collects a table of contents;
//! - sanitizes the produced HTML against an explicit [`SanitizePolicy`].
//!
//! The sanitizer allow-list is an immutable value handed to the renderer.
//! There is no process-wide sanitizer state.
//!
//! # Example
//!
//! ```
//! use vt_markdown::MarkdownRenderer;
//!
//! let result = MarkdownRenderer::new().render_markdown("# Hello\n\n**Bold** text");
//! assert!(result.html.contains(r#"<h2 id="hello">Hello</h2>"#));
//! assert_eq!(result.toc[0].level, 2);
//! ```

mod detect;
mod heading;
mod renderer;
mod sanitize;
mod util;

pub use detect::looks_like_markdown;
pub use heading::TocEntry;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use sanitize::SanitizePolicy;
pub use util::escape_html;
