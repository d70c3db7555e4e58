//! Post content rendering with product shortcodes.
//!
//! [`ContentPipeline`] turns raw post content (Markdown with embedded
//! `[product:<slug>]` shortcodes) into sanitized HTML with product cards:
//!
//! 1. extract the distinct product slugs referenced by the content;
//! 2. resolve them with a single [`ProductResolver`] call;
//! 3. replace every shortcode with a card or a "not found" placeholder;
//! 4. render the result as Markdown and sanitize it.
//!
//! Cards are expanded before sanitization, so the sanitizer policy must
//! permit the card markup. The pipeline checks this when it is built.
//!
//! # Example
//!
//! ```ignore
//! use vt_content::ContentPipeline;
//! use vt_markdown::MarkdownRenderer;
//! use vt_shortcode::ShortcodeExpander;
//!
//! let pipeline = ContentPipeline::new(catalog, MarkdownRenderer::new(), ShortcodeExpander::new())?;
//! let rendered = pipeline.render("Check [product:ps5-slim] out!").await?;
//! ```
//!
//! [`ProductResolver`]: vt_catalog::ProductResolver

mod error;
mod pipeline;

pub use error::RenderError;
pub use pipeline::{ContentPipeline, RenderedContent};
