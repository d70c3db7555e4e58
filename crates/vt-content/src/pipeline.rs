//! Shortcode-aware content rendering.

use std::collections::HashMap;

use vt_catalog::ProductResolver;
use vt_markdown::{MarkdownRenderer, SanitizePolicy, TocEntry};
use vt_shortcode::{CARD_VOCABULARY, ShortcodeExpander, extract_product_refs};

use crate::error::RenderError;

/// Output of [`ContentPipeline::render`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedContent {
    /// Sanitized HTML with product cards.
    pub html: String,
    /// Table of contents entries in document order.
    pub toc: Vec<TocEntry>,
    /// Referenced slugs without an active product, in first-occurrence order.
    pub unresolved: Vec<String>,
}

/// Renders post content with product shortcodes.
///
/// The pipeline holds no mutable state; one instance can serve concurrent
/// renders as long as its resolver can.
#[derive(Debug)]
pub struct ContentPipeline<R> {
    resolver: R,
    renderer: MarkdownRenderer,
    expander: ShortcodeExpander,
}

impl<R: ProductResolver> ContentPipeline<R> {
    /// Create a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::PolicyRejectsCard`] if the renderer sanitizes
    /// with a policy that would strip any tag or attribute product cards use.
    pub fn new(
        resolver: R,
        renderer: MarkdownRenderer,
        expander: ShortcodeExpander,
    ) -> Result<Self, RenderError> {
        if renderer.sanitizes() {
            check_card_vocabulary(renderer.policy())?;
        }
        Ok(Self {
            resolver,
            renderer,
            expander,
        })
    }

    /// Product resolver used for lookups.
    #[must_use]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Markdown renderer applied after expansion.
    #[must_use]
    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    /// Render post content to HTML.
    ///
    /// Products are looked up once per call with the distinct set of
    /// referenced slugs; no lookup happens when the content has none.
    /// Unresolved slugs render as placeholders and are reported in
    /// [`RenderedContent::unresolved`].
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Catalog`] if the product lookup fails.
    pub async fn render(&self, content: &str) -> Result<RenderedContent, RenderError> {
        if content.is_empty() {
            return Ok(RenderedContent::default());
        }

        let slugs = extract_product_refs(content);
        let products = if slugs.is_empty() {
            HashMap::new()
        } else {
            self.resolver.resolve(&slugs).await?
        };

        let unresolved: Vec<String> = slugs
            .into_iter()
            .filter(|slug| !products.contains_key(slug))
            .collect();
        if !unresolved.is_empty() {
            tracing::warn!(slugs = ?unresolved, "Product shortcodes without an active product");
        }

        let expanded = self.expander.expand(content, &products);
        let result = self.renderer.render_markdown(&expanded);

        Ok(RenderedContent {
            html: result.html,
            toc: result.toc,
            unresolved,
        })
    }
}

fn check_card_vocabulary(policy: &SanitizePolicy) -> Result<(), RenderError> {
    for &(tag, attributes) in CARD_VOCABULARY {
        for &attribute in attributes {
            if !policy.permits_attribute(tag, attribute) {
                return Err(RenderError::PolicyRejectsCard { tag, attribute });
            }
        }
    }
    Ok(())
}
