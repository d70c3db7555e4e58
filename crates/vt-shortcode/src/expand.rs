//! Shortcode expansion.

use std::collections::HashMap;

use regex::Captures;

use crate::card::{render_product_card, render_product_placeholder};
use crate::extract::PRODUCT_SHORTCODE;
use crate::product::ProductView;

/// Path prefix of the click-tracking redirect.
pub const DEFAULT_REDIRECT_PREFIX: &str = "/goto/";

/// Replaces product shortcodes with HTML fragments.
///
/// Every `[product:<slug>]` token becomes either a product card (when `slug`
/// is present in the resolved map) or a "not found" placeholder. Text outside
/// tokens, including raw HTML, is copied unchanged, and the output depends
/// only on the input text and the map.
#[derive(Clone, Debug)]
pub struct ShortcodeExpander {
    redirect_prefix: String,
}

impl ShortcodeExpander {
    /// Create an expander linking cards to [`DEFAULT_REDIRECT_PREFIX`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            redirect_prefix: DEFAULT_REDIRECT_PREFIX.to_owned(),
        }
    }

    /// Link cards to a different redirect prefix.
    #[must_use]
    pub fn with_redirect_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.redirect_prefix = prefix.into();
        self
    }

    /// Expand every shortcode in `content`.
    #[must_use]
    pub fn expand(&self, content: &str, products: &HashMap<String, ProductView>) -> String {
        PRODUCT_SHORTCODE
            .replace_all(content, |caps: &Captures<'_>| {
                let slug = &caps[1];
                match products.get(slug) {
                    Some(product) => render_product_card(product, &self.redirect_prefix),
                    None => render_product_placeholder(slug),
                }
            })
            .into_owned()
    }
}

impl Default for ShortcodeExpander {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Platform;
    use pretty_assertions::assert_eq;

    fn product(slug: &str, name: &str, platform: Platform) -> ProductView {
        ProductView {
            id: format!("id-{slug}"),
            name: name.to_owned(),
            slug: slug.to_owned(),
            price: Some(100.0),
            main_image_url: None,
            platform,
            affiliate_redirect_slug: slug.to_owned(),
            short_description: None,
        }
    }

    fn catalog(products: &[ProductView]) -> HashMap<String, ProductView> {
        products
            .iter()
            .map(|p| (p.slug.clone(), p.clone()))
            .collect()
    }

    #[test]
    fn test_replace_found_product() {
        let products = catalog(&[product("vader", "Darth Vader", Platform::Amazon)]);
        let result = ShortcodeExpander::new().expand("Confira [product:vader]", &products);

        assert!(!result.contains("[product:vader]"));
        assert!(result.contains("Darth Vader"));
        assert!(result.starts_with(r#"Confira <div class="product-embed">"#));
    }

    #[test]
    fn test_replace_not_found_product() {
        let result = ShortcodeExpander::new().expand("[product:inexistente]", &HashMap::new());

        assert!(result.contains("product-embed-not-found"));
        assert!(result.contains("inexistente"));
        assert!(!result.contains("[product:"));
    }

    #[test]
    fn test_replace_multiple_products_in_order() {
        let products = catalog(&[
            product("a", "Alpha", Platform::Amazon),
            product("b", "Beta", Platform::Shopee),
        ]);
        let result = ShortcodeExpander::new().expand("[product:b] e [product:a]", &products);

        let beta = result.find("Beta").unwrap();
        let alpha = result.find("Alpha").unwrap();
        assert!(beta < alpha);
        assert!(result.contains("platform-shopee"));
    }

    #[test]
    fn test_repeated_shortcode_expands_each_occurrence() {
        let products = catalog(&[product("abc", "Abc", Platform::Amazon)]);
        let result = ShortcodeExpander::new().expand("[product:abc]\n\n[product:abc]", &products);

        assert_eq!(result.matches(r#"<div class="product-embed">"#).count(), 2);
    }

    #[test]
    fn test_mixed_found_and_missing() {
        let products = catalog(&[product("abc", "Abc", Platform::Amazon)]);
        let result =
            ShortcodeExpander::new().expand("[product:abc] [product:missing]", &products);

        assert_eq!(result.matches(r#"<div class="product-embed">"#).count(), 1);
        assert_eq!(result.matches("product-embed-not-found").count(), 1);
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(ShortcodeExpander::new().expand("", &HashMap::new()), "");
    }

    #[test]
    fn test_text_and_html_pass_through() {
        let content = "<em>keep</em> [product:Bad] [produto:x] plain";
        assert_eq!(
            ShortcodeExpander::new().expand(content, &HashMap::new()),
            content
        );
    }

    #[test]
    fn test_custom_redirect_prefix() {
        let products = catalog(&[product("abc", "Abc", Platform::Amazon)]);
        let result = ShortcodeExpander::new()
            .with_redirect_prefix("/r/")
            .expand("[product:abc]", &products);

        assert!(result.contains(r#"href="/r/abc""#));
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let products = catalog(&[
            product("a", "Alpha", Platform::Amazon),
            product("b", "Beta", Platform::MercadoLivre),
        ]);
        let expander = ShortcodeExpander::new();
        let content = "x [product:a] y [product:b] z [product:c]";

        assert_eq!(
            expander.expand(content, &products),
            expander.expand(content, &products.clone())
        );
    }
}
