//! Shortcode token grammar and extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// `[product:<slug>]` with `<slug>` = `[a-z0-9]+(-[a-z0-9]+)*`.
pub(crate) static PRODUCT_SHORTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[product:([a-z0-9]+(?:-[a-z0-9]+)*)\]").unwrap());

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

/// Extract the distinct product slugs referenced in `content`.
///
/// Slugs are returned in the order of their first occurrence. Malformed
/// tokens are ignored.
///
/// # Examples
///
/// ```
/// use vt_shortcode::extract_product_refs;
///
/// let refs = extract_product_refs("[product:b] [product:a] [product:b] [product:Bad]");
/// assert_eq!(refs, vec!["b".to_owned(), "a".to_owned()]);
/// ```
#[must_use]
pub fn extract_product_refs(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PRODUCT_SHORTCODE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|slug| seen.insert(*slug))
        .map(str::to_owned)
        .collect()
}

/// Build the shortcode token that references `slug`.
#[must_use]
pub fn product_shortcode(slug: &str) -> String {
    format!("[product:{slug}]")
}

/// Check whether `slug` can appear inside a shortcode.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG.is_match(slug)
}
