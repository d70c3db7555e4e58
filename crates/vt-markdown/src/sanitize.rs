//! HTML allow-list sanitization.
//!
//! [`SanitizePolicy`] is a plain value: build it once, hand it to the
//! renderer, and it never changes behind the renderer's back.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use ammonia::{Builder, UrlRelative};

/// Tags allowed after Markdown conversion.
const DEFAULT_TAGS: &[&str] = &[
    // Structure
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "br", "hr", "div", "span",
    // Text
    "strong", "b", "em", "i", "u", "s", "del", "mark", "code", "pre", "kbd", "var", "sup", "sub",
    // Lists
    "ul", "ol", "li", "dl", "dt", "dd",
    // Links and media
    "a", "img",
    // Tables
    "table", "thead", "tbody", "tr", "th", "td",
    // Quotes
    "blockquote", "q", "cite",
    // Other
    "figure", "figcaption", "details", "summary",
];

/// Attributes allowed per tag.
const DEFAULT_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "title", "target", "rel", "class"]),
    (
        "img",
        &["src", "alt", "title", "width", "height", "loading", "class"],
    ),
    ("code", &["class"]),
    ("pre", &["class"]),
    ("div", &["class", "id"]),
    ("span", &["class", "id"]),
    ("sup", &["class", "id"]),
    ("th", &["colspan", "rowspan", "align"]),
    ("td", &["colspan", "rowspan", "align"]),
    ("table", &["class"]),
    ("h1", &["id"]),
    ("h2", &["id"]),
    ("h3", &["id"]),
    ("h4", &["id"]),
    ("h5", &["id"]),
    ("h6", &["id"]),
];

const DEFAULT_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Tags removed together with their content.
const DEFAULT_CLEAN_CONTENT_TAGS: &[&str] = &["script", "style"];

/// Immutable allow-list used to sanitize rendered HTML.
///
/// Anything outside the allow-list is removed: disallowed tags are stripped
/// (their text content is kept and escaped), disallowed attributes are
/// dropped, and `script`/`style` elements are removed with their content.
///
/// # Example
///
/// ```
/// use vt_markdown::SanitizePolicy;
///
/// let policy = SanitizePolicy::default().allow_attribute("div", "data-sku");
/// assert!(policy.permits_attribute("div", "data-sku"));
/// assert!(!policy.permits_tag("script"));
///
/// let html = policy.clean(r#"<p onclick="x()">Hi<script>alert(1)</script></p>"#);
/// assert_eq!(html, "<p>Hi</p>");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanitizePolicy {
    tags: BTreeSet<String>,
    attributes: BTreeMap<String, BTreeSet<String>>,
    url_schemes: BTreeSet<String>,
    clean_content_tags: BTreeSet<String>,
}

impl SanitizePolicy {
    /// Create a policy that allows nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tags: BTreeSet::new(),
            attributes: BTreeMap::new(),
            url_schemes: BTreeSet::new(),
            clean_content_tags: DEFAULT_CLEAN_CONTENT_TAGS
                .iter()
                .map(|&t| t.to_owned())
                .collect(),
        }
    }

    /// Allow a tag.
    #[must_use]
    pub fn allow_tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag.to_ascii_lowercase());
        self
    }

    /// Allow an attribute on a tag. The tag itself is allowed as well.
    #[must_use]
    pub fn allow_attribute(mut self, tag: &str, attribute: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        self.attributes
            .entry(tag.clone())
            .or_default()
            .insert(attribute.to_ascii_lowercase());
        self.tags.insert(tag);
        self
    }

    /// Allow a URL scheme in `href`/`src` attributes.
    #[must_use]
    pub fn allow_url_scheme(mut self, scheme: &str) -> Self {
        self.url_schemes.insert(scheme.to_ascii_lowercase());
        self
    }

    /// Check whether a tag survives sanitization.
    #[must_use]
    pub fn permits_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag.to_ascii_lowercase())
    }

    /// Check whether an attribute survives sanitization on the given tag.
    #[must_use]
    pub fn permits_attribute(&self, tag: &str, attribute: &str) -> bool {
        let tag = tag.to_ascii_lowercase();
        self.tags.contains(&tag)
            && self
                .attributes
                .get(&tag)
                .is_some_and(|attrs| attrs.contains(&attribute.to_ascii_lowercase()))
    }

    /// Sanitize an HTML fragment.
    #[must_use]
    pub fn clean(&self, html: &str) -> String {
        let tags: HashSet<&str> = self.tags.iter().map(String::as_str).collect();
        // ammonia rejects tags that are both allowed and content-cleaned.
        let clean_content: HashSet<&str> = self
            .clean_content_tags
            .iter()
            .map(String::as_str)
            .filter(|t| !tags.contains(t))
            .collect();
        let attributes: HashMap<&str, HashSet<&str>> = self
            .attributes
            .iter()
            .map(|(tag, attrs)| (tag.as_str(), attrs.iter().map(String::as_str).collect()))
            .collect();
        let schemes: HashSet<&str> = self.url_schemes.iter().map(String::as_str).collect();

        let mut builder = Builder::default();
        builder
            .tags(tags)
            .generic_attributes(HashSet::new())
            .clean_content_tags(clean_content)
            .tag_attributes(attributes)
            .url_schemes(schemes)
            .url_relative(UrlRelative::PassThrough)
            .link_rel(None)
            .strip_comments(true);
        builder.clean(html).to_string()
    }
}

impl Default for SanitizePolicy {
    /// The allow-list used for post content.
    fn default() -> Self {
        let mut policy = DEFAULT_TAGS
            .iter()
            .fold(Self::empty(), |policy, tag| policy.allow_tag(tag));
        for (tag, attrs) in DEFAULT_ATTRIBUTES {
            for attr in *attrs {
                policy = policy.allow_attribute(tag, attr);
            }
        }
        DEFAULT_URL_SCHEMES
            .iter()
            .fold(policy, |policy, scheme| policy.allow_url_scheme(scheme))
    }
}
