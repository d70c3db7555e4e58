//! Product shortcodes for post content.
//!
//! Editors reference products inside Markdown with `[product:<slug>]`. This
//! crate finds those references and swaps them for rendered HTML cards:
//!
//! - [`extract_product_refs`]: distinct slugs in first-occurrence order
//! - [`ShortcodeExpander`]: replaces every token with a card, or with a
//!   visible placeholder when the product could not be resolved
//! - [`ProductView`]: the fixed set of fields a card needs
//! - [`CARD_VOCABULARY`]: the tags and attributes cards are made of, so a
//!   sanitizer can be checked against them
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use vt_shortcode::{ShortcodeExpander, extract_product_refs};
//!
//! let text = "See [product:ps5-slim] and [product:ps5-slim]";
//! assert_eq!(extract_product_refs(text), vec!["ps5-slim".to_owned()]);
//!
//! let html = ShortcodeExpander::new().expand(text, &HashMap::new());
//! assert_eq!(html.matches("product-embed-not-found").count(), 2);
//! ```

mod card;
mod expand;
mod extract;
mod product;

pub use card::{CARD_VOCABULARY, format_brl, render_product_card, render_product_placeholder};
pub use expand::{DEFAULT_REDIRECT_PREFIX, ShortcodeExpander};
pub use extract::{extract_product_refs, is_valid_slug, product_shortcode};
pub use product::{Platform, ProductView, UnknownPlatform};
