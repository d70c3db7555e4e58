//! HTML fragments for product cards.
//!
//! Fragments are emitted on a single line starting with `<div`, so a
//! shortcode that sits alone on its line becomes a Markdown HTML block and
//! is not wrapped in a paragraph.

use std::fmt::Write;

use vt_markdown::escape_html;

use crate::product::ProductView;

/// Tags and attributes emitted by [`render_product_card`] and
/// [`render_product_placeholder`].
///
/// A sanitizer applied after expansion must permit every pair, otherwise
/// cards lose their links, images or styling.
pub const CARD_VOCABULARY: &[(&str, &[&str])] = &[
    ("div", &["class"]),
    ("span", &["class"]),
    ("img", &["src", "alt", "loading"]),
    ("a", &["class", "href", "target", "rel"]),
];

const LINK_REL: &str = "nofollow sponsored noopener";

/// Format a price in Brazilian reais: `R$ 2.499,00`.
///
/// # Examples
///
/// ```
/// use vt_shortcode::format_brl;
///
/// assert_eq!(format_brl(2499.0), "R$ 2.499,00");
/// assert_eq!(format_brl(149.9), "R$ 149,90");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_brl(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("R$ {sign}{grouped},{:02}", cents % 100)
}

/// Render the card for a resolved product.
///
/// The call-to-action links to `redirect_prefix` followed by the product's
/// redirect slug, so clicks go through the tracking redirect.
#[must_use]
pub fn render_product_card(product: &ProductView, redirect_prefix: &str) -> String {
    let name = escape_html(&product.name);
    let href = escape_html(&format!(
        "{redirect_prefix}{}",
        product.affiliate_redirect_slug
    ));

    let mut html = String::with_capacity(512);
    html.push_str(r#"<div class="product-embed">"#);

    match &product.main_image_url {
        Some(url) => write!(
            html,
            r#"<div class="product-embed-image"><img src="{}" alt="{name}" loading="lazy"></div>"#,
            escape_html(url)
        )
        .unwrap(),
        None => html.push_str(
            r#"<div class="product-embed-image product-embed-no-image"><span>Sem imagem</span></div>"#,
        ),
    }

    html.push_str(r#"<div class="product-embed-body">"#);
    write!(
        html,
        r#"<span class="product-embed-platform platform-{}">{}</span>"#,
        product.platform.as_str(),
        product.platform.label()
    )
    .unwrap();
    write!(html, r#"<span class="product-embed-name">{name}</span>"#).unwrap();
    if let Some(description) = &product.short_description {
        write!(
            html,
            r#"<span class="product-embed-description">{}</span>"#,
            escape_html(description)
        )
        .unwrap();
    }
    if let Some(price) = product.price {
        write!(
            html,
            r#"<span class="product-embed-price">{}</span>"#,
            format_brl(price)
        )
        .unwrap();
    }
    write!(
        html,
        r#"<a class="product-embed-cta" href="{href}" target="_blank" rel="{LINK_REL}">Ver Oferta</a>"#
    )
    .unwrap();
    html.push_str("</div></div>");

    html
}

/// Render the placeholder for a slug that did not resolve to a product.
#[must_use]
pub fn render_product_placeholder(slug: &str) -> String {
    format!(
        r#"<div class="product-embed product-embed-not-found"><span class="product-embed-name">Produto nao encontrado: {}</span></div>"#,
        escape_html(slug)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Platform;
    use pretty_assertions::assert_eq;

    fn sample_product() -> ProductView {
        ProductView {
            id: "b7e1".to_owned(),
            name: "Funko Pop Darth Vader".to_owned(),
            slug: "funko-vader".to_owned(),
            price: Some(149.90),
            main_image_url: Some("/static/uploads/products/vader.jpg".to_owned()),
            platform: Platform::Amazon,
            affiliate_redirect_slug: "vader-amazon".to_owned(),
            short_description: Some("Boneco colecionavel".to_owned()),
        }
    }

    /// Collect `(tag, attribute)` pairs appearing in a fragment.
    fn used_vocabulary(html: &str) -> Vec<(String, String)> {
        let tag_re = regex::Regex::new(r"<([a-z]+)((?:\s+[a-z-]+=\x22[^\x22]*\x22)*)\s*>").unwrap();
        let attr_re = regex::Regex::new(r"([a-z-]+)=\x22").unwrap();
        let mut pairs = Vec::new();
        for caps in tag_re.captures_iter(html) {
            let tag = caps[1].to_owned();
            for attr in attr_re.captures_iter(&caps[2]) {
                pairs.push((tag.clone(), attr[1].to_owned()));
            }
            pairs.push((tag, String::new()));
        }
        pairs
    }

    fn in_vocabulary(tag: &str, attr: &str) -> bool {
        CARD_VOCABULARY
            .iter()
            .any(|(t, attrs)| *t == tag && (attr.is_empty() || attrs.contains(&attr)))
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(9.5), "R$ 9,50");
        assert_eq!(format_brl(999.99), "R$ 999,99");
        assert_eq!(format_brl(1000.0), "R$ 1.000,00");
        assert_eq!(format_brl(2499.0), "R$ 2.499,00");
        assert_eq!(format_brl(1_234_567.891), "R$ 1.234.567,89");
    }

    #[test]
    fn test_format_brl_rounds_to_cents() {
        assert_eq!(format_brl(19.999), "R$ 20,00");
    }

    #[test]
    fn test_card_with_image() {
        let html = render_product_card(&sample_product(), "/goto/");
        assert!(html.starts_with(r#"<div class="product-embed">"#));
        assert!(html.contains("Funko Pop Darth Vader"));
        assert!(html.contains(r#"src="/static/uploads/products/vader.jpg""#));
    }

    #[test]
    fn test_card_without_image() {
        let product = ProductView {
            main_image_url: None,
            ..sample_product()
        };
        let html = render_product_card(&product, "/goto/");
        assert!(html.contains("Sem imagem"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_card_with_price() {
        let html = render_product_card(&sample_product(), "/goto/");
        assert!(html.contains("R$ 149,90"));
    }

    #[test]
    fn test_card_without_price() {
        let product = ProductView {
            price: None,
            ..sample_product()
        };
        let html = render_product_card(&product, "/goto/");
        assert!(!html.contains("R$"));
        assert!(!html.contains("product-embed-price"));
    }

    #[test]
    fn test_card_platform_badge() {
        let html = render_product_card(&sample_product(), "/goto/");
        assert!(html.contains("platform-amazon"));
        assert!(html.contains(">Amazon<"));
    }

    #[test]
    fn test_card_cta_link() {
        let html = render_product_card(&sample_product(), "/goto/");
        assert!(html.contains("Ver Oferta"));
        assert!(html.contains(r#"href="/goto/vader-amazon""#));
        assert!(html.contains(r#"rel="nofollow sponsored noopener""#));
    }

    #[test]
    fn test_card_custom_redirect_prefix() {
        let html = render_product_card(&sample_product(), "https://loja.example/r/");
        assert!(html.contains(r#"href="https://loja.example/r/vader-amazon""#));
    }

    #[test]
    fn test_card_escapes_fields() {
        let product = ProductView {
            name: "<b>Evil</b> \"quote\"".to_owned(),
            short_description: Some("<script>x</script>".to_owned()),
            ..sample_product()
        };
        let html = render_product_card(&product, "/goto/");
        assert!(html.contains("&lt;b&gt;Evil&lt;/b&gt; &quot;quote&quot;"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_card_is_single_line() {
        let html = render_product_card(&sample_product(), "/goto/");
        assert!(!html.contains('\n'));
    }

    #[test]
    fn test_placeholder() {
        let html = render_product_placeholder("produto-inexistente");
        assert_eq!(
            html,
            r#"<div class="product-embed product-embed-not-found"><span class="product-embed-name">Produto nao encontrado: produto-inexistente</span></div>"#
        );
    }

    #[test]
    fn test_card_uses_only_declared_vocabulary() {
        let product = ProductView {
            main_image_url: None,
            ..sample_product()
        };
        for html in [
            render_product_card(&sample_product(), "/goto/"),
            render_product_card(&product, "/goto/"),
            render_product_placeholder("x"),
        ] {
            for (tag, attr) in used_vocabulary(&html) {
                assert!(
                    in_vocabulary(&tag, &attr),
                    "<{tag} {attr}> missing from CARD_VOCABULARY"
                );
            }
        }
    }
}
