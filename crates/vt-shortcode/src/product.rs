//! Product projection used for rendering cards.

use std::fmt;
use std::str::FromStr;

/// Affiliate platform a product is sold on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Amazon,
    MercadoLivre,
    Shopee,
}

impl Platform {
    /// Stored value, also used in the `platform-<value>` CSS class.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amazon => "amazon",
            Self::MercadoLivre => "mercadolivre",
            Self::Shopee => "shopee",
        }
    }

    /// Human-readable badge label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Amazon => "Amazon",
            Self::MercadoLivre => "Mercado Livre",
            Self::Shopee => "Shopee",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored platform value is not recognized.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown platform: {0}")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amazon" => Ok(Self::Amazon),
            "mercadolivre" => Ok(Self::MercadoLivre),
            "shopee" => Ok(Self::Shopee),
            other => Err(UnknownPlatform(other.to_owned())),
        }
    }
}

/// Rendering-relevant projection of a product record.
///
/// Built fresh for each render and never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductView {
    /// Product identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL slug, also the shortcode identifier.
    pub slug: String,
    /// Current price in BRL, if known.
    pub price: Option<f64>,
    /// Main image URL.
    pub main_image_url: Option<String>,
    /// Platform the affiliate link points to.
    pub platform: Platform,
    /// Slug of the `/goto/` redirect that records the click.
    pub affiliate_redirect_slug: String,
    /// Short description for cards.
    pub short_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_str() {
        assert_eq!("amazon".parse(), Ok(Platform::Amazon));
        assert_eq!("mercadolivre".parse(), Ok(Platform::MercadoLivre));
        assert_eq!("shopee".parse(), Ok(Platform::Shopee));
    }

    #[test]
    fn test_platform_from_str_unknown() {
        let err = "ebay".parse::<Platform>().unwrap_err();
        assert_eq!(err, UnknownPlatform("ebay".to_owned()));
        assert_eq!(err.to_string(), "Unknown platform: ebay");
    }

    #[test]
    fn test_platform_labels() {
        assert_eq!(Platform::MercadoLivre.label(), "Mercado Livre");
        assert_eq!(Platform::MercadoLivre.to_string(), "mercadolivre");
    }
}
