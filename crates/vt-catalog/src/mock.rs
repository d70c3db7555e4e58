//! Mock catalog implementation for testing.
//!
//! Provides [`MockCatalog`] for unit testing without a database.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use vt_shortcode::ProductView;

use crate::catalog::{Post, PostSource, PostStatus, ProductResolver};
use crate::error::{CatalogError, CatalogErrorKind, ErrorStatus};

const BACKEND: &str = "Mock";

/// Mock catalog for testing.
///
/// Stores active products and posts in memory and records every resolve
/// call so tests can assert on the number of lookups.
///
/// # Example
///
/// ```ignore
/// use vt_catalog::{MockCatalog, ProductResolver};
///
/// let catalog = MockCatalog::new().with_product(product);
/// let found = catalog.resolve(&["ps5-slim".to_owned()]).await?;
/// assert_eq!(catalog.lookups().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockCatalog {
    products: RwLock<HashMap<String, ProductView>>,
    posts: RwLock<HashMap<String, Post>>,
    lookups: RwLock<Vec<Vec<String>>>,
    failing: AtomicBool,
}

impl MockCatalog {
    /// Create a new empty mock catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an active product, keyed by its slug.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_product(self, product: ProductView) -> Self {
        self.products
            .write()
            .unwrap()
            .insert(product.slug.clone(), product);
        self
    }

    /// Add a post, keyed by its slug.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_post(self, post: Post) -> Self {
        self.posts.write().unwrap().insert(post.slug.clone(), post);
        self
    }

    /// Make every lookup fail as if the database were unreachable.
    #[must_use]
    pub fn failing(self) -> Self {
        self.set_failing(true);
        self
    }

    /// Toggle failure mode after construction.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Slug sets passed to [`ProductResolver::resolve`], in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn lookups(&self) -> Vec<Vec<String>> {
        self.lookups.read().unwrap().clone()
    }

    fn check_failing(&self) -> Result<(), CatalogError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::new(CatalogErrorKind::Unavailable)
                .with_status(ErrorStatus::Persistent)
                .with_backend(BACKEND));
        }
        Ok(())
    }
}

impl ProductResolver for MockCatalog {
    async fn resolve(&self, slugs: &[String]) -> Result<HashMap<String, ProductView>, CatalogError> {
        self.lookups.write().unwrap().push(slugs.to_vec());
        self.check_failing()?;

        let products = self.products.read().unwrap();
        Ok(slugs
            .iter()
            .filter_map(|slug| products.get(slug).map(|p| (slug.clone(), p.clone())))
            .collect())
    }
}

impl PostSource for MockCatalog {
    async fn published_post(&self, slug: &str) -> Result<Option<Post>, CatalogError> {
        self.check_failing()?;

        Ok(self
            .posts
            .read()
            .unwrap()
            .get(slug)
            .filter(|post| post.status == PostStatus::Published)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vt_shortcode::Platform;

    fn product(slug: &str) -> ProductView {
        ProductView {
            id: format!("id-{slug}"),
            name: slug.to_uppercase(),
            slug: slug.to_owned(),
            price: None,
            main_image_url: None,
            platform: Platform::Shopee,
            affiliate_redirect_slug: slug.to_owned(),
            short_description: None,
        }
    }

    fn post(slug: &str, status: PostStatus) -> Post {
        Post {
            slug: slug.to_owned(),
            title: slug.to_owned(),
            content: Some(format!("[product:{slug}]")),
            status,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_resolve_returns_known_products() {
        let catalog = MockCatalog::new().with_product(product("a"));

        let found = catalog
            .resolve(&["a".to_owned(), "b".to_owned()])
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found["a"], product("a"));
    }

    #[tokio::test]
    async fn test_resolve_records_lookups() {
        let catalog = MockCatalog::new();

        catalog.resolve(&["x".to_owned()]).await.unwrap();
        catalog.resolve(&[]).await.unwrap();

        assert_eq!(catalog.lookups(), vec![vec!["x".to_owned()], vec![]]);
    }

    #[tokio::test]
    async fn test_failing_catalog() {
        let catalog = MockCatalog::new().with_product(product("a")).failing();

        let err = catalog.resolve(&["a".to_owned()]).await.unwrap_err();

        assert_eq!(err.kind, CatalogErrorKind::Unavailable);
        assert_eq!(err.backend, Some("Mock"));
        assert_eq!(catalog.lookups().len(), 1);

        catalog.set_failing(false);
        assert!(catalog.resolve(&["a".to_owned()]).await.is_ok());
    }

    #[tokio::test]
    async fn test_published_post_filters_drafts() {
        let catalog = MockCatalog::new()
            .with_post(post("live", PostStatus::Published))
            .with_post(post("wip", PostStatus::Draft));

        assert!(catalog.published_post("live").await.unwrap().is_some());
        assert!(catalog.published_post("wip").await.unwrap().is_none());
        assert!(catalog.published_post("nope").await.unwrap().is_none());
    }
}
