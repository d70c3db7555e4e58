//! SQLite catalog backend.
//!
//! Reads the `products` and `posts` tables owned by the main application.
//! Schema management happens elsewhere; this module only issues `SELECT`s.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};
use vt_shortcode::{Platform, ProductView};

use crate::catalog::{Post, PostSource, PostStatus, ProductResolver};
use crate::error::{CatalogError, CatalogErrorKind};

const BACKEND: &str = "Sqlite";

// `price` is NUMERIC, so SQLite stores whole amounts as INTEGER.
const PRODUCT_COLUMNS: &str = "SELECT id, name, slug, CAST(price AS REAL) AS price, main_image_url, platform, \
     affiliate_redirect_slug, short_description FROM products \
     WHERE availability != 'unavailable' AND slug IN (";

/// Connection settings for [`SqliteCatalog`].
#[derive(Clone, Debug)]
pub struct SqliteOptions {
    /// Database URL (`sqlite:` scheme).
    pub url: String,
    /// Pool size.
    pub max_connections: u32,
    /// How long to wait for a free connection.
    pub acquire_timeout: Duration,
}

impl SqliteOptions {
    /// Create options with default pool settings.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    /// Set pool size.
    #[must_use]
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Set connection acquire timeout.
    #[must_use]
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

/// Product and post lookups backed by a SQLite pool.
///
/// Only products whose `availability` is not `'unavailable'` resolve.
#[derive(Clone, Debug)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Wrap an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a read-only pool.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the URL is malformed or the database
    /// cannot be opened.
    pub async fn connect(options: &SqliteOptions) -> Result<Self, CatalogError> {
        let connect_options = SqliteConnectOptions::from_str(&options.url)
            .map_err(|e| CatalogError::from(e).with_backend(BACKEND))?
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.acquire_timeout)
            .connect_with(connect_options)
            .await
            .map_err(|e| CatalogError::from(e).with_backend(BACKEND))?;

        tracing::info!(
            url = %options.url,
            max_connections = options.max_connections,
            "Connected to catalog database"
        );

        Ok(Self::new(pool))
    }

    /// Underlying pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool, waiting for connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn product_from_row(row: &SqliteRow) -> Result<ProductView, CatalogError> {
    let slug: String = row.try_get("slug")?;
    let platform: String = row.try_get("platform")?;
    let platform = Platform::from_str(&platform).map_err(|e| {
        CatalogError::new(CatalogErrorKind::InvalidRecord)
            .with_slug(slug.clone())
            .with_source(e)
    })?;

    Ok(ProductView {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        main_image_url: row.try_get("main_image_url")?,
        platform,
        affiliate_redirect_slug: row.try_get("affiliate_redirect_slug")?,
        short_description: row.try_get("short_description")?,
        slug,
    })
}

fn post_from_row(row: &SqliteRow) -> Result<Post, CatalogError> {
    let status: String = row.try_get("status")?;
    let status = PostStatus::from_str(&status).map_err(|e| {
        CatalogError::new(CatalogErrorKind::InvalidRecord)
            .with_source(std::io::Error::other(e))
    })?;

    Ok(Post {
        slug: row.try_get("slug")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        status,
        updated_at: row.try_get("updated_at")?,
    })
}

impl ProductResolver for SqliteCatalog {
    async fn resolve(&self, slugs: &[String]) -> Result<HashMap<String, ProductView>, CatalogError> {
        if slugs.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new(PRODUCT_COLUMNS);
        {
            let mut separated = query.separated(", ");
            for slug in slugs {
                separated.push_bind(slug.clone());
            }
            separated.push_unseparated(")");
        }

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CatalogError::from(e).with_backend(BACKEND))?;

        let mut products = HashMap::with_capacity(rows.len());
        for row in &rows {
            let product = product_from_row(row).map_err(|e| e.with_backend(BACKEND))?;
            products.insert(product.slug.clone(), product);
        }

        tracing::debug!(
            requested = slugs.len(),
            resolved = products.len(),
            "Resolved product slugs"
        );

        Ok(products)
    }
}

impl PostSource for SqliteCatalog {
    async fn published_post(&self, slug: &str) -> Result<Option<Post>, CatalogError> {
        let row = sqlx::query(
            "SELECT slug, title, content, status, updated_at FROM posts \
             WHERE slug = ? AND status = 'published'",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CatalogError::from(e).with_backend(BACKEND).with_slug(slug))?;

        row.as_ref()
            .map(post_from_row)
            .transpose()
            .map_err(|e| e.with_backend(BACKEND).with_slug(slug))
    }
}
