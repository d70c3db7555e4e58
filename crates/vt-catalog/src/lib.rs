//! Product and post lookups for content rendering.
//!
//! This crate provides the read-only data access the content pipeline needs:
//!
//! - [`ProductResolver`]: map shortcode slugs to [`ProductView`]s
//! - [`PostSource`]: fetch published posts by slug
//!
//! Both are traits so rendering stays independent of the storage backend:
//!
//! - [`SqliteCatalog`]: `sqlx` SQLite implementation
//! - [`MockCatalog`]: in-memory implementation for tests (behind `mock` feature)
//!
//! # Example
//!
//! ```ignore
//! use vt_catalog::{ProductResolver, SqliteCatalog};
//!
//! let catalog = SqliteCatalog::connect(&options).await?;
//! let products = catalog.resolve(&["ps5-slim".to_owned()]).await?;
//! ```
//!
//! [`ProductView`]: vt_shortcode::ProductView

mod catalog;
mod error;
#[cfg(feature = "mock")]
mod mock;
mod sqlite;

pub use catalog::{Post, PostSource, PostStatus, ProductResolver};
pub use error::{CatalogError, CatalogErrorKind, ErrorStatus};
#[cfg(feature = "mock")]
pub use mock::MockCatalog;
pub use sqlite::{SqliteCatalog, SqliteOptions};
