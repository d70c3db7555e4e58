//! Application state.
//!
//! Shared state for all request handlers.

use vt_catalog::{PostSource, ProductResolver};
use vt_content::ContentPipeline;

/// Catalog backends the server can run on.
pub(crate) trait Catalog: ProductResolver + PostSource + 'static {}

impl<T: ProductResolver + PostSource + 'static> Catalog for T {}

/// Application state shared across all handlers.
pub(crate) struct AppState<C> {
    /// Content pipeline; its resolver doubles as the post source.
    pub(crate) pipeline: ContentPipeline<C>,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}

impl<C: Catalog> AppState<C> {
    /// Catalog used for post and product lookups.
    pub(crate) fn catalog(&self) -> &C {
        self.pipeline.resolver()
    }
}
