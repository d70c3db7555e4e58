//! Rendering errors.

use vt_catalog::CatalogError;

/// Error building or running a [`ContentPipeline`](crate::ContentPipeline).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The sanitizer would strip markup that product cards depend on.
    #[error("Sanitizer policy does not permit <{tag} {attribute}> used by product cards")]
    PolicyRejectsCard {
        tag: &'static str,
        attribute: &'static str,
    },
    /// Product lookup failed.
    #[error("Product lookup failed: {0}")]
    Catalog(#[from] CatalogError),
}
