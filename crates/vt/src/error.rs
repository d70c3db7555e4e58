//! CLI error types.

use vt_catalog::CatalogError;
use vt_config::ConfigError;
use vt_content::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Server(String),
}
