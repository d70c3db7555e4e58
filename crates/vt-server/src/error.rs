//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vt_catalog::CatalogError;
use vt_content::RenderError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No published post with the given slug.
    #[error("Post not found: {0}")]
    PostNotFound(String),

    /// Post or product lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Content rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

fn catalog_status(err: &CatalogError) -> StatusCode {
    if err.is_retryable() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::PostNotFound(slug) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Post not found", "slug": slug}),
            ),
            Self::Catalog(e) | Self::Render(RenderError::Catalog(e)) => {
                tracing::error!(error = %e, "Catalog lookup failed");
                (catalog_status(e), json!({"error": e.to_string()}))
            }
            Self::Render(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": e.to_string()}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
