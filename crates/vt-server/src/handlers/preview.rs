//! Preview API endpoint.
//!
//! Renders unsaved post content so editors can check product cards before
//! publishing.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use vt_markdown::TocEntry;

use crate::error::ServerError;
use crate::state::{AppState, Catalog};

/// Request body for POST /api/preview.
#[derive(Deserialize)]
pub(crate) struct PreviewRequest {
    /// Raw post content.
    #[serde(default)]
    content: String,
}

/// Response for POST /api/preview.
#[derive(Serialize)]
pub(crate) struct PreviewResponse {
    /// Rendered HTML content.
    content: String,
    /// Table of contents entries.
    toc: Vec<TocEntry>,
    /// Referenced product slugs that did not resolve.
    unresolved: Vec<String>,
}

/// Handle POST /api/preview.
pub(crate) async fn post_preview<C: Catalog>(
    State(state): State<Arc<AppState<C>>>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, ServerError> {
    let rendered = state.pipeline.render(&request.content).await?;

    Ok(Json(PreviewResponse {
        content: rendered.html,
        toc: rendered.toc,
        unresolved: rendered.unresolved,
    }))
}
