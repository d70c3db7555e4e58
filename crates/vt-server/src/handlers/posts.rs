//! Posts API endpoint.
//!
//! Renders a published post and returns its HTML content and table of
//! contents as JSON.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::Serialize;
use vt_catalog::PostSource;
use vt_markdown::TocEntry;

use crate::error::ServerError;
use crate::state::{AppState, Catalog};

/// Response for GET /api/posts/{slug}.
#[derive(Serialize)]
struct PostResponse {
    /// Post slug.
    slug: String,
    /// Post title.
    title: String,
    /// Rendered HTML content.
    content: String,
    /// Table of contents entries.
    toc: Vec<TocEntry>,
}

/// Handle GET /api/posts/{slug}.
pub(crate) async fn get_post<C: Catalog>(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState<C>>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let post = state
        .catalog()
        .published_post(&slug)
        .await?
        .ok_or_else(|| ServerError::PostNotFound(slug.clone()))?;

    let rendered = state
        .pipeline
        .render(post.content.as_deref().unwrap_or_default())
        .await?;

    let etag = compute_etag(&state.version, &post.title, &rendered.html);

    // Check If-None-Match header for conditional request
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let response = PostResponse {
        slug: post.slug,
        title: post.title,
        content: rendered.html,
        toc: rendered.toc,
    };

    let mut response = (
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "public, max-age=60".to_owned()),
        ],
        Json(response),
    )
        .into_response();

    if let Some(updated_at) = post.updated_at
        && let Ok(value) = HeaderValue::from_str(&http_date(updated_at))
    {
        response.headers_mut().insert(header::LAST_MODIFIED, value);
    }

    Ok(response)
}

/// Format a timestamp as an HTTP date.
fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Compute `ETag` from version, title and rendered content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars). Product data is part
/// of the rendered content, so price or availability changes yield a new tag.
fn compute_etag(version: &str, title: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{title}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
