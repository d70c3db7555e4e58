//! Lookup traits and post records.

use std::collections::HashMap;
use std::future::Future;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use vt_shortcode::ProductView;

use crate::error::CatalogError;

/// Resolves product slugs to rendering views.
///
/// Implementations perform read-only lookups. Slugs without an active
/// product are left out of the returned map; that is not an error.
pub trait ProductResolver: Send + Sync {
    /// Resolve a set of distinct slugs.
    fn resolve(
        &self,
        slugs: &[String],
    ) -> impl Future<Output = Result<HashMap<String, ProductView>, CatalogError>> + Send;
}

/// Fetches posts for display.
pub trait PostSource: Send + Sync {
    /// Fetch a published post by slug.
    ///
    /// Returns `Ok(None)` for unknown slugs and for drafts.
    fn published_post(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<Post>, CatalogError>> + Send;
}

/// Publication state of a post.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    /// Stored value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(format!("Unknown post status: {other}")),
        }
    }
}

/// A blog post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    /// URL slug.
    pub slug: String,
    /// Post title.
    pub title: String,
    /// Markdown body with shortcodes. May be absent for empty drafts.
    pub content: Option<String>,
    /// Publication state.
    pub status: PostStatus,
    /// Last edit time, if recorded.
    pub updated_at: Option<DateTime<Utc>>,
}
