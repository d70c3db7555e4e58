//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::{AppState, Catalog};

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router<C: Catalog>(state: Arc<AppState<C>>) -> Router {
    let api_routes = Router::new()
        .route("/api/posts/{slug}", get(handlers::posts::get_post::<C>))
        .route("/api/preview", post(handlers::preview::post_preview::<C>));

    let router = Router::new()
        .route("/health", get(handlers::health::get_health::<C>))
        .merge(api_routes);

    security::with_security_headers(router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tower::ServiceExt;
    use vt_catalog::{MockCatalog, Post, PostStatus};
    use vt_content::ContentPipeline;
    use vt_markdown::MarkdownRenderer;
    use vt_shortcode::{Platform, ProductView, ShortcodeExpander};

    fn ps5() -> ProductView {
        ProductView {
            id: "3f2a".to_owned(),
            name: "PS5 Slim".to_owned(),
            slug: "ps5-slim".to_owned(),
            price: Some(2499.0),
            main_image_url: None,
            platform: Platform::Amazon,
            affiliate_redirect_slug: "ps5-slim-amazon".to_owned(),
            short_description: None,
        }
    }

    fn post(slug: &str, content: Option<&str>, status: PostStatus) -> Post {
        Post {
            slug: slug.to_owned(),
            title: format!("Post {slug}"),
            content: content.map(str::to_owned),
            status,
            updated_at: Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()),
        }
    }

    fn router(catalog: MockCatalog) -> Router {
        let pipeline =
            ContentPipeline::new(catalog, MarkdownRenderer::new(), ShortcodeExpander::new())
                .unwrap();
        create_router(Arc::new(AppState {
            pipeline,
            version: "0.1.0-test".to_owned(),
        }))
    }

    fn default_catalog() -> MockCatalog {
        MockCatalog::new()
            .with_product(ps5())
            .with_post(post(
                "review",
                Some("# Review\n\nCheck [product:ps5-slim] out!\n\n[product:gone]"),
                PostStatus::Published,
            ))
            .with_post(post("draft", Some("WIP"), PostStatus::Draft))
            .with_post(post("empty", None, PostStatus::Published))
    }

    async fn get(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn preview_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/preview")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_published_post() {
        let response = get(router(default_catalog()), "/api/posts/review").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::ETAG));
        assert_eq!(
            response.headers()[header::LAST_MODIFIED],
            "Sat, 01 Mar 2025 12:00:00 GMT"
        );

        let json = json_body(response).await;
        assert_eq!(json["slug"], "review");
        assert_eq!(json["title"], "Post review");
        let content = json["content"].as_str().unwrap();
        assert!(content.contains("PS5 Slim"));
        assert!(content.contains("R$ 2.499,00"));
        assert!(content.contains("product-embed-not-found"));
        assert!(!content.contains("[product:"));
        assert_eq!(json["toc"][0]["level"], 2);
        assert_eq!(json["toc"][0]["title"], "Review");
        assert_eq!(json["toc"][0]["id"], "review");
    }

    #[tokio::test]
    async fn test_get_post_without_content() {
        let response = get(router(default_catalog()), "/api/posts/empty").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["content"], "");
        assert_eq!(json["toc"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_get_unknown_post() {
        let response = get(router(default_catalog()), "/api/posts/missing").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_body(response).await;
        assert_eq!(json["error"], "Post not found");
        assert_eq!(json["slug"], "missing");
    }

    #[tokio::test]
    async fn test_get_draft_post_is_not_found() {
        let response = get(router(default_catalog()), "/api/posts/draft").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_post_not_modified() {
        let app = router(default_catalog());
        let first = get(app.clone(), "/api/posts/review").await;
        let etag = first.headers()[header::ETAG].clone();

        let second = app
            .oneshot(
                Request::builder()
                    .uri("/api/posts/review")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_get_post_catalog_unavailable() {
        let response = get(router(default_catalog().failing()), "/api/posts/review").await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("Unavailable"));
    }

    #[tokio::test]
    async fn test_preview_renders_content() {
        let response = router(default_catalog())
            .oneshot(preview_request(
                r###"{"content": "## Setup\n\n[product:ps5-slim]\n\n[product:unknown-item]"}"###,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let content = json["content"].as_str().unwrap();
        assert!(content.contains(r#"<h3 id="setup">Setup</h3>"#));
        assert!(content.contains("PS5 Slim"));
        assert_eq!(json["toc"][0]["level"], 3);
        assert_eq!(json["unresolved"], serde_json::json!(["unknown-item"]));
    }

    #[tokio::test]
    async fn test_preview_strips_scripts() {
        let response = router(MockCatalog::new())
            .oneshot(preview_request(
                r#"{"content": "Hi <script>alert(1)</script>"}"#,
            ))
            .await
            .unwrap();

        let json = json_body(response).await;
        assert!(!json["content"].as_str().unwrap().contains("<script"));
    }

    #[tokio::test]
    async fn test_preview_rejects_invalid_json() {
        let response = router(MockCatalog::new())
            .oneshot(preview_request("not json"))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_health() {
        let response = get(router(MockCatalog::new()), "/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], "0.1.0-test");
    }

    #[tokio::test]
    async fn test_security_headers_on_every_response() {
        for uri in ["/health", "/api/posts/review", "/api/posts/missing"] {
            let response = get(router(default_catalog()), uri).await;

            for (name, value) in security::SECURITY_HEADERS {
                assert_eq!(response.headers()[*name], *value, "{name} on {uri}");
            }
        }
    }
}
