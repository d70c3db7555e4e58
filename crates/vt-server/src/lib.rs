//! HTTP server for Vitrine post content.
//!
//! This crate provides an axum HTTP server exposing the content pipeline:
//! - `GET /api/posts/{slug}`: rendered HTML and table of contents of a published post
//! - `POST /api/preview`: render unsaved content for the editor
//! - `GET /health`: liveness check
//!
//! # Quick Start
//!
//! ```ignore
//! use vt_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         port: 8000,
//!         version: "1.0.0".to_owned(),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Client ──HTTP──► axum router (vt-server)
//!                        │
//!                        ├─► posts handler ──► PostSource (SQLite)
//!                        │         │
//!                        │         └─► ContentPipeline ──► ProductResolver (SQLite)
//!                        │
//!                        └─► preview handler ──► ContentPipeline
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use vt_catalog::{SqliteCatalog, SqliteOptions};
use vt_content::ContentPipeline;
use vt_markdown::MarkdownRenderer;
use vt_shortcode::{DEFAULT_REDIRECT_PREFIX, ShortcodeExpander};

pub use error::ServerError;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Catalog database connection settings.
    pub database: SqliteOptions,
    /// Heading demotion applied to post content.
    pub heading_offset: u8,
    /// Sanitize rendered HTML.
    pub sanitize: bool,
    /// Prefix of product card call-to-action links.
    pub redirect_prefix: String,
    /// Application version (for cache invalidation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8000,
            database: SqliteOptions::new("sqlite:vitrine.db"),
            heading_offset: 1,
            sanitize: true,
            redirect_prefix: DEFAULT_REDIRECT_PREFIX.to_owned(),
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the database cannot be opened, the sanitizer policy
/// rejects product cards, or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = SqliteCatalog::connect(&config.database).await?;

    let renderer = MarkdownRenderer::new()
        .with_heading_offset(config.heading_offset)
        .with_sanitize(config.sanitize);
    let expander = ShortcodeExpander::new().with_redirect_prefix(config.redirect_prefix.clone());
    let pipeline = ContentPipeline::new(catalog, renderer, expander)?;

    if !config.sanitize {
        tracing::warn!("HTML sanitization is disabled");
    }

    let state = Arc::new(AppState {
        pipeline,
        version: config.version.clone(),
    });

    let app = app::create_router(Arc::clone(&state));

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.pipeline.resolver().close().await;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Vitrine config.
///
/// # Arguments
///
/// * `config` - Vitrine configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_vt_config(config: &vt_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        database: SqliteOptions::new(config.database.url.clone())
            .with_max_connections(config.database.max_connections)
            .with_acquire_timeout(config.database.acquire_timeout()),
        heading_offset: config.content.heading_offset,
        sanitize: config.content.sanitize,
        redirect_prefix: config.content.redirect_prefix.clone(),
        version,
    }
}
