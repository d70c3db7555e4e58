//! `vt render` command implementation.

use std::path::PathBuf;

use clap::Args;
use vt_catalog::{ProductResolver, SqliteCatalog, SqliteOptions};
use vt_config::{CliSettings, Config, ContentConfig};
use vt_content::{ContentPipeline, RenderError};
use vt_markdown::{MarkdownRenderer, looks_like_markdown};
use vt_shortcode::ShortcodeExpander;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover vitrine.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog database URL (overrides config).
    #[arg(long, env = "VITRINE_DATABASE_URL")]
    database_url: Option<String>,

    /// Emit unsanitized HTML. Only for trusted input.
    #[arg(long)]
    no_sanitize: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// Writes the rendered HTML to stdout and lists unresolved product
    /// slugs on stderr.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, configuration fails,
    /// or the catalog lookup fails.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            database_url: self.database_url,
            sanitize: self.no_sanitize.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let content = std::fs::read_to_string(&self.file)?;
        if !content.is_empty() && !looks_like_markdown(&content) {
            output.warning(&format!(
                "{} does not look like Markdown, rendering anyway",
                self.file.display()
            ));
        }

        let options = SqliteOptions::new(config.database.url.clone())
            .with_max_connections(config.database.max_connections)
            .with_acquire_timeout(config.database.acquire_timeout());
        let catalog = SqliteCatalog::connect(&options).await?;
        let pipeline = build_pipeline(catalog, &config.content)?;

        let rendered = pipeline.render(&content).await;
        pipeline.resolver().close().await;
        let rendered = rendered?;

        for slug in &rendered.unresolved {
            output.warning(&format!("Product not found: {slug}"));
        }

        Output::document(&rendered.html)?;
        Ok(())
    }
}

/// Build a content pipeline from the `[content]` config section.
fn build_pipeline<R: ProductResolver>(
    resolver: R,
    content: &ContentConfig,
) -> Result<ContentPipeline<R>, RenderError> {
    let renderer = MarkdownRenderer::new()
        .with_heading_offset(content.heading_offset)
        .with_sanitize(content.sanitize);
    let expander = ShortcodeExpander::new().with_redirect_prefix(content.redirect_prefix.clone());
    ContentPipeline::new(resolver, renderer, expander)
}
