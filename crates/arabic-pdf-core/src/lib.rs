//! Arabic PDF Core Library
//!
//! This library provides the core functionality for rendering HTML to PDF
//! with Arabic-script fonts:
//! - Font inspection (Arabic coverage, family name)
//! - Font catalog scanning with an optional cache layer
//! - Font selection from explicit requests, HTML declarations or fallbacks
//! - Right-to-left stylesheet generation and the external render engine

pub mod config;
pub mod error;
pub mod fonts;
pub mod render;
pub mod request;
pub mod util;

pub use config::{AppConfig, FontConfig, PageConfig, RenderConfig, ServerConfig};
pub use error::{Error, Result};
pub use fonts::{
    CatalogCache, FontCatalog, FontChoice, FontEntry, FontSelector, ScanOutcome, SkipReason,
};
pub use render::{EngineInfo, RenderEngine, Renderer, WeasyPrintEngine, build_stylesheet};
pub use request::{RenderRequest, SelectionPolicy};

use std::sync::Arc;
use tracing::{debug, info, warn};

/// High-level converter that combines all components
pub struct PdfConverter {
    catalog: CatalogCache,
    selector: FontSelector,
    renderer: Renderer,
    page: PageConfig,
}

/// Result of converting one document
#[derive(Debug)]
pub struct ConvertedPdf {
    /// Rendered PDF bytes
    pub bytes: Vec<u8>,
    /// Font embedded through `@font-face`, if any
    pub font: Option<FontChoice>,
}

impl PdfConverter {
    /// Create a converter rendering through WeasyPrint
    pub fn new(config: &AppConfig) -> Self {
        Self::with_engine(config, Arc::new(WeasyPrintEngine::from_config(&config.render)))
    }

    /// Create with a custom rendering engine
    pub fn with_engine(config: &AppConfig, engine: Arc<dyn RenderEngine>) -> Self {
        let catalog = CatalogCache::new(
            FontCatalog::new(config.fonts.font_dir()),
            config.fonts.cache_ttl_seconds,
        );

        Self {
            catalog,
            selector: FontSelector::new(config.fonts.fallback_families.clone()),
            renderer: Renderer::new(engine, config.render.timeout()),
            page: config.page.clone(),
        }
    }

    /// Arabic-capable fonts in the configured directory
    pub async fn list_fonts(&self) -> Arc<[FontEntry]> {
        self.catalog.entries().await
    }

    /// Forget cached catalog results
    pub fn refresh_fonts(&self) {
        self.catalog.invalidate();
    }

    pub const fn catalog(&self) -> &FontCatalog {
        self.catalog.catalog()
    }

    pub const fn selector(&self) -> &FontSelector {
        &self.selector
    }

    /// Name of the rendering engine in use
    pub fn engine_name(&self) -> &'static str {
        self.renderer.engine_name()
    }

    /// Pick the font for `request` without rendering
    pub async fn resolve_font(
        &self,
        request: &RenderRequest,
        policy: SelectionPolicy,
    ) -> Result<Option<FontChoice>> {
        let fonts = self.catalog.entries().await;
        self.selector.resolve(request, policy, &fonts)
    }

    /// Render a document to PDF
    pub async fn convert(
        &self,
        request: &RenderRequest,
        policy: SelectionPolicy,
    ) -> Result<ConvertedPdf> {
        if !request.has_html() {
            return Err(Error::MissingHtml);
        }

        let choice = self.resolve_font(request, policy).await?;
        let (font, font_uri) = match choice {
            Some(choice) => match self.locate(&choice, policy).await? {
                Some(uri) => (Some(choice), Some(uri)),
                None => (None, None),
            },
            None => (None, None),
        };

        info!(
            "Converting {} bytes of HTML with {} ({})",
            request.html().len(),
            self.renderer.engine_name(),
            font.as_ref().map_or("default font", |f| f.family.as_str())
        );

        let stylesheet = build_stylesheet(
            &self.page,
            font.as_ref().map(|f| f.family.as_str()),
            font_uri.as_deref(),
        );
        let bytes = self.renderer.render(request.html(), &stylesheet).await?;

        Ok(ConvertedPdf { bytes, font })
    }

    /// `file://` URI of a chosen font.
    ///
    /// A file that vanished since the scan is an error on the strict path
    /// and silently dropped on the lenient one.
    async fn locate(&self, choice: &FontChoice, policy: SelectionPolicy) -> Result<Option<String>> {
        let path = self.catalog.catalog().font_path(&choice.filename);

        match tokio::fs::canonicalize(&path).await {
            Ok(resolved) => {
                debug!("Embedding {} from {}", choice.family, resolved.display());
                Ok(Some(util::file_uri(&resolved)))
            }
            Err(e) if policy == SelectionPolicy::Strict => {
                debug!("Font file {} unavailable: {}", path.display(), e);
                Err(Error::FontFileMissing(path))
            }
            Err(e) => {
                warn!("Font file {} unavailable, using engine defaults: {}", path.display(), e);
                Ok(None)
            }
        }
    }
}
