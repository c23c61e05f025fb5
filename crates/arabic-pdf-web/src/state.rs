use arabic_pdf_core::{AppConfig, PdfConverter, RenderEngine};
use std::sync::Arc;

/// Global application state.
///
/// Nothing here is mutated per request; the converter rescans fonts on
/// demand (or through its own cache when a TTL is configured).
pub struct AppState {
    pub converter: PdfConverter,
    pub config: AppConfig,
}

impl AppState {
    /// State rendering through the configured WeasyPrint command
    pub fn new(config: AppConfig) -> Self {
        Self {
            converter: PdfConverter::new(&config),
            config,
        }
    }

    /// State with a custom rendering engine
    pub fn with_engine(config: AppConfig, engine: Arc<dyn RenderEngine>) -> Self {
        Self {
            converter: PdfConverter::with_engine(&config, engine),
            config,
        }
    }
}
