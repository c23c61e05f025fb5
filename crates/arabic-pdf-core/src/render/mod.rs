mod stylesheet;
mod weasyprint;

pub use stylesheet::build_stylesheet;
pub use weasyprint::WeasyPrintEngine;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::{Error, Result};

/// Information about a rendering engine
#[derive(Debug, Clone)]
pub struct EngineInfo {
    /// Human-readable name
    pub name: &'static str,
}

/// External HTML layout engine: HTML plus a stylesheet in, PDF bytes out.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    /// Get information about this engine
    fn info(&self) -> EngineInfo;

    /// Get the engine name (convenience method)
    fn name(&self) -> &'static str {
        self.info().name
    }

    /// Render `html` with `stylesheet` applied after the document's own styles
    async fn render(&self, html: &str, stylesheet: &str) -> Result<Vec<u8>>;
}

/// Wraps an engine with a timeout and a single failure kind.
///
/// Whatever goes wrong inside the engine surfaces as
/// [`Error::RenderFailure`] with the engine's message.
#[derive(Clone)]
pub struct Renderer {
    engine: Arc<dyn RenderEngine>,
    timeout: Option<Duration>,
}

impl Renderer {
    pub fn new(engine: Arc<dyn RenderEngine>, timeout: Option<Duration>) -> Self {
        Self { engine, timeout }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    pub async fn render(&self, html: &str, stylesheet: &str) -> Result<Vec<u8>> {
        debug!(
            "Rendering {} bytes of HTML with {}",
            html.len(),
            self.engine.name()
        );

        let rendered = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.engine.render(html, stylesheet))
                .await
                .unwrap_or_else(|_| {
                    Err(Error::RenderFailure(format!(
                        "rendering timed out after {}s",
                        limit.as_secs_f32()
                    )))
                }),
            None => self.engine.render(html, stylesheet).await,
        };

        match rendered {
            Ok(bytes) if bytes.is_empty() => {
                error!("{} produced an empty document", self.engine.name());
                Err(Error::RenderFailure("engine produced no output".to_string()))
            }
            Ok(bytes) => Ok(bytes),
            Err(Error::RenderFailure(message)) => {
                error!("Rendering failed: {}", message);
                Err(Error::RenderFailure(message))
            }
            Err(other) => {
                error!("Rendering failed: {}", other);
                Err(Error::RenderFailure(other.to_string()))
            }
        }
    }
}
