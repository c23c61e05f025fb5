use async_trait::async_trait;
use std::io::Write as _;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{EngineInfo, RenderEngine};
use crate::config::RenderConfig;
use crate::error::{Error, Result};

/// Renders through the WeasyPrint command line.
///
/// Runs `<command> [args...] [--base-url URL] --stylesheet <file> - -`,
/// feeding the HTML on stdin and collecting the PDF from stdout. The child is
/// killed if the render future is dropped (e.g. on timeout).
pub struct WeasyPrintEngine {
    /// Executable name or path
    pub command: String,
    /// Extra arguments placed before the generated ones
    pub args: Vec<String>,
    /// Base URL for relative links in the HTML
    pub base_url: Option<String>,
}

impl WeasyPrintEngine {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            base_url: None,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            base_url: config.base_url.clone(),
        }
    }

    /// Write the stylesheet where the engine can read it.
    ///
    /// The file is removed when the returned handle is dropped.
    fn stylesheet_file(stylesheet: &str) -> Result<tempfile::NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("arabic-pdf-")
            .suffix(".css")
            .tempfile()?;
        file.write_all(stylesheet.as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

#[async_trait]
impl RenderEngine for WeasyPrintEngine {
    fn info(&self) -> EngineInfo {
        EngineInfo { name: "WeasyPrint" }
    }

    async fn render(&self, html: &str, stylesheet: &str) -> Result<Vec<u8>> {
        let css = stylesheet.to_string();
        let css_file = tokio::task::spawn_blocking(move || Self::stylesheet_file(&css))
            .await
            .map_err(|e| Error::RenderFailure(format!("stylesheet task failed: {e}")))??;

        let mut command = Command::new(&self.command);
        command.args(&self.args);
        if let Some(ref base_url) = self.base_url {
            command.arg("--base-url").arg(base_url);
        }
        command
            .arg("--stylesheet")
            .arg(css_file.path())
            .arg("-")
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Spawning {}", self.command);
        let mut child = command.spawn().map_err(|e| {
            Error::RenderFailure(format!("failed to start '{}': {e}", self.command))
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::RenderFailure("engine stdin unavailable".to_string()))?;

        // Feed stdin concurrently so a full stdout pipe cannot deadlock us
        let input = html.as_bytes().to_vec();
        let writer = tokio::spawn(async move {
            let written = stdin.write_all(&input).await;
            drop(stdin);
            written
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| Error::RenderFailure(format!("engine did not finish: {e}")))?;

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Failed to write HTML to engine: {}", e),
            Err(e) => warn!("Engine input task failed: {}", e),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            return Err(Error::RenderFailure(if message.is_empty() {
                format!("engine exited with {}", output.status)
            } else {
                message.to_string()
            }));
        }

        debug!("{} produced {} bytes", self.command, output.stdout.len());
        Ok(output.stdout)
    }
}
