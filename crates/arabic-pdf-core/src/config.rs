use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Family names tried, in order, when neither the caller nor the HTML names
/// a font present in the catalog.
pub const DEFAULT_FALLBACK_FAMILIES: &[&str] = &[
    "Traditional Arabic",
    "Arial",
    "Tahoma",
    "Times New Roman",
    "DejaVu Sans",
    "DejaVu Serif",
];

/// Default footer text; `{page}` and `{pages}` become CSS page counters.
pub const DEFAULT_FOOTER: &str = "صفحة {page} من {pages}";

/// Font discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Directory scanned for fonts (defaults to the platform font directory)
    pub dir: Option<PathBuf>,

    /// Ordered family preferences used when nothing else matches
    #[serde(default = "default_fallback_families")]
    pub fallback_families: Vec<String>,

    /// Catalog cache TTL in seconds (0 = rescan on every lookup)
    #[serde(default)]
    pub cache_ttl_seconds: u64,
}

fn default_fallback_families() -> Vec<String> {
    DEFAULT_FALLBACK_FAMILIES.iter().map(ToString::to_string).collect()
}

impl FontConfig {
    /// Directory to scan, resolving the platform default when unset.
    pub fn font_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(crate::util::default_font_dir)
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            dir: None,
            fallback_families: default_fallback_families(),
            cache_ttl_seconds: 0,
        }
    }
}

/// Page geometry and text direction applied to every document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// CSS `@page` size (e.g. "A4", "letter", "210mm 297mm")
    #[serde(default = "default_page_size")]
    pub size: String,

    /// CSS `@page` margin
    #[serde(default = "default_page_margin")]
    pub margin: String,

    /// Body line height
    #[serde(default = "default_line_height")]
    pub line_height: f32,

    /// Footer template with `{page}` / `{pages}` placeholders
    #[serde(default = "default_footer")]
    pub footer: String,
}

fn default_page_size() -> String {
    "A4".to_string()
}

fn default_page_margin() -> String {
    "2cm".to_string()
}

const fn default_line_height() -> f32 {
    1.7
}

fn default_footer() -> String {
    DEFAULT_FOOTER.to_string()
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: default_page_size(),
            margin: default_page_margin(),
            line_height: default_line_height(),
            footer: default_footer(),
        }
    }
}

/// External rendering engine configuration.
///
/// The engine is invoked as `<command> [args...] --stylesheet <file> - -`,
/// which matches the WeasyPrint command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_render_command")]
    pub command: String,

    /// Extra arguments placed before the stylesheet/input/output arguments
    #[serde(default)]
    pub args: Vec<String>,

    /// Base URL for resolving relative links in the HTML
    pub base_url: Option<String>,

    /// Render timeout in seconds (0 = no timeout)
    #[serde(default = "default_render_timeout")]
    pub timeout_seconds: u64,
}

fn default_render_command() -> String {
    "weasyprint".to_string()
}

const fn default_render_timeout() -> u64 {
    60
}

impl RenderConfig {
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_seconds))
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            command: default_render_command(),
            args: Vec::new(),
            base_url: None,
            timeout_seconds: default_render_timeout(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Maximum accepted request body size
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

const fn default_body_limit() -> usize {
    25 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            body_limit_bytes: default_body_limit(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub fonts: FontConfig,

    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::ConfigLoad(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::ConfigLoad(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations (~/.config/arabic-pdf/config.toml, ./config.toml)
    pub fn load() -> Self {
        // Try user config
        if let Some(config_dir) = crate::util::config_dir() {
            let user_config = config_dir.join("arabic-pdf").join("config.toml");
            if user_config.exists() {
                match Self::from_file(&user_config) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {}", user_config.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // Try local config
        let local_config = PathBuf::from("config.toml");
        if local_config.exists() {
            match Self::from_file(&local_config) {
                Ok(config) => {
                    tracing::debug!("Loaded config from ./config.toml");
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load ./config.toml: {}", e);
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Self::default()
    }

    /// Reject values that would make every render fail.
    pub fn validate(&self) -> Result<()> {
        if self.render.command.trim().is_empty() {
            return Err(Error::ConfigInvalid {
                field: "render.command".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.page.size.trim().is_empty() {
            return Err(Error::ConfigInvalid {
                field: "page.size".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if !(self.page.line_height.is_finite() && self.page.line_height > 0.0) {
            return Err(Error::ConfigInvalid {
                field: "page.line_height".to_string(),
                reason: format!("expected a positive number, got {}", self.page.line_height),
            });
        }

        Ok(())
    }
}
