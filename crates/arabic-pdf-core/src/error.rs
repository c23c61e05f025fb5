use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for arabic-pdf-core
///
/// Font scanning never produces one of these: unreadable or unparsable font
/// files are skipped (see [`crate::fonts::SkipReason`]). What remains:
/// - Validation of caller input (HTML content, strict font selection)
/// - Rendering failures from the external layout engine
/// - Configuration loading
/// - General I/O operations
#[derive(Error, Debug)]
pub enum Error {
    // ==========================================================================
    // Validation Errors
    // ==========================================================================
    /// The request carried no HTML content
    #[error("missing required HTML content")]
    MissingHtml,

    /// A strict font selection did not match the catalog
    #[error("invalid font selection: '{filename}' does not declare family '{family}'")]
    InvalidFontSelection { filename: String, family: String },

    /// A selected font file disappeared from disk after the catalog scan
    #[error("font file not found: {}", .0.display())]
    FontFileMissing(PathBuf),

    // ==========================================================================
    // Rendering Errors
    // ==========================================================================
    /// The rendering engine failed; carries the engine's own message
    #[error("PDF generation failed: {0}")]
    RenderFailure(String),

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// Failed to load configuration file
    #[error("failed to load config: {0}")]
    ConfigLoad(String),

    /// Invalid configuration value
    #[error("invalid config value for '{field}': {reason}")]
    ConfigInvalid { field: String, reason: String },

    // ==========================================================================
    // I/O Errors
    // ==========================================================================
    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error was caused by the caller's input (HTTP 400).
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingHtml | Self::InvalidFontSelection { .. } | Self::FontFileMissing(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
