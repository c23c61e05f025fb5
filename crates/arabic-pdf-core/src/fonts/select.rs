//! Choosing a catalog font for a document.
//!
//! Families named in the HTML are found with a regular expression over the
//! raw text, not a CSS parser: a `font-family:` declaration is matched
//! wherever it appears, including inside comments, scripts or plain prose.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

use super::catalog::{self, FontEntry};
use crate::error::{Error, Result};
use crate::request::{RenderRequest, SelectionPolicy};

/// `font-family:` followed by its first family name.
///
/// A quoted name (`"..."`, `'...'` or their HTML escapes) ends at the matching
/// quote. An unquoted name ends at a comma, `!`, the end of the declaration or
/// any quote, so the closing quote of a `style="..."` attribute is never part
/// of it.
#[allow(clippy::expect_used)] // Pattern is a literal and known to compile
static FONT_FAMILY_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?i)font-family\s*:\s*(?:"#,
        r#""([^"<>;{}\r\n]*)""#,
        r#"|'([^'<>;{}\r\n]*)'"#,
        r#"|&quot;([^&<>;{}\r\n]*)&quot;"#,
        r#"|&#39;([^&<>;{}\r\n]*)&#39;"#,
        r#"|([^"'&,;!<>{}\r\n]+))"#,
    ))
    .expect("font-family pattern is valid")
});

/// A font picked for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontChoice {
    pub family: String,
    pub filename: String,
}

impl From<&FontEntry> for FontChoice {
    fn from(entry: &FontEntry) -> Self {
        Self {
            family: entry.family.clone(),
            filename: entry.filename.clone(),
        }
    }
}

/// First family name of each `font-family` declaration in `html`, in
/// document order, without duplicates (compared case-insensitively).
pub fn extract_font_families(html: &str) -> Vec<String> {
    let mut families: Vec<String> = Vec::new();

    for caps in FONT_FAMILY_DECL.captures_iter(html) {
        // Exactly one alternative participates in each match
        let Some(value) = caps.iter().skip(1).flatten().next() else { continue };
        let name = value.as_str().trim();
        if name.is_empty() {
            continue;
        }

        let key = name.to_lowercase();
        if !families.iter().any(|seen| seen.to_lowercase() == key) {
            families.push(name.to_string());
        }
    }

    families
}

/// Resolves a caller's font request against the catalog
#[derive(Debug, Clone)]
pub struct FontSelector {
    fallback_families: Vec<String>,
}

impl FontSelector {
    pub const fn new(fallback_families: Vec<String>) -> Self {
        Self { fallback_families }
    }

    pub fn fallback_families(&self) -> &[String] {
        &self.fallback_families
    }

    /// Apply `policy` to `request`.
    ///
    /// Only a strict request carrying both a family and a filename can fail;
    /// everything else goes through [`Self::choose`].
    pub fn resolve(
        &self,
        request: &RenderRequest,
        policy: SelectionPolicy,
        fonts: &[FontEntry],
    ) -> Result<Option<FontChoice>> {
        match (policy, request.font_family(), request.font_filename()) {
            (SelectionPolicy::Strict, Some(family), Some(filename)) => {
                Self::validate(family, filename, fonts).map(Some)
            }
            _ => Ok(self.choose(
                request.html(),
                request.font_family(),
                request.font_filename(),
                fonts,
            )),
        }
    }

    /// Strict check: `filename` must be in the catalog and declare exactly
    /// `family` (case-sensitive).
    pub fn validate(family: &str, filename: &str, fonts: &[FontEntry]) -> Result<FontChoice> {
        match catalog::find(fonts, filename) {
            Some(entry) if entry.family == family => Ok(FontChoice::from(entry)),
            _ => Err(Error::InvalidFontSelection {
                filename: filename.to_string(),
                family: family.to_string(),
            }),
        }
    }

    /// Lenient selection.
    ///
    /// An explicit pair that matches the catalog wins. Otherwise the first
    /// family declared in the HTML that the catalog knows (kept in the HTML's
    /// casing), then the first available fallback family.
    pub fn choose(
        &self,
        html: &str,
        explicit_family: Option<&str>,
        explicit_filename: Option<&str>,
        fonts: &[FontEntry],
    ) -> Option<FontChoice> {
        if let (Some(family), Some(filename)) = (explicit_family, explicit_filename)
            && let Ok(choice) = Self::validate(family, filename, fonts)
        {
            debug!("Using requested font {} ({})", choice.family, choice.filename);
            return Some(choice);
        }

        if !html.trim().is_empty()
            && let Some(choice) = Self::match_html(html, fonts)
        {
            debug!("Using font {} ({}) declared in HTML", choice.family, choice.filename);
            return Some(choice);
        }

        let choice = self.match_fallback(fonts);
        match choice {
            Some(ref c) => debug!("Using fallback font {} ({})", c.family, c.filename),
            None => debug!("No catalog font matched, using engine defaults"),
        }
        choice
    }

    fn match_html(html: &str, fonts: &[FontEntry]) -> Option<FontChoice> {
        extract_font_families(html).into_iter().find_map(|declared| {
            find_family(fonts, &declared).map(|entry| FontChoice {
                family: declared,
                filename: entry.filename.clone(),
            })
        })
    }

    fn match_fallback(&self, fonts: &[FontEntry]) -> Option<FontChoice> {
        self.fallback_families
            .iter()
            .find_map(|preferred| find_family(fonts, preferred))
            .map(FontChoice::from)
    }
}

impl Default for FontSelector {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_FALLBACK_FAMILIES
                .iter()
                .map(ToString::to_string)
                .collect(),
        )
    }
}

fn find_family<'a>(fonts: &'a [FontEntry], family: &str) -> Option<&'a FontEntry> {
    let wanted = family.to_lowercase();
    fonts.iter().find(|entry| entry.family.to_lowercase() == wanted)
}
