use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::inspect::{self, SkipReason};

/// Extensions recognized as TrueType/OpenType fonts (compared case-insensitively).
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];

/// An Arabic-capable font found in the font directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontEntry {
    /// Path relative to the font directory, `/`-separated and unique
    /// within a scan (a bare file name for top-level fonts)
    pub filename: String,
    /// Self-declared family name (name ID 1)
    pub family: String,
}

/// Result of inspecting one candidate file during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Included(FontEntry),
    Skipped { filename: String, reason: SkipReason },
}

/// Scanner for a font directory and everything below it.
///
/// Every call performs a full synchronous scan; put a
/// [`CatalogCache`](super::CatalogCache) in front when repeated scans matter.
#[derive(Debug, Clone)]
pub struct FontCatalog {
    dir: PathBuf,
}

impl FontCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of a catalog file on disk, given its `filename` key.
    pub fn font_path(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Arabic-capable fonts, sorted case-insensitively by family.
    pub fn list_fonts(&self) -> Vec<FontEntry> {
        let mut fonts: Vec<FontEntry> = self
            .scan()
            .into_iter()
            .filter_map(|outcome| match outcome {
                ScanOutcome::Included(entry) => Some(entry),
                ScanOutcome::Skipped { filename, reason } => {
                    debug!("Skipping font {}: {}", filename, reason);
                    None
                }
            })
            .collect();

        // Stable sort: equal families keep file name order from the scan
        fonts.sort_by_cached_key(|entry| entry.family.to_lowercase());
        fonts
    }

    /// Inspect every font file under the directory, ordered by relative path.
    ///
    /// Subdirectories are walked (each real directory once, so symlink loops
    /// terminate). Files without a recognized extension are ignored entirely;
    /// a missing directory yields no outcomes.
    pub fn scan(&self) -> Vec<ScanOutcome> {
        let mut paths = Vec::new();
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut stack = vec![self.dir.clone()];

        while let Some(dir) = stack.pop() {
            let real = std::fs::canonicalize(&dir).unwrap_or_else(|_| dir.clone());
            if !visited.insert(real) {
                continue;
            }

            let entries = match std::fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!("Font directory {} does not exist", dir.display());
                    continue;
                }
                Err(e) => {
                    warn!("Failed to read font directory {}: {}", dir.display(), e);
                    continue;
                }
            };

            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                } else if path.is_file() && is_font_file(&path) {
                    paths.push(path);
                }
            }
        }

        // Component-wise ordering keeps a directory's files together
        paths.sort();
        paths.iter().map(|path| inspect_file(&self.dir, path)).collect()
    }
}

/// Look up a scanned entry by its file name key.
pub fn find<'a>(fonts: &'a [FontEntry], filename: &str) -> Option<&'a FontEntry> {
    fonts.iter().find(|entry| entry.filename == filename)
}

pub fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| FONT_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// `/`-separated path of `path` below `root`.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

fn inspect_file(root: &Path, path: &Path) -> ScanOutcome {
    let Some(filename) = relative_key(root, path) else {
        return ScanOutcome::Skipped {
            filename: path.display().to_string(),
            reason: SkipReason::NonUtf8Name,
        };
    };

    let report = match inspect::inspect(path) {
        Ok(report) => report,
        Err(reason) => return ScanOutcome::Skipped { filename, reason },
    };

    if !report.supports_arabic {
        return ScanOutcome::Skipped {
            filename,
            reason: SkipReason::NoArabicCoverage,
        };
    }

    match report.family {
        Some(family) => ScanOutcome::Included(FontEntry { filename, family }),
        None => ScanOutcome::Skipped {
            filename,
            reason: SkipReason::MissingFamilyName,
        },
    }
}
