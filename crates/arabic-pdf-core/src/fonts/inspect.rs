//! Script coverage and family name lookup for a single font file.
//!
//! Fonts are read into an owned buffer and parsed with `ttf-parser`, so the
//! file handle never outlives the read call. Parse failures are reported as a
//! [`SkipReason`], never as a crate [`Error`](crate::Error).

use std::fmt;
use std::path::Path;

use ttf_parser::{Face, name_id};

/// Unicode blocks treated as Arabic script (inclusive).
pub const ARABIC_RANGES: &[(u32, u32)] = &[
    (0x0600, 0x06FF), // Arabic
    (0x0750, 0x077F), // Arabic Supplement
    (0x08A0, 0x08FF), // Arabic Extended-A
    (0xFB50, 0xFDFF), // Arabic Presentation Forms-A
    (0xFE70, 0xFEFF), // Arabic Presentation Forms-B
];

/// Why a font file was left out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file could not be read
    Unreadable(String),
    /// `ttf-parser` rejected the file
    Unparsable(String),
    /// No character map, or no mapped codepoint in [`ARABIC_RANGES`]
    NoArabicCoverage,
    /// No decodable "Font Family" (name ID 1) record
    MissingFamilyName,
    /// The file name is not valid UTF-8
    NonUtf8Name,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable(e) => write!(f, "unreadable: {e}"),
            Self::Unparsable(e) => write!(f, "unparsable: {e}"),
            Self::NoArabicCoverage => f.write_str("no Arabic coverage"),
            Self::MissingFamilyName => f.write_str("no family name"),
            Self::NonUtf8Name => f.write_str("file name is not valid UTF-8"),
        }
    }
}

/// What the inspector learned about one font file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontReport {
    pub supports_arabic: bool,
    pub family: Option<String>,
}

pub fn is_arabic_codepoint(codepoint: u32) -> bool {
    ARABIC_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&codepoint))
}

/// Whether any character map subtable maps a codepoint in [`ARABIC_RANGES`].
///
/// Returns `false` for unreadable or unparsable files.
pub fn supports_arabic(path: impl AsRef<Path>) -> bool {
    inspect(path).is_ok_and(|report| report.supports_arabic)
}

/// The font's declared family name (name ID 1), if any.
pub fn extract_family(path: impl AsRef<Path>) -> Option<String> {
    inspect(path).ok().and_then(|report| report.family)
}

/// Read and parse a font once, reporting both coverage and family.
pub fn inspect(path: impl AsRef<Path>) -> Result<FontReport, SkipReason> {
    let data = std::fs::read(path.as_ref()).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    inspect_bytes(&data)
}

/// [`inspect`] on bytes already in memory.
pub fn inspect_bytes(data: &[u8]) -> Result<FontReport, SkipReason> {
    let face = Face::parse(data, 0).map_err(|e| SkipReason::Unparsable(e.to_string()))?;

    Ok(FontReport {
        supports_arabic: face_supports_arabic(&face),
        family: face_family_name(&face),
    })
}

fn face_supports_arabic(face: &Face<'_>) -> bool {
    let Some(cmap) = face.tables().cmap else {
        return false;
    };

    let mut found = false;
    for subtable in cmap.subtables {
        subtable.codepoints(|codepoint| {
            if !found && is_arabic_codepoint(codepoint) {
                found = true;
            }
        });
        if found {
            break;
        }
    }
    found
}

fn face_family_name(face: &Face<'_>) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == name_id::FAMILY)
        .find_map(|name| name.to_string())
        .map(|family| family.trim().to_string())
        .filter(|family| !family.is_empty())
}
