//! Utility functions shared across the crate.

use std::path::{Path, PathBuf};

/// Get the user's config directory following XDG conventions.
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise `$HOME/.config`.
pub fn config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
}

/// The platform's standard system font directory.
///
/// Windows honours `%WINDIR%`, falling back to `C:\Windows`.
pub fn default_font_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        std::env::var_os("WINDIR")
            .map_or_else(|| PathBuf::from(r"C:\Windows"), PathBuf::from)
            .join("Fonts")
    } else if cfg!(target_os = "macos") {
        PathBuf::from("/Library/Fonts")
    } else {
        PathBuf::from("/usr/share/fonts")
    }
}

/// Build a `file://` URI for an absolute path.
///
/// Each path segment is percent-encoded; a Windows drive letter (`C:`) is
/// kept as-is and the `\\?\` prefix produced by `canonicalize` is dropped.
pub fn file_uri(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let raw = raw.strip_prefix("//?/").unwrap_or(&raw);

    let encoded = raw
        .split('/')
        .map(|segment| {
            if is_drive_letter(segment) {
                segment.to_string()
            } else {
                urlencoding::encode(segment).into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("/");

    if encoded.starts_with('/') {
        format!("file://{encoded}")
    } else {
        format!("file:///{encoded}")
    }
}

fn is_drive_letter(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_uri_unix() {
        assert_eq!(
            file_uri(Path::new("/usr/share/fonts/Amiri-Regular.ttf")),
            "file:///usr/share/fonts/Amiri-Regular.ttf"
        );
    }

    #[test]
    fn test_file_uri_encodes_spaces_and_arabic() {
        assert_eq!(
            file_uri(Path::new("/fonts/Traditional Arabic.ttf")),
            "file:///fonts/Traditional%20Arabic.ttf"
        );
        assert_eq!(file_uri(Path::new("/fonts/خط.ttf")), "file:///fonts/%D8%AE%D8%B7.ttf");
    }

    #[test]
    fn test_file_uri_windows_style() {
        assert_eq!(
            file_uri(Path::new(r"\\?\C:\Windows\Fonts\TRADBDO.TTF")),
            "file:///C:/Windows/Fonts/TRADBDO.TTF"
        );
        assert_eq!(
            file_uri(Path::new(r"C:\Windows\Fonts\arial.ttf")),
            "file:///C:/Windows/Fonts/arial.ttf"
        );
    }

    #[test]
    fn test_default_font_dir_is_named_fonts() {
        let dir = default_font_dir();
        assert!(dir.to_string_lossy().to_lowercase().contains("fonts"));
    }
}
