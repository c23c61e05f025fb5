//! Font inspection and catalog tests against generated font files.

mod common;

use arabic_pdf_core::fonts::{
    self, ARABIC_RANGES, FontCatalog, ScanOutcome, SkipReason, extract_family, supports_arabic,
};
use common::{ARABIC_LETTERS, LATIN_CAPITALS, build_font, write_arabic_font, write_font};

// =============================================================================
// Inspector
// =============================================================================

#[test]
fn test_arabic_font_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    write_arabic_font(dir.path(), "amiri.ttf", "Amiri");

    let path = dir.path().join("amiri.ttf");
    assert!(supports_arabic(&path));
    assert_eq!(extract_family(&path).as_deref(), Some("Amiri"));
}

#[test]
fn test_latin_font_is_not_arabic() {
    let dir = tempfile::tempdir().unwrap();
    write_font(dir.path(), "latin.ttf", Some("Latin Only"), &[LATIN_CAPITALS]);

    let path = dir.path().join("latin.ttf");
    assert!(!supports_arabic(&path));
    assert_eq!(extract_family(&path).as_deref(), Some("Latin Only"));
}

#[test]
fn test_every_arabic_block_counts() {
    for &(start, end) in ARABIC_RANGES {
        for codepoint in [start, end] {
            let report = fonts::inspect::inspect_bytes(&build_font(Some("Edge"), &[(codepoint, codepoint)]))
                .unwrap();
            assert!(report.supports_arabic, "{codepoint:#06X} should count as Arabic");
        }

        let before = fonts::inspect::inspect_bytes(&build_font(Some("Edge"), &[(start - 1, start - 1)]))
            .unwrap();
        assert!(!before.supports_arabic, "{:#06X} should not count as Arabic", start - 1);

        let after = fonts::inspect::inspect_bytes(&build_font(Some("Edge"), &[(end + 1, end + 1)]))
            .unwrap();
        assert!(!after.supports_arabic, "{:#06X} should not count as Arabic", end + 1);
    }
}

#[test]
fn test_range_spanning_arabic_block() {
    // A single group covering Hebrew through Syriac still maps Arabic codepoints
    let report = fonts::inspect::inspect_bytes(&build_font(Some("Wide"), &[(0x0590, 0x0700)])).unwrap();
    assert!(report.supports_arabic);
}

#[test]
fn test_font_without_family_name() {
    let report = fonts::inspect::inspect_bytes(&build_font(None, &[ARABIC_LETTERS])).unwrap();
    assert!(report.supports_arabic);
    assert_eq!(report.family, None);
}

#[test]
fn test_blank_family_name_is_absent() {
    let report = fonts::inspect::inspect_bytes(&build_font(Some("   "), &[ARABIC_LETTERS])).unwrap();
    assert_eq!(report.family, None);
}

#[test]
fn test_arabic_family_name_decodes() {
    let report = fonts::inspect::inspect_bytes(&build_font(Some("خط النسخ"), &[ARABIC_LETTERS])).unwrap();
    assert_eq!(report.family.as_deref(), Some("خط النسخ"));
}

#[test]
fn test_truncated_font_is_not_arabic() {
    let dir = tempfile::tempdir().unwrap();
    let font = build_font(Some("Amiri"), &[ARABIC_LETTERS]);
    std::fs::write(dir.path().join("cut.ttf"), &font[..40]).unwrap();

    let path = dir.path().join("cut.ttf");
    assert!(!supports_arabic(&path));
    assert_eq!(extract_family(&path), None);
}

// =============================================================================
// Catalog
// =============================================================================

fn populate(dir: &std::path::Path) {
    write_arabic_font(dir, "Tahoma.TTF", "Tahoma");
    write_arabic_font(dir, "arial.ttf", "arial");
    write_arabic_font(dir, "trado.otf", "Traditional Arabic");
    write_font(dir, "latin.ttf", Some("Latin Only"), &[LATIN_CAPITALS]);
    write_font(dir, "noname.otf", None, &[ARABIC_LETTERS]);
    std::fs::write(dir.join("broken.ttf"), b"\x00\x01\x00\x00garbage").unwrap();
    std::fs::write(dir.join("readme.txt"), "not a font").unwrap();
    write_arabic_font(dir, "collection.ttc", "Ignored Collection");
    std::fs::create_dir(dir.join("nested.ttf")).unwrap();
}

#[test]
fn test_catalog_contents_and_order() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path());

    let fonts = FontCatalog::new(dir.path()).list_fonts();
    let families: Vec<&str> = fonts.iter().map(|f| f.family.as_str()).collect();
    let filenames: Vec<&str> = fonts.iter().map(|f| f.filename.as_str()).collect();

    assert_eq!(families, vec!["arial", "Tahoma", "Traditional Arabic"]);
    assert_eq!(filenames, vec!["arial.ttf", "Tahoma.TTF", "trado.otf"]);
    assert!(fonts.iter().all(|f| !f.family.trim().is_empty()));
}

#[test]
fn test_scan_reports_skip_reasons() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path());

    let outcomes = FontCatalog::new(dir.path()).scan();
    let skipped = |name: &str| {
        outcomes.iter().find_map(|o| match o {
            ScanOutcome::Skipped { filename, reason } if filename == name => Some(reason.clone()),
            _ => None,
        })
    };

    assert_eq!(skipped("latin.ttf"), Some(SkipReason::NoArabicCoverage));
    assert_eq!(skipped("noname.otf"), Some(SkipReason::MissingFamilyName));
    assert!(matches!(skipped("broken.ttf"), Some(SkipReason::Unparsable(_))));

    // Unrecognized extensions and directories are not candidates at all
    assert_eq!(outcomes.len(), 6);
    assert!(skipped("readme.txt").is_none());
    assert!(skipped("collection.ttc").is_none());
}

#[test]
fn test_catalog_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path());
    write_arabic_font(dir.path(), "b-amiri.ttf", "Amiri");
    write_arabic_font(dir.path(), "a-amiri.ttf", "AMIRI");

    let catalog = FontCatalog::new(dir.path());
    let first = catalog.list_fonts();
    let second = catalog.list_fonts();

    assert_eq!(first, second);
    // Equal families (ignoring case) keep file name order
    assert_eq!(first[0].filename, "a-amiri.ttf");
    assert_eq!(first[1].filename, "b-amiri.ttf");
}

#[test]
fn test_catalog_sees_new_files() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FontCatalog::new(dir.path());
    assert!(catalog.list_fonts().is_empty());

    write_arabic_font(dir.path(), "amiri.ttf", "Amiri");
    assert_eq!(catalog.list_fonts().len(), 1);
}

#[test]
fn test_catalog_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    write_arabic_font(dir.path(), "TRADBDO.TTF", "Traditional Arabic");

    let json = serde_json::to_value(FontCatalog::new(dir.path()).list_fonts()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "filename": "TRADBDO.TTF", "family": "Traditional Arabic" }])
    );
}

#[test]
fn test_catalog_walks_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    let kacst = dir.path().join("truetype").join("kacst");
    std::fs::create_dir_all(&kacst).unwrap();
    write_arabic_font(&kacst, "KacstBook.ttf", "KacstBook");
    write_arabic_font(dir.path(), "amiri.ttf", "Amiri");
    write_font(&kacst, "latin.ttf", Some("Latin Only"), &[LATIN_CAPITALS]);

    let catalog = FontCatalog::new(dir.path());
    let fonts = catalog.list_fonts();
    let filenames: Vec<&str> = fonts.iter().map(|f| f.filename.as_str()).collect();
    assert_eq!(filenames, vec!["amiri.ttf", "truetype/kacst/KacstBook.ttf"]);

    // The key resolves back to the file on disk
    assert!(catalog.font_path(&fonts[1].filename).is_file());
    assert!(supports_arabic(catalog.font_path(&fonts[1].filename)));
}
