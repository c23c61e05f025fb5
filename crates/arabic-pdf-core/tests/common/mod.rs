//! Test fixtures: minimal TrueType fonts built in memory.
//!
//! The generated fonts carry only the tables needed for parsing (`head`,
//! `hhea`, `maxp`) plus a format 12 `cmap` and an optional `name` table.

#![allow(dead_code)]

use std::path::Path;

/// Alef through Yeh.
pub const ARABIC_LETTERS: (u32, u32) = (0x0627, 0x064A);
/// Basic Latin capitals.
pub const LATIN_CAPITALS: (u32, u32) = (0x0041, 0x005A);

/// Build a font mapping every codepoint in `ranges`, declaring `family`
/// (name ID 1) when given.
pub fn build_font(family: Option<&str>, ranges: &[(u32, u32)]) -> Vec<u8> {
    let mut tables: Vec<([u8; 4], Vec<u8>)> = vec![
        (*b"cmap", cmap_table(ranges)),
        (*b"head", head_table()),
        (*b"hhea", hhea_table()),
        (*b"maxp", maxp_table()),
        (*b"name", name_table(family)),
    ];
    // Table records must be sorted by tag
    tables.sort_by(|a, b| a.0.cmp(&b.0));

    let num_tables = u16::try_from(tables.len()).unwrap();
    let mut font = Vec::new();
    put_u32(&mut font, 0x0001_0000);
    put_u16(&mut font, num_tables);
    put_u16(&mut font, 64); // searchRange
    put_u16(&mut font, 2); // entrySelector
    put_u16(&mut font, num_tables * 16 - 64); // rangeShift

    let mut offset = 12 + 16 * tables.len();
    let mut body = Vec::new();
    for (tag, data) in &tables {
        font.extend_from_slice(tag);
        put_u32(&mut font, 0); // checksum
        put_u32(&mut font, u32::try_from(offset).unwrap());
        put_u32(&mut font, u32::try_from(data.len()).unwrap());

        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
        offset = 12 + 16 * tables.len() + body.len();
    }

    font.extend_from_slice(&body);
    font
}

/// Write a generated font into `dir`.
pub fn write_font(dir: &Path, filename: &str, family: Option<&str>, ranges: &[(u32, u32)]) {
    std::fs::write(dir.join(filename), build_font(family, ranges)).unwrap();
}

/// Write an Arabic-capable font declaring `family`.
pub fn write_arabic_font(dir: &Path, filename: &str, family: &str) {
    write_font(dir, filename, Some(family), &[LATIN_CAPITALS, ARABIC_LETTERS]);
}

fn cmap_table(ranges: &[(u32, u32)]) -> Vec<u8> {
    let groups = u32::try_from(ranges.len()).unwrap();
    let mut t = Vec::new();
    put_u16(&mut t, 0); // version
    put_u16(&mut t, 1); // numTables
    put_u16(&mut t, 3); // platform: Windows
    put_u16(&mut t, 10); // encoding: Unicode full repertoire
    put_u32(&mut t, 12); // subtable offset

    put_u16(&mut t, 12); // format
    put_u16(&mut t, 0); // reserved
    put_u32(&mut t, 16 + 12 * groups); // length
    put_u32(&mut t, 0); // language
    put_u32(&mut t, groups);

    let mut glyph = 1;
    for &(start, end) in ranges {
        put_u32(&mut t, start);
        put_u32(&mut t, end);
        put_u32(&mut t, glyph);
        glyph += end - start + 1;
    }
    t
}

fn head_table() -> Vec<u8> {
    let mut t = Vec::new();
    put_u32(&mut t, 0x0001_0000); // version
    put_u32(&mut t, 0x0001_0000); // fontRevision
    put_u32(&mut t, 0); // checksumAdjustment
    put_u32(&mut t, 0x5F0F_3CF5); // magicNumber
    put_u16(&mut t, 0); // flags
    put_u16(&mut t, 1000); // unitsPerEm
    t.extend_from_slice(&[0; 16]); // created, modified
    put_u16(&mut t, 0); // xMin
    put_u16(&mut t, 0); // yMin
    put_u16(&mut t, 1000); // xMax
    put_u16(&mut t, 1000); // yMax
    put_u16(&mut t, 0); // macStyle
    put_u16(&mut t, 8); // lowestRecPPEM
    put_u16(&mut t, 2); // fontDirectionHint
    put_u16(&mut t, 0); // indexToLocFormat
    put_u16(&mut t, 0); // glyphDataFormat
    assert_eq!(t.len(), 54);
    t
}

fn hhea_table() -> Vec<u8> {
    let mut t = Vec::new();
    put_u32(&mut t, 0x0001_0000); // version
    put_u16(&mut t, 800); // ascender
    put_u16(&mut t, 0xFF38); // descender (-200)
    put_u16(&mut t, 0); // lineGap
    put_u16(&mut t, 1000); // advanceWidthMax
    put_u16(&mut t, 0); // minLeftSideBearing
    put_u16(&mut t, 0); // minRightSideBearing
    put_u16(&mut t, 1000); // xMaxExtent
    put_u16(&mut t, 1); // caretSlopeRise
    put_u16(&mut t, 0); // caretSlopeRun
    put_u16(&mut t, 0); // caretOffset
    t.extend_from_slice(&[0; 8]); // reserved
    put_u16(&mut t, 0); // metricDataFormat
    put_u16(&mut t, 1); // numberOfHMetrics
    assert_eq!(t.len(), 36);
    t
}

fn maxp_table() -> Vec<u8> {
    let mut t = Vec::new();
    put_u32(&mut t, 0x0000_5000); // version 0.5
    put_u16(&mut t, 2); // numGlyphs
    t
}

fn name_table(family: Option<&str>) -> Vec<u8> {
    let mut records: Vec<(u16, Vec<u8>)> = Vec::new();
    if let Some(family) = family {
        records.push((1, utf16_be(family)));
    }
    records.push((2, utf16_be("Regular")));

    let count = u16::try_from(records.len()).unwrap();
    let mut t = Vec::new();
    put_u16(&mut t, 0); // format
    put_u16(&mut t, count);
    put_u16(&mut t, 6 + 12 * count); // stringOffset

    let mut strings = Vec::new();
    for (name_id, data) in &records {
        put_u16(&mut t, 3); // platform: Windows
        put_u16(&mut t, 1); // encoding: Unicode BMP
        put_u16(&mut t, 0x0409); // language: en-US
        put_u16(&mut t, *name_id);
        put_u16(&mut t, u16::try_from(data.len()).unwrap());
        put_u16(&mut t, u16::try_from(strings.len()).unwrap());
        strings.extend_from_slice(data);
    }
    t.extend_from_slice(&strings);
    t
}

fn utf16_be(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

fn put_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_be_bytes());
}

fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_be_bytes());
}
