mod cache;
mod catalog;
pub mod inspect;
mod select;

pub use cache::CatalogCache;
pub use catalog::{FONT_EXTENSIONS, FontCatalog, FontEntry, ScanOutcome, find, is_font_file};
pub use inspect::{
    ARABIC_RANGES, FontReport, SkipReason, extract_family, is_arabic_codepoint, supports_arabic,
};
pub use select::{FontChoice, FontSelector, extract_font_families};
