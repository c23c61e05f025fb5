//! Askama templates for the HTML pages.

use askama::Template;
use askama_web::WebTemplate;
use arabic_pdf_core::FontEntry;

/// Landing page with the conversion form.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub fonts: Vec<FontEntry>,
    pub engine: &'static str,
}
