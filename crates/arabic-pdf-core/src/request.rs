/// How a request's explicit font fields are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// A supplied filename/family pair must match the catalog exactly
    Strict,
    /// Explicit fields are hints; the selector may pick something else
    #[default]
    Lenient,
}

impl SelectionPolicy {
    /// Strict when the caller named both a family and a file, lenient otherwise.
    pub const fn for_fields(family: Option<&str>, filename: Option<&str>) -> Self {
        if family.is_some() && filename.is_some() {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

/// An HTML document to render, with optional font hints.
///
/// Blank font fields are stored as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    html: String,
    font_family: Option<String>,
    font_filename: Option<String>,
}

impl RenderRequest {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            font_family: None,
            font_filename: None,
        }
    }

    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = non_blank(Some(family.into()));
        self
    }

    #[must_use]
    pub fn with_font_filename(mut self, filename: impl Into<String>) -> Self {
        self.font_filename = non_blank(Some(filename.into()));
        self
    }

    /// Build from optional fields as they arrive from a form or JSON body.
    pub fn from_parts(
        html: Option<String>,
        font_family: Option<String>,
        font_filename: Option<String>,
    ) -> Self {
        Self {
            html: html.unwrap_or_default(),
            font_family: non_blank(font_family),
            font_filename: non_blank(font_filename),
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    pub fn font_filename(&self) -> Option<&str> {
        self.font_filename.as_deref()
    }

    pub fn has_html(&self) -> bool {
        !self.html.trim().is_empty()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
