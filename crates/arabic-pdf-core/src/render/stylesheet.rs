use std::fmt::Write;

use crate::config::PageConfig;

/// Stylesheet applied on top of the document's own styles.
///
/// Always sets page geometry, the page footer counter and right-to-left body
/// direction. The `@font-face` block is emitted only when both `family` and
/// `font_uri` are given; otherwise the engine's default font stack applies.
pub fn build_stylesheet(page: &PageConfig, family: Option<&str>, font_uri: Option<&str>) -> String {
    let mut css = String::new();

    let _ = writeln!(css, "@page {{");
    let _ = writeln!(css, "  size: {};", page.size);
    let _ = writeln!(css, "  margin: {};", page.margin);
    if let Some(content) = footer_content(&page.footer) {
        let _ = writeln!(css, "  @bottom-center {{");
        let _ = writeln!(css, "    content: {content};");
        let _ = writeln!(css, "    font-size: 9pt;");
        let _ = writeln!(css, "  }}");
    }
    let _ = writeln!(css, "}}");

    match (family, font_uri) {
        (Some(family), Some(uri)) => {
            let family = css_string(family);
            let _ = writeln!(css, "@font-face {{");
            let _ = writeln!(css, "  font-family: {family};");
            let _ = writeln!(css, "  src: url({});", css_string(uri));
            let _ = writeln!(css, "}}");
            let _ = writeln!(css, "body {{");
            let _ = writeln!(css, "  direction: rtl;");
            let _ = writeln!(css, "  font-family: {family}, serif;");
            let _ = writeln!(css, "  line-height: {};", page.line_height);
            let _ = writeln!(css, "}}");
        }
        _ => {
            let _ = writeln!(css, "body {{");
            let _ = writeln!(css, "  direction: rtl;");
            let _ = writeln!(css, "  line-height: {};", page.line_height);
            let _ = writeln!(css, "}}");
        }
    }

    css
}

/// CSS `content` value for a footer template.
///
/// `{page}` and `{pages}` become `counter(page)` and `counter(pages)`; the
/// remaining text is emitted as quoted strings. A blank template yields
/// `None`.
fn footer_content(template: &str) -> Option<String> {
    if template.trim().is_empty() {
        return None;
    }

    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while !rest.is_empty() {
        let (counter, tail) = if let Some(tail) = rest.strip_prefix("{pages}") {
            (Some("counter(pages)"), tail)
        } else if let Some(tail) = rest.strip_prefix("{page}") {
            (Some("counter(page)"), tail)
        } else {
            (None, rest)
        };

        if let Some(counter) = counter {
            if !literal.is_empty() {
                parts.push(css_string(&literal));
                literal.clear();
            }
            parts.push(counter.to_string());
            rest = tail;
            continue;
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            literal.push(c);
        }
        rest = chars.as_str();
    }

    if !literal.is_empty() {
        parts.push(css_string(&literal));
    }

    Some(parts.join(" "))
}

/// Quote `value` as a single-quoted CSS string.
fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\A "),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}
