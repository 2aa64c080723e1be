//! HTML sanitization.
//!
//! [`sanitize`] removes everything that must never reach stored markup and
//! repairs structure. [`clean`] additionally enforces the presentation
//! baseline (right-to-left direction and a font stack). Both are total.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::html::attributes::strip_unsafe_attributes;
use crate::html::repair::{remove_empty_elements, repair_tag_balance};
use crate::options::Options;
use crate::text::normalize_input;

// =============================================================================
// Executable content
// =============================================================================

static SCRIPT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("SCRIPT_ELEMENT regex")
});

/// An opening `<script` with no closer: everything after it is script.
static SCRIPT_UNCLOSED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script.*\z").expect("SCRIPT_UNCLOSED regex"));

static SCRIPT_STRAY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</script[^>]*>?").expect("SCRIPT_STRAY_TAG regex"));

/// Server-side template and code delimiters the generator sometimes echoes.
static TEMPLATE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<\?.*?(?:\?>|\z)|<%.*?(?:%>|\z)|\{%.*?%\}|\{\{.*?\}\}")
        .expect("TEMPLATE_MARKER regex")
});

// =============================================================================
// Generator junk
// =============================================================================

/// Prompt section markers (`## بخش ۱: …`), separator rules, fence lines.
static JUNK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:#{1,6}[ \t]*بخش[ \t]*[0-9۰-۹]+[^\n]*|-{3,}|\*{3,}|_{3,}|```[A-Za-z0-9_-]*)[ \t]*(?:\n|\z)",
    )
    .expect("JUNK_LINE regex")
});

/// A final tag cut off before its `>`.
static DANGLING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[a-zA-Z/!][^<>]*\z").expect("DANGLING_TAG regex"));

// =============================================================================
// Presentation
// =============================================================================

static RTL_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)direction\s*:\s*rtl|\bdir\s*=\s*["']?rtl"#).expect("RTL_DECLARATION regex")
});

static FONT_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)font-family\s*:").expect("FONT_DECLARATION regex"));

static FIRST_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[a-zA-Z][a-zA-Z0-9]*\b([^<>]*?)(/?)>").expect("FIRST_ELEMENT regex")
});

static STYLE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bstyle\s*=\s*(["'])"#).expect("STYLE_ATTR regex"));

/// Remove every trace of `<script`, looping until nothing changes.
fn strip_scripts(html: &str) -> String {
    let mut current = html.to_string();
    loop {
        let next = SCRIPT_ELEMENT.replace_all(&current, "");
        let next = SCRIPT_UNCLOSED.replace_all(&next, "");
        let next = SCRIPT_STRAY_TAG.replace_all(&next, "").into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Scripts, unsafe attributes and empty elements, until nothing changes.
///
/// Each removal can splice a new `<script` or `on*=` together out of the
/// text around it.
fn strip_executable(html: &str) -> String {
    let mut current = html.to_string();
    loop {
        let next = strip_scripts(&current);
        let next = strip_unsafe_attributes(&next);
        let next = remove_empty_elements(&next);
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Remove executable content and generator junk, then repair structure.
///
/// ```
/// use gen_content_parser::html::sanitize;
///
/// let out = sanitize("<div><p>hi<script>alert(1)</script>");
/// assert_eq!(out, "<div><p>hi</p></div>");
/// ```
#[must_use]
pub fn sanitize(html: &str) -> String {
    let html = normalize_input(html);
    let html = TEMPLATE_MARKER.replace_all(&html, "");
    let html = JUNK_LINE.replace_all(&html, "");
    let html = strip_executable(&html);
    let html = DANGLING_TAG.replace(&html, "");
    repair_tag_balance(html.trim())
}

/// [`sanitize`], then enforce direction and font on the first element.
///
/// Plain text with no element at all is wrapped in a styled `<div>`.
/// Returns an empty string when nothing survives sanitization.
#[must_use]
pub fn clean(html: &str, opts: &Options) -> String {
    let html = sanitize(html);
    if html.trim().is_empty() {
        return String::new();
    }

    let mut declarations = Vec::new();
    if !RTL_DECLARATION.is_match(&html) {
        declarations.push("direction: rtl;".to_string());
    }
    if !FONT_DECLARATION.is_match(&html) {
        declarations.push(format!("font-family: {};", opts.font_stack));
    }
    if declarations.is_empty() {
        return html;
    }
    let style = declarations.join(" ");

    let Some(caps) = FIRST_ELEMENT.captures(&html) else {
        return format!(
            "<div style=\"{}\">{html}</div>",
            html_escape::encode_double_quoted_attribute(&style)
        );
    };
    let (Some(attrs), Some(slash)) = (caps.get(1), caps.get(2)) else {
        return html;
    };

    let mut out = String::with_capacity(html.len() + style.len() + 16);
    match STYLE_ATTR.captures(attrs.as_str()) {
        Some(style_caps) => {
            let Some(quote) = style_caps.get(1) else {
                return html;
            };
            let insert_at = attrs.start() + quote.end();
            let escaped = if quote.as_str() == "'" {
                html_escape::encode_single_quoted_attribute(&style)
            } else {
                html_escape::encode_double_quoted_attribute(&style)
            };
            out.push_str(&html[..insert_at]);
            out.push_str(&escaped);
            out.push(' ');
            out.push_str(&html[insert_at..]);
        }
        None => {
            let insert_at = slash.start();
            out.push_str(html[..insert_at].trim_end());
            out.push_str(" style=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(&style));
            out.push('"');
            out.push_str(&html[insert_at..]);
        }
    }
    out
}
