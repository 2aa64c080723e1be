//! DOM queries over the HTML body.
//!
//! The body is sanitized and tag-balanced by the time these run, so a real
//! parser gives cleaner text than regex scraping (nested inline markup,
//! entities, `<br>` inside headings).

pub use dom_query::{Document, Selection};

use crate::text::collapse_whitespace;

/// Marker comment the generator places before the introduction paragraph.
pub const INTRO_MARKER: &str = "<!-- مقدمه -->";

/// Parse an HTML fragment into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Whitespace-collapsed text of the first element matching `selector`
/// that has any text.
#[must_use]
pub fn first_text(doc: &Document, selector: &str) -> Option<String> {
    doc.select(selector).nodes().iter().find_map(|node| {
        let text = collapse_whitespace(&Selection::from(*node).text());
        (!text.is_empty()).then_some(text)
    })
}

/// Text of the first `<h1>` in the body.
///
/// ```
/// use gen_content_parser::dom::first_heading;
///
/// let html = "<div><h1 style=\"color: red\">ویپ <b>XROS</b>\n 4</h1></div>";
/// assert_eq!(first_heading(html).as_deref(), Some("ویپ XROS 4"));
/// ```
#[must_use]
pub fn first_heading(html: &str) -> Option<String> {
    first_text(&parse(html), "h1")
}

/// Text of the introduction paragraph.
///
/// The first `<p>` after the introduction marker comment, else the first
/// `<p>` of the body.
#[must_use]
pub fn intro_paragraph(html: &str) -> Option<String> {
    html.find(INTRO_MARKER)
        .and_then(|pos| first_text(&parse(&html[pos + INTRO_MARKER.len()..]), "p"))
        .or_else(|| first_text(&parse(html), "p"))
}
