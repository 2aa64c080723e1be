//! Fallback body synthesis.
//!
//! Used when no HTML block was found. Builds a small styled fragment from
//! whatever the cascade recovered so the body is never empty. All values are
//! escaped; nothing from the input is emitted as markup.

use std::collections::BTreeMap;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::options::Options;
use crate::text::{collapse_whitespace, is_separator_token, strip_markdown_emphasis, strip_markdown_links};

/// Heading of the custom-field table.
pub const SPEC_TABLE_HEADING: &str = "مشخصات فنی";

/// Heading of the placeholder section.
pub const PENDING_HEADING: &str = "توضیحات";

/// Body of the placeholder section.
pub const PENDING_MESSAGE: &str = "محتوای تولید شده در حال پردازش است. لطفاً منتظر بمانید...";

/// What the builder may render. Every part is optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackInput<'a> {
    pub title: &'a str,
    pub short_description: &'a str,
    pub custom_fields: Option<&'a BTreeMap<String, String>>,
    /// Leftover generation text mined for prose paragraphs.
    pub source_text: &'a str,
}

/// Build the fallback body.
///
/// ```
/// use gen_content_parser::html::{build_fallback, FallbackInput};
/// use gen_content_parser::Options;
///
/// let html = build_fallback(&FallbackInput::default(), &Options::default());
/// assert!(html.contains("منتظر بمانید"));
/// ```
#[must_use]
pub fn build_fallback(input: &FallbackInput<'_>, opts: &Options) -> String {
    let accent = encode_double_quoted_attribute(&opts.accent_color);
    let font = encode_double_quoted_attribute(&opts.font_stack);
    let mut html = String::with_capacity(1024);
    let mut rendered = false;

    html.push_str(&format!(
        "<div style=\"font-family: {font}; direction: rtl; text-align: right; line-height: 1.8; color: #333;\">"
    ));

    let title = input.title.trim();
    if !title.is_empty() {
        html.push_str(&format!(
            "<h1 style=\"color: {accent}; font-size: 28px; margin-bottom: 20px;\">{}</h1>",
            encode_text(title)
        ));
        rendered = true;
    }

    let short = input.short_description.trim();
    if !short.is_empty() {
        html.push_str(&format!(
            "<div style=\"background: #f8f9fa; padding: 20px; border-right: 4px solid {accent}; margin-bottom: 30px;\">\
             <p style=\"font-size: 16px; line-height: 1.8; margin: 0;\">{}</p></div>",
            encode_text(short)
        ));
        rendered = true;
    }

    for paragraph in prose_paragraphs(input.source_text, short, opts) {
        html.push_str(&format!(
            "<p style=\"margin-bottom: 15px;\">{}</p>",
            encode_text(&paragraph)
        ));
        rendered = true;
    }

    if let Some(table) = input.custom_fields.and_then(|fields| spec_table(fields, opts, &accent)) {
        html.push_str(&table);
        rendered = true;
    }

    if !rendered {
        html.push_str(&format!(
            "<div style=\"margin-top: 30px;\">\
             <h2 style=\"color: {accent}; font-size: 24px; margin-bottom: 15px;\">{PENDING_HEADING}</h2>\
             <p style=\"font-size: 15px; line-height: 1.8;\">{PENDING_MESSAGE}</p></div>"
        ));
    }

    html.push_str("</div>");
    html
}

/// Custom fields as a two-column table, in vocabulary order.
fn spec_table(fields: &BTreeMap<String, String>, opts: &Options, accent: &str) -> Option<String> {
    let rows: Vec<(&str, &str)> = opts
        .field_labels
        .iter()
        .filter_map(|(key, label)| {
            fields
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| (label.as_str(), v))
        })
        .collect();

    if rows.is_empty() {
        return None;
    }

    let mut table = String::new();
    table.push_str(&format!(
        "<h2 style=\"color: {accent}; font-size: 22px; margin-top: 30px; margin-bottom: 15px;\">{SPEC_TABLE_HEADING}</h2>\
         <table style=\"width: 100%; border-collapse: collapse;\"><tbody>"
    ));
    for (label, value) in rows {
        table.push_str(&format!(
            "<tr><th style=\"padding: 10px; background: #f5f5f5; border: 1px solid #ddd; width: 35%;\">{}</th>\
             <td style=\"padding: 10px; border: 1px solid #ddd;\">{}</td></tr>",
            encode_text(label),
            encode_text(value)
        ));
    }
    table.push_str("</tbody></table>");
    Some(table)
}

/// Prose paragraphs of the leftover text: blank-line separated blocks that
/// are not headings, table rows, fences, markup or separators.
fn prose_paragraphs(text: &str, short_description: &str, opts: &Options) -> Vec<String> {
    if opts.fallback_max_paragraphs == 0 {
        return Vec::new();
    }

    let mut blocks: Vec<String> = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            blocks.push(std::mem::take(&mut current));
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line.trim());
        }
    }
    blocks.push(current);

    let short_head: String = short_description
        .trim_end_matches(opts.ellipsis.as_str())
        .chars()
        .take(40)
        .collect();

    blocks
        .iter()
        .filter(|block| {
            let block = block.trim_start();
            !(block.is_empty()
                || block.starts_with(['#', '|', '<', '{', '[', '>', '-', '`'])
                || block.contains('|')
                || block.contains("```")
                || is_separator_token(block))
        })
        .map(|block| collapse_whitespace(&strip_markdown_links(&strip_markdown_emphasis(block))))
        .filter(|p| p.chars().count() >= opts.fallback_min_paragraph_len)
        .filter(|p| short_head.is_empty() || !p.starts_with(&short_head))
        .take(opts.fallback_max_paragraphs)
        .collect()
}
