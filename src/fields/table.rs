//! Declarative field pattern table.
//!
//! Each logical field owns an ordered list of named matchers. Supporting a
//! new generator layout means adding a row here; the cascade in
//! [`super::extract_field`] never changes. Every regex captures the value in
//! group 1.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::result::RecordField;

/// One matcher of the cascade.
#[derive(Debug)]
pub struct FieldPattern {
    pub field: RecordField,
    /// Stable name reported as provenance.
    pub name: &'static str,
    pub regex: Regex,
}

/// Fields the table knows how to extract, in extraction order.
pub const TABLE_FIELDS: [RecordField; 8] = [
    RecordField::MetaTitle,
    RecordField::MetaDescription,
    RecordField::Title,
    RecordField::Slug,
    RecordField::AltMain,
    RecordField::AltColors,
    RecordField::AltBox,
    RecordField::AltPod,
];

/// `(field, name, pattern)` rows, grouped by field, highest priority first.
const ROWS: &[(RecordField, &str, &str)] = &[
    // Meta title
    (RecordField::MetaTitle, "table-row", r"\|\s*متا تایتل\s*\|\s*([^|\n]*?)\s*\|"),
    (RecordField::MetaTitle, "label-pipe", r"متا تایتل\s*\|\s*([^|\n]+)"),
    (RecordField::MetaTitle, "alt-label", r"عنوان متا\s*[:|]\s*([^|\n]+)"),
    (RecordField::MetaTitle, "english-label", r"(?i)meta\s*title\s*[:|]\s*([^|\n]+)"),
    (RecordField::MetaTitle, "html-title", r"(?is)<title[^>]*>(.*?)</title>"),
    // Meta description
    (RecordField::MetaDescription, "table-row", r"\|\s*متا دسکریپشن\s*\|\s*([^|\n]*?)\s*\|"),
    (RecordField::MetaDescription, "label-pipe", r"متا دسکریپشن\s*\|\s*([^|\n]+)"),
    (RecordField::MetaDescription, "alt-label", r"توضیحات متا\s*[:|]\s*([^|\n]+)"),
    (RecordField::MetaDescription, "english-label", r"(?i)meta\s*description\s*[:|]\s*([^|\n]+)"),
    (
        RecordField::MetaDescription,
        "html-meta",
        r#"(?is)<meta\s+name\s*=\s*["']description["']\s+content\s*=\s*["']([^"']*)["']"#,
    ),
    // Title
    (RecordField::Title, "table-row", r"\|\s*عنوان\s*\(H1\)\s*\|\s*([^|\n]*?)\s*\|"),
    (RecordField::Title, "label-pipe", r"عنوان\s*\(H1\)\s*\|\s*([^|\n]+)"),
    (RecordField::Title, "alt-label", r"عنوان اصلی\s*[:|]\s*([^|\n]+)"),
    (RecordField::Title, "english-label", r"(?i)h1\s*title\s*[:|]\s*([^|\n]+)"),
    (RecordField::Title, "markdown-heading", r"(?m)^#[ \t]+([^\n]+)$"),
    // Slug
    (RecordField::Slug, "table-row", r"(?i)\|\s*پیوند یکتا[^|\n]*\|\s*([a-z0-9-]+)\s*\|"),
    (RecordField::Slug, "label-pipe", r"(?i)پیوند یکتا[^|\n]*\|\s*([a-z0-9-]+)"),
    (RecordField::Slug, "english-label", r"(?i)\bslug\s*[:|]\s*([a-z0-9-]+)"),
    // Alt texts
    (RecordField::AltMain, "table-row", r"متن جایگزین عکس[^|\n]*?اصلی[^|\n]*\|\s*([^|\n]+)"),
    (RecordField::AltMain, "label-pipe", r"متن جایگزین عکس\s*\|\s*([^|\n]+)"),
    (RecordField::AltMain, "english-label", r"(?i)main\s*alt\s*text\s*[:|]\s*([^|\n]+)"),
    (RecordField::AltColors, "table-row", r"متن جایگزین عکس رنگ[^|\n]*\|\s*([^|\n]+)"),
    (RecordField::AltBox, "table-row", r"متن جایگزین عکس جعبه[^|\n]*\|\s*([^|\n]+)"),
    (RecordField::AltPod, "table-row", r"متن جایگزین عکس پاد[^|\n]*\|\s*([^|\n]+)"),
];

/// The compiled table.
pub static FIELD_PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    ROWS.iter()
        .map(|&(field, name, pattern)| FieldPattern {
            field,
            name,
            regex: Regex::new(pattern).expect("field pattern regex"),
        })
        .collect()
});

/// Matchers for one field, in priority order.
pub fn patterns_for(field: RecordField) -> impl Iterator<Item = &'static FieldPattern> {
    FIELD_PATTERNS.iter().filter(move |p| p.field == field)
}
