//! Field extraction cascade.
//!
//! For each logical field the matchers of [`table`] are tried in order and
//! the first capture that survives [`clean_field_value`] wins. Fields that
//! already hold a value (typically from the embedded JSON) are never
//! touched.
//!
//! Sections that need more than a one-line capture live in their own
//! modules: the short description, the FAQ, and research-text attributes.

pub mod custom;
pub mod faq;
pub mod research;
pub mod short_description;
pub mod table;

use std::collections::BTreeMap;

use crate::result::{ContentRecord, RecordField};
use crate::text::clean_field_value;

pub use custom::{normalize_custom_fields, CustomFieldKey};
pub use faq::extract_faq;
pub use research::extract_research_fields;
pub use short_description::extract_short_description;
pub use table::{FieldPattern, FIELD_PATTERNS, TABLE_FIELDS};

/// A value accepted by the cascade, with the matcher that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub value: String,
    pub pattern: &'static str,
}

/// Run the cascade for one field.
///
/// Returns `None` without searching when `already_known` holds a value.
///
/// ```
/// use gen_content_parser::fields::extract_field;
/// use gen_content_parser::RecordField;
///
/// let text = "| متا تایتل | --- |\nمتا تایتل | Hello World\n";
/// let found = extract_field(text, RecordField::MetaTitle, None);
/// assert_eq!(found.map(|m| m.value).as_deref(), Some("Hello World"));
/// ```
#[must_use]
pub fn extract_field(
    text: &str,
    field: RecordField,
    already_known: Option<&str>,
) -> Option<FieldMatch> {
    if already_known.is_some_and(|v| !v.trim().is_empty()) {
        return None;
    }

    table::patterns_for(field).find_map(|pattern| {
        pattern
            .regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .find_map(|m| clean_field_value(m.as_str()))
            .map(|value| FieldMatch {
                value,
                pattern: pattern.name,
            })
    })
}

/// Run the cascade for every table field the record has not filled yet.
#[must_use]
pub fn extract_fields(text: &str, record: &ContentRecord) -> BTreeMap<RecordField, FieldMatch> {
    TABLE_FIELDS
        .iter()
        .filter_map(|&field| {
            extract_field(text, field, record.text_field(field)).map(|m| (field, m))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
| فیلد | مقدار |
|---|---|
| متا تایتل | خرید پاد XROS 4 |
| متا دسکریپشن | --- |
| عنوان (H1) | **پاد ویپرسو XROS 4** |
| پیوند یکتا | vaporesso-xros-4 |
| متن جایگزین عکس اصلی | تصویر اصلی |
";

    #[test]
    fn test_extract_field_first_match_wins() {
        let found = extract_field(TABLE, RecordField::Title, None);
        assert_eq!(
            found,
            Some(FieldMatch {
                value: "پاد ویپرسو XROS 4".to_string(),
                pattern: "table-row",
            })
        );
    }

    #[test]
    fn test_extract_field_skips_known_values() {
        assert_eq!(extract_field(TABLE, RecordField::Title, Some("From JSON")), None);
        assert!(extract_field(TABLE, RecordField::Title, Some("  ")).is_some());
    }

    #[test]
    fn test_separator_value_falls_through() {
        let text = format!("{TABLE}\nMeta Description: Real description\n");
        let found = extract_field(&text, RecordField::MetaDescription, None);
        assert_eq!(
            found,
            Some(FieldMatch {
                value: "Real description".to_string(),
                pattern: "english-label",
            })
        );
    }

    #[test]
    fn test_extract_fields_respects_record() {
        let record = ContentRecord {
            meta_title: "JSON meta".to_string(),
            ..ContentRecord::default()
        };
        let found = extract_fields(TABLE, &record);

        assert!(!found.contains_key(&RecordField::MetaTitle));
        assert!(!found.contains_key(&RecordField::MetaDescription));
        assert_eq!(
            found.get(&RecordField::Slug).map(|m| m.value.as_str()),
            Some("vaporesso-xros-4")
        );
        assert_eq!(
            found.get(&RecordField::AltMain).map(|m| m.value.as_str()),
            Some("تصویر اصلی")
        );
    }

    #[test]
    fn test_markdown_heading_title_is_last_resort() {
        let text = "# VAPORESSO XROS 4\n\nbody";
        let found = extract_field(text, RecordField::Title, None);
        assert_eq!(found.map(|m| m.pattern), Some("markdown-heading"));
    }
}
