//! Short-description section extraction.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::options::Options;
use crate::text::clean_description;

/// Section headers, most specific first. Each match ends at the first
/// non-blank character after the header line.
static SECTION_HEADERS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("numbered-heading", r"###\s*[۲2]\s*[.)|]\s*توضیح کوتاه محصول[^\n]*\n\s*"),
        ("heading", r"##\s*توضیح کوتاه محصول[^\n]*\n\s*"),
        // Alone on its line, so a table cell holding the label is not a header.
        ("label", r"(?m)^[ \t*]*توضیح کوتاه محصول[ \t*]*:?[ \t*]*\n\s*"),
        ("english-heading", r"(?im)^#*[ \t]*short\s+description[^\n]*\n\s*"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("short description header regex")))
    .collect()
});

/// End of a section: a heading, fence or div after a blank line, or right
/// at the start of the section.
static SECTION_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\n[ \t]*\n)\s*(?:#|```|<div)").expect("SECTION_END regex")
});

/// Extract the labeled short-description section as capped plain text.
///
/// Returns the cleaned value and the name of the header that matched.
#[must_use]
pub fn extract_short_description(text: &str, opts: &Options) -> Option<(String, &'static str)> {
    SECTION_HEADERS.iter().find_map(|(name, header)| {
        let start = header.find(text)?.end();
        let body = &text[start..];
        let end = SECTION_END.find(body).map_or(body.len(), |m| m.start());

        let value = clean_description(&body[..end], opts.short_description_cap, &opts.ellipsis);
        (!value.is_empty()).then_some((value, *name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_heading_section() {
        let text = "### ۲) توضیح کوتاه محصول\n\nپاد **سبک** و\nجمع‌وجور.\n\n### ۳) کد HTML\n<div>x</div>";
        let found = extract_short_description(text, &Options::default());
        assert_eq!(
            found,
            Some(("پاد سبک و جمع‌وجور.".to_string(), "numbered-heading"))
        );
    }

    #[test]
    fn test_section_stops_at_div() {
        let text = "## توضیح کوتاه محصول\nFirst.\n\n<div>body</div>";
        let found = extract_short_description(text, &Options::default());
        assert_eq!(found.map(|f| f.0).as_deref(), Some("First."));
    }

    #[test]
    fn test_section_runs_to_end_of_text() {
        let text = "توضیح کوتاه محصول:\nOnly line";
        let found = extract_short_description(text, &Options::default());
        assert_eq!(found, Some(("Only line".to_string(), "label")));
    }

    #[test]
    fn test_label_must_stand_alone_on_its_line() {
        let text = "| توضیح کوتاه محصول | خلاصه |\n| عنوان (H1) | T |\n| متا تایتل | M |\n";
        assert_eq!(extract_short_description(text, &Options::default()), None);

        let text = "**توضیح کوتاه محصول:**\nپاد سبک.";
        let found = extract_short_description(text, &Options::default());
        assert_eq!(found, Some(("پاد سبک.".to_string(), "label")));
    }

    #[test]
    fn test_long_section_is_capped() {
        let text = format!("## توضیح کوتاه محصول\n{}", "ب".repeat(500));
        let found = extract_short_description(&text, &Options::default());
        let Some((value, _)) = found else {
            panic!("expected a description");
        };
        assert_eq!(value.chars().count(), 300);
        assert!(value.ends_with("..."));
    }

    #[test]
    fn test_empty_section_is_not_found() {
        let text = "## توضیح کوتاه محصول\n\n```html\n<div>x</div>\n```";
        assert_eq!(extract_short_description(text, &Options::default()), None);
    }

    #[test]
    fn test_english_header() {
        let text = "## Short Description\nA compact pod kit.\n\n## Features";
        let found = extract_short_description(text, &Options::default());
        assert_eq!(found, Some(("A compact pod kit.".to_string(), "english-heading")));
    }
}
