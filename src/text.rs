//! Low-level text cleaning helpers.
//!
//! Every string the field cascade accepts passes through here first. All
//! functions are pure `&str -> String` transforms.

use crate::patterns::{
    CODE_FENCE_MARKER, HTML_TAG, MARKDOWN_BOLD, MARKDOWN_BOLD_UNDERSCORE, MARKDOWN_EMPHASIS,
    MARKDOWN_LINK, SEPARATOR_TOKEN, WHITESPACE_NORMALIZE,
};

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];
const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Characters that carry no meaning in generated text.
///
/// ZWNJ (U+200C) and ZWJ (U+200D) are kept: Persian orthography relies on them.
const INVISIBLE_CHARS: [char; 5] = ['\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{2060}', '\u{180E}'];

/// Normalize CRLF and lone CR line endings to LF.
#[must_use]
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Remove zero-width spaces, BOMs, soft hyphens and word joiners.
#[must_use]
pub fn remove_invisible_chars(text: &str) -> String {
    text.replace(INVISIBLE_CHARS, "")
}

/// Prepare raw generation text for the extractors.
///
/// Works on a copy; the caller's input is never modified.
#[must_use]
pub fn normalize_input(raw: &str) -> String {
    remove_invisible_chars(&normalize_line_endings(raw))
}

/// Remove every code-fence marker, keeping the fenced content.
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE_MARKER.replace_all(text, "").into_owned()
}

/// Reduce `**bold**` and `__bold__` to their text.
#[must_use]
pub fn strip_markdown_bold(text: &str) -> String {
    let text = MARKDOWN_BOLD.replace_all(text, "$1");
    MARKDOWN_BOLD_UNDERSCORE.replace_all(&text, "$1").into_owned()
}

/// Reduce bold and single-star emphasis to their text.
#[must_use]
pub fn strip_markdown_emphasis(text: &str) -> String {
    let text = strip_markdown_bold(text);
    MARKDOWN_EMPHASIS.replace_all(&text, "$1").into_owned()
}

/// Reduce `[text](url)` links to their text.
#[must_use]
pub fn strip_markdown_links(text: &str) -> String {
    MARKDOWN_LINK.replace_all(text, "$1").into_owned()
}

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}

/// Drop markup tags, keeping text.
#[must_use]
pub fn strip_tags(text: &str) -> String {
    HTML_TAG.replace_all(text, " ").into_owned()
}

/// Transliterate Persian and Arabic-Indic digits to ASCII.
///
/// ```
/// use gen_content_parser::text::persian_to_english_digits;
///
/// assert_eq!(persian_to_english_digits("۱۵۰۰ mAh"), "1500 mAh");
/// ```
#[must_use]
pub fn persian_to_english_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            PERSIAN_DIGITS
                .iter()
                .chain(ARABIC_INDIC_DIGITS.iter())
                .position(|&d| d == c)
                .and_then(|i| char::from_digit(u32::try_from(i % 10).unwrap_or(0), 10))
                .unwrap_or(c)
        })
        .collect()
}

/// Transliterate ASCII digits to Persian digits.
#[must_use]
pub fn english_to_persian_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            c.to_digit(10)
                .and_then(|d| PERSIAN_DIGITS.get(d as usize).copied())
                .unwrap_or(c)
        })
        .collect()
}

/// Cap `text` at `cap` characters.
///
/// A cut value is exactly `cap` characters long and ends with `ellipsis`.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, cap: usize, ellipsis: &str) -> String {
    if text.chars().count() <= cap {
        return text.to_string();
    }

    let marker_len = ellipsis.chars().count();
    if cap <= marker_len {
        return ellipsis.chars().take(cap).collect();
    }

    let mut out: String = text.chars().take(cap - marker_len).collect();
    out.push_str(ellipsis);
    out
}

/// Whether a value is nothing but separator punctuation.
#[must_use]
pub fn is_separator_token(text: &str) -> bool {
    SEPARATOR_TOKEN.is_match(text)
}

/// Clean a raw field capture, or reject it as junk.
///
/// Strips stray fence markers and bold, trims separator dashes and pipes at
/// both ends, and collapses whitespace. Returns `None` when nothing
/// meaningful remains, so the cascade moves on to the next pattern.
#[must_use]
pub fn clean_field_value(raw: &str) -> Option<String> {
    let value = strip_markdown_bold(&strip_code_fences(raw));
    let value = value.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, '-' | '–' | '—' | '|' | '*' | '`')
    });
    let value = collapse_whitespace(value);

    if is_separator_token(&value) {
        None
    } else {
        Some(value)
    }
}

/// Turn a description-like value into capped plain text.
#[must_use]
pub fn clean_description(raw: &str, cap: usize, ellipsis: &str) -> String {
    let text = strip_markdown_emphasis(&strip_tags(&strip_code_fences(raw)));
    truncate_with_ellipsis(&collapse_whitespace(&text), cap, ellipsis)
}
