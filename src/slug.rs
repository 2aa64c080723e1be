//! Slug derivation.

use crate::text::persian_to_english_digits;

/// Derive a URL slug: lowercase ASCII letters, digits and single hyphens.
///
/// Whitespace becomes a hyphen, everything else outside `[a-z0-9-]` is
/// dropped, hyphen runs collapse, and leading/trailing hyphens are trimmed.
/// The result may be empty for titles with no ASCII content.
///
/// ```
/// use gen_content_parser::slug::derive_slug;
///
/// assert_eq!(derive_slug("VAPORESSO XROS 4!!"), "vaporesso-xros-4");
/// ```
#[must_use]
pub fn derive_slug(title: &str) -> String {
    let title = persian_to_english_digits(title).to_lowercase();

    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        let mapped = if c.is_whitespace() || c == '_' {
            Some('-')
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            Some(c)
        } else {
            None
        };

        if let Some(m) = mapped {
            if m == '-' && (slug.is_empty() || slug.ends_with('-')) {
                continue;
            }
            slug.push(m);
        }
    }

    slug.trim_end_matches('-').to_string()
}

/// Whether `slug` satisfies the record invariant.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Append a uniqueness token, or fall back to `prefix-token` for an empty base.
#[must_use]
pub fn with_token(base: &str, prefix: &str, token: i64) -> String {
    let base = if base.is_empty() {
        derive_slug(prefix)
    } else {
        base.to_string()
    };
    let token = token.unsigned_abs();

    if base.is_empty() {
        token.to_string()
    } else {
        format!("{base}-{token}")
    }
}
