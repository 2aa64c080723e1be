//! Compiled regex patterns shared across the pipeline.
//!
//! All patterns are compiled once on first use via `LazyLock`. Patterns that
//! belong to one component only (field table rows, HTML heuristics, sanitizer
//! rules) live next to that component instead.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Markdown Patterns
// =============================================================================

/// Matches a code-fence marker with an optional language label (```` ```html ````).
pub static CODE_FENCE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```[A-Za-z0-9_-]*").expect("CODE_FENCE_MARKER regex")
});

/// Matches `**bold**` spans.
pub static MARKDOWN_BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^*]+)\*\*").expect("MARKDOWN_BOLD regex")
});

/// Matches `__bold__` spans.
pub static MARKDOWN_BOLD_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"__([^_]+)__").expect("MARKDOWN_BOLD_UNDERSCORE regex")
});

/// Matches `*emphasis*` spans on a single line.
pub static MARKDOWN_EMPHASIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*([^*\n]+)\*").expect("MARKDOWN_EMPHASIS regex")
});

/// Matches `[text](url)` links.
pub static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\([^)]*\)").expect("MARKDOWN_LINK regex")
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

/// Matches values made only of separator punctuation (`---`, ```` ``` ````, `|`).
pub static SEPARATOR_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\s\-–—=_*`|:~.]*$").expect("SEPARATOR_TOKEN regex")
});

/// Matches any markup tag.
pub static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>").expect("HTML_TAG regex")
});
