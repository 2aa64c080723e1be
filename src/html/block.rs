//! Main HTML block location.
//!
//! Generator prompts ask for a styled wrapper `<div>`; older prompt versions
//! put the markup in a fenced block or under a numbered section. The
//! heuristics run from the most specific marker to the most permissive
//! structural match, first non-empty fragment wins.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use super::HtmlMethod;

static TAHOMA_WRAPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<div[^>]*style\s*=\s*["'][^"']*font-family:\s*['"]?\s*Tahoma.*</div>\s*\z"#)
        .expect("TAHOMA_WRAPPER regex")
});

/// A fenced `html` block; a missing closing fence runs to end of text.
static FENCED_HTML: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```[ \t]*html[ \t]*\n?(.*?)(?:```|\z)").expect("FENCED_HTML regex")
});

static RTL_DIV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<div[^>]*direction\s*:\s*rtl[^>]*>.*</div>\s*\z").expect("RTL_DIV regex")
});

/// "Step 3: HTML code", in the Persian and English prompt layouts.
static SECTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)###\s*[۳3]\s*[.)]\s*کد\s*HTML[^\n]*|step\s*3\s*[:.)-]?\s*HTML[^\n]*")
        .expect("SECTION_MARKER regex")
});

static ANY_DIV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<div[^>]*>.*</div>").expect("ANY_DIV regex"));

static DIV_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)div\b[^>]*>").expect("DIV_TAG regex"));

/// A located fragment and the heuristic that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlBlock {
    pub html: String,
    pub method: HtmlMethod,
}

/// Locate the main HTML fragment.
///
/// The fragment is returned raw; callers strip leaked JSON and sanitize it.
///
/// ```
/// use gen_content_parser::html::{extract_block, HtmlMethod};
///
/// let block = extract_block("intro\n```html\n<div>x</div>\n```\n");
/// assert_eq!(block.map(|b| b.method), Some(HtmlMethod::FencedHtml));
/// ```
#[must_use]
pub fn extract_block(text: &str) -> Option<HtmlBlock> {
    HtmlMethod::ORDER.into_iter().find_map(|method| {
        let html = match method {
            HtmlMethod::TahomaWrapper => TAHOMA_WRAPPER.find(text).map(|m| m.as_str()),
            HtmlMethod::FencedHtml => FENCED_HTML
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str()),
            HtmlMethod::RtlDiv => RTL_DIV.find(text).map(|m| m.as_str()),
            HtmlMethod::SectionMarker => after_section_marker(text),
            HtmlMethod::AnyDiv => ANY_DIV.find(text).map(|m| m.as_str()),
        }?
        .trim();

        if html.is_empty() {
            return None;
        }
        tracing::debug!(method = method.name(), bytes = html.len(), "html block located");
        Some(HtmlBlock {
            html: html.to_string(),
            method,
        })
    })
}

/// The first balanced `<div>…</div>` after the section marker. An unclosed
/// div runs to end of text; tag repair closes it later.
fn after_section_marker(text: &str) -> Option<&str> {
    let after = SECTION_MARKER.find(text)?.end();
    let rest = &text[after..];

    let mut depth = 0usize;
    let mut start = None;
    for caps in DIV_TAG.captures_iter(rest) {
        let (Some(tag), Some(slash)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if slash.as_str().is_empty() {
            if depth == 0 {
                start.get_or_insert(tag.start());
            }
            depth += 1;
        } else if depth > 0 {
            depth -= 1;
            if depth == 0 {
                return start.map(|s| &rest[s..tag.end()]);
            }
        }
    }

    start.map(|s| &rest[s..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method_of(text: &str) -> Option<HtmlMethod> {
        extract_block(text).map(|b| b.method)
    }

    #[test]
    fn test_tahoma_wrapper_spans_to_end() {
        let text = "| متا تایتل | x |\n\n<div style=\"font-family: Tahoma, Arial; direction: rtl;\"><div>a</div>\n<p>b</p></div>\n";
        let block = extract_block(text);
        let Some(block) = block else {
            panic!("expected a block");
        };
        assert_eq!(block.method, HtmlMethod::TahomaWrapper);
        assert!(block.html.starts_with("<div style=\"font-family: Tahoma"));
        assert!(block.html.ends_with("<p>b</p></div>"));
    }

    #[test]
    fn test_tahoma_wrapper_requires_end_of_text() {
        let text = "<div style=\"font-family: Tahoma\">a</div>\nthanks!";
        assert_ne!(method_of(text), Some(HtmlMethod::TahomaWrapper));
    }

    #[test]
    fn test_fenced_html() {
        let block = extract_block("x\n```html\n<section>y</section>\n```\nz");
        assert_eq!(
            block,
            Some(HtmlBlock {
                html: "<section>y</section>".to_string(),
                method: HtmlMethod::FencedHtml,
            })
        );
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let block = extract_block("```HTML\n<section><p>cut off");
        assert_eq!(block.map(|b| b.html).as_deref(), Some("<section><p>cut off"));
    }

    #[test]
    fn test_empty_fence_falls_through() {
        let text = "```html\n```\n<div class=\"x\">fallback</div>";
        assert_eq!(method_of(text), Some(HtmlMethod::AnyDiv));
    }

    #[test]
    fn test_rtl_div() {
        let text = "intro\n<div dir=\"auto\" style=\"direction: rtl\">x</div>";
        assert_eq!(method_of(text), Some(HtmlMethod::RtlDiv));
    }

    #[test]
    fn test_section_marker_takes_balanced_div() {
        let text = "### ۳. کد HTML\n\n<section>\n<div><div>a</div></div>\n<div>b</div> trailing";
        let block = extract_block(text);
        assert_eq!(
            block,
            Some(HtmlBlock {
                html: "<div><div>a</div></div>".to_string(),
                method: HtmlMethod::SectionMarker,
            })
        );
    }

    #[test]
    fn test_section_marker_unclosed_div() {
        let text = "Step 3: HTML code\n<div><p>truncated";
        let block = extract_block(text);
        assert_eq!(block.map(|b| b.html).as_deref(), Some("<div><p>truncated"));
    }

    #[test]
    fn test_any_div_last_resort() {
        let text = "a <div class=\"c\">x</div> b";
        let block = extract_block(text);
        assert_eq!(block.map(|b| b.html).as_deref(), Some("<div class=\"c\">x</div>"));
    }

    #[test]
    fn test_no_html() {
        assert_eq!(extract_block("just prose, no markup"), None);
        assert_eq!(extract_block(""), None);
    }
}
