//! HTML body handling.
//!
//! - [`block`]: locate the main HTML fragment in generation text
//! - [`sanitize`]: strip executable content and junk, enforce presentation
//! - [`attributes`]: quote-aware start-tag scanning, unsafe attribute removal
//! - [`repair`]: tag tokenizer, empty-element removal, tag-balance repair
//! - [`fallback`]: synthesize a body from recovered fields

pub mod attributes;
pub mod block;
pub mod fallback;
pub mod repair;
pub mod sanitize;

use serde::Serialize;

pub use attributes::{is_script_url, strip_unsafe_attributes};
pub use block::{extract_block, HtmlBlock};
pub use fallback::{build_fallback, FallbackInput};
pub use repair::{remove_empty_elements, repair_tag_balance};
pub use sanitize::{clean, sanitize};

/// Heuristic that located the HTML block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HtmlMethod {
    /// `<div>` styled with the Tahoma font marker, running to end of text.
    TahomaWrapper,
    /// ```` ```html ```` fenced block.
    FencedHtml,
    /// `<div>` styled `direction: rtl`, running to end of text.
    RtlDiv,
    /// Balanced `<div>` after the "HTML code" step marker.
    SectionMarker,
    /// Any `<div>…</div>` span.
    AnyDiv,
}

impl HtmlMethod {
    /// Every heuristic, highest priority first.
    pub const ORDER: [Self; 5] = [
        Self::TahomaWrapper,
        Self::FencedHtml,
        Self::RtlDiv,
        Self::SectionMarker,
        Self::AnyDiv,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TahomaWrapper => "tahoma-wrapper",
            Self::FencedHtml => "fenced-html",
            Self::RtlDiv => "rtl-div",
            Self::SectionMarker => "section-marker",
            Self::AnyDiv => "any-div",
        }
    }
}
