//! # gen-content-parser
//!
//! Turns loosely-structured, LLM-generated product and post text (Persian or
//! English) into a normalized, validated content record.
//!
//! Generation output mixes markdown tables, labeled sections, fenced code
//! blocks, a styled HTML body and an embedded JSON object, with formatting
//! drift from one prompt version to the next. This library runs a fixed
//! cascade of extractors over that text and always returns a complete record.
//!
//! ## Quick Start
//!
//! ```rust
//! use gen_content_parser::assemble;
//!
//! let raw = concat!(
//!     "| متا تایتل | ویپ پاد XROS 4 |\n",
//!     "| عنوان (H1) | ویپ پاد ویپرسو XROS 4 |\n\n",
//!     "<div><h1>ویپ پاد ویپرسو XROS 4</h1><p>سبک و جمع‌وجور.</p></div>\n\n",
//!     r#"{"seo": {"slug": "vaporesso-xros-4"}}"#,
//! );
//!
//! let record = assemble(raw);
//! assert_eq!(record.meta_title, "ویپ پاد XROS 4");
//! assert_eq!(record.slug, "vaporesso-xros-4");
//! assert!(record.html_body.contains("direction: rtl"));
//! ```
//!
//! ## Extraction order
//!
//! - **Embedded JSON**: a fenced ```` ```json ```` block or a bare trailing
//!   object; every field it defines wins
//! - **Field cascade**: declarative per-field patterns (tables, labels,
//!   headings) fill the gaps
//! - **HTML body**: located by marker heuristics, then sanitized, tag-balanced
//!   and styled for right-to-left display
//! - **Fallbacks**: synthesized body, `<h1>` or timestamped title, derived slug
//!
//! Every populated field records the method that produced it in
//! [`ContentRecord::sources`]; fallback paths are listed in
//! [`ContentRecord::warnings`].

mod assemble;
mod error;
mod options;
mod patterns;
mod result;

/// Text cleaning primitives (fences, markdown, digits, truncation).
pub mod text;

/// URL slug derivation.
pub mod slug;

/// Embedded JSON block location, decoding and removal.
pub mod json_block;

/// Field extraction cascade, short description, FAQ and custom fields.
pub mod fields;

/// HTML block location, sanitization, tag repair and fallback synthesis.
pub mod html;

/// Read-only DOM queries over the HTML body.
pub mod dom;

/// Character encoding detection and strict decoding of byte input.
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use html::HtmlMethod;
pub use options::Options;
pub use result::{AltTexts, ContentRecord, FaqEntry, RecordField, Source};

/// Assembles a content record from generation text using default options.
///
/// This never fails: malformed or empty input yields a record built from
/// fallbacks, with the fallback paths listed in `warnings`.
///
/// # Example
///
/// ```rust
/// use gen_content_parser::assemble;
///
/// let record = assemble("");
/// assert!(!record.title.is_empty());
/// assert!(!record.html_body.is_empty());
/// assert!(record.title_is_placeholder);
/// ```
#[must_use]
pub fn assemble(raw: &str) -> ContentRecord {
    assemble_with_options(raw, &Options::default())
}

/// Assembles a content record from generation text with custom options.
///
/// # Example
///
/// ```rust
/// use gen_content_parser::{assemble_with_options, Options};
///
/// let options = Options {
///     short_description_cap: 20,
///     ..Options::default()
/// };
/// let raw = "## توضیح کوتاه محصول\nاین یک توضیح بسیار طولانی برای آزمایش است.\n";
/// let record = assemble_with_options(raw, &options);
/// assert_eq!(record.short_description.chars().count(), 20);
/// assert!(record.short_description.ends_with("..."));
/// ```
#[must_use]
pub fn assemble_with_options(raw: &str, options: &Options) -> ContentRecord {
    assemble::assemble_record(raw, options)
}

/// Assembles a content record from raw bytes with encoding detection.
///
/// # Character Encoding
///
/// The encoding is detected from:
/// - a byte-order mark (UTF-8, UTF-16LE/BE)
/// - `<meta charset="...">`
/// - `<meta http-equiv="Content-Type" content="...; charset=...">`
/// - Defaults to UTF-8 if none is found
///
/// Unlike [`assemble`], this fails fast with [`Error::Encoding`] when the
/// bytes are not usable text.
///
/// # Example
///
/// ```rust
/// use gen_content_parser::{assemble_bytes, Error};
///
/// let record = assemble_bytes("| عنوان (H1) | XROS 4 |".as_bytes())?;
/// assert_eq!(record.title, "XROS 4");
///
/// assert!(matches!(assemble_bytes(b"\xC3\x28"), Err(Error::Encoding(_))));
/// # Ok::<(), gen_content_parser::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn assemble_bytes(raw: &[u8]) -> Result<ContentRecord> {
    assemble_bytes_with_options(raw, &Options::default())
}

/// Assembles a content record from raw bytes with custom options.
///
/// This combines [`assemble_bytes`] and [`assemble_with_options`].
///
/// # Example
///
/// ```rust
/// use gen_content_parser::{assemble_bytes_with_options, Options};
///
/// let options = Options {
///     slug_prefix: "post".to_string(),
///     ..Options::default()
/// };
/// let record = assemble_bytes_with_options(b"", &options)?;
/// assert!(record.slug.starts_with("post-"));
/// # Ok::<(), gen_content_parser::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn assemble_bytes_with_options(raw: &[u8], options: &Options) -> Result<ContentRecord> {
    let text = encoding::decode_generation_bytes(raw)?;
    Ok(assemble_with_options(&text, options))
}
