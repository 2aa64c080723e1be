//! Byte-input decoding.
//!
//! Generation text normally arrives as UTF-8, but queue rows and stdin
//! pipes occasionally hand over UTF-16 with a BOM or a legacy Windows
//! code page declared in an HTML `<meta>`. Unlike page extraction, a
//! malformed byte sequence here means the input is not usable text, so
//! decoding is strict.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// How much of the input is searched for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>/]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Detect the encoding of raw generation bytes.
///
/// Order: byte-order mark, `<meta charset>`, `<meta http-equiv>` in the
/// first 1024 bytes, then UTF-8. Also returns the BOM length to skip.
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> (&'static Encoding, usize) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return (encoding, bom_len);
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(SNIFF_LEN)]);
    let declared = CHARSET_META_RE
        .captures(&head)
        .or_else(|| CONTENT_TYPE_CHARSET_RE.captures(&head))
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()));

    // A UTF-16 label in an ASCII-compatible document is a lie.
    match declared {
        Some(encoding) if encoding.is_ascii_compatible() => (encoding, 0),
        _ => (UTF_8, 0),
    }
}

/// Decode raw generation bytes into text.
///
/// # Errors
///
/// Returns [`Error::Encoding`] when the bytes are malformed for the detected
/// encoding or contain NUL characters (binary data, or UTF-16 without BOM).
///
/// ```
/// use gen_content_parser::encoding::decode_generation_bytes;
///
/// let text = decode_generation_bytes("\u{FEFF}سلام".as_bytes());
/// assert_eq!(text.ok().as_deref(), Some("سلام"));
/// assert!(decode_generation_bytes(b"ok \xFF\xFE").is_err());
/// ```
pub fn decode_generation_bytes(bytes: &[u8]) -> Result<String> {
    let (encoding, bom_len) = detect_encoding(bytes);

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .ok_or_else(|| {
            Error::Encoding(format!("malformed {} byte sequence", encoding.name()))
        })?;

    if text.contains('\0') {
        return Err(Error::Encoding("input contains NUL characters".to_string()));
    }

    tracing::debug!(encoding = encoding.name(), bytes = bytes.len(), "decoded input");
    Ok(text.into_owned())
}
