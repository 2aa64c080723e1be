//! Embedded JSON block extraction.
//!
//! Generators append a JSON object with SEO fields, alt texts and custom
//! fields, either inside a ```` ```json ```` fence or as a bare object at the
//! very end of the text. The object is decoded into `serde_json::Value` and
//! read defensively: every sub-field is optional and a wrong type is treated
//! as absent, never as an error. Truncated or malformed JSON is expected and
//! yields `None`.

#![allow(clippy::expect_used)]

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Default size of the tail window scanned for a bare trailing object.
pub const DEFAULT_TAIL_WINDOW: usize = 16 * 1024;

/// A fenced block labeled `json`, including its fence markers.
static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```[ \t]*json[ \t]*\n?(.*?)```").expect("FENCED_JSON regex")
});

/// `seo` sub-object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeoBlock {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub h1_title: Option<String>,
    pub slug: Option<String>,
}

/// `altTexts` sub-object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AltTextBlock {
    pub main: Option<String>,
    pub colors: Option<String>,
    pub r#box: Option<String>,
    pub pod: Option<String>,
}

/// `post` sub-object emitted by the blog-post prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostBlock {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

/// The recognized shape of an embedded JSON block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedJson {
    pub seo: SeoBlock,
    pub alt_texts: AltTextBlock,
    pub short_description: Option<String>,
    /// Raw custom fields; list values are joined with `", "`.
    pub custom_fields: BTreeMap<String, String>,
    pub post: Option<PostBlock>,
}

/// How the block was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonBlockKind {
    /// ```` ```json ```` fence.
    Fenced,
    /// Bare object ending the text.
    Trailing,
}

/// A located JSON block: its byte span in the searched text and its content.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBlock {
    pub kind: JsonBlockKind,
    /// Span to delete from the text, fence markers included.
    pub span: Range<usize>,
    /// `None` when the span was identified but did not decode.
    pub data: Option<ExtractedJson>,
}

/// Extract the embedded JSON object, if any decodes.
///
/// Only the first fenced block is considered canonical. When it is missing
/// or does not decode, a bare object at the end of the text is tried.
///
/// ```
/// use gen_content_parser::json_block::extract;
///
/// let raw = "text\n```json\n{\"seo\": {\"slug\": \"xros-4\"}}\n```";
/// let json = extract(raw).map(|j| j.seo.slug);
/// assert_eq!(json, Some(Some("xros-4".to_string())));
/// ```
#[must_use]
pub fn extract(raw: &str) -> Option<ExtractedJson> {
    locate(raw, DEFAULT_TAIL_WINDOW).and_then(|block| block.data)
}

/// Delete the identified JSON span from the text.
///
/// A fenced `json` block is removed even when it does not decode, so its
/// punctuation never reaches the table extractors. A trailing bare object is
/// removed only when it decoded.
#[must_use]
pub fn remove_block(raw: &str) -> String {
    remove_block_with_window(raw, DEFAULT_TAIL_WINDOW)
}

/// [`remove_block`] with an explicit tail window.
#[must_use]
pub fn remove_block_with_window(raw: &str, window: usize) -> String {
    let mut text = raw.to_string();

    if let Some(m) = FENCED_JSON.find(&text) {
        text.replace_range(m.range(), "");
    }
    if let Some(span) = locate_trailing(&text, window).map(|(span, _)| span) {
        text.replace_range(span, "");
    }

    text
}

/// Find the JSON block and report its span and decoded content.
#[must_use]
pub fn locate(raw: &str, window: usize) -> Option<JsonBlock> {
    let fenced = FENCED_JSON.captures(raw).and_then(|caps| {
        let whole = caps.get(0)?;
        let body = caps.get(1)?;
        Some((whole.range(), decode(body.as_str().trim())))
    });

    match fenced {
        Some((span, Some(data))) => Some(JsonBlock {
            kind: JsonBlockKind::Fenced,
            span,
            data: Some(data),
        }),
        Some((span, None)) => {
            tracing::debug!("fenced json block did not decode");
            locate_trailing(raw, window)
                .map(|(span, data)| JsonBlock {
                    kind: JsonBlockKind::Trailing,
                    span,
                    data: Some(data),
                })
                .or(Some(JsonBlock {
                    kind: JsonBlockKind::Fenced,
                    span,
                    data: None,
                }))
        }
        None => locate_trailing(raw, window).map(|(span, data)| JsonBlock {
            kind: JsonBlockKind::Trailing,
            span,
            data: Some(data),
        }),
    }
}

/// Scan backwards from the end of the text, within `window` bytes, for a
/// `{` that opens an object running exactly to the final `}`.
///
/// Candidates are tried outermost first; the first that decodes wins. A
/// candidate that fails to decode is discarded, never repaired.
fn locate_trailing(raw: &str, window: usize) -> Option<(Range<usize>, ExtractedJson)> {
    let trimmed = raw.trim_end();
    if !trimmed.ends_with('}') {
        return None;
    }
    let end = trimmed.len();

    let mut floor = end.saturating_sub(window);
    while !trimmed.is_char_boundary(floor) {
        floor += 1;
    }

    for (offset, _) in trimmed[floor..end].match_indices('{') {
        let start = floor + offset;
        if let Some(data) = decode(&trimmed[start..end]) {
            return Some((start..end, data));
        }
    }

    None
}

/// Decode a candidate; only JSON objects are accepted.
fn decode(candidate: &str) -> Option<ExtractedJson> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(from_object(&map)),
        Ok(_) => None,
        Err(err) => {
            tracing::debug!(error = %err, "json candidate rejected");
            None
        }
    }
}

fn from_object(map: &Map<String, Value>) -> ExtractedJson {
    let seo = map.get("seo").and_then(Value::as_object).map_or_else(SeoBlock::default, |seo| {
        SeoBlock {
            meta_title: get_string(seo, "metaTitle"),
            meta_description: get_string(seo, "metaDescription"),
            h1_title: get_string(seo, "h1Title"),
            slug: get_string(seo, "slug"),
        }
    });

    let alt_texts = map
        .get("altTexts")
        .and_then(Value::as_object)
        .map_or_else(AltTextBlock::default, |alt| AltTextBlock {
            main: get_string(alt, "main"),
            colors: get_string(alt, "colors"),
            r#box: get_string(alt, "box"),
            pod: get_string(alt, "pod"),
        });

    let custom_fields = map
        .get("customFields")
        .and_then(Value::as_object)
        .map(|fields| {
            fields
                .iter()
                .filter_map(|(k, v)| flatten_field_value(v).map(|v| (k.clone(), v)))
                .collect()
        })
        .unwrap_or_default();

    let post = map.get("post").and_then(Value::as_object).map(|post| PostBlock {
        title: get_string(post, "title"),
        slug: get_string(post, "slug"),
        meta_title: get_string(post, "metaTitle"),
        meta_description: get_string(post, "metaDescription"),
        category: get_string(post, "category"),
        tags: get_string_list(post, "tags"),
    });

    ExtractedJson {
        seo,
        alt_texts,
        short_description: get_string(map, "shortDescription"),
        custom_fields,
        post,
    }
}

/// Non-empty trimmed string at `key`.
fn get_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Non-empty trimmed strings of the array at `key`.
fn get_string_list(map: &Map<String, Value>, key: &str) -> Vec<String> {
    map.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// A custom-field value: a string, a number, or a list joined with `", "`.
fn flatten_field_value(value: &Value) -> Option<String> {
    let flat = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    };

    (!flat.is_empty()).then_some(flat)
}
