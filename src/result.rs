//! Result types for assembly output.
//!
//! This module defines the normalized content record handed to the
//! persistence layer, along with per-field provenance.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::html::HtmlMethod;
use crate::options::Options;
use crate::slug;

/// Image alt texts for the four product image slots.
///
/// Empty strings mean "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AltTexts {
    /// Main product image.
    pub main: String,

    /// Colour-variants image.
    pub colors: String,

    /// Packaging (box) image.
    pub r#box: String,

    /// Pod/cartridge image.
    pub pod: String,
}

/// One question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Logical fields of a [`ContentRecord`], used as provenance keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    Title,
    Slug,
    MetaTitle,
    MetaDescription,
    ShortDescription,
    HtmlBody,
    Excerpt,
    AltMain,
    AltColors,
    AltBox,
    AltPod,
    CustomFields,
    Faq,
    Category,
    Tags,
}

/// Where a field's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "kebab-case")]
pub enum Source {
    /// The embedded JSON block.
    Json,
    /// A named entry of the field pattern table.
    Pattern(&'static str),
    /// A labeled section of the text (short description, FAQ).
    Section(&'static str),
    /// The first `<h1>` of the HTML body.
    HtmlHeading,
    /// A named HTML block heuristic.
    HtmlBlock(HtmlMethod),
    /// Synthesized by the fallback builder.
    Fallback,
    /// Timestamped placeholder.
    Placeholder,
    /// Computed from another field (slug from title).
    Derived,
}

/// The assembled, validated output of one pipeline run.
///
/// `title` and `html_body` are never empty; optional text fields use the
/// empty string for "absent".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Display title (H1).
    pub title: String,

    /// Lowercase ASCII slug: letters, digits, single hyphens.
    pub slug: String,

    /// SEO title.
    pub meta_title: String,

    /// SEO description.
    pub meta_description: String,

    /// Plain-text short description, length-capped.
    pub short_description: String,

    /// Sanitized, tag-balanced body markup.
    pub html_body: String,

    /// Plain-text introduction paragraph taken from the body.
    pub excerpt: String,

    pub alt_texts: AltTexts,

    /// Structured attributes keyed by the known field vocabulary.
    pub custom_fields: BTreeMap<String, String>,

    /// Question/answer pairs in document order.
    pub faq: Vec<FaqEntry>,

    /// Post category (post-shaped JSON only).
    pub category: Option<String>,

    /// Post tags (post-shaped JSON only).
    pub tags: Vec<String>,

    /// True when `title` is the timestamped placeholder.
    ///
    /// Callers in post-creation flows may want to reject such records.
    pub title_is_placeholder: bool,

    /// Extraction method per populated field.
    pub sources: BTreeMap<RecordField, Source>,

    /// Fallback paths taken while assembling.
    pub warnings: Vec<String>,
}

impl ContentRecord {
    /// Check the output invariants.
    ///
    /// A failure here is an assembler bug, never an input problem.
    pub fn validate(&self, opts: &Options) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvariantViolation("title is empty".to_string()));
        }
        if self.html_body.trim().is_empty() {
            return Err(Error::InvariantViolation("html body is empty".to_string()));
        }
        if self.html_body.to_ascii_lowercase().contains("<script") {
            return Err(Error::InvariantViolation(
                "html body contains a script element".to_string(),
            ));
        }
        if !slug::is_valid_slug(&self.slug) {
            return Err(Error::InvariantViolation(format!(
                "slug {:?} is not lowercase ascii/digits/hyphens",
                self.slug
            )));
        }
        let len = self.short_description.chars().count();
        if len > opts.short_description_cap {
            return Err(Error::InvariantViolation(format!(
                "short description has {len} chars, cap is {}",
                opts.short_description_cap
            )));
        }
        Ok(())
    }

    /// Provenance of a field, if it was populated.
    #[must_use]
    pub fn source_of(&self, field: RecordField) -> Option<Source> {
        self.sources.get(&field).copied()
    }

    /// The value of a plain-text field; `None` for structured fields.
    #[must_use]
    pub fn text_field(&self, field: RecordField) -> Option<&str> {
        let value = match field {
            RecordField::Title => &self.title,
            RecordField::Slug => &self.slug,
            RecordField::MetaTitle => &self.meta_title,
            RecordField::MetaDescription => &self.meta_description,
            RecordField::ShortDescription => &self.short_description,
            RecordField::HtmlBody => &self.html_body,
            RecordField::Excerpt => &self.excerpt,
            RecordField::AltMain => &self.alt_texts.main,
            RecordField::AltColors => &self.alt_texts.colors,
            RecordField::AltBox => &self.alt_texts.r#box,
            RecordField::AltPod => &self.alt_texts.pod,
            RecordField::CustomFields
            | RecordField::Faq
            | RecordField::Category
            | RecordField::Tags => return None,
        };
        Some(value.as_str())
    }

    /// Mutable access to a plain-text field.
    pub fn text_field_mut(&mut self, field: RecordField) -> Option<&mut String> {
        match field {
            RecordField::Title => Some(&mut self.title),
            RecordField::Slug => Some(&mut self.slug),
            RecordField::MetaTitle => Some(&mut self.meta_title),
            RecordField::MetaDescription => Some(&mut self.meta_description),
            RecordField::ShortDescription => Some(&mut self.short_description),
            RecordField::HtmlBody => Some(&mut self.html_body),
            RecordField::Excerpt => Some(&mut self.excerpt),
            RecordField::AltMain => Some(&mut self.alt_texts.main),
            RecordField::AltColors => Some(&mut self.alt_texts.colors),
            RecordField::AltBox => Some(&mut self.alt_texts.r#box),
            RecordField::AltPod => Some(&mut self.alt_texts.pod),
            RecordField::CustomFields
            | RecordField::Faq
            | RecordField::Category
            | RecordField::Tags => None,
        }
    }

    /// Fill an empty text field and record where the value came from.
    ///
    /// Returns `false` and leaves the record alone when the field already
    /// holds a value or `value` is blank.
    pub fn fill(&mut self, field: RecordField, value: String, source: Source) -> bool {
        if value.trim().is_empty() {
            return false;
        }
        match self.text_field_mut(field) {
            Some(slot) if slot.is_empty() => {
                *slot = value;
                self.sources.insert(field, source);
                true
            }
            _ => false,
        }
    }

    /// Record a fallback path.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "fallback path taken");
        self.warnings.push(message);
    }
}
