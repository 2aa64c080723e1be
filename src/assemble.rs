//! Record assembly.
//!
//! Runs the extractors in a fixed linear order. Every step takes the text
//! and the partial record and returns the updated record; no step ever
//! overwrites a field an earlier step filled.

use chrono::{DateTime, Utc};

use crate::dom;
use crate::fields::{self, normalize_custom_fields};
use crate::html::{self, FallbackInput};
use crate::json_block::{self, ExtractedJson};
use crate::options::Options;
use crate::result::{ContentRecord, RecordField, Source};
use crate::slug::{derive_slug, with_token};
use crate::text::{clean_description, clean_field_value, normalize_input};

/// Assemble one record from raw generation text. Never fails.
pub(crate) fn assemble_record(raw: &str, opts: &Options) -> ContentRecord {
    let now = opts.now();
    let text = normalize_input(raw);
    tracing::debug!(chars = text.len(), "assembling content record");

    let json = json_block::locate(&text, opts.json_tail_window).and_then(|block| block.data);
    let text = json_block::remove_block_with_window(&text, opts.json_tail_window);

    let mut record = ContentRecord::default();

    // 1. Embedded JSON (highest priority)
    if let Some(ref json) = json {
        record = populate_from_json(json, record, opts);
    } else {
        tracing::debug!("no embedded json block");
    }

    // 2. Text cascade (fills gaps only)
    record = extract_table_fields(&text, record);
    record = extract_short_description(&text, record, opts);
    record = extract_faq(&text, record);

    // 3. Body
    record = extract_html_body(&text, record, opts);
    record = build_fallback_body(&text, record, opts);

    // 4. Required-field fallbacks
    record = resolve_title(record, opts, now);
    record = resolve_slug(record, opts, now);
    record = extract_excerpt(record, opts);

    if let Err(err) = record.validate(opts) {
        tracing::error!(error = %err, "assembled record violates invariants");
        debug_assert!(false, "assembled record violates invariants: {err}");
    }

    record
}

/// Copy every field the JSON defines into the record.
fn populate_from_json(json: &ExtractedJson, original: ContentRecord, opts: &Options) -> ContentRecord {
    let mut record = original;
    let post = json.post.as_ref();

    let single_line = [
        (
            RecordField::Title,
            json.seo.h1_title.as_ref().or(post.and_then(|p| p.title.as_ref())),
        ),
        (
            RecordField::MetaTitle,
            json.seo.meta_title.as_ref().or(post.and_then(|p| p.meta_title.as_ref())),
        ),
        (
            RecordField::MetaDescription,
            json.seo
                .meta_description
                .as_ref()
                .or(post.and_then(|p| p.meta_description.as_ref())),
        ),
        (RecordField::AltMain, json.alt_texts.main.as_ref()),
        (RecordField::AltColors, json.alt_texts.colors.as_ref()),
        (RecordField::AltBox, json.alt_texts.r#box.as_ref()),
        (RecordField::AltPod, json.alt_texts.pod.as_ref()),
    ];
    for (field, value) in single_line {
        if let Some(value) = value.and_then(|v| clean_field_value(v)) {
            record.fill(field, value, Source::Json);
        }
    }

    if let Some(slug) = json.seo.slug.as_ref().or(post.and_then(|p| p.slug.as_ref())) {
        record.fill(RecordField::Slug, derive_slug(slug), Source::Json);
    }

    if let Some(short) = json.short_description.as_ref() {
        let short = clean_description(short, opts.short_description_cap, &opts.ellipsis);
        record.fill(RecordField::ShortDescription, short, Source::Json);
    }

    record.custom_fields = normalize_custom_fields(&json.custom_fields, opts);
    if !record.custom_fields.is_empty() {
        record.sources.insert(RecordField::CustomFields, Source::Json);
    }

    if let Some(post) = post {
        if let Some(category) = post.category.as_deref().and_then(clean_field_value) {
            record.category = Some(category);
            record.sources.insert(RecordField::Category, Source::Json);
        }
        record.tags = post.tags.iter().filter_map(|t| clean_field_value(t)).collect();
        if !record.tags.is_empty() {
            record.sources.insert(RecordField::Tags, Source::Json);
        }
    }

    tracing::debug!(fields = record.sources.len(), "populated from json");
    record
}

/// Pattern-table cascade for the fields JSON left blank.
fn extract_table_fields(text: &str, original: ContentRecord) -> ContentRecord {
    let mut record = original;

    for (field, found) in fields::extract_fields(text, &record) {
        let value = if field == RecordField::Slug {
            derive_slug(&found.value)
        } else {
            found.value
        };
        if record.fill(field, value, Source::Pattern(found.pattern)) {
            tracing::debug!(?field, pattern = found.pattern, "field extracted");
        }
    }

    record
}

fn extract_short_description(text: &str, original: ContentRecord, opts: &Options) -> ContentRecord {
    let mut record = original;
    if !record.short_description.is_empty() {
        return record;
    }

    if let Some((value, header)) = fields::extract_short_description(text, opts) {
        record.fill(RecordField::ShortDescription, value, Source::Section(header));
    }
    record
}

fn extract_faq(text: &str, original: ContentRecord) -> ContentRecord {
    let mut record = original;
    record.faq = fields::extract_faq(text);
    if !record.faq.is_empty() {
        record.sources.insert(RecordField::Faq, Source::Section("faq"));
    }
    record
}

/// Locate, strip leaked JSON from, and sanitize the main HTML block.
fn extract_html_body(text: &str, original: ContentRecord, opts: &Options) -> ContentRecord {
    let mut record = original;

    let Some(block) = html::extract_block(text) else {
        record.warn("no html block found");
        return record;
    };

    let fragment = json_block::remove_block_with_window(&block.html, opts.json_tail_window);
    let body = html::clean(&fragment, opts);
    if !record.fill(RecordField::HtmlBody, body, Source::HtmlBlock(block.method)) {
        record.warn(format!(
            "html block from {} was empty after sanitization",
            block.method.name()
        ));
    }
    record
}

fn build_fallback_body(text: &str, original: ContentRecord, opts: &Options) -> ContentRecord {
    let mut record = original;
    if !record.html_body.is_empty() {
        return record;
    }

    let body = html::build_fallback(
        &FallbackInput {
            title: &record.title,
            short_description: &record.short_description,
            custom_fields: Some(&record.custom_fields),
            source_text: text,
        },
        opts,
    );
    record.fill(RecordField::HtmlBody, body, Source::Fallback);
    record.warn("html body synthesized from recovered fields");
    record
}

/// Title from the body's first `<h1>`, else a timestamped placeholder.
fn resolve_title(original: ContentRecord, opts: &Options, now: DateTime<Utc>) -> ContentRecord {
    let mut record = original;
    if !record.title.is_empty() {
        return record;
    }

    if let Some(heading) = dom::first_heading(&record.html_body).and_then(|h| clean_field_value(&h)) {
        record.fill(RecordField::Title, heading, Source::HtmlHeading);
        record.warn("title taken from the body <h1>");
        return record;
    }

    let placeholder = format!("{} - {}", opts.placeholder_title, now.format("%Y-%m-%d %H:%M"));
    record.fill(RecordField::Title, placeholder, Source::Placeholder);
    record.title_is_placeholder = true;
    record.warn("no title found; using a timestamped placeholder");
    record
}

/// Slug from the title; placeholder titles and non-ASCII titles get a
/// timestamp token.
fn resolve_slug(original: ContentRecord, opts: &Options, now: DateTime<Utc>) -> ContentRecord {
    let mut record = original;
    if !record.slug.is_empty() {
        return record;
    }

    let base = if record.title_is_placeholder {
        derive_slug(&opts.placeholder_title)
    } else {
        derive_slug(&record.title)
    };

    if !record.title_is_placeholder && !base.is_empty() {
        record.fill(RecordField::Slug, base, Source::Derived);
        return record;
    }

    let slug = with_token(&base, &opts.slug_prefix, now.timestamp());
    record.fill(RecordField::Slug, slug, Source::Placeholder);
    record.warn("slug generated with a timestamp token");
    record
}

fn extract_excerpt(original: ContentRecord, opts: &Options) -> ContentRecord {
    let mut record = original;
    if let Some(intro) = dom::intro_paragraph(&record.html_body) {
        let excerpt = clean_description(&intro, opts.short_description_cap, &opts.ellipsis);
        record.fill(RecordField::Excerpt, excerpt, Source::Derived);
    }
    record
}
