use gen_content_parser::slug::is_valid_slug;
use gen_content_parser::{assemble, ContentRecord, Options};
use std::time::{Duration, Instant};

fn assert_complete(record: &ContentRecord) {
    assert!(!record.title.trim().is_empty(), "empty title");
    assert!(!record.html_body.trim().is_empty(), "empty html body");
    assert!(is_valid_slug(&record.slug), "invalid slug {:?}", record.slug);
    assert!(!record.html_body.to_ascii_lowercase().contains("<script"));
    assert!(record.validate(&Options::default()).is_ok());
}

#[test]
fn assemble_handles_empty_string() {
    assert_complete(&assemble(""));
}

#[test]
fn assemble_handles_whitespace_only() {
    assert_complete(&assemble(" \n\r\n\t  \u{200B}\u{FEFF}"));
}

#[test]
fn assemble_handles_unclosed_tags() {
    let record = assemble("<div><p>text<div>more");
    assert_complete(&record);
}

#[test]
fn assemble_handles_stray_closing_tags() {
    let record = assemble("```html\n</p></div><div><p>text</span></p>\n```");
    assert_complete(&record);
    assert_eq!(record.html_body.matches("</div>").count(), 2);
}

#[test]
fn assemble_handles_broken_attributes() {
    assert_complete(&assemble("<div class=\"test id=broken>"));
}

#[test]
fn assemble_handles_html_that_sanitizes_to_nothing() {
    let record = assemble("<div><script>alert(1)</script></div>");
    assert_complete(&record);
    assert!(record.warnings.iter().any(|w| w.contains("empty after sanitization")));
}

#[test]
fn assemble_handles_truncated_generation() {
    let raw = "| عنوان (H1) | XROS |\n```html\n<div style=\"direction: rtl\"><h2>مشخصات</h2><table><tr><td>باتری";
    let record = assemble(raw);
    assert_complete(&record);
    assert!(record.html_body.ends_with("</td></tr></table></div>"));
}

#[test]
fn assemble_handles_only_json_punctuation() {
    for raw in ["{", "}", "{}", "[]", "```json\n```", "```json", "{{{{}}}}", "| | |"] {
        assert_complete(&assemble(raw));
    }
}

#[test]
fn assemble_handles_binary_like_text() {
    let raw: String = (0u32..2048).filter_map(char::from_u32).collect();
    assert_complete(&assemble(&raw));
}

#[test]
fn assemble_handles_deeply_nested_unclosed_markup_quickly() {
    let raw = format!("```html\n{}x", "<div><span>".repeat(2_000));

    let started = Instant::now();
    let record = assemble(&raw);
    let elapsed = started.elapsed();

    assert_complete(&record);
    assert!(record.html_body.ends_with("</span></div>"));
    assert!(
        elapsed < Duration::from_secs(10),
        "took {elapsed:?} on deep nesting"
    );
}

#[test]
fn assemble_handles_huge_trailing_garbage_quickly() {
    let raw = format!("| عنوان (H1) | XROS |\n{}}}", "{\"a\": [".repeat(20_000));

    let started = Instant::now();
    let record = assemble(&raw);

    assert_complete(&record);
    assert_eq!(record.title, "XROS");
    assert!(started.elapsed() < Duration::from_secs(10));
}
