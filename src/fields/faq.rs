//! FAQ extraction.
//!
//! Two layouts are recognised, tried in order:
//!
//! 1. `[fsp-faq question="…" answer="…"]` shortcodes, every occurrence.
//! 2. A `##`/`###` FAQ section with `سؤال:` / `پاسخ:` (or `Q:` / `A:`)
//!    prefixed lines, up to the next `##` heading.
//!
//! Exact duplicate pairs are dropped, keeping the first occurrence.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::result::FaqEntry;
use crate::text::{collapse_whitespace, strip_markdown_bold};

static FAQ_SHORTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\[fsp-faq\s+question\s*=\s*"([^"]+)"\s+answer\s*=\s*"([^"]+)"\s*\]"#)
        .expect("FAQ_SHORTCODE regex")
});

static FAQ_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*#{2,3}[ \t]*(?:\*\*)?(?:سؤالات متداول|سوالات متداول|FAQ|Frequently Asked Questions)[^\n]*",
    )
    .expect("FAQ_HEADING regex")
});

static NEXT_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*##").expect("NEXT_HEADING regex")
});

static QUESTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:سؤال|سوال|پرسش|Q)\s*[0-9۰-۹]*\s*[:：]\s*(.*)$").expect("QUESTION_LINE regex")
});

static ANSWER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:پاسخ|جواب|A)\s*[:：]\s*(.*)$").expect("ANSWER_LINE regex")
});

/// Extract question/answer pairs in document order.
///
/// ```
/// use gen_content_parser::fields::extract_faq;
///
/// let faq = extract_faq(r#"[fsp-faq question="Q1?" answer="A1."]"#);
/// assert_eq!(faq.len(), 1);
/// assert_eq!(faq[0].answer, "A1.");
/// ```
#[must_use]
pub fn extract_faq(text: &str) -> Vec<FaqEntry> {
    let shortcodes: Vec<FaqEntry> = FAQ_SHORTCODE
        .captures_iter(text)
        .filter_map(|caps| {
            let question = collapse_whitespace(caps.get(1)?.as_str());
            let answer = collapse_whitespace(caps.get(2)?.as_str());
            Some(FaqEntry { question, answer })
        })
        .collect();

    let entries = if shortcodes.is_empty() {
        faq_section(text).map(parse_pairs).unwrap_or_default()
    } else {
        shortcodes
    };

    dedup(entries)
}

/// Body of the first FAQ section, without its heading.
fn faq_section(text: &str) -> Option<&str> {
    let start = FAQ_HEADING.find(text)?.end();
    let body = &text[start..];
    let end = NEXT_HEADING.find(body).map_or(body.len(), |m| m.start());
    Some(&body[..end])
}

/// Walk the section line by line, pairing each question with the answer
/// that follows it. Unprefixed lines continue whichever part is open.
fn parse_pairs(section: &str) -> Vec<FaqEntry> {
    let mut entries = Vec::new();
    let mut question: Option<String> = None;
    let mut answer: Option<String> = None;

    for line in section.lines() {
        let line = strip_markdown_bold(line);
        let line = line
            .trim()
            .trim_start_matches(['-', '*', '•'])
            .trim_start();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = QUESTION_LINE.captures(line) {
            push_pair(&mut entries, question.take(), answer.take());
            question = caps.get(1).map(|m| m.as_str().trim().to_string());
        } else if let Some(caps) = ANSWER_LINE.captures(line) {
            if question.is_some() {
                answer = caps.get(1).map(|m| m.as_str().trim().to_string());
            }
        } else if let Some(a) = answer.as_mut() {
            a.push(' ');
            a.push_str(line);
        } else if let Some(q) = question.as_mut() {
            q.push(' ');
            q.push_str(line);
        }
    }
    push_pair(&mut entries, question, answer);

    entries
}

fn push_pair(entries: &mut Vec<FaqEntry>, question: Option<String>, answer: Option<String>) {
    if let (Some(q), Some(a)) = (question, answer) {
        let question = collapse_whitespace(&q);
        let answer = collapse_whitespace(&a);
        if !question.is_empty() && !answer.is_empty() {
            entries.push(FaqEntry { question, answer });
        }
    }
}

fn dedup(entries: Vec<FaqEntry>) -> Vec<FaqEntry> {
    let mut seen: Vec<FaqEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        if !seen.contains(&entry) {
            seen.push(entry);
        }
    }
    seen
}
