//! Tag tokenizer and structural repair.
//!
//! Generated fragments are often truncated mid-document, so nothing here
//! builds a tree. Tags are scanned in document order and a stack of open
//! names is enough for both passes.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Elements that never take a closing tag.
pub const VOID_ELEMENTS: [&str; 6] = ["br", "hr", "img", "input", "meta", "link"];

/// Elements kept even when empty; an empty cell still holds a table column.
const KEEP_WHEN_EMPTY: [&str; 2] = ["td", "th"];

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<(/?)([a-zA-Z][a-zA-Z0-9]*)\b[^<>]*>").expect("TAG regex")
});

/// One lexical piece of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Start tag. `name` is the raw name; compare with `eq_ignore_ascii_case`.
    Open {
        name: &'a str,
        raw: &'a str,
        self_closing: bool,
    },
    Close { name: &'a str, raw: &'a str },
    Comment(&'a str),
    Text(&'a str),
}

impl Token<'_> {
    fn raw(&self) -> &str {
        match self {
            Token::Open { raw, .. } | Token::Close { raw, .. } => raw,
            Token::Comment(raw) | Token::Text(raw) => raw,
        }
    }
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// Split a fragment into tags, comments and text, in order.
#[must_use]
pub fn tokenize(html: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in TAG.captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            tokens.push(Token::Text(&html[last..whole.start()]));
        }
        last = whole.end();

        let raw = whole.as_str();
        let token = match (caps.get(1), caps.get(2)) {
            (Some(slash), Some(name)) if !slash.as_str().is_empty() => Token::Close {
                name: name.as_str(),
                raw,
            },
            (_, Some(name)) => Token::Open {
                name: name.as_str(),
                raw,
                self_closing: raw.ends_with("/>"),
            },
            _ => Token::Comment(raw),
        };
        tokens.push(token);
    }
    if last < html.len() {
        tokens.push(Token::Text(&html[last..]));
    }

    tokens
}

/// Close every unclosed element.
///
/// End tags pop the stack only when they match its top; stray end tags are
/// left in place and otherwise ignored. Missing closers are appended
/// innermost first. Void and self-closed elements never enter the stack.
///
/// ```
/// use gen_content_parser::html::repair_tag_balance;
///
/// assert_eq!(repair_tag_balance("<div><p>text"), "<div><p>text</p></div>");
/// ```
#[must_use]
pub fn repair_tag_balance(html: &str) -> String {
    let mut stack: Vec<String> = Vec::new();

    for token in tokenize(html) {
        match token {
            Token::Open {
                name, self_closing, ..
            } if !self_closing && !is_void(name) => stack.push(name.to_ascii_lowercase()),
            Token::Close { name, .. } => {
                if stack.last().is_some_and(|top| top.eq_ignore_ascii_case(name)) {
                    stack.pop();
                }
            }
            _ => {}
        }
    }

    let mut out = String::with_capacity(html.len() + stack.len() * 8);
    out.push_str(html);
    for name in stack.iter().rev() {
        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }
    out
}

fn mark_parent(open: &mut [(&str, usize, bool)]) {
    if let Some(top) = open.last_mut() {
        top.2 = true;
    }
}

/// Drop elements that hold nothing but whitespace, including elements
/// that only become empty once their empty children are gone.
///
/// Table cells are kept.
#[must_use]
pub fn remove_empty_elements(html: &str) -> String {
    // Open elements: (name, output length before the start tag, has content).
    let mut open: Vec<(&str, usize, bool)> = Vec::new();
    let mut out = String::with_capacity(html.len());

    for token in tokenize(html) {
        match token {
            Token::Open {
                name,
                raw,
                self_closing,
            } if !self_closing && !is_void(name) => {
                let keep = KEEP_WHEN_EMPTY.iter().any(|k| k.eq_ignore_ascii_case(name));
                open.push((name, out.len(), keep));
                out.push_str(raw);
            }
            Token::Close { name, raw } => {
                match open.last() {
                    Some(&(top, start, has_content)) if top.eq_ignore_ascii_case(name) => {
                        open.pop();
                        if has_content {
                            out.push_str(raw);
                            mark_parent(&mut open);
                        } else {
                            out.truncate(start);
                        }
                    }
                    _ => {
                        out.push_str(raw);
                        mark_parent(&mut open);
                    }
                }
            }
            Token::Text(text) if text.trim().is_empty() => out.push_str(text),
            other => {
                out.push_str(other.raw());
                mark_parent(&mut open);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_kinds() {
        let tokens = tokenize("<div class=\"a\">x<br/><!-- c --></DIV>");
        assert_eq!(tokens.len(), 5);
        assert!(matches!(tokens[0], Token::Open { name: "div", self_closing: false, .. }));
        assert_eq!(tokens[1], Token::Text("x"));
        assert!(matches!(tokens[2], Token::Open { name: "br", self_closing: true, .. }));
        assert_eq!(tokens[3], Token::Comment("<!-- c -->"));
        assert!(matches!(tokens[4], Token::Close { name: "DIV", .. }));
    }

    #[test]
    fn test_repair_closes_innermost_first() {
        let out = repair_tag_balance("<div><p>text");
        assert_eq!(out, "<div><p>text</p></div>");
        assert_eq!(out.matches("</p>").count(), 1);
        assert_eq!(out.matches("</div>").count(), 1);
    }

    #[test]
    fn test_repair_ignores_stray_end_tags() {
        assert_eq!(repair_tag_balance("<div>a</span></div>"), "<div>a</span></div>");
        assert_eq!(repair_tag_balance("</p>text"), "</p>text");
    }

    #[test]
    fn test_repair_skips_void_and_self_closing() {
        let html = "<div><br><img src=\"x\"><span/>";
        assert_eq!(repair_tag_balance(html), format!("{html}</div>"));
    }

    #[test]
    fn test_repair_is_case_insensitive() {
        assert_eq!(repair_tag_balance("<DIV><P>x</p>"), "<DIV><P>x</p></div>");
    }

    #[test]
    fn test_repair_of_balanced_input_is_identity() {
        let html = "<div><table><tr><td>1</td></tr></table></div>";
        assert_eq!(repair_tag_balance(html), html);
    }

    #[test]
    fn test_remove_empty_elements() {
        assert_eq!(remove_empty_elements("<div><p> </p>x</div>"), "<div>x</div>");
        assert_eq!(remove_empty_elements("<div><span>\n</span></div>"), "");
        assert_eq!(remove_empty_elements("<p><br></p>"), "<p><br></p>");
    }

    #[test]
    fn test_remove_empty_keeps_table_cells() {
        let html = "<tr><td></td><td>v</td></tr>";
        assert_eq!(remove_empty_elements(html), html);
    }

    #[test]
    fn test_remove_empty_keeps_comments() {
        let html = "<div><!-- مقدمه --></div>";
        assert_eq!(remove_empty_elements(html), html);
    }

    #[test]
    fn test_deep_nesting_is_linear() {
        let html = "<div>".repeat(50_000);
        let out = repair_tag_balance(&html);
        assert_eq!(out.matches("</div>").count(), 50_000);
        assert_eq!(remove_empty_elements(&format!("{html}{}", "</div>".repeat(50_000))), "");
    }
}
