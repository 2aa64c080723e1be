//! Start-tag attribute scanning.
//!
//! Tags are read the way an HTML tokenizer reads them: attribute values in
//! quotes may hold `>`, attributes may be separated by `/` as well as
//! whitespace, and a tag is only finished at a `>` outside any quotes.
//! Attribute text is never parsed into a tree; unsafe attributes are cut
//! out of the source and everything else is copied through.

/// Attributes whose value is fetched or navigated to as a URL.
const URL_ATTRIBUTES: [&str; 8] = [
    "href",
    "src",
    "action",
    "formaction",
    "xlink:href",
    "poster",
    "background",
    "data",
];

/// One attribute of a start tag, as byte offsets into the fragment.
#[derive(Debug)]
struct Attribute {
    start: usize,
    end: usize,
    name: String,
    /// Value span without its quotes.
    value: Option<(usize, usize)>,
}

#[derive(Debug)]
struct StartTag {
    /// End of the tag name.
    name_end: usize,
    /// Just past the closing `>`.
    end: usize,
    attributes: Vec<Attribute>,
}

fn skip_whitespace(bytes: &[u8], mut at: usize) -> usize {
    while bytes.get(at).is_some_and(u8::is_ascii_whitespace) {
        at += 1;
    }
    at
}

fn ends_name(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b'/' || byte == b'>'
}

/// Read the start tag opening at `open` (`<` followed by a letter).
///
/// Returns `None` when the fragment ends before the tag does.
fn parse_start_tag(html: &str, open: usize) -> Option<StartTag> {
    let bytes = html.as_bytes();
    let mut at = open + 1;
    while bytes.get(at).is_some_and(|&b| !ends_name(b)) {
        at += 1;
    }
    let name_end = at;
    let mut attributes = Vec::new();

    loop {
        while bytes
            .get(at)
            .is_some_and(|&b| b.is_ascii_whitespace() || b == b'/')
        {
            at += 1;
        }
        match bytes.get(at) {
            None => return None,
            Some(b'>') => {
                return Some(StartTag {
                    name_end,
                    end: at + 1,
                    attributes,
                })
            }
            Some(_) => {}
        }

        // A leading `=` belongs to the name.
        let start = at;
        at += 1;
        while bytes.get(at).is_some_and(|&b| !ends_name(b) && b != b'=') {
            at += 1;
        }
        let name = html[start..at].to_ascii_lowercase();

        let mut value = None;
        let after_name = skip_whitespace(bytes, at);
        if bytes.get(after_name) == Some(&b'=') {
            let value_start = skip_whitespace(bytes, after_name + 1);
            match bytes.get(value_start) {
                Some(&quote @ (b'"' | b'\'')) => {
                    let close = value_start + 1 + html[value_start + 1..].find(char::from(quote))?;
                    value = Some((value_start + 1, close));
                    at = close + 1;
                }
                Some(_) => {
                    let mut end = value_start;
                    while bytes
                        .get(end)
                        .is_some_and(|&b| !b.is_ascii_whitespace() && b != b'>')
                    {
                        end += 1;
                    }
                    value = Some((value_start, end));
                    at = end;
                }
                None => at = value_start,
            }
        }

        attributes.push(Attribute {
            start,
            end: at,
            name,
            value,
        });
    }
}

/// Whether a URL attribute value runs script when followed.
///
/// Browsers drop ASCII whitespace and control characters before reading
/// the scheme, and decode character references first.
#[must_use]
pub fn is_script_url(value: &str) -> bool {
    let decoded = html_escape::decode_html_entities(value);
    let compact: String = decoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect::<String>()
        .to_ascii_lowercase();
    let head = compact.split(['/', '?', '#']).next().unwrap_or_default();

    // A leftover `&` is a reference without `;` that a browser still decodes.
    head.contains('&')
        || head
            .split_once(':')
            .is_some_and(|(scheme, _)| scheme.ends_with("script"))
}

fn is_unsafe(html: &str, attribute: &Attribute) -> bool {
    if attribute.name.starts_with("on") {
        return true;
    }
    URL_ATTRIBUTES.contains(&attribute.name.as_str())
        && attribute
            .value
            .is_some_and(|(start, end)| is_script_url(&html[start..end]))
}

fn has_markup_in_value(html: &str, attribute: &Attribute) -> bool {
    attribute
        .value
        .is_some_and(|(start, end)| html[start..end].contains(['<', '>']))
}

fn write_start_tag(out: &mut String, html: &str, open: usize, tag: &StartTag) {
    let rewrite = tag
        .attributes
        .iter()
        .any(|a| is_unsafe(html, a) || has_markup_in_value(html, a));
    if !rewrite {
        out.push_str(&html[open..tag.end]);
        return;
    }

    out.push_str(&html[open..tag.name_end]);
    let mut last = tag.name_end;
    for attribute in &tag.attributes {
        last = attribute.end;
        if is_unsafe(html, attribute) {
            continue;
        }
        out.push(' ');
        match attribute.value {
            Some((start, end)) => {
                out.push_str(&html[attribute.start..start]);
                out.push_str(&html[start..end].replace('<', "&lt;").replace('>', "&gt;"));
                out.push_str(&html[end..attribute.end]);
            }
            None => out.push_str(&html[attribute.start..attribute.end]),
        }
    }
    out.push_str(&html[last..tag.end]);
}

/// Drop event-handler attributes and script URLs from every start tag.
///
/// Any attribute named `on*` goes, as does a URL attribute whose scheme
/// ends in `script`. Kept values have `<` and `>` escaped so later passes
/// see each tag as one piece. A start tag cut off before its `>` is
/// dropped together with everything after it.
///
/// ```
/// use gen_content_parser::html::strip_unsafe_attributes;
///
/// let out = strip_unsafe_attributes(r#"<img alt="a>b" onerror="x()">"#);
/// assert_eq!(out, r#"<img alt="a&gt;b">"#);
/// ```
#[must_use]
pub fn strip_unsafe_attributes(html: &str) -> String {
    let bytes = html.as_bytes();
    let mut out = String::with_capacity(html.len());
    let mut copied = 0;
    let mut at = 0;

    while let Some(offset) = html[at..].find('<') {
        let open = at + offset;
        if !bytes.get(open + 1).is_some_and(u8::is_ascii_alphabetic) {
            at = open + 1;
            continue;
        }
        out.push_str(&html[copied..open]);
        let Some(tag) = parse_start_tag(html, open) else {
            return out;
        };
        write_start_tag(&mut out, html, open, &tag);
        copied = tag.end;
        at = tag.end;
    }

    out.push_str(&html[copied..]);
    out
}
