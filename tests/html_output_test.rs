use gen_content_parser::html::{clean, repair_tag_balance, sanitize};
use gen_content_parser::{assemble, Options, RecordField, Source};

#[test]
fn unclosed_tags_are_closed_innermost_first() {
    let out = sanitize("<div><p>text");

    assert_eq!(out, "<div><p>text</p></div>");
    assert_eq!(out.matches("</p>").count(), 1);
    assert_eq!(out.matches("</div>").count(), 1);
    assert!(out.find("</p>") < out.find("</div>"));
}

#[test]
fn mismatched_closers_are_ignored_not_counted() {
    let out = repair_tag_balance("<div><b>x</i></div>");
    assert_eq!(out, "<div><b>x</i></div></b></div>");
}

#[test]
fn void_elements_are_never_closed() {
    let out = repair_tag_balance("<div>a<br>b<img src=\"x.jpg\"><hr></div>");
    assert_eq!(out, "<div>a<br>b<img src=\"x.jpg\"><hr></div>");
}

#[test]
fn script_is_stripped_wherever_it_appears() {
    let inputs = [
        "<script>alert(1)</script><div>x</div>",
        "<div>x<script>alert(1)</script></div>",
        "<div>x</div><SCRIPT type=\"text/javascript\">alert(1)</SCRIPT>",
        "<div>x<script>alert(1)",
        "<div>x</div><script src=\"evil.js\"></script>",
        "<div><scr<b></b>ipt>alert(1)</script></div>",
    ];
    for input in inputs {
        let out = sanitize(input);
        assert!(
            !out.to_ascii_lowercase().contains("<script"),
            "script survived in {out:?}"
        );
    }
}

#[test]
fn event_handlers_and_javascript_urls_are_removed() {
    let out = sanitize("<p onclick=\"steal()\" class=\"a\">hi</p><a href=\"javascript:steal()\">x</a>");
    assert!(!out.contains("onclick"));
    assert!(!out.to_ascii_lowercase().contains("javascript:"));
    assert!(out.contains("class=\"a\""));
}

#[test]
fn handlers_behind_slashes_and_quoted_brackets_are_removed() {
    let slashed = sanitize("<div><svg/onload=alert(1)>x</svg></div>");
    assert_eq!(slashed, "<div><svg>x</svg></div>");

    let quoted = sanitize(r#"<div><img alt="a>b" onerror="alert(1)">x</div>"#);
    assert!(!quoted.contains("onerror"), "{quoted}");
    assert!(quoted.contains(r#"alt="a&gt;b""#), "{quoted}");
}

#[test]
fn script_schemes_split_by_whitespace_are_removed() {
    for href in ["java\tscript:alert(1)", "java\nscript:alert(1)", " javascript:alert(1)", "&#106;avascript:alert(1)"] {
        let out = sanitize(&format!("<div><a href=\"{href}\" class=\"l\">l</a></div>"));
        assert_eq!(out, "<div><a class=\"l\">l</a></div>", "{href:?}");
    }
}

#[test]
fn safe_links_and_images_are_kept() {
    let html = "<div><a href=\"https://example.com/a?b=1&amp;c=2\">l</a><img src=\"/i/p.webp\" alt=\"پاد\"></div>";
    assert_eq!(sanitize(html), html);
}

#[test]
fn template_markers_are_removed() {
    let out = sanitize("<div><p>{{ price }} تومان</p><?php echo $x; ?><% code %></div>");
    assert!(out.contains("تومان"));
    assert!(!out.contains("{{"));
    assert!(!out.contains("<?"));
    assert!(!out.contains("<%"));
}

#[test]
fn empty_elements_are_removed_but_cells_kept() {
    let out = sanitize("<div><p> </p><span></span><p>x</p><table><tr><td></td><td>1</td></tr></table></div>");
    assert_eq!(
        out,
        "<div><p>x</p><table><tr><td></td><td>1</td></tr></table></div>"
    );
}

#[test]
fn prompt_junk_lines_are_removed() {
    let out = sanitize("<div>\n## بخش ۱: معرفی\n<p>x</p>\n---\n</div>");
    assert!(!out.contains("بخش"));
    assert!(!out.contains("---"));
    assert!(out.contains("<p>x</p>"));
}

#[test]
fn dangling_final_tag_is_dropped() {
    assert_eq!(sanitize("<div><p>x</p><div class=\"y"), "<div><p>x</p></div>");
}

#[test]
fn direction_and_font_are_injected_when_absent() {
    let out = clean("<div><p>x</p></div>", &Options::default());
    assert_eq!(
        out,
        "<div style=\"direction: rtl; font-family: Tahoma, Arial, sans-serif;\"><p>x</p></div>"
    );
}

#[test]
fn declarations_join_an_existing_style_attribute() {
    let out = clean("<div style=\"color: red\">x</div>", &Options::default());
    assert_eq!(
        out,
        "<div style=\"direction: rtl; font-family: Tahoma, Arial, sans-serif; color: red\">x</div>"
    );
}

#[test]
fn declared_presentation_is_left_alone() {
    let html = "<div dir=\"rtl\" style=\"font-family: Vazir\">x</div>";
    assert_eq!(clean(html, &Options::default()), html);
}

#[test]
fn configured_font_stack_is_used() {
    let options = Options {
        font_stack: "Vazirmatn, sans-serif".to_string(),
        ..Options::default()
    };
    let out = clean("<section>x</section>", &options);
    assert!(out.starts_with("<section style=\"direction: rtl; font-family: Vazirmatn, sans-serif;\">"));
}

#[test]
fn leaked_json_is_removed_from_the_html_block() {
    let raw = "```html\n<div><p>x</p></div>\n{\"seo\": {\"slug\": \"leak\"}}\n```";
    let record = assemble(raw);

    assert!(!record.html_body.contains("seo"));
    assert!(record.html_body.contains("<p>x</p>"));
}

#[test]
fn fallback_body_renders_known_fields() {
    let raw = "| عنوان (H1) | XROS 4 |\n\n## توضیح کوتاه محصول\nپاد سبک.\n";
    let record = assemble(raw);

    assert_eq!(record.source_of(RecordField::HtmlBody), Some(Source::Fallback));
    assert!(record.html_body.contains(">XROS 4</h1>"));
    assert!(record.html_body.contains("پاد سبک."));
    assert!(record.html_body.contains("color: #29853a;"));
    assert!(record.warnings.iter().any(|w| w.contains("synthesized")));
}

#[test]
fn fallback_body_escapes_recovered_values() {
    let raw = "| عنوان (H1) | <img src=x onerror=alert(1)> |";
    let record = assemble(raw);

    assert!(!record.html_body.contains("<img"));
    assert!(record.html_body.contains("&lt;img"));
}
