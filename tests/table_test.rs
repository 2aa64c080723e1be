use gen_content_parser::fields::{
    extract_field, extract_research_fields, extract_short_description, FIELD_PATTERNS, TABLE_FIELDS,
};
use gen_content_parser::{assemble, Options, RecordField};

#[test]
fn every_table_field_has_at_least_one_matcher() {
    for field in TABLE_FIELDS {
        assert!(
            FIELD_PATTERNS.iter().any(|p| p.field == field),
            "no matcher for {field:?}"
        );
    }
}

#[test]
fn matcher_names_are_unique_per_field() {
    for field in TABLE_FIELDS {
        let mut names: Vec<&str> = FIELD_PATTERNS
            .iter()
            .filter(|p| p.field == field)
            .map(|p| p.name)
            .collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total, "duplicate matcher name for {field:?}");
    }
}

#[test]
fn meta_fields_fall_back_to_html_head_tags() {
    let text = "<title>Old Format Title</title>\n<meta name=\"description\" content=\"Old description\">";

    let title = extract_field(text, RecordField::MetaTitle, None);
    let description = extract_field(text, RecordField::MetaDescription, None);

    assert_eq!(title.as_ref().map(|m| m.pattern), Some("html-title"));
    assert_eq!(title.map(|m| m.value).as_deref(), Some("Old Format Title"));
    assert_eq!(description.map(|m| m.value).as_deref(), Some("Old description"));
}

#[test]
fn known_value_is_never_searched() {
    let text = "| متا تایتل | From table |";
    assert!(extract_field(text, RecordField::MetaTitle, Some("From JSON")).is_none());
    assert!(extract_field(text, RecordField::MetaTitle, Some("  ")).is_some());
}

#[test]
fn fence_junk_is_not_accepted() {
    let text = "| متا تایتل | ``` |\nمتا تایتل | ``` Real value ```\n";
    let found = extract_field(text, RecordField::MetaTitle, None);
    assert_eq!(found.map(|m| m.value).as_deref(), Some("Real value"));
}

#[test]
fn all_alt_texts_from_table_rows() {
    let raw = "\
| متن جایگزین عکس اصلی | نمای روبرو |
| متن جایگزین عکس رنگ‌ها | همه رنگ‌ها |
| متن جایگزین عکس جعبه | جعبه محصول |
| متن جایگزین عکس پاد | کارتریج |
";
    let record = assemble(raw);

    assert_eq!(record.alt_texts.main, "نمای روبرو");
    assert_eq!(record.alt_texts.colors, "همه رنگ‌ها");
    assert_eq!(record.alt_texts.r#box, "جعبه محصول");
    assert_eq!(record.alt_texts.pod, "کارتریج");
}

#[test]
fn slug_from_english_label_is_normalized() {
    let record = assemble("| عنوان (H1) | X |\nSlug: Vaporesso-XROS-4\n");
    assert_eq!(record.slug, "vaporesso-xros-4");
}

#[test]
fn short_description_is_bounded_by_next_fence() {
    let text = "## توضیح کوتاه محصول\nاول.\nدوم.\n\n```html\n<div>x</div>\n```";
    let found = extract_short_description(text, &Options::default());
    assert_eq!(found.map(|(v, _)| v).as_deref(), Some("اول. دوم."));
}

#[test]
fn short_description_with_empty_section_is_absent() {
    let text = "## توضیح کوتاه محصول\n\n```html\n<div>x</div>\n```";
    assert_eq!(extract_short_description(text, &Options::default()), None);
}

#[test]
fn label_inside_a_table_row_does_not_open_a_section() {
    let record = assemble("| توضیح کوتاه محصول | خلاصه |\n| عنوان (H1) | T |\n| متا تایتل | M |\n");

    assert_eq!(record.title, "T");
    assert_eq!(record.meta_title, "M");
    assert!(!record.short_description.contains("عنوان"), "{}", record.short_description);
    assert!(!record.short_description.contains('|'), "{}", record.short_description);
}

#[test]
fn short_description_of_500_chars_is_capped_with_ellipsis() {
    let raw = format!("## توضیح کوتاه محصول\n{}", "ا".repeat(500));
    let record = assemble(&raw);

    assert_eq!(record.short_description.chars().count(), 300);
    assert!(record.short_description.ends_with("..."));
}

#[test]
fn research_text_yields_vocabulary_fields() {
    let text = "ویپرسو XROS 4 با باتری ۱۰۰۰ mAh و توان 30W، مخزن 3ml و کویل 0.6Ω. \
                شارژ با Type-C. ساخت Shenzhen.";
    let fields = extract_research_fields(text);

    assert_eq!(fields.get("batteryCapacity").map(String::as_str), Some("1000 mAh"));
    assert_eq!(fields.get("chargingType").map(String::as_str), Some("USB Type-C"));
    assert_eq!(fields.get("country").map(String::as_str), Some("چین"));
    assert!(fields.keys().all(|k| Options::default().knows_field(k)));
}
