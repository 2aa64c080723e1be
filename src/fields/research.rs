//! Custom-field extraction from free research text.
//!
//! Research summaries are prose, not tables, so only attributes with a
//! recognisable unit or a known token are pulled out. Units are matched on
//! word boundaries so `GT` does not fire inside `length`.

#![allow(clippy::expect_used)]

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::fields::custom::CustomFieldKey;
use crate::text::persian_to_english_digits;

const BRANDS: [&str; 10] = [
    "VOOPOO",
    "Vaporesso",
    "UWELL",
    "GeekVape",
    "SMOK",
    "Aspire",
    "Innokin",
    "Lost Vape",
    "Eleaf",
    "OXVA",
];

/// Longer names first so `GENE.AI` is preferred over `GENE`.
const CHIPSETS: [&str; 6] = ["GENE.AI", "GENE.TT", "GENE", "AXON", "AS", "GT"];

static BATTERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+)\s*mAh\b").expect("BATTERY regex"));

static POWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(?:w|watts?)\b").expect("POWER regex")
});

static TANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*ml\b").expect("TANK regex"));

static RESISTANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+\.\d+)\s*(?:Ω|ohms?\b)").expect("RESISTANCE regex")
});

static DIMENSIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*[x×]\s*(\d+(?:\.\d+)?)\s*[x×]\s*(\d+(?:\.\d+)?)\s*mm\b")
        .expect("DIMENSIONS regex")
});

static WEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(?:g|grams?)\b").expect("WEIGHT regex")
});

static USB_C: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:type-c|usb-c)\b").expect("USB_C regex"));

static MICRO_USB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bmicro[\s-]?usb\b").expect("MICRO_USB regex"));

static CHINA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:china|shenzhen)\b").expect("CHINA regex"));

/// Case-insensitive whole-token match for a known name.
static KNOWN_TOKENS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    BRANDS
        .iter()
        .chain(CHIPSETS.iter())
        .map(|&name| {
            let pattern = format!(r"(?i)(?:^|[^A-Za-z0-9.]){}(?:$|[^A-Za-z0-9])", regex::escape(name));
            (name, Regex::new(&pattern).expect("known token regex"))
        })
        .collect()
});

fn first_known<'a>(names: &'a [&'static str], text: &str) -> Option<&'a str> {
    names.iter().copied().find(|name| {
        KNOWN_TOKENS
            .iter()
            .find(|(n, _)| n == name)
            .is_some_and(|(_, re)| re.is_match(text))
    })
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Pull known vocabulary attributes out of research prose.
///
/// ```
/// use gen_content_parser::fields::extract_research_fields;
///
/// let fields = extract_research_fields("Vaporesso XROS 4: ۱۰۰۰mAh, 3ml pod, Type-C");
/// assert_eq!(fields.get("batteryCapacity").map(String::as_str), Some("1000 mAh"));
/// assert_eq!(fields.get("chargingType").map(String::as_str), Some("USB Type-C"));
/// ```
#[must_use]
pub fn extract_research_fields(text: &str) -> BTreeMap<String, String> {
    let text = persian_to_english_digits(text);
    let mut fields = BTreeMap::new();
    let mut put = |key: CustomFieldKey, value: String| {
        fields.insert(key.as_str().to_string(), value);
    };

    if let Some(n) = capture(&BATTERY, &text) {
        put(CustomFieldKey::BatteryCapacity, format!("{n} mAh"));
    }
    if let Some(n) = capture(&POWER, &text) {
        put(CustomFieldKey::OutputPower, format!("{n}W"));
    }
    if let Some(n) = capture(&TANK, &text) {
        put(CustomFieldKey::TankCapacity, format!("{n} ml"));
    }
    if let Some(brand) = first_known(&BRANDS, &text) {
        put(CustomFieldKey::Brand, brand.to_string());
    }
    if USB_C.is_match(&text) {
        put(CustomFieldKey::ChargingType, "USB Type-C".to_string());
    } else if MICRO_USB.is_match(&text) {
        put(CustomFieldKey::ChargingType, "Micro USB".to_string());
    }
    if CHINA.is_match(&text) {
        put(CustomFieldKey::Country, "چین".to_string());
    }
    if let Some(chipset) = first_known(&CHIPSETS, &text) {
        put(CustomFieldKey::Chipset, chipset.to_string());
    }
    if let Some(n) = capture(&RESISTANCE, &text) {
        put(CustomFieldKey::CoilResistance, format!("{n}Ω"));
    }
    if let Some(caps) = DIMENSIONS.captures(&text) {
        if let (Some(a), Some(b), Some(c)) = (caps.get(1), caps.get(2), caps.get(3)) {
            put(
                CustomFieldKey::Dimensions,
                format!("{} × {} × {} mm", a.as_str(), b.as_str(), c.as_str()),
            );
        }
    }
    if let Some(n) = capture(&WEIGHT, &text) {
        put(CustomFieldKey::Weight, format!("{n} g"));
    }

    tracing::debug!(count = fields.len(), "research fields extracted");
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(fields: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
        fields.get(key).map(String::as_str)
    }

    #[test]
    fn test_full_research_summary() {
        let text = "The VOOPOO Drag X uses the GENE.TT chip, 18650 battery of 3000 mAh, \
                    80W max output, 4.5ml pod, 0.15 ohm coil. Size 126 x 36 x 26.5 mm, \
                    weight 95g. Charges via USB-C. Made in Shenzhen.";
        let fields = extract_research_fields(text);

        assert_eq!(get(&fields, "brand"), Some("VOOPOO"));
        assert_eq!(get(&fields, "chipset"), Some("GENE.TT"));
        assert_eq!(get(&fields, "batteryCapacity"), Some("3000 mAh"));
        assert_eq!(get(&fields, "outputPower"), Some("80W"));
        assert_eq!(get(&fields, "tankCapacity"), Some("4.5 ml"));
        assert_eq!(get(&fields, "coilResistance"), Some("0.15Ω"));
        assert_eq!(get(&fields, "dimensions"), Some("126 × 36 × 26.5 mm"));
        assert_eq!(get(&fields, "weight"), Some("95 g"));
        assert_eq!(get(&fields, "chargingType"), Some("USB Type-C"));
        assert_eq!(get(&fields, "country"), Some("چین"));
    }

    #[test]
    fn test_short_tokens_need_word_boundaries() {
        let fields = extract_research_fields("A great length and a fast response, very basic.");
        assert_eq!(get(&fields, "chipset"), None);
    }

    #[test]
    fn test_persian_digits_are_read() {
        let fields = extract_research_fields("باتری ۱۵۰۰ mAh و مقاومت ۰.۶Ω");
        assert_eq!(get(&fields, "batteryCapacity"), Some("1500 mAh"));
        assert_eq!(get(&fields, "coilResistance"), Some("0.6Ω"));
    }

    #[test]
    fn test_micro_usb() {
        let fields = extract_research_fields("charging over Micro USB");
        assert_eq!(get(&fields, "chargingType"), Some("Micro USB"));
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_research_fields("").is_empty());
    }
}
