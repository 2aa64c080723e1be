//! Configuration options for record assembly.
//!
//! The `Options` struct carries the handful of site-level defaults the
//! pipeline reads: presentation defaults for synthesized HTML, the
//! short-description cap, the custom-field label vocabulary, and the clock
//! used for placeholder tokens. Nothing in the pipeline reads global state;
//! everything comes through this struct.

use chrono::{DateTime, Utc};

use crate::fields::custom::CustomFieldKey;

/// Configuration options for record assembly.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use gen_content_parser::Options;
///
/// let options = Options {
///     accent_color: "#3f51b5".to_string(),
///     short_description_cap: 160,
///     ..Options::default()
/// };
/// assert_eq!(options.short_description_cap, 160);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Accent colour used for headings and highlight borders in fallback HTML.
    ///
    /// Default: `"#29853a"`
    pub accent_color: String,

    /// Font stack injected into HTML bodies that declare no `font-family`.
    ///
    /// Default: `"Tahoma, Arial, sans-serif"`
    pub font_stack: String,

    /// Maximum length of the short description and excerpt, in characters.
    ///
    /// Truncated values are exactly this long, ellipsis included.
    ///
    /// Default: `300`
    pub short_description_cap: usize,

    /// Marker appended to truncated descriptions.
    ///
    /// Default: `"..."`
    pub ellipsis: String,

    /// Size of the tail window (bytes) scanned backwards for a bare trailing
    /// JSON object.
    ///
    /// Default: `16384`
    pub json_tail_window: usize,

    /// Prefix of the title synthesized when every title source came up empty.
    ///
    /// Default: `"محصول جدید"`
    pub placeholder_title: String,

    /// Prefix of slugs generated when the title yields no ASCII slug.
    ///
    /// Default: `"product"`
    pub slug_prefix: String,

    /// Ordered custom-field vocabulary: `(key, display label)`.
    ///
    /// Keys outside this list are dropped from records; the order drives the
    /// rows of the fallback specification table.
    pub field_labels: Vec<(String, String)>,

    /// Maximum number of prose paragraphs carried into fallback HTML.
    ///
    /// Default: `6`
    pub fallback_max_paragraphs: usize,

    /// Minimum paragraph length (characters) for fallback prose.
    ///
    /// Default: `50`
    pub fallback_min_paragraph_len: usize,

    /// Fixed clock for placeholder titles and slug uniqueness tokens.
    ///
    /// `None` reads the system clock. Set it in tests for reproducible output.
    ///
    /// Default: `None`
    pub timestamp: Option<DateTime<Utc>>,
}

impl Options {
    /// The instant used for placeholder tokens.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.timestamp.unwrap_or_else(Utc::now)
    }

    /// Display label for a custom-field key, if the key is in the vocabulary.
    #[must_use]
    pub fn label_for(&self, key: &str) -> Option<&str> {
        self.field_labels
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, label)| label.as_str())
    }

    /// Whether a custom-field key belongs to the configured vocabulary.
    #[must_use]
    pub fn knows_field(&self, key: &str) -> bool {
        self.label_for(key).is_some()
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            accent_color: "#29853a".to_string(),
            font_stack: "Tahoma, Arial, sans-serif".to_string(),
            short_description_cap: 300,
            ellipsis: "...".to_string(),
            json_tail_window: 16 * 1024,
            placeholder_title: "محصول جدید".to_string(),
            slug_prefix: "product".to_string(),
            field_labels: CustomFieldKey::ALL
                .iter()
                .map(|k| (k.as_str().to_string(), k.default_label().to_string()))
                .collect(),
            fallback_max_paragraphs: 6,
            fallback_min_paragraph_len: 50,
            timestamp: None,
        }
    }
}
