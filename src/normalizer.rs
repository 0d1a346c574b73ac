/*!
 * Text normalization for accumulated subtitle text.
 *
 * Produces the cleaned display text, the punctuation-free "text only"
 * projection and the word count of the display text.
 *
 * Runs of two or more whitespace characters are deleted outright rather
 * than collapsed to a single space: `"Hello  world"` becomes `"Helloworld"`.
 * Downstream word counts depend on this, so it is kept as is.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// @const: Bold/italic/underline tags in both notations, plus pipes
static MARKUP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?[bui]>|\{/?[bui]\}|\|").unwrap()
});

// @const: Whitespace runs of length two or more
static MULTI_WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s{2,}").unwrap()
});

// @const: Punctuation dropped from the text-only projection
static PUNCTUATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.,:!?#/<>"]"#).unwrap()
});

// @const: Dash bullets ("- ", "--  ")
static DASH_BULLET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-+\s+").unwrap()
});

/// Result of normalizing one entry's text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText {
    /// Cleaned display text
    pub text: String,

    /// Display text without punctuation and dash bullets
    pub text_only: String,

    /// Whitespace-delimited tokens in `text`
    pub words_count: usize,
}

/// Text normalizer with an optional markup cleanup pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextNormalizer {
    cleanup_markup: bool,
}

impl TextNormalizer {
    /// Create a normalizer; `cleanup_markup` controls tag and pipe removal
    pub fn new(cleanup_markup: bool) -> Self {
        Self { cleanup_markup }
    }

    /// Whether markup tags and pipes are stripped
    pub fn cleanup_markup(&self) -> bool {
        self.cleanup_markup
    }

    /// Normalize raw accumulated text
    pub fn normalize(&self, raw_text: &str) -> NormalizedText {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() {
            return NormalizedText::default();
        }

        let text = self.clean_text(trimmed);
        let text_only = Self::text_only(&text);
        let words_count = text.split_whitespace().count();

        NormalizedText {
            text,
            text_only,
            words_count,
        }
    }

    fn clean_text(&self, text: &str) -> String {
        let cleaned = if self.cleanup_markup {
            MARKUP_REGEX.replace_all(text, "")
        } else {
            text.into()
        };

        MULTI_WHITESPACE_REGEX
            .replace_all(&cleaned, "")
            .trim()
            .to_string()
    }

    /// Strip punctuation and dash bullets from already cleaned text
    pub fn text_only(text: &str) -> String {
        let without_punctuation = PUNCTUATION_REGEX.replace_all(text, "");
        let without_dashes = DASH_BULLET_REGEX.replace_all(&without_punctuation, "");

        MULTI_WHITESPACE_REGEX
            .replace_all(&without_dashes, "")
            .trim()
            .to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(true)
    }
}
