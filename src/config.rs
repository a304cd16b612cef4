//! Runtime settings: language defaults, rate gate interval, input limits,
//! and the translation API endpoint.

use std::time::Duration;

/// Everything the translation path needs at construction time.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source language used when the preferences store has nothing newer.
    pub default_from_lang: String,
    /// Target language used when the preferences store has nothing newer.
    pub default_to_lang: String,
    /// Minimum time between two consecutive backend dispatches, global
    /// across all keys.
    pub min_request_interval: Duration,
    /// Maximum characters translated in one request.
    pub max_text_length: usize,
    /// Translation API base URL.
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_from_lang: "en".to_string(),
            default_to_lang: "uk".to_string(),
            min_request_interval: Duration::from_millis(250),
            max_text_length: 300,
            api_url: "https://api.mymemory.translated.net".to_string(),
        }
    }
}

/// Common ISO 639-1 codes the API supports; used by the settings surface to
/// sanity-check a language change.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "uk", "es", "fr", "de", "it", "pt", "ru", "zh", "ja", "ko", "ar", "pl", "nl", "sv", "tr",
];

/// Whether `code` is a known language code.
pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_settings() {
        let config = Config::default();
        assert_eq!(config.default_from_lang, "en");
        assert_eq!(config.default_to_lang, "uk");
        assert_eq!(config.min_request_interval, Duration::from_millis(250));
        assert_eq!(config.max_text_length, 300);
    }

    #[test]
    fn language_support_lookup() {
        assert!(is_supported_language("uk"));
        assert!(!is_supported_language("tlh"));
    }
}
