//! Language type: the two languages the site ships in.

use serde::{Deserialize, Serialize};

/// A supported language.
///
/// English is the canonical language: every catalog key exists in
/// English, and it is the fallback for any key missing in French.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
}

impl Language {
    /// Parse a language from its ISO 639-1 code.
    ///
    /// # Arguments
    /// * `code` - The language code (e.g., "en", "fr"); matching is
    ///   ASCII case-insensitive
    ///
    /// # Returns
    /// * `Some(Language)` for a supported code
    /// * `None` for anything else (including empty input)
    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "fr" => Some(Language::Fr),
            _ => None,
        }
    }

    /// The canonical (source) language, used as the fallback for every
    /// other language's catalog gaps.
    pub fn canonical() -> Language {
        Language::En
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "French",
        }
    }

    /// Get the native name of the language.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "Français",
        }
    }

    /// Check if this is the canonical language.
    pub fn is_canonical(&self) -> bool {
        *self == Language::canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_english() {
        assert_eq!(Language::from_code("en"), Some(Language::En));
    }

    #[test]
    fn test_from_code_french() {
        assert_eq!(Language::from_code("fr"), Some(Language::Fr));
    }

    #[test]
    fn test_from_code_case_insensitive() {
        assert_eq!(Language::from_code("EN"), Some(Language::En));
        assert_eq!(Language::from_code("Fr"), Some(Language::Fr));
    }

    #[test]
    fn test_from_code_trims_whitespace() {
        assert_eq!(Language::from_code(" en \n"), Some(Language::En));
    }

    #[test]
    fn test_from_code_invalid() {
        assert_eq!(Language::from_code("es"), None);
        assert_eq!(Language::from_code("english"), None);
    }

    #[test]
    fn test_from_code_empty() {
        assert_eq!(Language::from_code(""), None);
    }

    // ==================== Metadata Tests ====================

    #[test]
    fn test_canonical_is_english() {
        assert_eq!(Language::canonical(), Language::En);
        assert!(Language::En.is_canonical());
        assert!(!Language::Fr.is_canonical());
    }

    #[test]
    fn test_codes_and_names() {
        assert_eq!(Language::En.code(), "en");
        assert_eq!(Language::Fr.code(), "fr");
        assert_eq!(Language::Fr.name(), "French");
        assert_eq!(Language::Fr.native_name(), "Français");
    }

    // ==================== Serde Tests ====================

    #[test]
    fn test_serde_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Language::Fr).unwrap(), "\"fr\"");
        let parsed: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Language::En);
    }
}
