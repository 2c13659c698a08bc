//! Language resolver: active-language state, persistence, and the
//! fallback chain.
//!
//! The service is constructed once at startup and passed down by
//! handle; clones share the same state. The selected language survives
//! restarts through a single small file holding the language code.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::i18n::{catalog_for, FaqEntry, Language, TranslationValue};

/// Runtime language selection and translation lookup.
///
/// `resolve` is total: active-language catalog first, then the English
/// catalog, then the raw key itself. It never returns an empty result
/// and never errors.
#[derive(Clone)]
pub struct LanguageService {
    current: Arc<Mutex<Language>>,
    store_path: Arc<PathBuf>,
}

impl LanguageService {
    /// Create the service, restoring the persisted selection.
    ///
    /// A missing, unreadable, or invalid stored value yields English.
    pub fn new(store_path: impl AsRef<Path>) -> Self {
        let store_path = store_path.as_ref().to_path_buf();
        let initial = load_language(&store_path);

        Self {
            current: Arc::new(Mutex::new(initial)),
            store_path: Arc::new(store_path),
        }
    }

    /// Get the active language.
    pub fn current(&self) -> Language {
        *self.current.lock().unwrap()
    }

    /// Set the active language and persist it.
    ///
    /// Subsequent `resolve` calls reflect the new language immediately.
    /// A persistence failure is logged and swallowed: the in-memory
    /// selection always wins for the rest of the process.
    pub fn set_language(&self, language: Language) {
        *self.current.lock().unwrap() = language;

        if let Err(e) = std::fs::write(self.store_path.as_ref(), language.code()) {
            warn!(
                "Failed to persist language selection to {}: {}",
                self.store_path.display(),
                e
            );
        }
    }

    /// Resolve a translation key to a value.
    ///
    /// Lookup order: active-language catalog, English catalog, and
    /// finally the key itself as text. Always returns a renderable
    /// value.
    pub fn resolve(&self, key: &str) -> TranslationValue {
        let language = self.current();

        lookup(catalog_for(language), key)
            .or_else(|| lookup(catalog_for(Language::canonical()), key))
            .cloned()
            .unwrap_or_else(|| TranslationValue::Text(key.to_string()))
    }

    /// Resolve a key expected to hold plain text.
    ///
    /// Total like `resolve`: a missing key (or a key holding a
    /// non-text value, which is a caller contract violation) yields
    /// the key itself so there is always something to render.
    pub fn text(&self, key: &str) -> String {
        match self.resolve(key) {
            TranslationValue::Text(text) => text,
            _ => key.to_string(),
        }
    }

    /// Resolve a key expected to hold a string list.
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        match self.resolve(key) {
            TranslationValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Resolve a key expected to hold FAQ entries.
    pub fn faq(&self, key: &str) -> Option<Vec<FaqEntry>> {
        match self.resolve(key) {
            TranslationValue::Faq(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Catalog lookup treating empty text values as absent, so a blank
/// translation falls through to English instead of rendering nothing.
fn lookup<'a>(
    catalog: &'a HashMap<&'static str, TranslationValue>,
    key: &str,
) -> Option<&'a TranslationValue> {
    match catalog.get(key) {
        Some(TranslationValue::Text(text)) if text.is_empty() => None,
        other => other,
    }
}

fn load_language(path: &Path) -> Language {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|stored| Language::from_code(&stored))
        .unwrap_or(Language::En)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn service_in(dir: &TempDir) -> LanguageService {
        LanguageService::new(dir.path().join("language"))
    }

    // ==================== Fallback Chain Tests ====================

    #[test]
    fn test_resolve_active_language_value() {
        let dir = TempDir::new().expect("temp dir");
        let service = service_in(&dir);
        service.set_language(Language::Fr);

        assert_eq!(service.text("nav_home"), "Accueil");
    }

    #[test]
    fn test_resolve_falls_back_to_english() {
        let dir = TempDir::new().expect("temp dir");
        let service = service_in(&dir);
        service.set_language(Language::Fr);

        // faq_driving exists only in the English catalog
        let entries = service.faq("faq_driving").expect("faq entries");
        assert!(entries[0].question.contains("weekends"));
    }

    #[test]
    fn test_resolve_falls_back_to_key() {
        let dir = TempDir::new().expect("temp dir");
        let service = service_in(&dir);

        assert_eq!(service.text("no_such_key"), "no_such_key");
        assert_eq!(
            service.resolve("no_such_key"),
            TranslationValue::Text("no_such_key".to_string())
        );
    }

    #[test]
    fn test_every_english_key_resolves_under_french() {
        let dir = TempDir::new().expect("temp dir");
        let service = service_in(&dir);
        service.set_language(Language::Fr);

        for key in catalog_for(Language::En).keys() {
            match service.resolve(key) {
                TranslationValue::Text(text) => assert!(!text.is_empty()),
                TranslationValue::List(items) => assert!(!items.is_empty()),
                TranslationValue::Faq(entries) => assert!(!entries.is_empty()),
            }
        }
    }

    #[test]
    fn test_kind_accessors() {
        let dir = TempDir::new().expect("temp dir");
        let service = service_in(&dir);

        assert!(service.list("service_list").is_some());
        assert!(service.faq("faq_immigration").is_some());
        // Wrong-kind requests return None instead of panicking
        assert!(service.list("nav_home").is_none());
        assert!(service.faq("service_list").is_none());
        // text() on a list key degrades to the key itself
        assert_eq!(service.text("service_list"), "service_list");
    }

    // ==================== Persistence Tests ====================

    #[test]
    fn test_language_persists_across_instances() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("language");

        let service = LanguageService::new(&path);
        service.set_language(Language::Fr);
        drop(service);

        let reloaded = LanguageService::new(&path);
        assert_eq!(reloaded.current(), Language::Fr);
    }

    #[test]
    fn test_missing_store_defaults_to_english() {
        let dir = TempDir::new().expect("temp dir");
        let service = LanguageService::new(dir.path().join("never-written"));
        assert_eq!(service.current(), Language::En);
    }

    #[test]
    fn test_invalid_stored_value_defaults_to_english() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("language");
        std::fs::write(&path, "klingon").expect("write");

        let service = LanguageService::new(&path);
        assert_eq!(service.current(), Language::En);
    }

    #[test]
    fn test_set_language_survives_unwritable_store() {
        // A directory path cannot be written as a file; the in-memory
        // selection must still change.
        let dir = TempDir::new().expect("temp dir");
        let service = LanguageService::new(dir.path());

        service.set_language(Language::Fr);
        assert_eq!(service.current(), Language::Fr);
        assert_eq!(service.text("nav_home"), "Accueil");
    }

    #[test]
    fn test_clones_share_selection() {
        let dir = TempDir::new().expect("temp dir");
        let service = service_in(&dir);
        let clone = service.clone();

        service.set_language(Language::Fr);
        assert_eq!(clone.current(), Language::Fr);
    }

    // ==================== Totality Property ====================

    proptest! {
        #[test]
        fn prop_resolve_is_total(key in ".*", use_french in any::<bool>()) {
            let dir = TempDir::new().expect("temp dir");
            let service = LanguageService::new(dir.path().join("language"));
            if use_french {
                service.set_language(Language::Fr);
            }

            // Never panics, and text() always yields a renderable
            // string: empty only when the key itself is empty.
            let _ = service.resolve(&key);
            let text = service.text(&key);
            prop_assert_eq!(text.is_empty(), key.is_empty());
        }
    }
}
