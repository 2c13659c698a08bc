//! Internationalization (i18n) module for the bilingual site.
//!
//! All language-related logic lives here: the supported-language type,
//! the static translation catalogs, and the runtime resolver with its
//! fallback chain.
//!
//! # Architecture
//!
//! - `language`: the two supported languages and code parsing
//! - `catalog`: static per-language key → value catalogs (tagged values)
//! - `resolver`: active-language state, persistence, and `resolve` with
//!   the active-language → English → raw-key fallback chain
//!
//! # Example
//!
//! ```rust,ignore
//! use mane_portal::i18n::{Language, LanguageService};
//!
//! let lang = LanguageService::new(".language");
//! lang.set_language(Language::Fr);
//! let title = lang.text("hero_title");
//! ```

mod catalog;
mod language;
mod resolver;

pub use catalog::{catalog_for, FaqEntry, TranslationValue};
pub use language::Language;
pub use resolver::LanguageService;
