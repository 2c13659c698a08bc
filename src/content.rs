//! Public page content: database overrides layered over the static
//! translation catalog.
//!
//! Each page section may have override rows keyed by translation key,
//! edited out of band so copy changes ship without a deployment.
//! Absence of an override is the normal case and falls through to the
//! bundled catalog.

use std::collections::HashMap;

use tracing::warn;

use crate::gateway::RemoteStore;
use crate::i18n::{Language, LanguageService};
use crate::models::ContentOverride;

/// The resolved override set for one page section.
pub struct PageContent {
    section: String,
    overrides: HashMap<String, ContentOverride>,
}

impl PageContent {
    /// Fetch the section's overrides. A fetch failure degrades to "no
    /// overrides" with a quiet log — the page still renders from the
    /// catalog.
    pub async fn load(store: &dyn RemoteStore, section: &str) -> Self {
        let rows = match store.list_content_overrides(section).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Failed to fetch content overrides for {}: {}", section, e);
                Vec::new()
            }
        };

        // (section, key) identifies at most one row; a duplicate from
        // the remote keeps the first occurrence.
        let mut overrides = HashMap::new();
        for row in rows {
            overrides.entry(row.key.clone()).or_insert(row);
        }

        Self {
            section: section.to_string(),
            overrides,
        }
    }

    /// Build from already-fetched rows (useful for tests and for
    /// callers that batch their own fetches).
    pub fn from_rows(section: &str, rows: Vec<ContentOverride>) -> Self {
        let mut overrides = HashMap::new();
        for row in rows {
            overrides.entry(row.key.clone()).or_insert(row);
        }
        Self {
            section: section.to_string(),
            overrides,
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    /// Resolve display text for a key: the override row first (French
    /// text falling back to the row's English text when blank), then
    /// the static catalog with its own fallback chain. Total, like the
    /// resolver itself.
    pub fn text(&self, key: &str, language_service: &LanguageService) -> String {
        if let Some(row) = self.overrides.get(key) {
            let text = match language_service.current() {
                Language::Fr if !row.french_text.trim().is_empty() => &row.french_text,
                _ => &row.english_text,
            };
            if !text.trim().is_empty() {
                return text.clone();
            }
        }

        language_service.text(key)
    }

    /// The override's image URL, when one is set.
    pub fn image(&self, key: &str) -> Option<&str> {
        self.overrides
            .get(key)
            .and_then(|row| row.image_url.as_deref())
    }
}
