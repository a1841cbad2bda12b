//! Settings command module
//!
//! The settings page: shows the target-language selector bound to the same
//! preference the popup reads, and reports the outcome of each change.

use crate::core::languages::{self, DEFAULT_TARGET_LANGUAGE};
use crate::core::preferences::TargetLanguagePreference;
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::LanguageOption;
use serde::Serialize;
use tracing::{info, warn};

pub const STATUS_SAVED: &str = "Settings saved";
pub const STATUS_SAVE_FAILED: &str = "Failed to save settings";
pub const STATUS_LOAD_FAILED: &str = "Failed to load settings";

/// What the page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    pub selected: String,
    pub options: Vec<LanguageOption>,
    pub status: Option<String>,
}

pub struct SettingsPage {
    preference: TargetLanguagePreference,
    selected: String,
    status: Option<String>,
}

impl SettingsPage {
    /// Load the stored preference. A load failure shows the default and a
    /// failure status.
    pub async fn open(preference: TargetLanguagePreference) -> Self {
        let (selected, status) = match preference.load().await {
            Ok(Some(code)) => (code, None),
            Ok(None) => (DEFAULT_TARGET_LANGUAGE.to_string(), None),
            Err(e) => {
                warn!("Failed to load settings: {}", e);
                (DEFAULT_TARGET_LANGUAGE.to_string(), Some(STATUS_LOAD_FAILED.to_string()))
            }
        };
        Self {
            preference,
            selected,
            status,
        }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn options(&self) -> Vec<LanguageOption> {
        languages::options(&self.selected)
    }

    /// Persist a new target language. Codes outside the catalog are rejected
    /// without touching storage.
    pub async fn select(&mut self, code: &str) -> AppResult<()> {
        if !languages::is_supported(code) {
            return Err(AppError::Validation(format!("Unsupported language: {}", code)));
        }

        match self.preference.try_set(code).await {
            Ok(()) => {
                info!("Target language set to {}", code);
                self.selected = code.to_string();
                self.status = Some(STATUS_SAVED.to_string());
                Ok(())
            }
            Err(e) => {
                warn!("Failed to save settings: {}", e);
                self.status = Some(STATUS_SAVE_FAILED.to_string());
                Err(e)
            }
        }
    }

    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            selected: self.selected.clone(),
            options: self.options(),
            status: self.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::preferences::{MemoryStore, PreferenceStore};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct ReadOnlyStore;

    #[async_trait]
    impl PreferenceStore for ReadOnlyStore {
        async fn load(&self) -> AppResult<Option<String>> {
            Ok(Some("de".to_string()))
        }

        async fn store(&self, _code: &str) -> AppResult<()> {
            Err(AppError::Storage("read-only".to_string()))
        }
    }

    struct UnreadableStore;

    #[async_trait]
    impl PreferenceStore for UnreadableStore {
        async fn load(&self) -> AppResult<Option<String>> {
            Err(AppError::Storage("corrupt".to_string()))
        }

        async fn store(&self, _code: &str) -> AppResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_open_shows_stored_value() {
        let store = Arc::new(MemoryStore::with_value("ja"));
        let page = SettingsPage::open(TargetLanguagePreference::new(store)).await;
        assert_eq!(page.selected(), "ja");
        assert_eq!(page.status(), None);
        let selected: Vec<_> = page.options().into_iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].code, "ja");
    }

    #[tokio::test]
    async fn test_open_defaults_on_first_run() {
        let page = SettingsPage::open(TargetLanguagePreference::new(Arc::new(MemoryStore::new()))).await;
        assert_eq!(page.selected(), "en");
    }

    #[tokio::test]
    async fn test_load_failure_reports_status() {
        let page = SettingsPage::open(TargetLanguagePreference::new(Arc::new(UnreadableStore))).await;
        assert_eq!(page.selected(), "en");
        assert_eq!(page.status(), Some(STATUS_LOAD_FAILED));
    }

    #[tokio::test]
    async fn test_select_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut page = SettingsPage::open(TargetLanguagePreference::new(store.clone())).await;
        page.select("fr").await.unwrap();
        assert_eq!(store.current().as_deref(), Some("fr"));
        assert_eq!(page.snapshot().status.as_deref(), Some(STATUS_SAVED));
    }

    #[tokio::test]
    async fn test_unsupported_code_is_not_written() {
        let store = Arc::new(MemoryStore::with_value("es"));
        let mut page = SettingsPage::open(TargetLanguagePreference::new(store.clone())).await;
        assert!(matches!(page.select("xx").await, Err(AppError::Validation(_))));
        assert_eq!(store.current().as_deref(), Some("es"));
        assert_eq!(page.status(), None);
    }

    #[tokio::test]
    async fn test_save_failure_keeps_previous() {
        let mut page = SettingsPage::open(TargetLanguagePreference::new(Arc::new(ReadOnlyStore))).await;
        assert!(page.select("fr").await.is_err());
        assert_eq!(page.selected(), "de");
        assert_eq!(page.status(), Some(STATUS_SAVE_FAILED));
    }
}
