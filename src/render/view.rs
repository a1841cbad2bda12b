use crate::core::languages;
use crate::core::popup::{InlineStatus, Phase, PopupState};
use crate::shared::types::LanguageOption;

/// Body of the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Initial request in flight.
    Loading,
    /// Initial request failed.
    Error(String),
    Translation(String),
    /// Retranslation in flight inside an existing popup.
    InlineLoading,
    /// Retranslation failed; the popup stays up.
    InlineError,
}

/// Everything a renderer needs, derived from [`PopupState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    pub phase: Phase,
    pub content: Content,
    /// Display name of the detected source language.
    pub source_label: Option<String>,
    /// Selector entries; empty while loading.
    pub languages: Vec<LanguageOption>,
    pub copied: bool,
}

impl PopupView {
    pub fn from_state(state: &PopupState) -> Self {
        let content = match (state.phase, &state.inline) {
            (Phase::Loading, _) | (Phase::Idle, _) => Content::Loading,
            (_, InlineStatus::Translating) => Content::InlineLoading,
            (_, InlineStatus::Failed) => Content::InlineError,
            (Phase::Error, InlineStatus::Ready) => {
                Content::Error(state.error.clone().unwrap_or_else(|| "Translation failed".to_string()))
            }
            (_, InlineStatus::Ready) => Content::Translation(state.translated_text.clone().unwrap_or_default()),
        };

        let languages = match (&content, state.target_language.as_deref()) {
            (Content::Loading, _) | (_, None) => Vec::new(),
            (_, Some(target)) => languages::options(target),
        };

        Self {
            phase: state.phase,
            content,
            source_label: state
                .detected_language
                .as_deref()
                .map(|code| languages::display_name(code).to_string()),
            languages,
            copied: state.copy_acknowledged,
        }
    }

    /// Header and From/To row, present once the first response is in.
    pub fn shows_language_row(&self) -> bool {
        !matches!(self.content, Content::Loading) && !self.languages.is_empty()
    }

    pub fn can_copy(&self) -> bool {
        matches!(self.content, Content::Translation(_))
    }

    pub fn source_label_or_default(&self) -> &str {
        self.source_label.as_deref().unwrap_or("Auto-detect")
    }
}
