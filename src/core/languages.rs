//! Language catalog
//!
//! Ordered (code, display name) pairs used for the target-language selector
//! and for labelling the detected source language.

use crate::shared::types::LanguageOption;

pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("tr", "Turkish"),
    ("vi", "Vietnamese"),
    ("th", "Thai"),
    ("sv", "Swedish"),
    ("da", "Danish"),
    ("fi", "Finnish"),
    ("no", "Norwegian"),
    ("cs", "Czech"),
    ("el", "Greek"),
    ("he", "Hebrew"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("ms", "Malay"),
    ("ro", "Romanian"),
    ("uk", "Ukrainian"),
    ("bg", "Bulgarian"),
    ("ca", "Catalan"),
    ("hr", "Croatian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sr", "Serbian"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("et", "Estonian"),
];

pub fn is_supported(code: &str) -> bool {
    LANGUAGES.iter().any(|(c, _)| *c == code)
}

/// Human-readable name for `code`; unknown codes are shown as-is.
pub fn display_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// Selector entries with `selected` marking the current target.
pub fn options(selected: &str) -> Vec<LanguageOption> {
    LANGUAGES
        .iter()
        .map(|(code, name)| LanguageOption {
            code: code.to_string(),
            name: name.to_string(),
            selected: *code == selected,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_known_and_unknown() {
        assert_eq!(display_name("zh-TW"), "Chinese (Traditional)");
        assert_eq!(display_name("en-auto"), "en-auto");
        assert_eq!(display_name("unknown"), "unknown");
    }

    #[test]
    fn test_options_keep_catalog_order_and_selection() {
        let opts = options("fr");
        assert_eq!(opts.len(), LANGUAGES.len());
        assert_eq!(opts[0].code, "en");
        assert_eq!(opts.iter().filter(|o| o.selected).count(), 1);
        assert!(opts.iter().find(|o| o.code == "fr").unwrap().selected);
    }

    #[test]
    fn test_default_is_supported() {
        assert!(is_supported(DEFAULT_TARGET_LANGUAGE));
        assert!(!is_supported("xx"));
    }
}
