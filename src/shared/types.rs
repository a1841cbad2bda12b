use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

/// A coordinate in viewport space (CSS pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Measured size of a mounted popup element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Final top-left corner of a placed element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

impl Position {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Whether `point` falls inside the box of `size` placed at this position.
    pub fn contains(&self, size: Size, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.left + size.width
            && point.y >= self.top
            && point.y <= self.top + size.height
    }
}

/// Identity of one popup instance. A fresh id is minted on every trigger, so a
/// result tagged with an old id can never be applied to a newer popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PopupId(Uuid);

impl PopupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PopupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PopupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough to correlate log lines
        write!(f, "{}", &self.0.simple().to_string()[..8])
    }
}

/// Request handed to the translation collaborator. The source language is
/// always auto-detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
        }
    }
}

/// Normalized outcome of a translation request.
///
/// On the wire this is `{ success: true, translatedText, detectedLanguage,
/// targetLanguage }` or `{ success: false, error }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationResult {
    Success {
        translated_text: String,
        detected_language: String,
        target_language: String,
    },
    Failure {
        error: String,
    },
}

impl TranslationResult {
    pub fn success(
        translated_text: impl Into<String>,
        detected_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        TranslationResult::Success {
            translated_text: translated_text.into(),
            detected_language: detected_language.into(),
            target_language: target_language.into(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        TranslationResult::Failure { error: error.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TranslationResult::Success { .. })
    }
}

impl Serialize for TranslationResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        match self {
            TranslationResult::Success {
                translated_text,
                detected_language,
                target_language,
            } => {
                let mut s = serializer.serialize_struct("TranslationResult", 4)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("translatedText", translated_text)?;
                s.serialize_field("detectedLanguage", detected_language)?;
                s.serialize_field("targetLanguage", target_language)?;
                s.end()
            }
            TranslationResult::Failure { error } => {
                let mut s = serializer.serialize_struct("TranslationResult", 2)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("error", error)?;
                s.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for TranslationResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            success: bool,
            translated_text: Option<String>,
            detected_language: Option<String>,
            target_language: Option<String>,
            error: Option<String>,
        }
        let raw = Raw::deserialize(deserializer)?;
        if raw.success {
            let translated_text = raw
                .translated_text
                .ok_or_else(|| serde::de::Error::missing_field("translatedText"))?;
            let target_language = raw
                .target_language
                .ok_or_else(|| serde::de::Error::missing_field("targetLanguage"))?;
            Ok(TranslationResult::Success {
                translated_text,
                detected_language: raw.detected_language.unwrap_or_else(|| "unknown".to_string()),
                target_language,
            })
        } else {
            Ok(TranslationResult::Failure {
                error: raw.error.unwrap_or_else(|| "Translation failed".to_string()),
            })
        }
    }
}

/// One entry of the target-language selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
    pub selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_wire_shape() {
        let result = TranslationResult::success("hola", "en", "es");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "translatedText": "hola",
                "detectedLanguage": "en",
                "targetLanguage": "es"
            })
        );
    }

    #[test]
    fn test_failure_from_wire() {
        let parsed: TranslationResult =
            serde_json::from_value(json!({ "success": false, "error": "HTTP error! status: 500" })).unwrap();
        assert_eq!(parsed, TranslationResult::failure("HTTP error! status: 500"));
        assert!(!parsed.is_success());
    }

    #[test]
    fn test_success_without_text_is_rejected() {
        let parsed = serde_json::from_value::<TranslationResult>(json!({ "success": true, "targetLanguage": "en" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_request_uses_camel_case() {
        let value = serde_json::to_value(TranslationRequest::new("hello", "fr")).unwrap();
        assert_eq!(value, json!({ "text": "hello", "targetLanguage": "fr" }));
    }

    #[test]
    fn test_position_contains_edges() {
        let pos = Position::new(10.0, 20.0);
        let size = Size::new(100.0, 50.0);
        assert!(pos.contains(size, Point::new(10.0, 20.0)));
        assert!(pos.contains(size, Point::new(110.0, 70.0)));
        assert!(!pos.contains(size, Point::new(9.0, 30.0)));
        assert!(!pos.contains(size, Point::new(50.0, 71.0)));
    }

    #[test]
    fn test_popup_ids_are_unique() {
        assert_ne!(PopupId::new(), PopupId::new());
    }
}
