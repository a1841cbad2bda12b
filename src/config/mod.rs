//! Popup configuration
//!
//! Centralized geometry and timing constants so nothing in the controller or
//! the placement engine hardcodes them.

use crate::shared::events::PointerButton;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Margins and cursor offsets used by the placement engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Minimum distance kept from every viewport edge.
    pub margin: f64,
    /// Gap between cursor and popup when placed below it.
    pub offset_below: f64,
    /// Gap between cursor and popup when placed above it.
    pub offset_above: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            margin: 10.0,
            offset_below: 15.0,
            offset_above: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupTimings {
    pub auto_dismiss_ms: u64,
    pub hide_animation_ms: u64,
    pub copy_ack_ms: u64,
}

impl Default for PopupTimings {
    fn default() -> Self {
        Self {
            auto_dismiss_ms: 8000,
            hide_animation_ms: 200,
            copy_ack_ms: 2000,
        }
    }
}

impl PopupTimings {
    pub fn auto_dismiss(&self) -> Duration {
        Duration::from_millis(self.auto_dismiss_ms)
    }

    pub fn hide_animation(&self) -> Duration {
        Duration::from_millis(self.hide_animation_ms)
    }

    pub fn copy_ack(&self) -> Duration {
        Duration::from_millis(self.copy_ack_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    pub placement: PlacementConfig,
    pub timings: PopupTimings,
    /// Pointer button that turns a selection into a translation request.
    pub activation_button: PointerButton,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            timeout_secs: 30,
        }
    }
}

impl TranslatorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PopupConfig::default();
        assert_eq!(config.placement.margin, 10.0);
        assert_eq!(config.placement.offset_below, 15.0);
        assert_eq!(config.placement.offset_above, 10.0);
        assert_eq!(config.timings.auto_dismiss(), Duration::from_secs(8));
        assert_eq!(config.timings.copy_ack(), Duration::from_secs(2));
        assert_eq!(config.activation_button, PointerButton::Middle);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: PopupConfig = serde_json::from_str(r#"{ "placement": { "margin": 4.0 } }"#).unwrap();
        assert_eq!(config.placement.margin, 4.0);
        assert_eq!(config.placement.offset_below, 15.0);
        assert_eq!(config.timings, PopupTimings::default());
    }
}
