use crate::shared::types::Point;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PointerButton {
    Primary,
    #[default]
    Middle,
    Secondary,
}

/// Events the host (page, window, terminal) feeds into the popup controller.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Pointer released with a selection present.
    Activate {
        button: PointerButton,
        anchor: Point,
        selected_text: String,
    },
    /// The user picked a new entry in the popup's target-language selector.
    SelectLanguage(String),
    CopyClicked,
    /// Close glyph or Done button.
    CloseClicked,
    PointerDown(Point),
    Scrolled,
    Shutdown,
}

/// Tells the host whether to suppress the default action for the event
/// (middle-click auto-scroll, for instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Consumed,
    Ignored,
}
