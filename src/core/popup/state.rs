use crate::shared::types::{Point, PopupId, Position, Size};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
    /// Exit animation running; the popup no longer reacts to anything.
    Hiding,
}

/// Progress of an in-place retranslation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InlineStatus {
    #[default]
    Ready,
    Translating,
    Failed,
}

/// Data of the single live popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupState {
    pub id: PopupId,
    pub phase: Phase,
    /// Cursor position at creation.
    pub anchor: Point,
    pub original_text: String,
    pub detected_language: Option<String>,
    /// Unknown until the first response arrives or the user picks one.
    pub target_language: Option<String>,
    pub translated_text: Option<String>,
    pub error: Option<String>,
    pub inline: InlineStatus,
    /// Set once by the first layout pass.
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub copy_acknowledged: bool,
    /// Sequence number of the newest request; older responses are stale.
    pub(crate) request_seq: u64,
    /// Auto-dismiss is armed at most once per popup.
    pub(crate) auto_dismiss_armed: bool,
}

impl PopupState {
    pub fn new(anchor: Point, original_text: impl Into<String>) -> Self {
        Self {
            id: PopupId::new(),
            phase: Phase::Loading,
            anchor,
            original_text: original_text.into(),
            detected_language: None,
            target_language: None,
            translated_text: None,
            error: None,
            inline: InlineStatus::Ready,
            position: None,
            size: None,
            copy_acknowledged: false,
            request_seq: 0,
            auto_dismiss_armed: false,
        }
    }

    pub fn is_hiding(&self) -> bool {
        self.phase == Phase::Hiding
    }

    /// Whether a point hits the placed popup. An unplaced popup has no bounds.
    pub fn contains(&self, point: Point) -> bool {
        match (self.position, self.size) {
            (Some(position), Some(size)) => position.contains(size, point),
            _ => false,
        }
    }
}
