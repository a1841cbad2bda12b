//! Popup placement
//!
//! Pure geometry: given the cursor, the measured popup size and the viewport,
//! compute a top-left position that keeps the popup fully on screen.
//!
//! Preference order:
//! 1. below the cursor, horizontally centered on it
//! 2. above the cursor
//! 3. pinned to whichever viewport edge has more room
//!
//! Horizontal centering is best effort; the left margin always wins over the
//! right one when the popup is wider than the viewport.

use crate::config::PlacementConfig;
use crate::shared::types::{Point, Position, Size, Viewport};

/// Which vertical branch produced the final `top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalFit {
    Below,
    Above,
    /// Fits neither side; pinned to the bottom edge.
    PinnedBottom,
    /// Fits neither side; pinned to the top edge.
    PinnedTop,
}

/// Compute the popup position. Deterministic and side-effect free.
pub fn place(anchor: Point, size: Size, viewport: Viewport, config: &PlacementConfig) -> Position {
    place_with_fit(anchor, size, viewport, config).0
}

/// Same as [`place`], also reporting which vertical branch was taken.
pub fn place_with_fit(
    anchor: Point,
    size: Size,
    viewport: Viewport,
    config: &PlacementConfig,
) -> (Position, VerticalFit) {
    let left = horizontal(anchor.x, size.width, viewport.width, config.margin);
    let (top, fit) = vertical(anchor.y, size.height, viewport.height, config);
    (Position { left, top }, fit)
}

fn horizontal(x: f64, width: f64, viewport_width: f64, margin: f64) -> f64 {
    let mut left = x - width / 2.0;

    if left + width > viewport_width - margin {
        left = viewport_width - width - margin;
    }
    if left < margin {
        left = margin;
    }

    left
}

fn vertical(y: f64, height: f64, viewport_height: f64, config: &PlacementConfig) -> (f64, VerticalFit) {
    let margin = config.margin;
    let top_if_below = y + config.offset_below;
    let top_if_above = y - height - config.offset_above;

    let (mut top, fit) = if top_if_below + height <= viewport_height - margin {
        (top_if_below, VerticalFit::Below)
    } else if top_if_above >= margin {
        (top_if_above, VerticalFit::Above)
    } else {
        let space_below = viewport_height - y;
        let space_above = y;
        if space_below > space_above {
            ((viewport_height - height - margin).max(margin), VerticalFit::PinnedBottom)
        } else {
            (margin, VerticalFit::PinnedTop)
        }
    };

    // Final clip. For a popup taller than the viewport minus both margins the
    // second check wins and `top` lands above the margin.
    if top < margin {
        top = margin;
    }
    if top + height > viewport_height - margin {
        top = viewport_height - height - margin;
    }

    (top, fit)
}
