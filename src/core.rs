//! Core logic: placement, popup lifecycle, and the collaborators it drives

pub mod clipboard;
pub mod features;
pub mod languages;
pub mod placement;
pub mod popup;
pub mod preferences;
