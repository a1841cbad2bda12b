//! Selection translation popup
//!
//! Places a transient popup next to the pointer, fully inside the viewport,
//! and drives its lifecycle: loading, result or error, in-place
//! retranslation, copy, and dismissal.
//!
//! ## Architecture
//!
//! - `core`: placement engine, popup controller, collaborator contracts
//! - `render`: view model and render strategies
//! - `system`: host surface contract and a headless implementation
//! - `api`: settings surface
//! - `shared`: value types, errors, events, persisted settings
//! - `config`: tunables with their defaults

pub mod api;
pub mod config;
pub mod core;
pub mod render;
pub mod shared;
pub mod system;

pub use crate::config::{PlacementConfig, PopupConfig, PopupTimings, TranslatorConfig};
pub use crate::core::placement::{place, place_with_fit, VerticalFit};
pub use crate::core::popup::{Phase, PopupController, PopupState, Services};
pub use crate::render::{RenderStrategy, Rendered};
pub use crate::shared::error::{AppError, AppResult};
pub use crate::shared::events::{EventDisposition, HostEvent, PointerButton};
pub use crate::shared::types::{Point, PopupId, Position, Size, TranslationRequest, TranslationResult, Viewport};
pub use crate::system::surface::{HeadlessSurface, PopupSurface};
