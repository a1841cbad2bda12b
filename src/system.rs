//! Host integration

pub mod surface;

pub use surface::{HeadlessSurface, MountedElement, PopupSurface, SurfaceOp};
