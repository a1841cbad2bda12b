//! Popup surface
//!
//! The host side of the popup: whatever actually draws the element (a page
//! overlay, a borderless window, a terminal layer). The controller only talks
//! to this trait.

use crate::render::Rendered;
use crate::shared::types::{Point, Position, PopupId, Size, Viewport};
use std::collections::HashMap;
use tracing::trace;

pub trait PopupSurface {
    fn viewport(&self) -> Viewport;

    /// Attach a new, not yet visible element near `anchor`.
    fn mount(&mut self, id: PopupId, content: Rendered, anchor: Point);

    /// Replace the element's content in place (no re-placement).
    fn update(&mut self, id: PopupId, content: Rendered);

    /// Size of the mounted element after layout.
    fn measure(&self, id: PopupId) -> Size;

    /// Apply the final position and start the enter animation.
    fn show_at(&mut self, id: PopupId, position: Position);

    /// Start the exit animation.
    fn begin_hide(&mut self, id: PopupId);

    /// Detach the element for good.
    fn remove(&mut self, id: PopupId);
}

/// Everything the controller asked of a surface, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Mount(PopupId),
    Update(PopupId),
    ShowAt(PopupId, Position),
    BeginHide(PopupId),
    Remove(PopupId),
}

impl SurfaceOp {
    pub fn popup(&self) -> PopupId {
        match self {
            SurfaceOp::Mount(id)
            | SurfaceOp::Update(id)
            | SurfaceOp::ShowAt(id, _)
            | SurfaceOp::BeginHide(id)
            | SurfaceOp::Remove(id) => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MountedElement {
    pub content: Rendered,
    pub anchor: Point,
    pub position: Option<Position>,
    pub visible: bool,
    pub hiding: bool,
}

/// In-memory surface with fixed element metrics. Used by the CLI demo and by
/// tests; keeps an operation log.
#[derive(Debug)]
pub struct HeadlessSurface {
    viewport: Viewport,
    element_size: Size,
    elements: HashMap<PopupId, MountedElement>,
    ops: Vec<SurfaceOp>,
}

impl HeadlessSurface {
    pub fn new(viewport: Viewport, element_size: Size) -> Self {
        Self {
            viewport,
            element_size,
            elements: HashMap::new(),
            ops: Vec::new(),
        }
    }

    pub fn set_element_size(&mut self, size: Size) {
        self.element_size = size;
    }

    pub fn element(&self, id: PopupId) -> Option<&MountedElement> {
        self.elements.get(&id)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn ops_for(&self, id: PopupId) -> Vec<SurfaceOp> {
        self.ops.iter().filter(|op| op.popup() == id).cloned().collect()
    }
}

impl PopupSurface for HeadlessSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn mount(&mut self, id: PopupId, content: Rendered, anchor: Point) {
        trace!("[HeadlessSurface] mount {}", id);
        self.elements.insert(
            id,
            MountedElement {
                content,
                anchor,
                position: None,
                visible: false,
                hiding: false,
            },
        );
        self.ops.push(SurfaceOp::Mount(id));
    }

    fn update(&mut self, id: PopupId, content: Rendered) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.content = content;
        }
        self.ops.push(SurfaceOp::Update(id));
    }

    fn measure(&self, _id: PopupId) -> Size {
        self.element_size
    }

    fn show_at(&mut self, id: PopupId, position: Position) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.position = Some(position);
            el.visible = true;
        }
        self.ops.push(SurfaceOp::ShowAt(id, position));
    }

    fn begin_hide(&mut self, id: PopupId) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.visible = false;
            el.hiding = true;
        }
        self.ops.push(SurfaceOp::BeginHide(id));
    }

    fn remove(&mut self, id: PopupId) {
        trace!("[HeadlessSurface] remove {}", id);
        self.elements.remove(&id);
        self.ops.push(SurfaceOp::Remove(id));
    }
}
