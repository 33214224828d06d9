//! Transient gesture state and pointer listener subscriptions.

use crate::drag::{GroupDrag, SingleDrag};
use crate::element::Element;
use crate::resize::ResizeState;
use crate::selection::SelectionRect;
use kurbo::{Point, Rect};
use std::fmt;
use std::rc::Rc;

/// What the pointer is currently doing. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    DraggingSingle(SingleDrag),
    DraggingGroup(GroupDrag),
    Resizing(ResizeState),
    RubberBand(SelectionRect),
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::DraggingSingle(_) => "drag",
            InteractionState::DraggingGroup(_) => "group-drag",
            InteractionState::Resizing(_) => "resize",
            InteractionState::RubberBand(_) => "rubber-band",
        }
    }

    /// Temporary bounds for `element` while a gesture moves or resizes it.
    pub fn overlay(&self, element: &Element) -> Rect {
        let position = match self {
            InteractionState::DraggingSingle(drag) if drag.element_id == element.id => drag.current,
            InteractionState::DraggingGroup(drag) => drag
                .current
                .iter()
                .find(|(id, _)| *id == element.id)
                .map(|(_, p)| *p),
            InteractionState::Resizing(resize) if resize.element_id == element.id => {
                return resize.bounds();
            }
            _ => None,
        };
        Rect::from_origin_size(position.unwrap_or(element.position), element.size)
    }

    /// The marquee rectangle while rubber-band selecting.
    pub fn marquee(&self) -> Option<Rect> {
        match self {
            InteractionState::RubberBand(rect) => Some(rect.to_rect()),
            _ => None,
        }
    }

    /// Update the marquee's current corner. Returns false outside a rubber-band.
    pub fn track_marquee(&mut self, point: Point) -> bool {
        if let InteractionState::RubberBand(rect) = self {
            rect.current = point;
            true
        } else {
            false
        }
    }
}

/// Handle returned by the host for one set of global pointer listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The host side of gesture tracking.
///
/// While a gesture is active the host forwards pointer move and up events
/// from anywhere on screen, not only from inside the canvas.
pub trait GestureHost {
    fn attach_pointer_listeners(&self) -> ListenerId;
    fn detach_pointer_listeners(&self, id: ListenerId);
}

/// Host for embeddings that always route pointer events to the canvas.
#[derive(Debug, Default)]
pub struct NoopGestureHost;

impl GestureHost for NoopGestureHost {
    fn attach_pointer_listeners(&self) -> ListenerId {
        ListenerId(0)
    }

    fn detach_pointer_listeners(&self, _id: ListenerId) {}
}

/// Active listener subscription. Detaches from the host when dropped.
pub struct Subscription {
    host: Rc<dyn GestureHost>,
    id: ListenerId,
}

impl Subscription {
    pub fn new(host: Rc<dyn GestureHost>) -> Self {
        let id = host.attach_pointer_listeners();
        log::trace!("Attached pointer listeners {:?}", id);
        Self { host, id }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        log::trace!("Detached pointer listeners {:?}", self.id);
        self.host.detach_pointer_listeners(self.id);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
