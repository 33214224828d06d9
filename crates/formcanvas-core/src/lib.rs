//! FormCanvas Core Library
//!
//! Platform-agnostic interactive canvas engine for a visual form builder:
//! snapping, selection, drag, resize, keyboard handling and alignment over a
//! host-owned element list.

pub mod align;
pub mod drag;
pub mod drop;
pub mod element;
pub mod error;
pub mod input;
pub mod intent;
pub mod interaction;
pub mod keyboard;
pub mod resize;
pub mod selection;
pub mod settings;
pub mod snap;
pub mod surface;
pub mod transform;

pub use align::{AlignKind, aligned_positions};
pub use drop::DropPayload;
pub use element::{
    Element, ElementId, ElementKind, ElementPatch, ElementTemplate, MIN_HEIGHT, MIN_WIDTH,
};
pub use error::{CanvasError, CanvasResult};
pub use input::{Key, KeyEvent, Modifiers, PointerButton};
pub use intent::CanvasIntent;
pub use interaction::{GestureHost, InteractionState, ListenerId, NoopGestureHost, Subscription};
pub use resize::ResizeHandle;
pub use selection::{MIN_MARQUEE_SIZE, Selection, SelectionRect};
pub use settings::{DesignerSettings, SettingsPatch};
pub use snap::{Guide, SNAP_THRESHOLD, SnapResult, SnapTieBreak, snap_position, snap_to_grid};
pub use surface::{CanvasSurface, CanvasView, CursorHint, ElementView};
pub use transform::{Viewport, to_canvas_space, to_surface_space};
