//! The canvas surface: routes pointer, keyboard and drop events through the
//! controllers and reports the resulting intents.

use crate::align::AlignKind;
use crate::drag::{GroupDrag, SingleDrag};
use crate::drop::element_from_drop;
use crate::element::{Element, ElementId, ElementPatch};
use crate::input::{KeyEvent, Modifiers, PointerButton};
use crate::intent::CanvasIntent;
use crate::interaction::{GestureHost, InteractionState, NoopGestureHost, Subscription};
use crate::keyboard::handle_key;
use crate::resize::{
    HANDLE_HIT_TOLERANCE, Handle, ResizeHandle, ResizeState, handles_for, hit_test_handles,
};
use crate::selection::{Selection, SelectionRect, apply_rubber_band};
use crate::settings::{DesignerSettings, SettingsPatch, clamp_zoom, step_zoom};
use crate::snap::{Guide, SnapTieBreak};
use crate::transform::Viewport;
use kurbo::{Point, Rect, Size};
use std::rc::Rc;

/// Cursor the host should show for a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Move,
    Resize(ResizeHandle),
}

impl CursorHint {
    /// CSS cursor name.
    pub fn css(self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Move => "move",
            CursorHint::Resize(handle) => handle.cursor(),
        }
    }
}

/// One element as it should be drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementView {
    pub id: ElementId,
    /// Bounds in canvas space, with any in-flight gesture applied.
    pub bounds: Rect,
    /// Bounds in screen space.
    pub screen_bounds: Rect,
    pub selected: bool,
    pub primary: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasView {
    /// The design area in screen space.
    pub canvas_rect: Rect,
    pub show_grid: bool,
    pub grid_size: f64,
    pub zoom: f64,
    pub elements: Vec<ElementView>,
    pub guides: Vec<Guide>,
    /// Marquee in canvas space.
    pub marquee: Option<Rect>,
    /// Resize handles of the primary element, in canvas space.
    pub handles: Vec<Handle>,
}

/// Interactive canvas over a host-owned element list.
pub struct CanvasSurface {
    elements: Vec<Element>,
    settings: DesignerSettings,
    selection: Selection,
    viewport: Viewport,
    interaction: InteractionState,
    subscription: Option<Subscription>,
    host: Rc<dyn GestureHost>,
    tie_break: SnapTieBreak,
    guides: Vec<Guide>,
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self::new(Rc::new(NoopGestureHost))
    }
}

impl CanvasSurface {
    pub fn new(host: Rc<dyn GestureHost>) -> Self {
        Self {
            elements: Vec::new(),
            settings: DesignerSettings::default(),
            selection: Selection::new(),
            viewport: Viewport::default(),
            interaction: InteractionState::Idle,
            subscription: None,
            host,
            tie_break: SnapTieBreak::default(),
            guides: Vec::new(),
        }
    }

    /// Use a different snap tie-break policy.
    pub fn with_tie_break(mut self, tie_break: SnapTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Take the host's latest snapshot. Called every render cycle.
    ///
    /// Invalid settings are rejected and the previous ones kept.
    pub fn sync(
        &mut self,
        elements: Vec<Element>,
        selected: Option<ElementId>,
        settings: DesignerSettings,
    ) {
        match settings.validate() {
            Ok(()) => {
                self.viewport.zoom = settings.zoom;
                self.settings = settings;
            }
            Err(e) => log::warn!("Keeping previous settings: {}", e),
        }
        self.elements = elements;
        self.selection.reconcile(&self.elements, selected);
    }

    /// Screen position of the surface's top-left corner.
    pub fn set_surface_origin(&mut self, origin: Point) {
        self.viewport.origin = origin.to_vec2();
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn settings(&self) -> &DesignerSettings {
        &self.settings
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn is_gesture_active(&self) -> bool {
        !self.interaction.is_idle()
    }

    /// Topmost element under a canvas-space point.
    pub fn element_at(&self, point: Point) -> Option<&Element> {
        self.elements.iter().rev().find(|e| e.contains(point))
    }

    /// Resize handle of the primary element under a canvas-space point.
    fn handle_at(&self, point: Point) -> Option<(ElementId, ResizeHandle, Rect)> {
        let primary = self.primary_element()?;
        let tolerance = self.viewport.screen_distance(HANDLE_HIT_TOLERANCE);
        let bounds = primary.bounds();
        hit_test_handles(bounds, point, tolerance).map(|handle| (primary.id, handle, bounds))
    }

    fn primary_element(&self) -> Option<&Element> {
        let id = self.selection.primary()?;
        self.elements.iter().find(|e| e.id == id)
    }

    fn begin_gesture(&mut self, state: InteractionState) {
        log::debug!("Begin {} gesture", state.name());
        self.interaction = state;
        self.subscription = Some(Subscription::new(self.host.clone()));
    }

    fn end_gesture(&mut self) -> InteractionState {
        self.subscription = None;
        self.guides.clear();
        std::mem::take(&mut self.interaction)
    }

    /// Handle a pointer press at a screen position.
    pub fn pointer_down(
        &mut self,
        screen: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> Vec<CanvasIntent> {
        if button != PointerButton::Primary || self.is_gesture_active() {
            return Vec::new();
        }
        let point = self.viewport.screen_to_canvas(screen);

        if let Some((id, handle, bounds)) = self.handle_at(point) {
            let resize = ResizeState::new(id, handle, bounds, point);
            self.begin_gesture(InteractionState::Resizing(resize));
            return Vec::new();
        }

        let Some(element) = self.element_at(point).cloned() else {
            self.begin_gesture(InteractionState::RubberBand(SelectionRect::new(point)));
            return Vec::new();
        };

        if modifiers.toggles_selection() {
            self.selection.toggle(element.id);
            return vec![self.selection.to_intent()];
        }

        if self.selection.is_multi() && self.selection.contains(element.id) {
            self.selection.set_primary(element.id);
            let drag = GroupDrag::new(&element, self.selection.ids(), &self.elements, point);
            self.begin_gesture(InteractionState::DraggingGroup(drag));
        } else {
            self.selection.select_only(element.id);
            self.begin_gesture(InteractionState::DraggingSingle(SingleDrag::new(&element, point)));
        }
        vec![self.selection.to_intent()]
    }

    /// Handle pointer movement during a gesture.
    pub fn pointer_move(&mut self, screen: Point) {
        let point = self.viewport.screen_to_canvas(screen);
        if self.interaction.track_marquee(point) {
            return;
        }
        let guides = match &mut self.interaction {
            InteractionState::Idle | InteractionState::RubberBand(_) => return,
            InteractionState::DraggingSingle(drag) => {
                drag.update(point, &self.elements, &self.settings, self.tie_break)
            }
            InteractionState::DraggingGroup(drag) => {
                drag.update(point, &self.elements, &self.settings, self.tie_break)
            }
            InteractionState::Resizing(resize) => {
                if self.elements.iter().any(|e| e.id == resize.element_id) {
                    resize.update(point, self.settings.canvas_size);
                    Some(Vec::new())
                } else {
                    None
                }
            }
        };

        match guides {
            Some(guides) => self.guides = guides,
            None => {
                let abandoned = self.end_gesture();
                log::debug!("Abandoned {} gesture: element no longer present", abandoned.name());
            }
        }
    }

    /// Handle the pointer release, committing the gesture.
    pub fn pointer_up(&mut self, screen: Point) -> Vec<CanvasIntent> {
        let point = self.viewport.screen_to_canvas(screen);
        let intents = match self.end_gesture() {
            InteractionState::Idle => return Vec::new(),
            InteractionState::DraggingSingle(drag) => drag.commit(),
            InteractionState::DraggingGroup(drag) => drag.commit(),
            InteractionState::Resizing(resize) => resize
                .current
                .map(|(position, size)| CanvasIntent::Update {
                    id: resize.element_id,
                    patch: ElementPatch::geometry(position, size),
                })
                .into_iter()
                .collect(),
            InteractionState::RubberBand(mut rect) => {
                rect.current = point;
                apply_rubber_band(&mut self.selection, &self.elements, &rect);
                vec![self.selection.to_intent()]
            }
        };
        log::debug!("Committed gesture with {} intent(s)", intents.len());
        intents
    }

    /// Handle a key press.
    pub fn key_down(&mut self, event: &KeyEvent) -> Vec<CanvasIntent> {
        let gesture_active = self.is_gesture_active();
        handle_key(event, &mut self.selection, &self.elements, &self.settings, gesture_active)
    }

    /// Handle an external drop at a screen position.
    pub fn drop_payload(&mut self, data: &str, screen: Point) -> Vec<CanvasIntent> {
        let point = self.viewport.screen_to_canvas(screen);
        element_from_drop(data, point, &self.elements, &self.settings)
            .map(CanvasIntent::Add)
            .into_iter()
            .collect()
    }

    /// Align or distribute the current selection.
    pub fn align_selection(&self, kind: AlignKind) -> Vec<CanvasIntent> {
        if self.selection.len() < kind.min_elements() {
            return Vec::new();
        }
        vec![CanvasIntent::Align {
            kind,
            ids: self.selection.ids().to_vec(),
        }]
    }

    pub fn zoom_in(&self) -> Vec<CanvasIntent> {
        self.zoom_to(step_zoom(self.settings.zoom, 1))
    }

    pub fn zoom_out(&self) -> Vec<CanvasIntent> {
        self.zoom_to(step_zoom(self.settings.zoom, -1))
    }

    /// Request a zoom level, clamped into range. Empty if it would not change.
    pub fn zoom_to(&self, zoom: f64) -> Vec<CanvasIntent> {
        let zoom = clamp_zoom(zoom);
        if (zoom - self.settings.zoom).abs() < f64::EPSILON {
            return Vec::new();
        }
        vec![CanvasIntent::UpdateSettings(SettingsPatch::zoom(zoom))]
    }

    pub fn toggle_grid(&self) -> Vec<CanvasIntent> {
        vec![CanvasIntent::UpdateSettings(SettingsPatch::show_grid(!self.settings.show_grid))]
    }

    /// Cursor for a screen position.
    pub fn cursor_at(&self, screen: Point) -> CursorHint {
        match &self.interaction {
            InteractionState::Resizing(resize) => return CursorHint::Resize(resize.handle),
            InteractionState::DraggingSingle(_) | InteractionState::DraggingGroup(_) => {
                return CursorHint::Move;
            }
            InteractionState::RubberBand(_) => return CursorHint::Default,
            InteractionState::Idle => {}
        }
        let point = self.viewport.screen_to_canvas(screen);
        if let Some((_, handle, _)) = self.handle_at(point) {
            CursorHint::Resize(handle)
        } else if self.element_at(point).is_some() {
            CursorHint::Move
        } else {
            CursorHint::Default
        }
    }

    /// Committed elements with the in-flight gesture overlaid.
    pub fn view(&self) -> CanvasView {
        let elements: Vec<ElementView> = self
            .elements
            .iter()
            .map(|element| {
                let bounds = self.interaction.overlay(element);
                ElementView {
                    id: element.id,
                    bounds,
                    screen_bounds: self.viewport.canvas_rect_to_screen(bounds),
                    selected: self.selection.contains(element.id),
                    primary: self.selection.primary() == Some(element.id),
                }
            })
            .collect();

        let handles = elements
            .iter()
            .find(|e| e.primary)
            .map(|e| handles_for(e.bounds))
            .unwrap_or_default();

        let canvas = Rect::from_origin_size(Point::ZERO, self.settings.canvas_size);
        CanvasView {
            canvas_rect: self.viewport.canvas_rect_to_screen(canvas),
            show_grid: self.settings.show_grid,
            grid_size: self.settings.grid_size,
            zoom: self.viewport.zoom,
            elements,
            guides: self.guides.clone(),
            marquee: self.interaction.marquee(),
            handles,
        }
    }

    /// Size of the design area in screen pixels.
    pub fn surface_size(&self) -> Size {
        self.settings.canvas_size * self.viewport.zoom
    }
}
