//! Eight-handle, anchor-preserving resize.

use crate::element::{ElementId, MIN_HEIGHT, MIN_WIDTH, clamp_position};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// A resize handle, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    Nw,
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
}

impl ResizeHandle {
    /// Hit-test order: corners before edge midpoints.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Nw,
        ResizeHandle::Ne,
        ResizeHandle::Se,
        ResizeHandle::Sw,
        ResizeHandle::N,
        ResizeHandle::E,
        ResizeHandle::S,
        ResizeHandle::W,
    ];

    pub fn moves_east(self) -> bool {
        matches!(self, ResizeHandle::Ne | ResizeHandle::E | ResizeHandle::Se)
    }

    pub fn moves_west(self) -> bool {
        matches!(self, ResizeHandle::Nw | ResizeHandle::W | ResizeHandle::Sw)
    }

    pub fn moves_north(self) -> bool {
        matches!(self, ResizeHandle::Nw | ResizeHandle::N | ResizeHandle::Ne)
    }

    pub fn moves_south(self) -> bool {
        matches!(self, ResizeHandle::Sw | ResizeHandle::S | ResizeHandle::Se)
    }

    /// Where this handle sits on `bounds`.
    pub fn position_on(self, bounds: Rect) -> Point {
        let x = if self.moves_west() {
            bounds.x0
        } else if self.moves_east() {
            bounds.x1
        } else {
            bounds.center().x
        };
        let y = if self.moves_north() {
            bounds.y0
        } else if self.moves_south() {
            bounds.y1
        } else {
            bounds.center().y
        };
        Point::new(x, y)
    }

    /// CSS cursor name for hosts that render one.
    pub fn cursor(self) -> &'static str {
        match self {
            ResizeHandle::Nw | ResizeHandle::Se => "nwse-resize",
            ResizeHandle::Ne | ResizeHandle::Sw => "nesw-resize",
            ResizeHandle::N | ResizeHandle::S => "ns-resize",
            ResizeHandle::E | ResizeHandle::W => "ew-resize",
        }
    }
}

/// A handle and its canvas-space location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: ResizeHandle,
    pub position: Point,
}

impl Handle {
    /// Check if a point hits this handle. `tolerance` is in canvas units.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// All eight handles for an element's bounds.
pub fn handles_for(bounds: Rect) -> Vec<Handle> {
    ResizeHandle::ALL
        .iter()
        .map(|&kind| Handle { kind, position: kind.position_on(bounds) })
        .collect()
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(bounds: Rect, point: Point, tolerance: f64) -> Option<ResizeHandle> {
    handles_for(bounds)
        .into_iter()
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.kind)
}

/// Compute the resized geometry for a pointer delta.
///
/// Minimum sizes always win. Growth stops at the canvas edge so the anchored
/// side never moves, and the final position is clamped into the canvas.
pub fn apply_resize(
    handle: ResizeHandle,
    start_position: Point,
    start_size: Size,
    delta: Vec2,
    canvas: Size,
) -> (Point, Size) {
    let mut position = start_position;
    let mut size = start_size;

    if handle.moves_east() {
        size.width = (start_size.width + delta.x)
            .min(canvas.width - start_position.x)
            .max(MIN_WIDTH);
    } else if handle.moves_west() {
        size.width = (start_size.width - delta.x)
            .min(start_position.x + start_size.width)
            .max(MIN_WIDTH);
        position.x = start_position.x + (start_size.width - size.width);
    }

    if handle.moves_south() {
        size.height = (start_size.height + delta.y)
            .min(canvas.height - start_position.y)
            .max(MIN_HEIGHT);
    } else if handle.moves_north() {
        size.height = (start_size.height - delta.y)
            .min(start_position.y + start_size.height)
            .max(MIN_HEIGHT);
        position.y = start_position.y + (start_size.height - size.height);
    }

    (clamp_position(position, size, canvas), size)
}

/// State of an active resize gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub element_id: ElementId,
    pub handle: ResizeHandle,
    pub start_size: Size,
    pub start_position: Point,
    /// Pointer position at pointer-down, in canvas space.
    pub pointer_start: Point,
    /// Latest computed geometry, not yet committed.
    pub current: Option<(Point, Size)>,
}

impl ResizeState {
    pub fn new(
        element_id: ElementId,
        handle: ResizeHandle,
        bounds: Rect,
        pointer_start: Point,
    ) -> Self {
        Self {
            element_id,
            handle,
            start_size: bounds.size(),
            start_position: bounds.origin(),
            pointer_start,
            current: None,
        }
    }

    /// Recompute the temporary geometry for a new pointer position.
    pub fn update(&mut self, pointer: Point, canvas: Size) -> (Point, Size) {
        let delta = pointer - self.pointer_start;
        let geometry =
            apply_resize(self.handle, self.start_position, self.start_size, delta, canvas);
        self.current = Some(geometry);
        geometry
    }

    /// Temporary bounds, falling back to the start geometry.
    pub fn bounds(&self) -> Rect {
        let (position, size) = self.current.unwrap_or((self.start_position, self.start_size));
        Rect::from_origin_size(position, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Size = Size::new(800.0, 600.0);

    fn resize(handle: ResizeHandle, dx: f64, dy: f64) -> (Point, Size) {
        apply_resize(
            handle,
            Point::new(100.0, 100.0),
            Size::new(200.0, 100.0),
            Vec2::new(dx, dy),
            CANVAS,
        )
    }

    #[test]
    fn test_se_keeps_top_left() {
        let (position, size) = resize(ResizeHandle::Se, 50.0, 30.0);
        assert_eq!(position, Point::new(100.0, 100.0));
        assert_eq!(size, Size::new(250.0, 130.0));
    }

    #[test]
    fn test_nw_keeps_bottom_right() {
        for (dx, dy) in [(-30.0, -20.0), (180.0, 90.0), (40.0, -10.0)] {
            let (position, size) = resize(ResizeHandle::Nw, dx, dy);
            assert!((position.x + size.width - 300.0).abs() < 1e-9);
            assert!((position.y + size.height - 200.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_min_size_clamp() {
        let (position, size) = resize(ResizeHandle::Nw, 180.0, 90.0);
        assert_eq!(size, Size::new(MIN_WIDTH, MIN_HEIGHT));
        assert_eq!(position, Point::new(250.0, 170.0));

        let (_, size) = resize(ResizeHandle::Se, -500.0, -500.0);
        assert_eq!(size, Size::new(MIN_WIDTH, MIN_HEIGHT));
    }

    #[test]
    fn test_edge_handles_touch_one_axis() {
        let (position, size) = resize(ResizeHandle::N, 25.0, -40.0);
        assert_eq!(position, Point::new(100.0, 60.0));
        assert_eq!(size, Size::new(200.0, 140.0));

        let (position, size) = resize(ResizeHandle::E, 25.0, -40.0);
        assert_eq!(position, Point::new(100.0, 100.0));
        assert_eq!(size, Size::new(225.0, 100.0));

        let (position, size) = resize(ResizeHandle::W, 25.0, 70.0);
        assert_eq!(position, Point::new(125.0, 100.0));
        assert_eq!(size, Size::new(175.0, 100.0));

        let (position, size) = resize(ResizeHandle::S, 25.0, 70.0);
        assert_eq!(position, Point::new(100.0, 100.0));
        assert_eq!(size, Size::new(200.0, 170.0));
    }

    #[test]
    fn test_ne_and_sw() {
        let (position, size) = resize(ResizeHandle::Ne, 20.0, 20.0);
        assert_eq!(position, Point::new(100.0, 120.0));
        assert_eq!(size, Size::new(220.0, 80.0));

        let (position, size) = resize(ResizeHandle::Sw, 20.0, 20.0);
        assert_eq!(position, Point::new(120.0, 100.0));
        assert_eq!(size, Size::new(180.0, 120.0));
    }

    #[test]
    fn test_growth_stops_at_canvas() {
        let (position, size) = apply_resize(
            ResizeHandle::Se,
            Point::new(700.0, 500.0),
            Size::new(50.0, 30.0),
            Vec2::new(500.0, 500.0),
            CANVAS,
        );
        assert_eq!(position, Point::new(700.0, 500.0));
        assert!(position.x + size.width <= CANVAS.width);
        assert!(position.y + size.height <= CANVAS.height);

        let (position, size) = apply_resize(
            ResizeHandle::Nw,
            Point::new(20.0, 10.0),
            Size::new(100.0, 40.0),
            Vec2::new(-100.0, -100.0),
            CANVAS,
        );
        assert_eq!(position, Point::ZERO);
        assert_eq!(size, Size::new(120.0, 50.0));
    }

    #[test]
    fn test_handle_positions_and_hit() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(ResizeHandle::N.position_on(bounds), Point::new(50.0, 0.0));
        assert_eq!(ResizeHandle::Se.position_on(bounds), Point::new(100.0, 50.0));
        assert_eq!(ResizeHandle::W.position_on(bounds), Point::new(0.0, 25.0));
        assert_eq!(handles_for(bounds).len(), 8);

        assert_eq!(hit_test_handles(bounds, Point::new(98.0, 52.0), 8.0), Some(ResizeHandle::Se));
        assert_eq!(hit_test_handles(bounds, Point::new(50.0, 25.0), 8.0), None);
    }

    #[test]
    fn test_state_update_overwrites() {
        let bounds = Rect::new(100.0, 100.0, 300.0, 200.0);
        let id = uuid::Uuid::new_v4();
        let mut state = ResizeState::new(id, ResizeHandle::Se, bounds, Point::new(300.0, 200.0));
        assert_eq!(state.bounds(), bounds);
        state.update(Point::new(350.0, 220.0), CANVAS);
        state.update(Point::new(320.0, 210.0), CANVAS);
        assert_eq!(state.bounds(), Rect::new(100.0, 100.0, 320.0, 210.0));
    }
}
