//! Conversion between canvas space and surface (screen) space.

use kurbo::{Affine, Point, Rect, Vec2};

/// Convert a screen point to canvas coordinates.
///
/// `surface_origin` is the screen position of the surface's top-left corner.
pub fn to_canvas_space(screen_point: Point, zoom: f64, surface_origin: Point) -> Point {
    Viewport::new(surface_origin.to_vec2(), zoom).screen_to_canvas(screen_point)
}

/// Convert a canvas point to surface pixels relative to the surface origin.
pub fn to_surface_space(canvas_point: Point, zoom: f64) -> Point {
    Affine::scale(zoom) * canvas_point
}

/// The view transform of the canvas surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen offset of the surface's top-left corner.
    pub origin: Vec2,
    /// Zoom factor (validated to be > 0 by the settings layer).
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(origin: Vec2, zoom: f64) -> Self {
        Self { origin, zoom }
    }

    /// Canvas to screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin) * Affine::scale(self.zoom)
    }

    /// Screen to canvas transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.origin)
    }

    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }

    /// Map a canvas rectangle to screen space.
    pub fn canvas_rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.canvas_to_screen(rect.origin()),
            self.canvas_to_screen(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Convert a screen-pixel distance to canvas units.
    pub fn screen_distance(&self, pixels: f64) -> f64 {
        pixels / self.zoom
    }
}
