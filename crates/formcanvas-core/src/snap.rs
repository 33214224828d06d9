//! Snap functionality for aligning a moving element to the canvas edges, the grid
//! and other elements.

use crate::element::{Element, ElementId};
use crate::settings::DesignerSettings;
use kurbo::{Point, Rect, Size};

/// Distance threshold for snapping (in canvas units).
pub const SNAP_THRESHOLD: f64 = 8.0;

/// Orientation of a snap line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// A vertical line `x = position`.
    Vertical,
    /// A horizontal line `y = position`.
    Horizontal,
}

/// Where a snap line comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapSource {
    CanvasEdge,
    Grid,
    Element(ElementId),
}

/// A candidate alignment line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapLine {
    pub axis: Axis,
    pub position: f64,
    pub source: SnapSource,
}

/// A line that fired during snapping, kept for visual feedback only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guide {
    pub axis: Axis,
    pub position: f64,
}

/// How to choose between several lines within the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapTieBreak {
    /// The last matching line in iteration order wins.
    #[default]
    LastMatch,
    /// The closest matching line wins; equal distances keep the earlier one.
    Nearest,
}

/// Result of a snap operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    /// The corrected top-left position.
    pub position: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
    /// Lines that produced a correction.
    pub guides: Vec<Guide>,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(position: Point) -> Self {
        Self {
            position,
            snapped_x: false,
            snapped_y: false,
            guides: Vec::new(),
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Collect the candidate snap lines for a box moving to `moving`.
///
/// Order: canvas edges, grid lines (ascending, only when the grid is shown), then
/// the left/center/right and top/middle/bottom lines of each element. Only grid
/// lines within [`SNAP_THRESHOLD`] of one of the box's edges or centers are included.
pub fn collect_snap_lines<'a>(
    moving: Rect,
    others: impl IntoIterator<Item = &'a Element>,
    settings: &DesignerSettings,
) -> Vec<SnapLine> {
    let canvas = settings.canvas_size;
    let mut lines = vec![
        SnapLine { axis: Axis::Vertical, position: 0.0, source: SnapSource::CanvasEdge },
        SnapLine { axis: Axis::Vertical, position: canvas.width, source: SnapSource::CanvasEdge },
        SnapLine { axis: Axis::Horizontal, position: 0.0, source: SnapSource::CanvasEdge },
        SnapLine {
            axis: Axis::Horizontal,
            position: canvas.height,
            source: SnapSource::CanvasEdge,
        },
    ];

    if settings.show_grid && settings.grid_size > 0.0 {
        let center = moving.center();
        let xs = [moving.x0, center.x, moving.x1];
        let ys = [moving.y0, center.y, moving.y1];
        push_grid_lines(&mut lines, Axis::Vertical, xs, canvas.width, settings.grid_size);
        push_grid_lines(&mut lines, Axis::Horizontal, ys, canvas.height, settings.grid_size);
    }

    for element in others {
        let b = element.bounds();
        let source = SnapSource::Element(element.id);
        for x in [b.x0, b.center().x, b.x1] {
            lines.push(SnapLine { axis: Axis::Vertical, position: x, source });
        }
        for y in [b.y0, b.center().y, b.y1] {
            lines.push(SnapLine { axis: Axis::Horizontal, position: y, source });
        }
    }

    lines
}

/// Push the grid lines in `0..=extent` lying within the threshold of any of `edges`.
fn push_grid_lines(
    lines: &mut Vec<SnapLine>,
    axis: Axis,
    edges: [f64; 3],
    extent: f64,
    grid_size: f64,
) {
    let last_step = (extent / grid_size).floor();
    let mut steps: Vec<u64> = Vec::new();
    for edge in edges {
        let first = ((edge - SNAP_THRESHOLD) / grid_size).ceil().max(0.0);
        let last = ((edge + SNAP_THRESHOLD) / grid_size).floor().min(last_step);
        if first.partial_cmp(&last).is_none_or(|order| order.is_gt()) {
            continue;
        }
        steps.extend(first as u64..=last as u64);
    }
    steps.sort_unstable();
    steps.dedup();

    for step in steps {
        let position = step as f64 * grid_size;
        lines.push(SnapLine { axis, position, source: SnapSource::Grid });
    }
}

/// Snap a box of `size` whose candidate top-left is `candidate`.
///
/// `others` must not contain the moving element itself.
pub fn snap_position<'a>(
    candidate: Point,
    size: Size,
    others: impl IntoIterator<Item = &'a Element>,
    settings: &DesignerSettings,
    tie_break: SnapTieBreak,
) -> SnapResult {
    let moving = Rect::from_origin_size(candidate, size);
    let lines = collect_snap_lines(moving, others, settings);
    snap_to_lines(candidate, size, &lines, tie_break)
}

/// Snap against a prepared set of lines.
pub fn snap_to_lines(
    candidate: Point,
    size: Size,
    lines: &[SnapLine],
    tie_break: SnapTieBreak,
) -> SnapResult {
    let x = snap_axis(candidate.x, size.width, lines, Axis::Vertical, tie_break);
    let y = snap_axis(candidate.y, size.height, lines, Axis::Horizontal, tie_break);

    let mut result = SnapResult::none(candidate);
    if let Some((snapped, fired)) = x {
        result.position.x = snapped;
        result.snapped_x = true;
        push_guides(&mut result.guides, Axis::Vertical, &fired);
    }
    if let Some((snapped, fired)) = y {
        result.position.y = snapped;
        result.snapped_y = true;
        push_guides(&mut result.guides, Axis::Horizontal, &fired);
    }
    if result.is_snapped() {
        log::trace!("snapped {:?} -> {:?}", candidate, result.position);
    }
    result
}

fn push_guides(guides: &mut Vec<Guide>, axis: Axis, fired: &[f64]) {
    for &position in fired {
        let guide = Guide { axis, position };
        if !guides.contains(&guide) {
            guides.push(guide);
        }
    }
}

/// Snap one axis. Returns the corrected start coordinate and the lines that fired.
fn snap_axis(
    start: f64,
    extent: f64,
    lines: &[SnapLine],
    axis: Axis,
    tie_break: SnapTieBreak,
) -> Option<(f64, Vec<f64>)> {
    // start, center, end of the moving box, measured at the unsnapped candidate
    let offsets = [0.0, extent / 2.0, extent];
    let mut corrected: Option<f64> = None;
    let mut best_distance = f64::INFINITY;
    let mut best_line = 0.0;
    let mut fired = Vec::new();

    for line in lines.iter().filter(|l| l.axis == axis) {
        for offset in offsets {
            let distance = (start + offset - line.position).abs();
            if distance >= SNAP_THRESHOLD {
                continue;
            }
            match tie_break {
                SnapTieBreak::LastMatch => {
                    corrected = Some(line.position - offset);
                    fired.push(line.position);
                }
                SnapTieBreak::Nearest => {
                    if distance < best_distance {
                        best_distance = distance;
                        best_line = line.position;
                        corrected = Some(line.position - offset);
                    }
                }
            }
        }
    }

    if tie_break == SnapTieBreak::Nearest && corrected.is_some() {
        fired.push(best_line);
    }
    corrected.map(|c| (c, fired))
}
