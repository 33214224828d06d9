//! Alignment and distribution of a multi-selection.

use crate::element::{Element, ElementId, clamp_position};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Alignment or distribution requested for the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignKind {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
    DistributeHorizontal,
    DistributeVertical,
}

impl AlignKind {
    /// Minimum number of elements for this operation to do anything.
    pub fn min_elements(self) -> usize {
        match self {
            AlignKind::DistributeHorizontal | AlignKind::DistributeVertical => 3,
            _ => 2,
        }
    }
}

/// Compute new positions for the elements in `ids`.
///
/// Only elements whose position actually changes are returned. Results are
/// clamped to the canvas.
pub fn aligned_positions(
    elements: &[Element],
    ids: &[ElementId],
    kind: AlignKind,
    canvas: Size,
) -> Vec<(ElementId, Point)> {
    let selected: Vec<&Element> = elements.iter().filter(|e| ids.contains(&e.id)).collect();
    if selected.len() < kind.min_elements() {
        return Vec::new();
    }

    let Some(bounds) = selected.iter().map(|e| e.bounds()).reduce(|a, b| a.union(b)) else {
        return Vec::new();
    };

    let targets: Vec<(ElementId, Point)> = match kind {
        AlignKind::DistributeHorizontal => distribute(&selected, true),
        AlignKind::DistributeVertical => distribute(&selected, false),
        _ => selected
            .iter()
            .map(|e| (e.id, align_one(e, bounds, kind)))
            .collect(),
    };

    targets
        .into_iter()
        .filter_map(|(id, target)| {
            let element = selected.iter().find(|e| e.id == id)?;
            let clamped = clamp_position(target, element.size, canvas);
            (clamped != element.position).then_some((id, clamped))
        })
        .collect()
}

fn align_one(element: &Element, bounds: Rect, kind: AlignKind) -> Point {
    let Point { x, y } = element.position;
    let Size { width, height } = element.size;
    match kind {
        AlignKind::Left => Point::new(bounds.x0, y),
        AlignKind::Right => Point::new(bounds.x1 - width, y),
        AlignKind::Center => Point::new(bounds.center().x - width / 2.0, y),
        AlignKind::Top => Point::new(x, bounds.y0),
        AlignKind::Bottom => Point::new(x, bounds.y1 - height),
        AlignKind::Middle => Point::new(x, bounds.center().y - height / 2.0),
        AlignKind::DistributeHorizontal | AlignKind::DistributeVertical => element.position,
    }
}

fn axis_start(e: &Element, horizontal: bool) -> f64 {
    if horizontal { e.position.x } else { e.position.y }
}

fn axis_extent(e: &Element, horizontal: bool) -> f64 {
    if horizontal { e.size.width } else { e.size.height }
}

/// Equal gaps between consecutive elements, keeping the outermost two in place.
fn distribute(selected: &[&Element], horizontal: bool) -> Vec<(ElementId, Point)> {
    let mut ordered: Vec<&Element> = selected.to_vec();
    ordered.sort_by(|a, b| axis_start(a, horizontal).total_cmp(&axis_start(b, horizontal)));

    let (Some(&first), Some(&last)) = (ordered.first(), ordered.last()) else {
        return Vec::new();
    };
    let span = axis_start(last, horizontal) + axis_extent(last, horizontal)
        - axis_start(first, horizontal);
    let occupied: f64 = ordered.iter().map(|e| axis_extent(e, horizontal)).sum();
    let gap = (span - occupied) / (ordered.len() - 1) as f64;

    let mut cursor = axis_start(first, horizontal);
    ordered
        .iter()
        .map(|e| {
            let position = if horizontal {
                Point::new(cursor, e.position.y)
            } else {
                Point::new(e.position.x, cursor)
            };
            cursor += axis_extent(e, horizontal) + gap;
            (e.id, position)
        })
        .collect()
}
