//! Single and group drag with snapping and bounds clamping.

use crate::element::{Element, ElementId, ElementPatch, clamp_position, find};
use crate::intent::CanvasIntent;
use crate::settings::DesignerSettings;
use crate::snap::{Guide, SnapTieBreak, snap_position};
use kurbo::{Point, Size, Vec2};

/// Dragging one element.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleDrag {
    pub element_id: ElementId,
    /// Pointer position relative to the element's top-left at pointer-down.
    pub pointer_offset: Vec2,
    /// Temporary position, set by the first move.
    pub current: Option<Point>,
}

impl SingleDrag {
    pub fn new(element: &Element, pointer: Point) -> Self {
        Self {
            element_id: element.id,
            pointer_offset: pointer - element.position,
            current: None,
        }
    }

    /// Move to a new pointer position.
    ///
    /// Returns the guides that fired, or `None` if the element is gone and the
    /// gesture should be abandoned.
    pub fn update(
        &mut self,
        pointer: Point,
        elements: &[Element],
        settings: &DesignerSettings,
        tie_break: SnapTieBreak,
    ) -> Option<Vec<Guide>> {
        let element = find(elements, self.element_id)?;
        let candidate = pointer - self.pointer_offset;
        let others = elements.iter().filter(|e| e.id != self.element_id);
        let snapped = snap_position(candidate, element.size, others, settings, tie_break);
        self.current = Some(clamp_position(snapped.position, element.size, settings.canvas_size));
        Some(snapped.guides)
    }

    /// The update intent for this gesture. Empty if the pointer never moved.
    pub fn commit(&self) -> Vec<CanvasIntent> {
        self.current
            .map(|position| CanvasIntent::Update {
                id: self.element_id,
                patch: ElementPatch::position(position),
            })
            .into_iter()
            .collect()
    }
}

/// Dragging every element of a multi-selection together.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDrag {
    /// The pressed element; its snapped position drives the group delta.
    pub primary_id: ElementId,
    pub pointer_offset: Vec2,
    /// Start position of each member, in selection order.
    pub start_positions: Vec<(ElementId, Point)>,
    /// Temporary positions, empty until the first move.
    pub current: Vec<(ElementId, Point)>,
}

impl GroupDrag {
    /// Snapshot the members of `ids` found in `elements`.
    pub fn new(primary: &Element, ids: &[ElementId], elements: &[Element], pointer: Point) -> Self {
        let start_positions = ids
            .iter()
            .filter_map(|&id| find(elements, id).map(|e| (id, e.position)))
            .collect();
        Self {
            primary_id: primary.id,
            pointer_offset: pointer - primary.position,
            start_positions,
            current: Vec::new(),
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.start_positions.iter().any(|(member, _)| *member == id)
    }

    /// Move to a new pointer position.
    ///
    /// Returns the guides that fired, or `None` if the primary element is gone.
    /// Members that disappeared are dropped from the group.
    pub fn update(
        &mut self,
        pointer: Point,
        elements: &[Element],
        settings: &DesignerSettings,
        tie_break: SnapTieBreak,
    ) -> Option<Vec<Guide>> {
        let primary = find(elements, self.primary_id)?;
        let primary_start = self
            .start_positions
            .iter()
            .find(|(id, _)| *id == self.primary_id)
            .map(|(_, p)| *p)?;

        self.start_positions.retain(|(id, _)| find(elements, *id).is_some());

        let candidate = pointer - self.pointer_offset;
        let others = elements.iter().filter(|e| !self.contains(e.id));
        let snapped = snap_position(candidate, primary.size, others, settings, tie_break);

        let members: Vec<(ElementId, Point, Size)> = self
            .start_positions
            .iter()
            .filter_map(|&(id, start)| find(elements, id).map(|e| (id, start, e.size)))
            .collect();
        self.current = group_positions(
            &members,
            snapped.position - primary_start,
            settings.canvas_size,
        );
        Some(snapped.guides)
    }

    /// One update intent per member. Empty if the pointer never moved.
    pub fn commit(&self) -> Vec<CanvasIntent> {
        self.current
            .iter()
            .map(|&(id, position)| CanvasIntent::Update {
                id,
                patch: ElementPatch::position(position),
            })
            .collect()
    }
}

/// Apply `delta` to every start position, clamping each member independently.
pub fn group_positions(
    members: &[(ElementId, Point, Size)],
    delta: Vec2,
    canvas: Size,
) -> Vec<(ElementId, Point)> {
    members
        .iter()
        .map(|&(id, start, size)| (id, clamp_position(start + delta, size, canvas)))
        .collect()
}
