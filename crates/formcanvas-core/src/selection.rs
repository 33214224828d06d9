//! Selection state and rubber-band (marquee) selection.

use crate::element::{Element, ElementId};
use crate::intent::CanvasIntent;
use kurbo::{Point, Rect};

/// Minimum marquee extent (canvas units) before a drag counts as a rubber-band.
pub const MIN_MARQUEE_SIZE: f64 = 5.0;

/// Ordered set of selected elements plus the primary one.
///
/// Invariant: `primary` is a member whenever the set is non-empty, and `None`
/// when it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ElementId>,
    primary: Option<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    pub fn primary(&self) -> Option<ElementId> {
        self.primary
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// More than one element is selected.
    pub fn is_multi(&self) -> bool {
        self.ids.len() > 1
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Replace the selection with a single element.
    pub fn select_only(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.push(id);
        self.primary = Some(id);
    }

    /// Toggle membership of `id`.
    ///
    /// An added element becomes primary. Removing the primary hands it to the
    /// last remaining member.
    pub fn toggle(&mut self, id: ElementId) {
        if let Some(index) = self.ids.iter().position(|&s| s == id) {
            self.ids.remove(index);
            if self.primary == Some(id) {
                self.primary = self.ids.last().copied();
            }
        } else {
            self.ids.push(id);
            self.primary = Some(id);
        }
    }

    /// Select the given ids in order, the last one becoming primary.
    pub fn select_many(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
        self.primary = self.ids.last().copied();
    }

    /// Select every element; the last one in list order becomes primary.
    pub fn select_all(&mut self, elements: &[Element]) {
        self.select_many(elements.iter().map(|e| e.id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.primary = None;
    }

    /// Make a member the primary element. Non-members are ignored.
    pub fn set_primary(&mut self, id: ElementId) {
        if self.contains(id) {
            self.primary = Some(id);
        }
    }

    /// Drop ids for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(ElementId) -> bool) {
        self.ids.retain(|&id| keep(id));
        if self.primary.is_some_and(|p| !self.ids.contains(&p)) {
            self.primary = self.ids.last().copied();
        }
    }

    /// Bring the selection in line with a fresh element snapshot and the host's
    /// selected id.
    pub fn reconcile(&mut self, elements: &[Element], host_selected: Option<ElementId>) {
        self.retain(|id| elements.iter().any(|e| e.id == id));
        match host_selected {
            None => self.clear(),
            Some(id) if !elements.iter().any(|e| e.id == id) => {}
            Some(id) if self.contains(id) => self.primary = Some(id),
            Some(id) => self.select_only(id),
        }
    }

    /// The intent reporting this selection to the host.
    pub fn to_intent(&self) -> CanvasIntent {
        match (self.ids.len(), self.primary) {
            (0, _) | (_, None) => CanvasIntent::Select(None),
            (1, Some(id)) => CanvasIntent::Select(Some(id)),
            (_, Some(primary)) => CanvasIntent::MultiSelect {
                ids: self.ids.clone(),
                primary,
            },
        }
    }
}

/// Rubber-band rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    /// Starting point in canvas coordinates.
    pub start: Point,
    /// Current point in canvas coordinates.
    pub current: Point,
}

impl SelectionRect {
    pub fn new(start: Point) -> Self {
        Self { start, current: start }
    }

    /// Get the selection rectangle as a normalized Rect.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.start.x.min(self.current.x),
            self.start.y.min(self.current.y),
            self.start.x.max(self.current.x),
            self.start.y.max(self.current.y),
        )
    }

    /// Whether the drag is large enough to be a deliberate marquee.
    pub fn exceeds_threshold(&self) -> bool {
        let rect = self.to_rect();
        rect.width() > MIN_MARQUEE_SIZE || rect.height() > MIN_MARQUEE_SIZE
    }
}

/// Elements whose bounds strictly intersect `rect`, in list order.
///
/// Boxes that only touch the rectangle along an edge are excluded.
pub fn elements_intersecting(elements: &[Element], rect: Rect) -> Vec<ElementId> {
    elements
        .iter()
        .filter(|e| {
            let b = e.bounds();
            b.x0 < rect.x1 && b.x1 > rect.x0 && b.y0 < rect.y1 && b.y1 > rect.y0
        })
        .map(|e| e.id)
        .collect()
}

/// Finish a rubber-band gesture against `selection`.
///
/// Below the size threshold, or with no hits, the selection is cleared.
pub fn apply_rubber_band(selection: &mut Selection, elements: &[Element], marquee: &SelectionRect) {
    if !marquee.exceeds_threshold() {
        selection.clear();
        return;
    }
    let hits = elements_intersecting(elements, marquee.to_rect());
    match hits.as_slice() {
        [] => selection.clear(),
        [only] => selection.select_only(*only),
        _ => selection.select_many(hits),
    }
}
