//! Form element definitions.
//!
//! Elements are owned by the host's element store. The canvas only reads the
//! snapshot it is handed each render cycle and proposes changes as intents.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique, stable identifier for an element.
pub type ElementId = Uuid;

/// Minimum element width in canvas units.
pub const MIN_WIDTH: f64 = 50.0;
/// Minimum element height in canvas units.
pub const MIN_HEIGHT: f64 = 30.0;

/// The widget kind an element renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Button,
    TextInput,
    TextArea,
    Dropdown,
    Checkbox,
    RadioGroup,
    Label,
    DatePicker,
    Toggle,
    Slider,
}

impl ElementKind {
    /// Size used when a template does not carry one.
    pub fn default_size(self) -> Size {
        match self {
            ElementKind::Button => Size::new(120.0, 40.0),
            ElementKind::TextInput | ElementKind::Dropdown | ElementKind::DatePicker => {
                Size::new(200.0, 40.0)
            }
            ElementKind::TextArea => Size::new(240.0, 100.0),
            ElementKind::Checkbox | ElementKind::Toggle => Size::new(120.0, 30.0),
            ElementKind::RadioGroup => Size::new(160.0, 90.0),
            ElementKind::Label => Size::new(100.0, 30.0),
            ElementKind::Slider => Size::new(200.0, 30.0),
        }
    }

    /// Human readable label used when a template does not carry one.
    pub fn default_label(self) -> &'static str {
        match self {
            ElementKind::Button => "Button",
            ElementKind::TextInput => "Text Input",
            ElementKind::TextArea => "Text Area",
            ElementKind::Dropdown => "Dropdown",
            ElementKind::Checkbox => "Checkbox",
            ElementKind::RadioGroup => "Radio Group",
            ElementKind::Label => "Label",
            ElementKind::DatePicker => "Date",
            ElementKind::Toggle => "Toggle",
            ElementKind::Slider => "Slider",
        }
    }

    /// Prefix for generated element names (e.g. `button_3`).
    pub fn name_prefix(self) -> &'static str {
        match self {
            ElementKind::Button => "button",
            ElementKind::TextInput => "text_input",
            ElementKind::TextArea => "text_area",
            ElementKind::Dropdown => "dropdown",
            ElementKind::Checkbox => "checkbox",
            ElementKind::RadioGroup => "radio_group",
            ElementKind::Label => "label",
            ElementKind::DatePicker => "date_picker",
            ElementKind::Toggle => "toggle",
            ElementKind::Slider => "slider",
        }
    }

    /// Whether this kind carries a list of options.
    pub fn has_options(self) -> bool {
        matches!(self, ElementKind::Dropdown | ElementKind::RadioGroup)
    }
}

/// A typed visual element placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Top-left corner in canvas space.
    pub position: Point,
    pub size: Size,
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl Element {
    /// Create an element with a fresh id and the kind's default label.
    pub fn new(kind: ElementKind, position: Point, size: Size, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            size,
            name: name.into(),
            label: kind.default_label().to_string(),
            placeholder: None,
            options: None,
        }
    }

    /// Bounding box in canvas space.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Check if a canvas-space point lies inside the element (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        let b = self.bounds();
        point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
    }

    /// Apply a partial update.
    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(placeholder) = &patch.placeholder {
            self.placeholder = Some(placeholder.clone());
        }
        if let Some(options) = &patch.options {
            self.options = Some(options.clone());
        }
    }
}

/// Partial element fields proposed by the canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl ElementPatch {
    /// A patch that only moves the element.
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// A patch that moves and resizes the element.
    pub fn geometry(position: Point, size: Size) -> Self {
        Self {
            position: Some(position),
            size: Some(size),
            ..Self::default()
        }
    }
}

/// Template supplied by the external palette when a new element is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementTemplate {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(default, alias = "defaultSize")]
    pub size: Option<Size>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

/// Clamp a top-left position so a box of `size` stays inside `canvas`.
///
/// Boxes larger than the canvas are pinned to the origin.
pub fn clamp_position(position: Point, size: Size, canvas: Size) -> Point {
    Point::new(
        position.x.min(canvas.width - size.width).max(0.0),
        position.y.min(canvas.height - size.height).max(0.0),
    )
}

/// Find an element by id.
pub fn find(elements: &[Element], id: ElementId) -> Option<&Element> {
    elements.iter().find(|e| e.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let el =
            Element::new(ElementKind::Button, Point::new(10.0, 20.0), Size::new(100.0, 40.0), "b");
        assert_eq!(el.bounds(), Rect::new(10.0, 20.0, 110.0, 60.0));
        assert!(el.contains(Point::new(110.0, 60.0)));
        assert!(!el.contains(Point::new(111.0, 60.0)));
    }

    #[test]
    fn test_clamp_position() {
        let canvas = Size::new(800.0, 600.0);
        let size = Size::new(100.0, 40.0);
        assert_eq!(clamp_position(Point::new(-5.0, 10.0), size, canvas), Point::new(0.0, 10.0));
        assert_eq!(
            clamp_position(Point::new(750.0, 590.0), size, canvas),
            Point::new(700.0, 560.0)
        );
    }

    #[test]
    fn test_clamp_oversized_pins_to_origin() {
        let canvas = Size::new(200.0, 100.0);
        let size = Size::new(300.0, 150.0);
        assert_eq!(clamp_position(Point::new(50.0, 50.0), size, canvas), Point::ZERO);
    }

    #[test]
    fn test_apply_patch() {
        let mut el = Element::new(ElementKind::TextInput, Point::ZERO, Size::new(200.0, 40.0), "t");
        el.apply_patch(&ElementPatch::geometry(Point::new(5.0, 6.0), Size::new(60.0, 30.0)));
        assert_eq!(el.position, Point::new(5.0, 6.0));
        assert_eq!(el.size, Size::new(60.0, 30.0));
        assert_eq!(el.name, "t");
    }

    #[test]
    fn test_serde_uses_type_field() {
        let el =
            Element::new(ElementKind::Dropdown, Point::new(1.0, 2.0), Size::new(200.0, 40.0), "d");
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "dropdown");
        assert_eq!(json["position"]["x"], 1.0);
        assert_eq!(json["size"]["width"], 200.0);
        assert!(json.get("placeholder").is_none());

        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, el);
    }
}
