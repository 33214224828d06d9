//! Dropping new elements from an external palette.

use crate::element::{Element, ElementKind, ElementTemplate, MIN_HEIGHT, MIN_WIDTH, clamp_position};
use crate::error::CanvasResult;
use crate::settings::DesignerSettings;
use crate::snap::snap_to_grid;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Data carried by a drag-and-drop onto the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DropPayload {
    Element { template: ElementTemplate },
}

impl DropPayload {
    /// Parse a payload string. Anything other than an element drop is an error.
    pub fn parse(data: &str) -> CanvasResult<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

/// Build the element for a template dropped at `drop_point` (canvas space).
///
/// The top-left lands on the nearest grid intersection when the grid is shown,
/// and is always clamped inside the canvas.
pub fn create_element(
    template: &ElementTemplate,
    drop_point: Point,
    existing: &[Element],
    settings: &DesignerSettings,
) -> Element {
    let size = template.size.unwrap_or_else(|| template.kind.default_size());
    let size = Size::new(size.width.max(MIN_WIDTH), size.height.max(MIN_HEIGHT));

    let position = if settings.show_grid {
        snap_to_grid(drop_point, settings.grid_size)
    } else {
        drop_point
    };
    let position = clamp_position(position, size, settings.canvas_size);

    let name = next_name(template.kind, existing);
    let mut element = Element::new(template.kind, position, size, name);
    if let Some(label) = &template.label {
        element.label = label.clone();
    }
    element.placeholder = template.placeholder.clone();
    element.options = match &template.options {
        Some(options) => Some(options.clone()),
        None if template.kind.has_options() => Some(vec!["Option 1".into(), "Option 2".into()]),
        None => None,
    };
    element
}

/// Next free `prefix_N` name for `kind`.
pub fn next_name(kind: ElementKind, existing: &[Element]) -> String {
    let prefix = kind.name_prefix();
    let highest = existing
        .iter()
        .filter_map(|e| e.name.strip_prefix(prefix)?.strip_prefix('_')?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{}_{}", prefix, highest + 1)
}

/// Parse `data` and create the dropped element, or log and return `None`.
pub fn element_from_drop(
    data: &str,
    drop_point: Point,
    existing: &[Element],
    settings: &DesignerSettings,
) -> Option<Element> {
    match DropPayload::parse(data) {
        Ok(DropPayload::Element { template }) => {
            let element = create_element(&template, drop_point, existing, settings);
            log::debug!("Dropped {} at {:?}", element.name, element.position);
            Some(element)
        }
        Err(e) => {
            log::warn!("Ignoring drop: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CanvasError;

    #[test]
    fn test_parse_element_payload() {
        let payload = DropPayload::parse(
            r#"{"type": "element", "template": {"type": "button", "label": "Submit"}}"#,
        )
        .unwrap();
        let DropPayload::Element { template } = payload;
        assert_eq!(template.kind, ElementKind::Button);
        assert_eq!(template.label.as_deref(), Some("Submit"));
        assert!(template.size.is_none());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(DropPayload::parse("not json"), Err(CanvasError::MalformedDrop(_))));
        assert!(DropPayload::parse(r#"{"type": "file", "path": "a.png"}"#).is_err());
        let unknown_kind = r#"{"type": "element", "template": {"type": "spaceship"}}"#;
        assert!(DropPayload::parse(unknown_kind).is_err());
    }

    #[test]
    fn test_create_element_snaps_and_clamps() {
        let settings = DesignerSettings::default();
        let template = ElementTemplate {
            kind: ElementKind::TextInput,
            size: None,
            label: None,
            placeholder: Some("Email".into()),
            options: None,
        };

        let element = create_element(&template, Point::new(47.0, 92.0), &[], &settings);
        assert_eq!(element.position, Point::new(40.0, 100.0));
        assert_eq!(element.size, ElementKind::TextInput.default_size());
        assert_eq!(element.label, "Text Input");
        assert_eq!(element.placeholder.as_deref(), Some("Email"));

        let element = create_element(&template, Point::new(790.0, 590.0), &[], &settings);
        assert_eq!(element.position, Point::new(600.0, 560.0));
    }

    #[test]
    fn test_create_element_without_grid_keeps_point() {
        let settings = DesignerSettings { show_grid: false, ..DesignerSettings::default() };
        let template = ElementTemplate {
            kind: ElementKind::Dropdown,
            size: Some(Size::new(10.0, 10.0)),
            label: Some("Country".into()),
            placeholder: None,
            options: None,
        };
        let element = create_element(&template, Point::new(47.0, 92.0), &[], &settings);
        assert_eq!(element.position, Point::new(47.0, 92.0));
        assert_eq!(element.size, Size::new(MIN_WIDTH, MIN_HEIGHT));
        assert_eq!(element.label, "Country");
        assert_eq!(element.options.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_next_name_counts_up() {
        let existing = vec![
            Element::new(ElementKind::Button, Point::ZERO, Size::new(100.0, 40.0), "button_1"),
            Element::new(ElementKind::Button, Point::ZERO, Size::new(100.0, 40.0), "button_4"),
            Element::new(ElementKind::Label, Point::ZERO, Size::new(100.0, 30.0), "label_9"),
            Element::new(ElementKind::Button, Point::ZERO, Size::new(100.0, 40.0), "submit"),
        ];
        assert_eq!(next_name(ElementKind::Button, &existing), "button_5");
        assert_eq!(next_name(ElementKind::Checkbox, &existing), "checkbox_1");
    }

    #[test]
    fn test_element_from_drop_malformed_is_none() {
        let _ = env_logger::builder().is_test(true).try_init();
        let settings = DesignerSettings::default();
        assert!(element_from_drop("{", Point::ZERO, &[], &settings).is_none());
        assert!(element_from_drop(
            r#"{"type": "element", "template": {"type": "slider"}}"#,
            Point::new(20.0, 20.0),
            &[],
            &settings,
        )
        .is_some());
    }
}
