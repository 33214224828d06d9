//! Keyboard handling: delete, deselect, select-all and nudging.

use crate::element::{Element, ElementPatch, clamp_position, find};
use crate::input::{Key, KeyEvent};
use crate::intent::CanvasIntent;
use crate::selection::Selection;
use crate::settings::DesignerSettings;
use kurbo::Vec2;

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+A").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Every binding the canvas handles, for host help screens.
pub fn shortcuts() -> Vec<Shortcut> {
    vec![
        Shortcut::new("A", true, false, "Select all elements"),
        Shortcut::new("Delete", false, false, "Delete selected elements"),
        Shortcut::new("Backspace", false, false, "Delete selected elements"),
        Shortcut::new("Escape", false, false, "Clear selection"),
        Shortcut::new("Arrow", false, true, "Move selection by one grid step"),
        Shortcut::new("Arrow", true, true, "Move selection by one unit"),
    ]
}

/// Handle a key press and return the intents it produces.
///
/// Nothing happens while focus is in a text control or a pointer gesture is
/// active. Apart from select-all, every binding needs a selection.
pub fn handle_key(
    event: &KeyEvent,
    selection: &mut Selection,
    elements: &[Element],
    settings: &DesignerSettings,
    gesture_active: bool,
) -> Vec<CanvasIntent> {
    if event.in_text_input || gesture_active {
        return Vec::new();
    }

    let modifiers = event.modifiers;
    if modifiers.command() && matches!(event.key, Key::Character('a' | 'A')) {
        selection.select_all(elements);
        return vec![selection.to_intent()];
    }

    if selection.is_empty() {
        return Vec::new();
    }

    match &event.key {
        Key::Delete | Key::Backspace => {
            let mut intents: Vec<CanvasIntent> =
                selection.ids().iter().map(|&id| CanvasIntent::Delete(id)).collect();
            selection.clear();
            intents.push(CanvasIntent::Select(None));
            log::debug!("Deleting {} element(s)", intents.len() - 1);
            intents
        }
        Key::Escape => {
            selection.clear();
            vec![CanvasIntent::Select(None)]
        }
        key if modifiers.shift => {
            let Some((dx, dy)) = key.arrow_direction() else {
                return Vec::new();
            };
            let step = if modifiers.command() { 1.0 } else { settings.grid_size };
            nudge(selection, elements, Vec2::new(dx * step, dy * step), settings)
        }
        _ => Vec::new(),
    }
}

fn nudge(
    selection: &Selection,
    elements: &[Element],
    delta: Vec2,
    settings: &DesignerSettings,
) -> Vec<CanvasIntent> {
    selection
        .ids()
        .iter()
        .filter_map(|&id| find(elements, id))
        .map(|element| CanvasIntent::Update {
            id: element.id,
            patch: ElementPatch::position(clamp_position(
                element.position + delta,
                element.size,
                settings.canvas_size,
            )),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use crate::input::Modifiers;
    use kurbo::{Point, Size};

    fn elements(n: usize) -> Vec<Element> {
        (0..n)
            .map(|i| {
                Element::new(
                    ElementKind::Label,
                    Point::new(100.0 + i as f64 * 60.0, 100.0),
                    Size::new(50.0, 30.0),
                    format!("label{}", i + 1),
                )
            })
            .collect()
    }

    fn ctrl_a() -> KeyEvent {
        KeyEvent::new(Key::Character('a'), Modifiers::CTRL)
    }

    #[test]
    fn test_select_all_with_five() {
        let elements = elements(5);
        let mut selection = Selection::new();
        let settings = DesignerSettings::default();
        let intents = handle_key(&ctrl_a(), &mut selection, &elements, &settings, false);
        assert_eq!(selection.len(), 5);
        assert_eq!(selection.primary(), Some(elements[4].id));
        assert!(matches!(
            &intents[..],
            [CanvasIntent::MultiSelect { ids, primary }]
                if ids.len() == 5 && *primary == elements[4].id
        ));
    }

    #[test]
    fn test_select_all_with_meta() {
        let elements = elements(2);
        let mut selection = Selection::new();
        let event = KeyEvent::new(Key::Character('A'), Modifiers { meta: true, ..Modifiers::NONE });
        handle_key(&event, &mut selection, &elements, &DesignerSettings::default(), false);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_delete_three() {
        let elements = elements(3);
        let mut selection = Selection::new();
        selection.select_all(&elements);

        let intents = handle_key(
            &KeyEvent::plain(Key::Delete),
            &mut selection,
            &elements,
            &DesignerSettings::default(),
            false,
        );
        assert_eq!(intents.len(), 4);
        for (intent, element) in intents.iter().zip(&elements) {
            assert_eq!(*intent, CanvasIntent::Delete(element.id));
        }
        assert_eq!(intents[3], CanvasIntent::Select(None));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_escape_clears() {
        let elements = elements(1);
        let mut selection = Selection::new();
        selection.select_only(elements[0].id);
        let intents = handle_key(
            &KeyEvent::plain(Key::Escape),
            &mut selection,
            &elements,
            &DesignerSettings::default(),
            false,
        );
        assert_eq!(intents, vec![CanvasIntent::Select(None)]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_shift_arrow_nudges_by_grid() {
        let elements = elements(1);
        let mut selection = Selection::new();
        selection.select_only(elements[0].id);
        let event = KeyEvent::new(Key::ArrowRight, Modifiers::SHIFT);
        let settings = DesignerSettings::default();
        let intents = handle_key(&event, &mut selection, &elements, &settings, false);
        assert_eq!(
            intents,
            vec![CanvasIntent::Update {
                id: elements[0].id,
                patch: ElementPatch::position(Point::new(120.0, 100.0)),
            }]
        );
    }

    #[test]
    fn test_shift_ctrl_arrow_nudges_one_unit() {
        let elements = elements(1);
        let mut selection = Selection::new();
        selection.select_only(elements[0].id);
        let modifiers = Modifiers { shift: true, ctrl: true, ..Modifiers::NONE };
        let event = KeyEvent::new(Key::ArrowUp, modifiers);
        let settings = DesignerSettings::default();
        let intents = handle_key(&event, &mut selection, &elements, &settings, false);
        assert_eq!(
            intents,
            vec![CanvasIntent::Update {
                id: elements[0].id,
                patch: ElementPatch::position(Point::new(100.0, 99.0)),
            }]
        );
    }

    #[test]
    fn test_nudge_clamps_to_canvas() {
        let element =
            Element::new(ElementKind::Button, Point::new(5.0, 5.0), Size::new(100.0, 40.0), "b");
        let elements = vec![element.clone()];
        let mut selection = Selection::new();
        selection.select_only(element.id);
        let event = KeyEvent::new(Key::ArrowLeft, Modifiers::SHIFT);
        let settings = DesignerSettings::default();
        let intents = handle_key(&event, &mut selection, &elements, &settings, false);
        assert_eq!(
            intents,
            vec![CanvasIntent::Update {
                id: element.id,
                patch: ElementPatch::position(Point::new(0.0, 5.0)),
            }]
        );
    }

    #[test]
    fn test_plain_arrow_and_empty_selection_do_nothing() {
        let elements = elements(1);
        let mut selection = Selection::new();
        let settings = DesignerSettings::default();
        let delete = KeyEvent::plain(Key::Delete);
        assert!(handle_key(&delete, &mut selection, &elements, &settings, false).is_empty());

        selection.select_only(elements[0].id);
        let left = KeyEvent::plain(Key::ArrowLeft);
        assert!(handle_key(&left, &mut selection, &elements, &settings, false).is_empty());
    }

    #[test]
    fn test_ignored_in_text_input_and_during_gesture() {
        let elements = elements(2);
        let settings = DesignerSettings::default();
        let mut selection = Selection::new();
        selection.select_only(elements[0].id);

        let mut event = KeyEvent::plain(Key::Delete);
        event.in_text_input = true;
        assert!(handle_key(&event, &mut selection, &elements, &settings, false).is_empty());
        let delete = KeyEvent::plain(Key::Delete);
        assert!(handle_key(&delete, &mut selection, &elements, &settings, true).is_empty());
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_shortcut_format() {
        let all = shortcuts();
        assert_eq!(all[0].format(), "Ctrl+A");
        assert!(all.iter().any(|s| s.format() == "Ctrl+Shift+Arrow"));
    }
}
