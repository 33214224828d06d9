//! Mutation intents emitted by the canvas for the host's element store.

use crate::align::{AlignKind, aligned_positions};
use crate::element::{Element, ElementId, ElementPatch};
use crate::error::{CanvasError, CanvasResult};
use crate::settings::{DesignerSettings, SettingsPatch};
use serde::{Deserialize, Serialize};

/// A discrete change the canvas asks the host to make.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "payload", rename_all = "snake_case")]
pub enum CanvasIntent {
    /// A new element was dropped onto the canvas.
    Add(Element),
    /// Partial update of an existing element.
    Update { id: ElementId, patch: ElementPatch },
    Delete(ElementId),
    /// Single selection, or `None` to clear.
    Select(Option<ElementId>),
    MultiSelect { ids: Vec<ElementId>, primary: ElementId },
    Align { kind: AlignKind, ids: Vec<ElementId> },
    UpdateSettings(SettingsPatch),
}

impl CanvasIntent {
    /// Whether this intent changes element data (as opposed to selection).
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            CanvasIntent::Add(_)
                | CanvasIntent::Update { .. }
                | CanvasIntent::Delete(_)
                | CanvasIntent::Align { .. }
        )
    }
}

/// Reference reducer folding one intent into a plain element list.
///
/// Selection intents are left to the host and do nothing here.
pub fn apply(
    elements: &mut Vec<Element>,
    settings: &mut DesignerSettings,
    intent: &CanvasIntent,
) -> CanvasResult<()> {
    match intent {
        CanvasIntent::Add(element) => {
            elements.push(element.clone());
        }
        CanvasIntent::Update { id, patch } => {
            let element = elements
                .iter_mut()
                .find(|e| e.id == *id)
                .ok_or(CanvasError::ElementNotFound(*id))?;
            element.apply_patch(patch);
        }
        CanvasIntent::Delete(id) => {
            let before = elements.len();
            elements.retain(|e| e.id != *id);
            if elements.len() == before {
                return Err(CanvasError::ElementNotFound(*id));
            }
        }
        CanvasIntent::Select(_) | CanvasIntent::MultiSelect { .. } => {}
        CanvasIntent::Align { kind, ids } => {
            for (id, position) in aligned_positions(elements, ids, *kind, settings.canvas_size) {
                if let Some(element) = elements.iter_mut().find(|e| e.id == id) {
                    element.position = position;
                }
            }
        }
        CanvasIntent::UpdateSettings(patch) => settings.apply_patch(patch)?,
    }
    Ok(())
}

/// Apply every intent in order, logging and skipping the ones that fail.
pub fn apply_all<'a>(
    elements: &mut Vec<Element>,
    settings: &mut DesignerSettings,
    intents: impl IntoIterator<Item = &'a CanvasIntent>,
) {
    for intent in intents {
        if let Err(e) = apply(elements, settings, intent) {
            log::warn!("Skipping intent {:?}: {}", intent, e);
        }
    }
}
