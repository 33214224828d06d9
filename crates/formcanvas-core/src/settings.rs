//! Designer settings: canvas size, grid and zoom.

use crate::error::{CanvasError, CanvasResult};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Minimum zoom level.
pub const MIN_ZOOM: f64 = 0.5;
/// Maximum zoom level.
pub const MAX_ZOOM: f64 = 2.0;
/// Zoom increment used by zoom in/out.
pub const ZOOM_STEP: f64 = 0.1;
/// Default grid size in canvas units.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;
/// Smallest accepted grid size in canvas units.
pub const MIN_GRID_SIZE: f64 = 1.0;

/// Settings for one designer session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignerSettings {
    pub canvas_size: Size,
    pub grid_size: f64,
    pub show_grid: bool,
    pub zoom: f64,
}

impl Default for DesignerSettings {
    fn default() -> Self {
        Self {
            canvas_size: Size::new(800.0, 600.0),
            grid_size: DEFAULT_GRID_SIZE,
            show_grid: true,
            zoom: 1.0,
        }
    }
}

impl DesignerSettings {
    /// Deserialize and validate settings from JSON.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| CanvasError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize the settings to JSON.
    pub fn to_json(&self) -> CanvasResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CanvasError::InvalidSettings(e.to_string()))
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> CanvasResult<()> {
        let Size { width, height } = self.canvas_size;
        let canvas_ok = width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0;
        if !canvas_ok {
            return Err(CanvasError::InvalidSettings(format!(
                "canvas size must be positive and finite, got {}x{}",
                self.canvas_size.width, self.canvas_size.height
            )));
        }
        let grid_ok = self.grid_size.is_finite() && self.grid_size >= MIN_GRID_SIZE;
        if !grid_ok {
            return Err(CanvasError::InvalidSettings(format!(
                "grid size must be finite and at least {MIN_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            return Err(CanvasError::InvalidSettings(format!(
                "zoom must be within {MIN_ZOOM}..={MAX_ZOOM}, got {}",
                self.zoom
            )));
        }
        Ok(())
    }

    /// Apply a partial update. The settings are left untouched if the result is invalid.
    pub fn apply_patch(&mut self, patch: &SettingsPatch) -> CanvasResult<()> {
        let mut next = self.clone();
        if let Some(size) = patch.canvas_size {
            next.canvas_size = size;
        }
        if let Some(grid) = patch.grid_size {
            next.grid_size = grid;
        }
        if let Some(show) = patch.show_grid {
            next.show_grid = show;
        }
        if let Some(zoom) = patch.zoom {
            next.zoom = zoom;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// Clamp a zoom level into the supported range.
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Step the zoom by `steps` increments, rounded to one decimal and clamped.
pub fn step_zoom(zoom: f64, steps: i32) -> f64 {
    let next = zoom + ZOOM_STEP * f64::from(steps);
    clamp_zoom((next * 10.0).round() / 10.0)
}

/// Partial settings update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_grid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

impl SettingsPatch {
    pub fn zoom(zoom: f64) -> Self {
        Self {
            zoom: Some(zoom),
            ..Self::default()
        }
    }

    pub fn show_grid(show: bool) -> Self {
        Self {
            show_grid: Some(show),
            ..Self::default()
        }
    }
}
