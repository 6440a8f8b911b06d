//! Application settings
//!
//! Every tunable threshold used by the tools lives here, grouped per tool.

use serde::{Deserialize, Serialize};
use shared::Rgb;

/// Snap resolver thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Enable snapping while drawing paths and rectangles
    pub enabled: bool,
    /// Maximum angle (degrees) between the drag direction and a candidate direction
    pub angle_deg: f64,
    /// Relative length difference against the first side that triggers the length lock
    pub length_lock_ratio: f64,
    /// From-point snap radius as a fraction of the first side length
    pub from_point_ratio: f64,
    /// Lower bound of the from-point snap radius (world units)
    pub from_point_min: f64,
    /// Relative side difference that turns a rectangle into a square
    pub square_ratio: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            angle_deg: 5.0,
            length_lock_ratio: 0.08,
            from_point_ratio: 0.15,
            from_point_min: 0.1,
            square_ratio: 0.08,
        }
    }
}

/// Draw tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawSettings {
    /// Distance to the first point that closes the loop
    pub close_tolerance: f64,
    /// Clicks closer than this to the last point are ignored
    pub min_segment: f64,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            close_tolerance: 0.25,
            min_segment: 0.01,
        }
    }
}

/// Rectangle tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleSettings {
    /// Both sides must exceed this to commit
    pub min_size: f64,
}

impl Default for RectangleSettings {
    fn default() -> Self {
        Self { min_size: 0.02 }
    }
}

/// Push/Pull tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushPullSettings {
    /// World units of height per vertical screen pixel
    pub units_per_pixel: f64,
    /// Heights are rounded to a multiple of this step
    pub height_step: f64,
    /// Quantized heights below this magnitude cancel the gesture
    pub min_height: f64,
    /// Opacity of the preview solid (0.0 - 1.0)
    pub preview_opacity: f32,
}

impl Default for PushPullSettings {
    fn default() -> Self {
        Self {
            units_per_pixel: 0.02,
            height_step: 0.1,
            min_height: 0.01,
            preview_opacity: 0.6,
        }
    }
}

/// Selection tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectSettings {
    /// Drags shorter than this (screen pixels) count as a click
    pub click_threshold_px: f64,
}

impl Default for SelectSettings {
    fn default() -> Self {
        Self {
            click_threshold_px: 4.0,
        }
    }
}

/// Ray casting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingSettings {
    /// Maximum ray-to-segment distance (world units) that still hits an edge
    pub line_tolerance: f64,
}

impl Default for PickingSettings {
    fn default() -> Self {
        Self {
            line_tolerance: 0.15,
        }
    }
}

/// What happens to the redo stack when a tool commits a new edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedoPolicy {
    /// Redo stack survives new edits
    #[default]
    Retain,
    /// Any new edit discards the redo branch
    ClearOnEdit,
}

/// Undo/redo settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub redo_policy: RedoPolicy,
}

/// Material and guide colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub edge: Rgb,
    pub face: Rgb,
    /// Objects marked by the eraser
    pub erase_warning: Rgb,
    /// Selected objects
    pub selection: Rgb,
    /// Rubber-band segment of the draw tool
    pub preview_edge: Rgb,
    /// Directional snap guide
    pub guide: Rgb,
    /// Opposite-side (from-point) guide
    pub from_point: Rgb,
    /// Rectangle outline and diagonal
    pub rectangle_preview: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            edge: Rgb(0x03045e),
            face: Rgb::WHITE,
            erase_warning: Rgb(0xffd54f),
            selection: Rgb(0x0077ff),
            preview_edge: Rgb(0x03045e),
            guide: Rgb(0x00b4d8),
            from_point: Rgb(0x22c55e),
            rectangle_preview: Rgb(0x1d4ed8),
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub snap: SnapSettings,
    pub draw: DrawSettings,
    pub rectangle: RectangleSettings,
    pub push_pull: PushPullSettings,
    pub select: SelectSettings,
    pub picking: PickingSettings,
    pub history: HistorySettings,
    pub palette: Palette,
}

impl AppSettings {
    /// Parse settings from JSON; missing groups and fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Settings parse error: {e}"))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load settings from file, or return default if not found
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!("{e} ({}), using defaults", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            self.save_to(&path);
        }
    }

    /// Write settings to an explicit path. Returns whether the file was written.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> bool {
        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!("Failed to create settings dir {}: {e}", dir.display());
                return false;
            }
        }
        if let Err(e) = std::fs::write(path, self.to_json()) {
            tracing::warn!("Failed to save settings to {}: {e}", path.display());
            return false;
        }
        true
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "groundsketch", "groundsketch")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tool_constants() {
        let s = AppSettings::default();
        assert_eq!(s.draw.close_tolerance, 0.25);
        assert_eq!(s.draw.min_segment, 0.01);
        assert_eq!(s.rectangle.min_size, 0.02);
        assert_eq!(s.push_pull.height_step, 0.1);
        assert_eq!(s.select.click_threshold_px, 4.0);
        assert_eq!(s.history.redo_policy, RedoPolicy::Retain);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"snap": {"angle_deg": 10.0}, "history": {"redo_policy": "clear_on_edit"}}"#;
        let s = AppSettings::from_json(json).unwrap();
        assert_eq!(s.snap.angle_deg, 10.0);
        assert_eq!(s.snap.length_lock_ratio, 0.08);
        assert_eq!(s.history.redo_policy, RedoPolicy::ClearOnEdit);
        assert_eq!(s.palette, Palette::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut s = AppSettings::default();
        s.picking.line_tolerance = 0.3;
        let back = AppSettings::from_json(&s.to_json()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = AppSettings::from_json("{ nope").unwrap_err();
        assert!(err.contains("Settings parse error"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_to_reports_unwritable_dir() {
        let blocker = std::env::temp_dir().join(format!("sketch-settings-{}", std::process::id()));
        std::fs::write(&blocker, "not a dir").unwrap();

        let s = AppSettings::default();
        // Parent is a regular file, so the directory cannot be created
        assert!(!s.save_to(&blocker.join("nested").join("settings.json")));

        let name = format!("sketch-settings-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        assert!(s.save_to(&path));
        let back = AppSettings::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, s);

        let _ = std::fs::remove_file(&blocker);
        let _ = std::fs::remove_file(&path);
    }
}
