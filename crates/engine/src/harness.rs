//! Headless test harness for programmatic sketch sessions.
//!
//! Wraps an `AppState` with a fixed top-down orthographic camera so tests can
//! speak in ground coordinates while the tools still receive pixel events.

use glam::DVec2;
use shared::{GroundPoint, ObjectId, ObjectKind, PointerButton, ToolKind};

use crate::command::{self, CommandResponse};
use crate::state::scene::SceneObject;
use crate::state::{AppSettings, AppState};
use crate::tools::PointerEvent;
use crate::viewport::camera::{ScreenRect, ViewContext};

/// Canvas size of the harness camera
pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 600.0;
/// World units per screen pixel (20 px per unit)
pub const UNITS_PER_PIXEL: f64 = 0.05;

/// Headless test harness: engine state plus a plan-view camera
pub struct TestHarness {
    pub state: AppState,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a new empty harness.
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let mut state = AppState::new(settings);
        state.set_view(ViewContext::top_down(
            GroundPoint::ORIGIN,
            UNITS_PER_PIXEL,
            ScreenRect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
        ));
        Self { state }
    }

    // ── Coordinates ───────────────────────────────────────────

    /// Ground point → client pixels
    pub fn screen(&self, x: f64, z: f64) -> DVec2 {
        self.state
            .view
            .project_client(GroundPoint::new(x, z).to_vec3())
            .unwrap_or(DVec2::ZERO)
    }

    fn event_at(&self, x: f64, z: f64) -> PointerEvent {
        let p = self.screen(x, z);
        PointerEvent::new(p.x, p.y)
    }

    // ── Tools ─────────────────────────────────────────────────

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.state.set_tool(tool);
    }

    pub fn tool(&self) -> ToolKind {
        self.state.tool()
    }

    pub fn cancel(&mut self) {
        self.state.cancel();
    }

    // ── Pointer input in ground coordinates ───────────────────

    pub fn click(&mut self, x: f64, z: f64) {
        let e = self.event_at(x, z);
        self.state.click(e);
    }

    pub fn down(&mut self, x: f64, z: f64) {
        let e = self.event_at(x, z);
        self.state.pointer_down(e);
    }

    pub fn move_to(&mut self, x: f64, z: f64) {
        let e = self.event_at(x, z);
        self.state.pointer_move(e);
    }

    pub fn up(&mut self, x: f64, z: f64) {
        let e = self.event_at(x, z);
        self.state.pointer_up(e);
    }

    /// Press, move and release along a straight line
    pub fn drag(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.down(from.0, from.1);
        self.move_to((from.0 + to.0) * 0.5, (from.1 + to.1) * 0.5);
        self.move_to(to.0, to.1);
        self.up(to.0, to.1);
    }

    // ── Pointer input in pixels ───────────────────────────────

    pub fn down_px(&mut self, px: DVec2) {
        self.state.pointer_down(PointerEvent::new(px.x, px.y));
    }

    pub fn down_px_with(&mut self, px: DVec2, button: PointerButton) {
        self.state
            .pointer_down(PointerEvent::new(px.x, px.y).with_button(button));
    }

    pub fn move_px(&mut self, px: DVec2) {
        self.state.pointer_move(PointerEvent::new(px.x, px.y));
    }

    pub fn up_px(&mut self, px: DVec2) {
        self.state.pointer_up(PointerEvent::new(px.x, px.y));
    }

    pub fn drag_px(&mut self, from: DVec2, to: DVec2) {
        self.down_px(from);
        self.move_px(to);
        self.up_px(to);
    }

    /// Click every point with the draw tool; `close` clicks the first point again.
    pub fn draw_polygon(&mut self, points: &[(f64, f64)], close: bool) {
        self.set_tool(ToolKind::Draw);
        for &(x, z) in points {
            self.move_to(x, z);
            self.click(x, z);
        }
        if close {
            if let Some(&(x, z)) = points.first() {
                self.move_to(x, z);
                self.click(x, z);
            }
        }
    }

    // ── History ───────────────────────────────────────────────

    /// Undo the last placement
    pub fn undo(&mut self) -> bool {
        self.state.undo()
    }

    /// Redo the last undone placement
    pub fn redo(&mut self) -> bool {
        self.state.redo()
    }

    // ── Queries ───────────────────────────────────────────────

    fn count(&self, f: impl Fn(&ObjectKind) -> bool) -> usize {
        self.state.registry.count_where(f)
    }

    pub fn edge_count(&self) -> usize {
        self.count(|k| matches!(k, ObjectKind::Edge { .. }))
    }

    pub fn face_count(&self) -> usize {
        self.count(|k| matches!(k, ObjectKind::Face { .. }))
    }

    pub fn prism_count(&self) -> usize {
        self.count(|k| matches!(k, ObjectKind::Prism { .. }))
    }

    pub fn placed_count(&self) -> usize {
        self.state.registry.placed().len()
    }

    pub fn selectable_count(&self) -> usize {
        self.state.registry.selectable().len()
    }

    pub fn selected(&self) -> &[ObjectId] {
        self.state.selection.all()
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.state.registry.get(id)
    }

    /// Live objects of one kind, in placement order
    pub fn objects_where(&self, f: impl Fn(&ObjectKind) -> bool) -> Vec<&SceneObject> {
        self.state
            .registry
            .live_objects()
            .filter(|o| f(&o.kind))
            .collect()
    }

    pub fn faces(&self) -> Vec<&SceneObject> {
        self.objects_where(|k| k.is_face())
    }

    pub fn prisms(&self) -> Vec<&SceneObject> {
        self.objects_where(|k| matches!(k, ObjectKind::Prism { .. }))
    }

    pub fn draw_path(&self) -> &[GroundPoint] {
        self.state.draw_path()
    }

    // ── JSON protocol ─────────────────────────────────────────

    pub fn execute_json(&mut self, json: &str) -> Result<CommandResponse, String> {
        command::execute_json(&mut self.state, json)
    }

    pub fn execute_json_batch(&mut self, json: &str) -> Result<Vec<CommandResponse>, String> {
        command::execute_json_batch(&mut self.state, json)
    }

    /// Export the live scene as JSON
    pub fn export_scene_json(&self) -> String {
        serde_json::to_string_pretty(&self.state.describe_scene()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_mapping() {
        let h = TestHarness::new();
        assert!(h.screen(0.0, 0.0).distance(DVec2::new(400.0, 300.0)) < 1e-9);
        let p = h.screen(1.0, -2.0);
        assert!((p.x - 420.0).abs() < 1e-9);
        assert!((p.y - 260.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_harness() {
        let h = TestHarness::new();
        assert_eq!(h.placed_count(), 0);
        assert_eq!(h.tool(), ToolKind::Select);
        assert_eq!(h.export_scene_json(), "[]");
    }
}
