//! Keyboard shortcut handling

use eframe::egui;
use shared::ToolKind;
use sketch_engine::state::AppState;

use crate::viewport::ViewportPanel;

/// Single-key tool shortcuts
const TOOL_KEYS: [(egui::Key, ToolKind); 5] = [
    (egui::Key::Space, ToolKind::Select),
    (egui::Key::L, ToolKind::Draw),
    (egui::Key::R, ToolKind::Rectangle),
    (egui::Key::E, ToolKind::Erase),
    (egui::Key::P, ToolKind::PushPull),
];

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState, viewport: &mut ViewportPanel) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        // Ctrl+Z: undo
        if i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift {
            state.undo();
        }
        // Ctrl+Shift+Z or Ctrl+Y: redo
        if (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
            || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        {
            state.redo();
        }
        // Escape: abort the current gesture, keep the tool
        if i.key_pressed(egui::Key::Escape) {
            state.cancel();
        }
        // Home: reset camera
        if i.key_pressed(egui::Key::Home) {
            viewport.reset_camera();
        }

        if i.modifiers.any() {
            return;
        }
        for (key, tool) in TOOL_KEYS {
            if i.key_pressed(key) {
                state.set_tool(tool);
            }
        }
    });
}
