//! Application menu bar

use eframe::egui;
use sketch_engine::state::settings::RedoPolicy;
use sketch_engine::state::AppState;

use crate::viewport::ViewportPanel;

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Edit", |ui| {
        if ui
            .add_enabled(
                state.registry.can_undo(),
                egui::Button::new("Undo").shortcut_text("Ctrl+Z"),
            )
            .clicked()
        {
            state.undo();
            ui.close_menu();
        }
        if ui
            .add_enabled(
                state.registry.can_redo(),
                egui::Button::new("Redo").shortcut_text("Ctrl+Y"),
            )
            .clicked()
        {
            state.redo();
            ui.close_menu();
        }
        ui.separator();
        if ui
            .add_enabled(state.is_busy(), egui::Button::new("Cancel gesture").shortcut_text("Esc"))
            .clicked()
        {
            state.cancel();
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, viewport: &mut ViewportPanel) {
    ui.menu_button("View", |ui| {
        if ui.add(egui::Button::new("Reset camera").shortcut_text("Home")).clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        if ui.button("Top view").clicked() {
            viewport.top_view();
            ui.close_menu();
        }
        ui.checkbox(&mut viewport.show_grid, "Ground grid");
    });
}

/// Show the settings menu. Changes apply immediately and are saved.
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Settings", |ui| {
        let mut settings = state.settings.clone();

        ui.checkbox(&mut settings.snap.enabled, "Snapping");
        ui.add(
            egui::Slider::new(&mut settings.snap.angle_deg, 1.0..=15.0)
                .text("Snap angle (°)")
                .step_by(0.5),
        );
        ui.add(
            egui::Slider::new(&mut settings.push_pull.height_step, 0.01..=1.0)
                .text("Push/Pull step")
                .logarithmic(true),
        );

        ui.separator();
        ui.label("Redo after a new edit");
        ui.radio_value(&mut settings.history.redo_policy, RedoPolicy::Retain, "Keep redo stack");
        ui.radio_value(
            &mut settings.history.redo_policy,
            RedoPolicy::ClearOnEdit,
            "Discard redo stack",
        );

        if settings != state.settings {
            settings.save();
            state.apply_settings(settings);
        }
    });
}
