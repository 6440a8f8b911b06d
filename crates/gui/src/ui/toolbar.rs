//! Tool palette and history buttons

use egui::Ui;
use shared::ToolKind;
use sketch_engine::state::AppState;

/// Keyboard shortcut shown next to each tool
pub fn shortcut(tool: ToolKind) -> &'static str {
    match tool {
        ToolKind::Select => "Space",
        ToolKind::Draw => "L",
        ToolKind::Rectangle => "R",
        ToolKind::Erase => "E",
        ToolKind::PushPull => "P",
    }
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        let active = state.tool();
        for &tool in ToolKind::all() {
            let response = ui
                .selectable_label(active == tool, tool.label())
                .on_hover_text(format!("{} ({})", tool.label(), shortcut(tool)));
            if response.clicked() {
                state.set_tool(tool);
            }
        }

        ui.separator();

        if ui
            .add_enabled(state.registry.can_undo(), egui::Button::new("⟲ Undo"))
            .on_hover_text("Ctrl+Z")
            .clicked()
        {
            state.undo();
        }
        if ui
            .add_enabled(state.registry.can_redo(), egui::Button::new("⟳ Redo"))
            .on_hover_text("Ctrl+Y")
            .clicked()
        {
            state.redo();
        }
    });
}
