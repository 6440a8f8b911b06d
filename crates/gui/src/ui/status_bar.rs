use egui::Ui;
use shared::{ObjectKind, ToolKind};
use sketch_engine::state::AppState;

fn hint(state: &AppState) -> String {
    let busy = state.is_busy();
    match state.tool() {
        ToolKind::Select if busy => "Release to select objects inside the rectangle".into(),
        ToolKind::Select => "Click an object or drag a selection rectangle".into(),
        ToolKind::Draw => match state.draw_path().len() {
            0 => "Click to start a path".into(),
            1 | 2 => "Click the next point".into(),
            n => format!("Click the next point or the start point to close ({n} points)"),
        },
        ToolKind::Rectangle if busy => "Release at the opposite corner".into(),
        ToolKind::Rectangle => "Drag from one corner to the other".into(),
        ToolKind::Erase if busy => "Release to erase highlighted objects".into(),
        ToolKind::Erase => "Drag over objects to erase them".into(),
        ToolKind::PushPull if busy => "Move up or down to set the height".into(),
        ToolKind::PushPull => "Drag a face vertically to extrude it".into(),
    }
}

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let count = |f: fn(&ObjectKind) -> bool| state.registry.count_where(f);
        let edges = count(|k| matches!(k, ObjectKind::Edge { .. }));
        let faces = count(|k| matches!(k, ObjectKind::Face { .. }));
        let prisms = count(|k| matches!(k, ObjectKind::Prism { .. }));
        ui.weak(format!("Edges: {edges}  Faces: {faces}  Prisms: {prisms}"));

        ui.separator();

        let selected = state.selection.count();
        if selected > 0 {
            ui.label(format!("Selected: {selected}"));
            ui.separator();
        }

        ui.colored_label(
            egui::Color32::from_rgb(120, 190, 255),
            format!("[{}] {}", state.tool().label(), hint(state)),
        );
        if state.is_busy() {
            ui.separator();
            ui.weak("Esc to cancel");
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak("GroundSketch v0.1");
        });
    });
}
