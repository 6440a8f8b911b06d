//! 3D viewport panel: camera, pointer routing and painter rendering

mod camera;
mod overlays;
mod renderer;

use egui::Ui;
use shared::PointerButton;
use sketch_engine::state::AppState;
use sketch_engine::tools::PointerEvent;

use camera::ArcBallCamera;

/// 3D viewport panel
pub struct ViewportPanel {
    camera: ArcBallCamera,
    pub show_grid: bool,
}

fn map_button(button: egui::PointerButton) -> PointerButton {
    match button {
        egui::PointerButton::Primary => PointerButton::Primary,
        egui::PointerButton::Middle => PointerButton::Middle,
        _ => PointerButton::Secondary,
    }
}

fn pointer_event(pos: egui::Pos2, button: PointerButton) -> PointerEvent {
    PointerEvent::new(pos.x as f64, pos.y as f64).with_button(button)
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: ArcBallCamera::new(),
            show_grid: true,
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = ArcBallCamera::new();
    }

    pub fn top_view(&mut self) {
        self.camera.top_view();
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        // ── Camera controls ─────────────────────────────
        self.handle_camera(ui, &response);
        state.set_view(self.camera.view_context(rect));

        // ── Tool input ─────────────────────────────
        self.route_pointer(ui, &response, rect, state);

        if !ui.is_rect_visible(rect) {
            return;
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(44, 46, 52));

        let view = state.view;
        if self.show_grid {
            overlays::draw_grid(&painter, &view);
        }
        renderer::paint_scene(&painter, &view, &state.registry);
        overlays::draw_preview(&painter, rect, &view, &state.preview);
        overlays::draw_path_points(&painter, &view, state.draw_path());
        overlays::draw_axis_labels(&painter, rect, &view);
        self.draw_camera_info(&painter, rect);

        if state.registry.placed().is_empty() {
            painter.text(
                egui::pos2(rect.center().x, rect.bottom() - 20.0),
                egui::Align2::CENTER_BOTTOM,
                "Middle-drag: orbit   Right-drag: pan   Scroll: zoom",
                egui::FontId::proportional(11.0),
                egui::Color32::from_rgb(120, 120, 130),
            );
        }
    }

    fn handle_camera(&mut self, ui: &Ui, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Middle) {
            let delta = response.drag_delta();
            self.camera.rotate(delta.x as f64 * 0.5, delta.y as f64 * 0.5);
        }

        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            self.camera.pan(delta.x as f64, delta.y as f64);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll as f64 * 0.01);
            }
        }
    }

    /// Forward raw pointer events to the active tool.
    ///
    /// Presses only count inside the canvas; moves and releases are forwarded
    /// while a gesture is in flight so drags can leave the canvas.
    fn route_pointer(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        rect: egui::Rect,
        state: &mut AppState,
    ) {
        let events = ui.input(|i| i.events.clone());
        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    if rect.contains(pos) || state.is_busy() {
                        state.pointer_move(pointer_event(pos, PointerButton::Primary));
                    }
                }
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    let event = pointer_event(pos, map_button(button));
                    if pressed {
                        if response.hovered() && rect.contains(pos) {
                            state.pointer_down(event);
                        }
                    } else {
                        state.pointer_up(event);
                    }
                }
                _ => {}
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                state.click(pointer_event(pos, PointerButton::Primary));
            }
        }
    }

    fn draw_camera_info(&self, painter: &egui::Painter, rect: egui::Rect) {
        let overlay_rect = egui::Rect::from_min_size(
            egui::pos2(rect.right() - 140.0, rect.top() + 4.0),
            egui::vec2(136.0, 44.0),
        );
        painter.rect_filled(
            overlay_rect,
            4.0,
            egui::Color32::from_rgba_premultiplied(0, 0, 0, 140),
        );
        painter.text(
            overlay_rect.min + egui::vec2(6.0, 4.0),
            egui::Align2::LEFT_TOP,
            format!(
                "Dist: {:.1}  ({:.1}, {:.1})\nYaw: {:.0}  Pitch: {:.0}",
                self.camera.distance,
                self.camera.target.x,
                self.camera.target.z,
                self.camera.yaw.to_degrees(),
                self.camera.pitch.to_degrees(),
            ),
            egui::FontId::monospace(10.0),
            egui::Color32::from_rgb(160, 160, 170),
        );
    }
}
