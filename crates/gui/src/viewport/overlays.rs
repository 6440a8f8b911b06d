//! Viewport overlay drawing (grid, axes, preview layer, path markers)

use egui::{Color32, Painter, Pos2, Stroke};
use shared::GroundPoint;
use sketch_engine::state::preview::{PreviewLayer, PreviewShape};
use sketch_engine::viewport::mesh::prism_mesh;
use sketch_engine::viewport::ViewContext;

use super::renderer::{paint_translucent, project, project_ground, to_color32};

const GRID_HALF_EXTENT: i32 = 25;
const DASH: f32 = 6.0;
const GAP: f32 = 4.0;

fn segment(painter: &Painter, a: Pos2, b: Pos2, stroke: Stroke, dashed: bool) {
    if dashed {
        painter.extend(egui::Shape::dashed_line(&[a, b], stroke, DASH, GAP));
    } else {
        painter.line_segment([a, b], stroke);
    }
}

fn ground_segment(
    painter: &Painter,
    view: &ViewContext,
    from: GroundPoint,
    to: GroundPoint,
    stroke: Stroke,
    dashed: bool,
) {
    if let (Some(a), Some(b)) = (project_ground(view, from), project_ground(view, to)) {
        segment(painter, a, b, stroke, dashed);
    }
}

/// Unit grid on the ground plane with the X and Z axes highlighted
pub fn draw_grid(painter: &Painter, view: &ViewContext) {
    let extent = GRID_HALF_EXTENT as f64;
    let line = Stroke::new(1.0, Color32::from_rgba_unmultiplied(120, 120, 130, 50));
    let major = Stroke::new(1.0, Color32::from_rgba_unmultiplied(150, 150, 160, 90));

    for i in -GRID_HALF_EXTENT..=GRID_HALF_EXTENT {
        if i == 0 {
            continue;
        }
        let stroke = if i % 5 == 0 { major } else { line };
        let k = i as f64;
        let (a, b) = (GroundPoint::new(k, -extent), GroundPoint::new(k, extent));
        ground_segment(painter, view, a, b, stroke, false);
        let (a, b) = (GroundPoint::new(-extent, k), GroundPoint::new(extent, k));
        ground_segment(painter, view, a, b, stroke, false);
    }

    let x_axis = Stroke::new(1.5, Color32::from_rgb(220, 70, 70));
    let z_axis = Stroke::new(1.5, Color32::from_rgb(70, 110, 220));
    let (a, b) = (GroundPoint::new(-extent, 0.0), GroundPoint::new(extent, 0.0));
    ground_segment(painter, view, a, b, x_axis, false);
    let (a, b) = (GroundPoint::new(0.0, -extent), GroundPoint::new(0.0, extent));
    ground_segment(painter, view, a, b, z_axis, false);
}

/// Draw axis labels in the viewport
pub fn draw_axis_labels(painter: &Painter, rect: egui::Rect, view: &ViewContext) {
    let labels = [
        (glam::DVec3::new(2.0, 0.0, 0.0), "X", Color32::from_rgb(220, 70, 70)),
        (glam::DVec3::new(0.0, 2.0, 0.0), "Y", Color32::from_rgb(70, 200, 70)),
        (glam::DVec3::new(0.0, 0.0, 2.0), "Z", Color32::from_rgb(70, 110, 220)),
    ];

    for (pos, label, color) in &labels {
        if let Some((screen, _)) = project(view, *pos) {
            if rect.contains(screen) {
                painter.text(
                    screen,
                    egui::Align2::LEFT_BOTTOM,
                    *label,
                    egui::FontId::monospace(12.0),
                    *color,
                );
            }
        }
    }
}

/// Everything the active tool put into the preview layer
pub fn draw_preview(
    painter: &Painter,
    rect: egui::Rect,
    view: &ViewContext,
    preview: &PreviewLayer,
) {
    for (_, shape) in preview.iter() {
        match shape {
            PreviewShape::Segment {
                from,
                to,
                color,
                dashed,
            } => {
                let stroke = Stroke::new(1.5, to_color32(*color));
                ground_segment(painter, view, *from, *to, stroke, *dashed);
            }
            PreviewShape::Outline { points, color } => {
                let stroke = Stroke::new(1.5, to_color32(*color));
                for (i, &a) in points.iter().enumerate() {
                    let b = points[(i + 1) % points.len()];
                    ground_segment(painter, view, a, b, stroke, false);
                }
            }
            PreviewShape::Solid {
                contour,
                base,
                height,
                color,
                opacity,
            } => {
                let mesh = prism_mesh(contour, *base, *height, *color);
                paint_translucent(painter, view, &mesh, *color, *opacity);
            }
            PreviewShape::Marquee { min, max } => {
                let marquee = egui::Rect::from_min_max(
                    rect.min + egui::vec2(min[0] as f32, min[1] as f32),
                    rect.min + egui::vec2(max[0] as f32, max[1] as f32),
                );
                painter.rect_filled(marquee, 0.0, Color32::from_rgba_unmultiplied(0, 119, 255, 30));
                painter.rect_stroke(
                    marquee,
                    0.0,
                    Stroke::new(1.0, Color32::from_rgb(0, 119, 255)),
                    egui::StrokeKind::Inside,
                );
            }
        }
    }
}

/// Markers on the committed points of an open draw path
pub fn draw_path_points(painter: &Painter, view: &ViewContext, path: &[GroundPoint]) {
    let color = Color32::from_rgba_unmultiplied(255, 255, 100, 220);
    for (i, p) in path.iter().enumerate() {
        if let Some(pos) = project_ground(view, *p) {
            let radius = if i == 0 { 4.5 } else { 3.0 };
            painter.circle_filled(pos, radius, color);
        }
    }
}
