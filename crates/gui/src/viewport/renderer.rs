//! Painter-based scene rendering
//!
//! Triangles are depth-sorted back to front and shaded with a single
//! directional light. Edges are stroked on top.

use egui::{Color32, Painter, Pos2, Stroke};
use glam::{DVec3, DVec4, Vec3};
use shared::{GroundPoint, ObjectKind, Rgb};
use sketch_engine::state::scene::SceneRegistry;
use sketch_engine::viewport::mesh::MeshData;
use sketch_engine::viewport::ViewContext;

const LIGHT_DIR: Vec3 = Vec3::new(0.35, 0.9, 0.25);
const EDGE_WIDTH: f32 = 2.0;

pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r(), rgb.g(), rgb.b())
}

/// World point → screen position plus NDC depth
pub fn project(view: &ViewContext, world: DVec3) -> Option<(Pos2, f64)> {
    let clip = view.view_projection * DVec4::new(world.x, world.y, world.z, 1.0);
    if clip.w <= 1e-9 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    let vp = &view.viewport;
    let x = vp.left + (ndc.x * 0.5 + 0.5) * vp.width;
    let y = vp.top + (-ndc.y * 0.5 + 0.5) * vp.height;
    Some((Pos2::new(x as f32, y as f32), ndc.z))
}

pub fn project_ground(view: &ViewContext, p: GroundPoint) -> Option<Pos2> {
    project(view, p.to_vec3()).map(|(pos, _)| pos)
}

fn shade(color: Color32, normal: Vec3, alpha: u8) -> Color32 {
    let lambert = normal.normalize_or_zero().dot(LIGHT_DIR.normalize()).max(0.0);
    let k = 0.55 + 0.45 * lambert;
    let scale = |c: u8| (c as f32 * k).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgba_unmultiplied(scale(color.r()), scale(color.g()), scale(color.b()), alpha)
}

/// One projected triangle waiting for the depth sort
struct ScreenTriangle {
    points: [Pos2; 3],
    depth: f64,
    color: Color32,
}

fn collect_triangles(
    view: &ViewContext,
    mesh: &MeshData,
    color: Color32,
    alpha: u8,
    out: &mut Vec<ScreenTriangle>,
) {
    for tri in mesh.indices.chunks_exact(3) {
        let mut points = [Pos2::ZERO; 3];
        let mut depth = 0.0;
        let mut visible = true;
        for (slot, &index) in points.iter_mut().zip(tri) {
            match project(view, mesh.position(index as usize).as_dvec3()) {
                Some((pos, z)) => {
                    *slot = pos;
                    depth += z;
                }
                None => visible = false,
            }
        }
        if !visible {
            continue;
        }
        out.push(ScreenTriangle {
            points,
            depth: depth / 3.0,
            color: shade(color, mesh.normal(tri[0] as usize), alpha),
        });
    }
}

fn paint_triangles(painter: &Painter, mut triangles: Vec<ScreenTriangle>) {
    if triangles.is_empty() {
        return;
    }
    triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let mut mesh = egui::Mesh::default();
    for tri in &triangles {
        let base = mesh.vertices.len() as u32;
        for p in tri.points {
            mesh.colored_vertex(p, tri.color);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
    painter.add(egui::Shape::mesh(mesh));
}

/// Faces and prisms, then edges
pub fn paint_scene(painter: &Painter, view: &ViewContext, registry: &SceneRegistry) {
    let mut triangles = Vec::new();
    for object in registry.live_objects() {
        if let Some(mesh) = &object.mesh {
            collect_triangles(view, mesh, to_color32(object.color), 255, &mut triangles);
        }
    }
    paint_triangles(painter, triangles);

    for object in registry.live_objects() {
        if let ObjectKind::Edge { start, end } = &object.kind {
            if let (Some(a), Some(b)) = (project_ground(view, *start), project_ground(view, *end)) {
                painter.line_segment([a, b], Stroke::new(EDGE_WIDTH, to_color32(object.color)));
            }
        }
    }
}

/// Translucent mesh (push/pull preview)
pub fn paint_translucent(
    painter: &Painter,
    view: &ViewContext,
    mesh: &MeshData,
    color: Rgb,
    opacity: f32,
) {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    let mut triangles = Vec::new();
    collect_triangles(view, mesh, to_color32(color), alpha, &mut triangles);
    paint_triangles(painter, triangles);
}
