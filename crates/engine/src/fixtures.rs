//! Factory functions for creating test data.
//!
//! Contours, object payloads and pre-populated registries used by unit tests,
//! integration tests and scripted sessions.

use shared::*;

use crate::state::scene::SceneRegistry;
use crate::state::settings::Palette;

// ── Contours ────────────────────────────────────────────────────

/// Axis-aligned rectangle contour with one corner at (x, z).
pub fn rect_contour(x: f64, z: f64, w: f64, d: f64) -> Vec<GroundPoint> {
    vec![
        GroundPoint::new(x, z),
        GroundPoint::new(x + w, z),
        GroundPoint::new(x + w, z + d),
        GroundPoint::new(x, z + d),
    ]
}

/// Square contour centered on (cx, cz).
pub fn square_contour(cx: f64, cz: f64, side: f64) -> Vec<GroundPoint> {
    let h = side * 0.5;
    rect_contour(cx - h, cz - h, side, side)
}

/// Concave L-shaped contour (3 unit cells) with its corner at (x, z).
pub fn l_contour(x: f64, z: f64) -> Vec<GroundPoint> {
    vec![
        GroundPoint::new(x, z),
        GroundPoint::new(x + 2.0, z),
        GroundPoint::new(x + 2.0, z + 1.0),
        GroundPoint::new(x + 1.0, z + 1.0),
        GroundPoint::new(x + 1.0, z + 2.0),
        GroundPoint::new(x, z + 2.0),
    ]
}

// ── Object payloads ─────────────────────────────────────────────

pub fn edge(x0: f64, z0: f64, x1: f64, z1: f64) -> ObjectKind {
    ObjectKind::Edge {
        start: GroundPoint::new(x0, z0),
        end: GroundPoint::new(x1, z1),
    }
}

/// Face whose base is the first contour point.
pub fn face(contour: Vec<GroundPoint>) -> ObjectKind {
    let base = contour.first().copied().unwrap_or_default();
    ObjectKind::Face { contour, base }
}

pub fn prism(contour: Vec<GroundPoint>, height: f64) -> ObjectKind {
    let base = contour.first().copied().unwrap_or_default();
    ObjectKind::Prism {
        contour,
        base,
        height,
    }
}

// ── Registries ──────────────────────────────────────────────────

/// Registry holding a single face; returns its id.
pub fn registry_with_face(contour: Vec<GroundPoint>) -> (SceneRegistry, ObjectId) {
    let mut registry = SceneRegistry::default();
    let id = registry.insert(face(contour), Palette::default().face);
    (registry, id)
}

/// Registry with the four edges and the face of a rectangle, in the order
/// the rectangle tool commits them. Returns (edges, face).
pub fn registry_with_rectangle(
    x: f64,
    z: f64,
    w: f64,
    d: f64,
) -> (SceneRegistry, Vec<ObjectId>, ObjectId) {
    let palette = Palette::default();
    let contour = rect_contour(x, z, w, d);
    let mut registry = SceneRegistry::default();
    let edges = (0..4)
        .map(|i| {
            let a = contour[i];
            let b = contour[(i + 1) % 4];
            registry.insert(edge(a.x, a.z, b.x, b.z), palette.edge)
        })
        .collect();
    let face_id = registry.insert(face(contour), palette.face);
    (registry, edges, face_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contour() {
        let c = rect_contour(1.0, 2.0, 3.0, 4.0);
        assert_eq!(c.len(), 4);
        assert_eq!(c[2], GroundPoint::new(4.0, 6.0));
    }

    #[test]
    fn test_square_contour_centered() {
        let c = square_contour(0.0, 0.0, 2.0);
        assert_eq!(c[0], GroundPoint::new(-1.0, -1.0));
        assert_eq!(c[2], GroundPoint::new(1.0, 1.0));
    }

    #[test]
    fn test_face_base_is_first_point() {
        match face(l_contour(1.0, 1.0)) {
            ObjectKind::Face { base, contour } => {
                assert_eq!(base, GroundPoint::new(1.0, 1.0));
                assert_eq!(contour.len(), 6);
            }
            _ => panic!("Expected Face"),
        }
    }

    #[test]
    fn test_registry_with_rectangle() {
        let (reg, edges, face_id) = registry_with_rectangle(0.0, 0.0, 2.0, 1.0);
        assert_eq!(edges.len(), 4);
        assert_eq!(reg.placed().last(), Some(&face_id));
        assert!(reg.get(face_id).unwrap().face().is_some());
    }
}
