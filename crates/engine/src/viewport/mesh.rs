use glam::{DVec2, DVec3, Vec3};
use shared::{GroundPoint, Rgb};

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

const STRIDE: usize = 9;

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, index: usize) -> Vec3 {
        let base = index * STRIDE;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    pub fn normal(&self, index: usize) -> Vec3 {
        let base = index * STRIDE + 3;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    /// Triangle corners in world space (f64 for picking)
    pub fn triangles(&self) -> impl Iterator<Item = [DVec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.position(tri[0] as usize).as_dvec3(),
                self.position(tri[1] as usize).as_dvec3(),
                self.position(tri[2] as usize).as_dvec3(),
            ]
        })
    }

    /// Rewrite the color of every vertex
    pub fn set_color(&mut self, color: Rgb) {
        let rgb = color.to_f32_array();
        for vertex in self.vertices.chunks_exact_mut(STRIDE) {
            vertex[6..9].copy_from_slice(&rgb);
        }
    }

    fn push_vert(&mut self, p: DVec3, n: DVec3, color: [f32; 3]) -> u32 {
        let index = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&[
            p.x as f32, p.y as f32, p.z as f32, n.x as f32, n.y as f32, n.z as f32, color[0],
            color[1], color[2],
        ]);
        index
    }
}

// ── Triangulation ───────────────────────────────────────────

fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f64>()
        * 0.5
}

fn point_in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);
    d1 > 0.0 && d2 > 0.0 && d3 > 0.0
}

/// Ear-clipping triangulation of a simple polygon.
///
/// Returns index triples into `points`, each wound counter-clockwise
/// in the (x, y) plane of the input regardless of the input winding.
pub fn triangulate(points: &[DVec2]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut ring: Vec<usize> = (0..n).collect();
    if signed_area(points) < 0.0 {
        ring.reverse();
    }

    let mut triangles = Vec::with_capacity(n - 2);
    let mut guard = 0usize;
    let mut i = 0usize;

    while ring.len() > 3 {
        let m = ring.len();
        let prev = ring[(i + m - 1) % m];
        let curr = ring[i % m];
        let next = ring[(i + 1) % m];
        let (a, b, c) = (points[prev], points[curr], points[next]);

        let convex = (b - a).perp_dot(c - b) > 1e-12;
        let is_ear = convex
            && ring
                .iter()
                .filter(|&&k| k != prev && k != curr && k != next)
                .all(|&k| !point_in_triangle(points[k], a, b, c));

        // Degenerate or self-intersecting input: clip anyway after a full fruitless pass
        if is_ear || guard >= m {
            triangles.push([prev, curr, next]);
            ring.remove(i % m);
            guard = 0;
            if i >= ring.len() {
                i = 0;
            }
        } else {
            i = (i + 1) % m;
            guard += 1;
        }
    }

    triangles.push([ring[0], ring[1], ring[2]]);
    triangles
}

// ── Faces and prisms ────────────────────────────────────────

fn lift(p: GroundPoint, y: f64) -> DVec3 {
    DVec3::new(p.x, y, p.z)
}

fn ccw_contour(contour: &[GroundPoint]) -> Vec<GroundPoint> {
    let flat: Vec<DVec2> = contour.iter().map(|p| p.to_vec2()).collect();
    let mut out = contour.to_vec();
    if signed_area(&flat) < 0.0 {
        out.reverse();
    }
    out
}

/// Emit a cap at height `y`, triangulated in coordinates local to `base`.
/// CCW-in-(x,z) triangles face -Y, so `up` flips them.
fn add_cap(
    mesh: &mut MeshData,
    contour: &[GroundPoint],
    base: GroundPoint,
    y: f64,
    up: bool,
    color: [f32; 3],
) {
    let origin = base.to_vec2();
    let flat: Vec<DVec2> = contour.iter().map(|p| p.to_vec2() - origin).collect();
    let normal = if up { DVec3::Y } else { DVec3::NEG_Y };
    let base = mesh.vertex_count() as u32;
    for p in contour {
        mesh.push_vert(lift(*p, y), normal, color);
    }
    for [a, b, c] in triangulate(&flat) {
        let (a, b, c) = (base + a as u32, base + b as u32, base + c as u32);
        if up {
            mesh.indices.extend_from_slice(&[a, c, b]);
        } else {
            mesh.indices.extend_from_slice(&[a, b, c]);
        }
    }
}

/// Flat polygon lying on the ground, facing up
pub fn face_mesh(contour: &[GroundPoint], base: GroundPoint, color: Rgb) -> MeshData {
    let mut mesh = MeshData::default();
    if contour.len() < 3 {
        return mesh;
    }
    add_cap(&mut mesh, contour, base, 0.0, true, color.to_f32_array());
    mesh
}

/// Closed prism between y = 0 and y = height (height may be negative)
pub fn prism_mesh(contour: &[GroundPoint], base: GroundPoint, height: f64, color: Rgb) -> MeshData {
    let mut mesh = MeshData::default();
    if contour.len() < 3 {
        return mesh;
    }
    let rgb = color.to_f32_array();
    let contour = ccw_contour(contour);
    let upward = height >= 0.0;

    add_cap(&mut mesh, &contour, base, 0.0, !upward, rgb);
    add_cap(&mut mesh, &contour, base, height, upward, rgb);

    // Side walls
    let n = contour.len();
    for i in 0..n {
        let p0 = contour[i];
        let p1 = contour[(i + 1) % n];
        let edge = p1.to_vec2() - p0.to_vec2();
        let outward = DVec3::new(edge.y, 0.0, -edge.x).normalize_or_zero();

        let b0 = mesh.push_vert(lift(p0, 0.0), outward, rgb);
        let b1 = mesh.push_vert(lift(p1, 0.0), outward, rgb);
        let t1 = mesh.push_vert(lift(p1, height), outward, rgb);
        let t0 = mesh.push_vert(lift(p0, height), outward, rgb);

        if upward {
            mesh.indices.extend_from_slice(&[b0, t1, b1, b0, t0, t1]);
        } else {
            mesh.indices.extend_from_slice(&[b0, b1, t1, b0, t1, t0]);
        }
    }

    mesh
}
