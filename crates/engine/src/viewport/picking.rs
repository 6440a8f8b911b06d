use glam::DVec3;
use shared::ObjectId;

use super::mesh::MeshData;

/// A ray in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Self {
        let mut min = DVec3::splat(f64::MAX);
        let mut max = DVec3::splat(f64::MIN);
        for p in points {
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    /// Compute AABB from MeshData (9 floats per vertex: pos+normal+color)
    pub fn from_mesh(data: &MeshData) -> Self {
        Self::from_points((0..data.vertex_count()).map(|i| data.position(i).as_dvec3()))
    }

    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min: self.min - DVec3::splat(margin),
            max: self.max + DVec3::splat(margin),
        }
    }

    /// Center of the bounding box
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f64> {
    let inv_dir = DVec3::ONE / ray.direction;

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    // NaN from 0 * inf on an axis-parallel ray: treat the slab as unbounded
    let lo = |a: f64, b: f64| if a.is_nan() || b.is_nan() { f64::MIN } else { a.min(b) };
    let hi = |a: f64, b: f64| if a.is_nan() || b.is_nan() { f64::MAX } else { a.max(b) };

    let tmin = lo(t1, t2).max(lo(t3, t4)).max(lo(t5, t6));
    let tmax = hi(t1, t2).min(hi(t3, t4)).min(hi(t5, t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the distance along the ray if hit, or None if no intersection.
pub fn ray_triangle_intersect(ray: &Ray, v0: DVec3, v1: DVec3, v2: DVec3) -> Option<f64> {
    const EPSILON: f64 = 1e-9;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Nearest triangle hit distance in a mesh
pub fn ray_mesh(ray: &Ray, mesh: &MeshData) -> Option<f64> {
    mesh.triangles()
        .filter_map(|[a, b, c]| ray_triangle_intersect(ray, a, b, c))
        .min_by(f64::total_cmp)
}

/// Closest approach between a ray and a segment.
/// Returns (distance along the ray, gap between ray and segment).
pub fn ray_segment_distance(ray: &Ray, a: DVec3, b: DVec3) -> (f64, f64) {
    let d1 = ray.direction;
    let d2 = b - a;
    let r = ray.origin - a;
    let aa = d1.dot(d1);
    let ee = d2.dot(d2);
    let f = d2.dot(r);

    let (s, t) = if ee <= 1e-12 {
        ((-d1.dot(r) / aa).max(0.0), 0.0)
    } else {
        let c = d1.dot(r);
        let bb = d1.dot(d2);
        let denom = aa * ee - bb * bb;
        let mut s = if denom.abs() > 1e-12 {
            ((bb * f - c * ee) / denom).max(0.0)
        } else {
            0.0
        };
        let mut t = (bb * s + f) / ee;
        if t < 0.0 {
            t = 0.0;
            s = (-c / aa).max(0.0);
        } else if t > 1.0 {
            t = 1.0;
            s = ((bb - c) / aa).max(0.0);
        }
        (s, t)
    };

    let on_ray = ray.at(s);
    let on_segment = a + d2 * t;
    (s, on_ray.distance(on_segment))
}

/// Pickable geometry of one registry object
#[derive(Debug, Clone, Copy)]
pub enum PickShape<'a> {
    Mesh(&'a MeshData),
    Segment(DVec3, DVec3),
}

/// A ray hit on a registry object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub owner: ObjectId,
    pub distance: f64,
}

/// Ray against one shape. Segments count as hit within `line_tolerance` world units.
pub fn ray_shape(ray: &Ray, shape: PickShape<'_>, line_tolerance: f64) -> Option<f64> {
    match shape {
        PickShape::Mesh(mesh) => ray_mesh(ray, mesh),
        PickShape::Segment(a, b) => {
            let (along, gap) = ray_segment_distance(ray, a, b);
            (gap <= line_tolerance).then_some(along)
        }
    }
}

/// Cast a ray against candidates and return every hit, nearest first.
pub fn cast<'a>(
    ray: &Ray,
    candidates: impl IntoIterator<Item = (ObjectId, Aabb, PickShape<'a>)>,
    line_tolerance: f64,
) -> Vec<Hit> {
    let mut hits: Vec<Hit> = candidates
        .into_iter()
        .filter(|(_, bounds, _)| ray_aabb(ray, &bounds.expanded(line_tolerance)).is_some())
        .filter_map(|(owner, _, shape)| {
            ray_shape(ray, shape, line_tolerance).map(|distance| Hit { owner, distance })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.owner.cmp(&b.owner)));
    hits
}
