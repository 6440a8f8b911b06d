//! Ground projector: pointer position → point on the y = 0 reference plane.

use glam::DVec2;
use shared::GroundPoint;

use super::camera::ViewContext;
use super::picking::Ray;

/// Intersect a ray with the ground plane. None when parallel or behind the origin.
pub fn intersect_ground(ray: &Ray) -> Option<GroundPoint> {
    let denom = ray.direction.y;
    if denom.abs() < 1e-12 {
        return None;
    }
    let t = -ray.origin.y / denom;
    if t < 0.0 {
        return None;
    }
    Some(GroundPoint::from_vec3(ray.origin + ray.direction * t))
}

/// Project a client position onto the ground plane.
///
/// A ray that never meets the plane degrades to the ray origin dropped onto
/// the plane; callers get a usable (if meaningless) point instead of a failure.
pub fn ground_point(view: &ViewContext, client: DVec2) -> GroundPoint {
    let ray = view.screen_ray(client);
    intersect_ground(&ray).unwrap_or_else(|| GroundPoint::from_vec3(ray.origin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::camera::ScreenRect;
    use glam::{DMat4, DVec3};

    #[test]
    fn test_plan_view_roundtrip() {
        let view = ViewContext::default();
        let world = GroundPoint::new(3.25, -1.5);
        let screen = view.project_client(world.to_vec3()).unwrap();
        let back = ground_point(&view, screen);
        assert!(back.distance_to(world) < 1e-9);
    }

    #[test]
    fn test_perspective_projection_hits_plane() {
        let eye = DVec3::new(10.0, 8.0, 10.0);
        let view = DMat4::look_at_rh(eye, DVec3::new(0.0, 0.8, 0.0), DVec3::Y);
        let proj = DMat4::perspective_rh_gl(50f64.to_radians(), 4.0 / 3.0, 0.1, 2000.0);
        let ctx = ViewContext::new(proj * view, ScreenRect::new(0.0, 0.0, 800.0, 600.0));
        let world = GroundPoint::new(1.0, 2.0);
        let screen = ctx.project_client(world.to_vec3()).unwrap();
        let back = ground_point(&ctx, screen);
        assert!(back.distance_to(world) < 1e-6);
    }

    #[test]
    fn test_parallel_ray_degrades_to_origin() {
        let ray = Ray {
            origin: DVec3::new(2.0, 1.0, 3.0),
            direction: DVec3::X,
        };
        assert!(intersect_ground(&ray).is_none());
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let ray = Ray {
            origin: DVec3::new(0.0, 1.0, 0.0),
            direction: DVec3::Y,
        };
        assert!(intersect_ground(&ray).is_none());
    }
}
