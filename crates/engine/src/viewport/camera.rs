use glam::{DMat4, DVec2, DVec3, DVec4};
use shared::GroundPoint;

use super::picking::Ray;

/// Canvas rectangle in client (page) pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Client position → canvas-relative position
    pub fn to_local(&self, client: DVec2) -> DVec2 {
        DVec2::new(client.x - self.left, client.y - self.top)
    }

    /// Client position → normalized device coordinates (y up)
    pub fn to_ndc(&self, client: DVec2) -> DVec2 {
        let local = self.to_local(client);
        DVec2::new(
            (local.x / self.width) * 2.0 - 1.0,
            -(local.y / self.height) * 2.0 + 1.0,
        )
    }
}

/// Snapshot of the host camera: combined view-projection and the canvas it renders to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewContext {
    pub view_projection: DMat4,
    pub viewport: ScreenRect,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self::top_down(GroundPoint::ORIGIN, 0.05, ScreenRect::new(0.0, 0.0, 800.0, 600.0))
    }
}

impl ViewContext {
    pub fn new(view_projection: DMat4, viewport: ScreenRect) -> Self {
        Self {
            view_projection,
            viewport,
        }
    }

    /// Orthographic plan view looking straight down at `center`.
    /// Screen right is +X, screen down is +Z.
    pub fn top_down(center: GroundPoint, units_per_pixel: f64, viewport: ScreenRect) -> Self {
        let half_w = viewport.width * units_per_pixel * 0.5;
        let half_h = viewport.height * units_per_pixel * 0.5;
        let target = center.to_vec3();
        let eye = target + DVec3::Y * 100.0;
        let view = DMat4::look_at_rh(eye, target, DVec3::NEG_Z);
        let proj = DMat4::orthographic_rh_gl(-half_w, half_w, -half_h, half_h, 0.1, 1000.0);
        Self::new(proj * view, viewport)
    }

    /// Cast a ray from a client position into the scene
    pub fn screen_ray(&self, client: DVec2) -> Ray {
        let ndc = self.viewport.to_ndc(client);
        let vp_inv = self.view_projection.inverse();

        let near = vp_inv.project_point3(DVec3::new(ndc.x, ndc.y, -1.0));
        let far = vp_inv.project_point3(DVec3::new(ndc.x, ndc.y, 1.0));

        Ray {
            origin: near,
            direction: (far - near).normalize_or_zero(),
        }
    }

    /// Project a world point to canvas-relative pixels. None when behind the camera.
    pub fn project(&self, world: DVec3) -> Option<DVec2> {
        let clip = self.view_projection * DVec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(DVec2::new(
            (ndc.x * 0.5 + 0.5) * self.viewport.width,
            (-ndc.y * 0.5 + 0.5) * self.viewport.height,
        ))
    }

    /// Project a world point to client pixels
    pub fn project_client(&self, world: DVec3) -> Option<DVec2> {
        self.project(world)
            .map(|p| p + DVec2::new(self.viewport.left, self.viewport.top))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> ViewContext {
        ViewContext::top_down(GroundPoint::ORIGIN, 0.05, ScreenRect::new(0.0, 0.0, 800.0, 600.0))
    }

    #[test]
    fn test_top_down_projects_origin_to_center() {
        let p = plan().project(DVec3::ZERO).unwrap();
        assert!((p.x - 400.0).abs() < 1e-9);
        assert!((p.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_down_axes_orientation() {
        let view = plan();
        let px = view.project(DVec3::new(1.0, 0.0, 0.0)).unwrap();
        let pz = view.project(DVec3::new(0.0, 0.0, 1.0)).unwrap();
        assert!((px.x - 420.0).abs() < 1e-9);
        assert!((pz.y - 320.0).abs() < 1e-9);
    }

    #[test]
    fn test_screen_ray_points_down() {
        let ray = plan().screen_ray(DVec2::new(400.0, 300.0));
        assert!((ray.direction - DVec3::NEG_Y).length() < 1e-9);
        assert!(ray.origin.y > 0.0);
    }

    #[test]
    fn test_viewport_offset_is_respected() {
        let rect = ScreenRect::new(100.0, 50.0, 800.0, 600.0);
        let view = ViewContext::top_down(GroundPoint::ORIGIN, 0.05, rect);
        let client = view.project_client(DVec3::ZERO).unwrap();
        assert!((client.x - 500.0).abs() < 1e-9);
        assert!((client.y - 350.0).abs() < 1e-9);
        let ndc = view.viewport.to_ndc(client);
        assert!(ndc.length() < 1e-12);
    }

    #[test]
    fn test_project_behind_perspective_camera() {
        let view = DMat4::look_at_rh(DVec3::new(0.0, 5.0, 5.0), DVec3::ZERO, DVec3::Y);
        let proj = DMat4::perspective_rh_gl(50f64.to_radians(), 4.0 / 3.0, 0.1, 2000.0);
        let ctx = ViewContext::new(proj * view, ScreenRect::new(0.0, 0.0, 800.0, 600.0));
        assert!(ctx.project(DVec3::ZERO).is_some());
        assert!(ctx.project(DVec3::new(0.0, 10.0, 10.0)).is_none());
    }
}
