use glam::{DMat4, DVec3};
use sketch_engine::viewport::{ScreenRect, ViewContext};

/// Arc-ball camera for the 3D viewport
pub struct ArcBallCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f64,
    /// Vertical rotation angle (radians)
    pub pitch: f64,
    /// Distance from target
    pub distance: f64,
    /// Camera target point
    pub target: DVec3,
    /// Vertical field of view (radians)
    pub fov: f64,
}

impl Default for ArcBallCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcBallCamera {
    pub fn new() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.7,
            distance: 25.0,
            target: DVec3::ZERO,
            fov: 45.0_f64.to_radians(),
        }
    }

    pub fn rotate(&mut self, dx: f64, dy: f64) {
        self.yaw += dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(-1.5, 1.5);
    }

    pub fn zoom(&mut self, delta: f64) {
        self.distance = (self.distance * (1.0 - delta)).clamp(1.0, 500.0);
    }

    /// Move the target in the view plane; offsets scale with distance
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let scale = self.distance * 0.0015;
        let offset = self.right_vector() * (-dx * scale) + self.up_vector() * (dy * scale);
        self.target += offset;
    }

    /// Look almost straight down at the current target
    pub fn top_view(&mut self) {
        self.yaw = 0.0;
        self.pitch = 1.5;
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> DVec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();

        self.target
            + DVec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            )
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye_position(), self.target, DVec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f64) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov, aspect, 0.1, 1000.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f64) -> DMat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> DVec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(DVec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> DVec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        self.right_vector().cross(fwd).normalize_or_zero()
    }

    /// Snapshot handed to the engine for ray casting and projection
    pub fn view_context(&self, rect: egui::Rect) -> ViewContext {
        let viewport = ScreenRect::new(
            rect.left() as f64,
            rect.top() as f64,
            rect.width().max(1.0) as f64,
            rect.height().max(1.0) as f64,
        );
        ViewContext::new(
            self.view_projection(viewport.width / viewport.height),
            viewport,
        )
    }
}
