//! Camera/ray state read from the host, plus the geometry the tools pick against.

pub mod camera;
pub mod ground;
pub mod mesh;
pub mod picking;

pub use camera::{ScreenRect, ViewContext};
pub use ground::{ground_point, intersect_ground};
pub use picking::{Aabb, Hit, Ray};
