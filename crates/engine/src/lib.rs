// Geometric interaction engine: ground projection, snapping, picking, the
// scene registry and the five sketch tools. Hosts (desktop, browser) drive it
// with pointer events and a camera snapshot.

pub mod command;
pub mod fixtures;
pub mod harness;
pub mod state;
pub mod tools;
pub mod viewport;

pub use state::AppState;
pub use tools::PointerEvent;
pub use viewport::camera::{ScreenRect, ViewContext};
