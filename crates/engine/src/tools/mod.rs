//! Drawing tools and the router that owns the active one.

mod draw;
mod eraser;
mod push_pull;
mod rectangle;
mod select;
pub mod snap;

pub use draw::DrawTool;
pub use eraser::EraserTool;
pub use push_pull::PushPullTool;
pub use rectangle::RectangleTool;
pub use select::SelectTool;

use glam::DVec2;
use shared::{GroundPoint, ObjectId, ObjectKind, PointerButton, ToolKind};

use crate::state::preview::PreviewLayer;
use crate::state::scene::SceneRegistry;
use crate::state::selection::Selection;
use crate::state::settings::AppSettings;
use crate::viewport::camera::ViewContext;
use crate::viewport::ground::ground_point;
use crate::viewport::picking::Ray;

/// Pointer event in client (page) pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: DVec2,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            button: PointerButton::Primary,
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }
}

/// Everything a tool handler may read or mutate
pub struct ToolContext<'a> {
    pub registry: &'a mut SceneRegistry,
    pub selection: &'a mut Selection,
    pub preview: &'a mut PreviewLayer,
    pub view: &'a ViewContext,
    pub settings: &'a AppSettings,
}

impl ToolContext<'_> {
    pub fn ground_point(&self, event: &PointerEvent) -> GroundPoint {
        ground_point(self.view, event.position)
    }

    pub fn ray(&self, event: &PointerEvent) -> Ray {
        self.view.screen_ray(event.position)
    }

    pub fn add_edge(&mut self, start: GroundPoint, end: GroundPoint) -> ObjectId {
        self.registry
            .insert(ObjectKind::Edge { start, end }, self.settings.palette.edge)
    }

    /// Commit a face; the first contour point is its base
    pub fn add_face(&mut self, contour: Vec<GroundPoint>) -> Option<ObjectId> {
        let base = *contour.first()?;
        if contour.len() < 3 {
            return None;
        }
        Some(
            self.registry
                .insert(ObjectKind::Face { contour, base }, self.settings.palette.face),
        )
    }
}

/// Shared handler set of every tool. Unhandled events are no-ops.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn on_down(&mut self, _ctx: &mut ToolContext<'_>, _event: PointerEvent) {}

    fn on_move(&mut self, _ctx: &mut ToolContext<'_>, _event: PointerEvent) {}

    fn on_up(&mut self, _ctx: &mut ToolContext<'_>, _event: PointerEvent) {}

    fn on_click(&mut self, _ctx: &mut ToolContext<'_>, _event: PointerEvent) {}

    /// Drop gesture state, preview geometry and interim colors
    fn cleanup(&mut self, ctx: &mut ToolContext<'_>);

    /// A gesture is in flight
    fn is_busy(&self) -> bool {
        false
    }
}

/// Closed set of tool variants
#[derive(Debug)]
pub enum ActiveTool {
    Select(SelectTool),
    Draw(DrawTool),
    Rectangle(RectangleTool),
    Erase(EraserTool),
    PushPull(PushPullTool),
}

impl ActiveTool {
    pub fn new(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Select => Self::Select(SelectTool::default()),
            ToolKind::Draw => Self::Draw(DrawTool::default()),
            ToolKind::Rectangle => Self::Rectangle(RectangleTool::default()),
            ToolKind::Erase => Self::Erase(EraserTool::default()),
            ToolKind::PushPull => Self::PushPull(PushPullTool::default()),
        }
    }

    pub fn as_tool(&self) -> &dyn Tool {
        match self {
            Self::Select(t) => t,
            Self::Draw(t) => t,
            Self::Rectangle(t) => t,
            Self::Erase(t) => t,
            Self::PushPull(t) => t,
        }
    }

    pub fn as_tool_mut(&mut self) -> &mut dyn Tool {
        match self {
            Self::Select(t) => t,
            Self::Draw(t) => t,
            Self::Rectangle(t) => t,
            Self::Erase(t) => t,
            Self::PushPull(t) => t,
        }
    }
}

/// Holds exactly one active tool and routes events to it
#[derive(Debug)]
pub struct ToolBox {
    active: ActiveTool,
}

impl Default for ToolBox {
    fn default() -> Self {
        Self {
            active: ActiveTool::new(ToolKind::default()),
        }
    }
}

impl ToolBox {
    pub fn kind(&self) -> ToolKind {
        self.active.as_tool().kind()
    }

    pub fn active(&self) -> &ActiveTool {
        &self.active
    }

    pub fn is_busy(&self) -> bool {
        self.active.as_tool().is_busy()
    }

    /// Switch tools. The outgoing tool is cleaned up first; same tool is a no-op.
    pub fn set_tool(&mut self, kind: ToolKind, ctx: &mut ToolContext<'_>) {
        if self.kind() == kind {
            return;
        }
        self.active.as_tool_mut().cleanup(ctx);
        self.active = ActiveTool::new(kind);
        tracing::info!("Tool switched to {}", kind);
    }

    /// Abort the current gesture without switching tools
    pub fn cancel(&mut self, ctx: &mut ToolContext<'_>) {
        self.active.as_tool_mut().cleanup(ctx);
    }

    pub fn pointer_down(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        self.active.as_tool_mut().on_down(ctx, event);
    }

    pub fn pointer_move(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        self.active.as_tool_mut().on_move(ctx, event);
    }

    pub fn pointer_up(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        self.active.as_tool_mut().on_up(ctx, event);
    }

    pub fn click(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        self.active.as_tool_mut().on_click(ctx, event);
    }
}
