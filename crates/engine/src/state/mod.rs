pub mod preview;
pub mod scene;
pub mod selection;
pub mod settings;

use shared::{GroundPoint, ObjectDescription, ToolKind};

use crate::tools::{ActiveTool, PointerEvent, ToolBox, ToolContext};
use crate::viewport::camera::ViewContext;
use preview::PreviewLayer;
use scene::{HistoryCommand, SceneRegistry};
use selection::Selection;
pub use settings::AppSettings;

/// Combined engine state: registry, selection, preview and the active tool
#[derive(Debug)]
pub struct AppState {
    pub registry: SceneRegistry,
    pub selection: Selection,
    pub preview: PreviewLayer,
    pub settings: AppSettings,
    /// Camera snapshot used to interpret pointer events
    pub view: ViewContext,
    tools: ToolBox,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

impl AppState {
    /// Split borrow: the tool box plus a handler context over everything else
    fn split(&mut self) -> (&mut ToolBox, ToolContext<'_>) {
        let AppState {
            registry,
            selection,
            preview,
            settings,
            view,
            tools,
        } = self;
        let ctx = ToolContext {
            registry,
            selection,
            preview,
            view,
            settings,
        };
        (tools, ctx)
    }

    pub fn new(settings: AppSettings) -> Self {
        Self {
            registry: SceneRegistry::new(settings.history.redo_policy),
            selection: Selection::default(),
            preview: PreviewLayer::default(),
            settings,
            view: ViewContext::default(),
            tools: ToolBox::default(),
        }
    }

    /// Replace settings; the redo policy applies to subsequent edits
    pub fn apply_settings(&mut self, settings: AppSettings) {
        self.registry.set_redo_policy(settings.history.redo_policy);
        self.settings = settings;
    }

    pub fn set_view(&mut self, view: ViewContext) {
        self.view = view;
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.kind()
    }

    pub fn active_tool(&self) -> &ActiveTool {
        self.tools.active()
    }

    /// A drag or path is in flight
    pub fn is_busy(&self) -> bool {
        self.tools.is_busy()
    }

    /// Switch the active tool, cleaning up the outgoing one first
    pub fn set_tool(&mut self, kind: ToolKind) {
        let (tools, mut ctx) = self.split();
        tools.set_tool(kind, &mut ctx);
    }

    /// Abort the active tool's gesture (Escape)
    pub fn cancel(&mut self) {
        let (tools, mut ctx) = self.split();
        tools.cancel(&mut ctx);
    }

    pub fn pointer_down(&mut self, event: PointerEvent) {
        let (tools, mut ctx) = self.split();
        tools.pointer_down(&mut ctx, event);
    }

    pub fn pointer_move(&mut self, event: PointerEvent) {
        let (tools, mut ctx) = self.split();
        tools.pointer_move(&mut ctx, event);
    }

    pub fn pointer_up(&mut self, event: PointerEvent) {
        let (tools, mut ctx) = self.split();
        tools.pointer_up(&mut ctx, event);
    }

    pub fn click(&mut self, event: PointerEvent) {
        let (tools, mut ctx) = self.split();
        tools.click(&mut ctx, event);
    }

    /// Apply an undo/redo command from the host. Returns whether anything changed.
    pub fn history(&mut self, command: HistoryCommand) -> bool {
        let changed = self.registry.apply(command);
        if changed {
            self.selection.prune(&mut self.registry);
        }
        changed
    }

    pub fn undo(&mut self) -> bool {
        self.history(HistoryCommand::Undo)
    }

    pub fn redo(&mut self) -> bool {
        self.history(HistoryCommand::Redo)
    }

    /// Points of the draw tool's open path (empty unless drawing)
    pub fn draw_path(&self) -> &[GroundPoint] {
        match self.tools.active() {
            ActiveTool::Draw(draw) => draw.path(),
            _ => &[],
        }
    }

    /// Read-only snapshot of the live scene for hosts
    pub fn describe_scene(&self) -> Vec<ObjectDescription> {
        self.registry.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool_is_select() {
        let state = AppState::default();
        assert_eq!(state.tool(), ToolKind::Select);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_set_tool() {
        let mut state = AppState::default();
        state.set_tool(ToolKind::Draw);
        assert_eq!(state.tool(), ToolKind::Draw);
        assert!(matches!(state.active_tool(), ActiveTool::Draw(_)));
    }

    #[test]
    fn test_undo_on_empty_scene() {
        let mut state = AppState::default();
        assert!(!state.undo());
        assert!(!state.redo());
    }

    #[test]
    fn test_apply_settings_updates_redo_policy() {
        let mut state = AppState::default();
        let mut settings = AppSettings::default();
        settings.history.redo_policy = settings::RedoPolicy::ClearOnEdit;
        state.apply_settings(settings);
        assert_eq!(state.registry.redo_policy(), settings::RedoPolicy::ClearOnEdit);
    }
}
