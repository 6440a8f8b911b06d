use glam::DVec2;
use shared::{ObjectId, ToolKind};

use super::{PointerEvent, Tool, ToolContext};
use crate::state::preview::{PreviewShape, PreviewSlot};

/// Click to pick one object, drag a marquee to pick many.
#[derive(Debug, Default)]
pub struct SelectTool {
    /// Canvas-relative drag start while the primary button is held
    drag_start: Option<DVec2>,
}

impl SelectTool {
    fn select_single(ctx: &mut ToolContext<'_>, event: &PointerEvent) {
        let ray = ctx.ray(event);
        let hit = ctx
            .registry
            .pick_selectable(&ray, ctx.settings.picking.line_tolerance);

        ctx.selection.clear(ctx.registry);
        if let Some(hit) = hit {
            ctx.selection
                .highlight(ctx.registry, hit.owner, ctx.settings.palette.selection);
            tracing::debug!("Selected {}", hit.owner);
        }
    }

    fn select_rectangle(ctx: &mut ToolContext<'_>, a: DVec2, b: DVec2) {
        let (min, max) = (a.min(b), a.max(b));
        ctx.selection.clear(ctx.registry);

        let inside: Vec<ObjectId> = ctx
            .registry
            .selectable()
            .iter()
            .filter_map(|id| ctx.registry.get(*id))
            .filter(|object| {
                ctx.view
                    .project(object.kind.anchor())
                    .is_some_and(|p| p.cmpge(min).all() && p.cmple(max).all())
            })
            .map(|object| object.id)
            .collect();

        for id in &inside {
            ctx.selection
                .highlight(ctx.registry, *id, ctx.settings.palette.selection);
        }
        tracing::debug!("Marquee selected {} objects", inside.len());
    }
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn on_down(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        if !event.is_primary() {
            return;
        }
        self.drag_start = Some(ctx.view.viewport.to_local(event.position));
    }

    fn on_move(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        let Some(start) = self.drag_start else {
            return;
        };
        let current = ctx.view.viewport.to_local(event.position);
        let (min, max) = (start.min(current), start.max(current));
        ctx.preview.set(
            PreviewSlot::Marquee,
            PreviewShape::Marquee {
                min: min.to_array(),
                max: max.to_array(),
            },
        );
    }

    fn on_up(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        let Some(start) = self.drag_start.take() else {
            return;
        };
        ctx.preview.clear(PreviewSlot::Marquee);

        let end = ctx.view.viewport.to_local(event.position);
        if start.distance(end) < ctx.settings.select.click_threshold_px {
            Self::select_single(ctx, &event);
        } else {
            Self::select_rectangle(ctx, start, end);
        }
    }

    fn cleanup(&mut self, ctx: &mut ToolContext<'_>) {
        self.drag_start = None;
        ctx.preview.clear(PreviewSlot::Marquee);
        ctx.selection.clear(ctx.registry);
    }

    fn is_busy(&self) -> bool {
        self.drag_start.is_some()
    }
}
