use std::collections::{BTreeMap, BTreeSet};

use shared::{ObjectId, Rgb, ToolKind};

use super::{PointerEvent, Tool, ToolContext};

/// Lasso-style eraser: marks objects while dragging, deletes them all on release.
#[derive(Debug, Default)]
pub struct EraserTool {
    erasing: bool,
    pending: BTreeSet<ObjectId>,
    original_colors: BTreeMap<ObjectId, Rgb>,
}

impl EraserTool {
    pub fn pending(&self) -> &BTreeSet<ObjectId> {
        &self.pending
    }

    fn mark_at(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) {
        let ray = ctx.ray(event);
        let Some(hit) = ctx
            .registry
            .pick_placed(&ray, ctx.settings.picking.line_tolerance)
        else {
            return;
        };
        if self.pending.contains(&hit.owner) {
            return;
        }
        if let Some(previous) = ctx
            .registry
            .set_color(hit.owner, ctx.settings.palette.erase_warning)
        {
            self.original_colors.entry(hit.owner).or_insert(previous);
            self.pending.insert(hit.owner);
            tracing::debug!("Marked {} for erase", hit.owner);
        }
    }

    fn restore_colors(&mut self, ctx: &mut ToolContext<'_>) {
        for (id, color) in std::mem::take(&mut self.original_colors) {
            ctx.registry.set_color(id, color);
        }
        self.pending.clear();
    }

    fn flush(&mut self, ctx: &mut ToolContext<'_>) {
        let pending = std::mem::take(&mut self.pending);
        let mut colors = std::mem::take(&mut self.original_colors);
        let mut removed = 0;
        for id in pending {
            if ctx.registry.is_placed(id) {
                ctx.registry.remove(id);
                removed += 1;
            } else if let Some(color) = colors.remove(&id) {
                // Undone mid-gesture: stays on the redo stack in its own color
                ctx.registry.set_color(id, color);
            }
        }
        if removed > 0 {
            ctx.selection.prune(ctx.registry);
            tracing::info!("Erased {} objects", removed);
        }
    }
}

impl Tool for EraserTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Erase
    }

    fn on_down(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        if !event.is_primary() {
            return;
        }
        // Leftovers of an interrupted session get their colors back
        self.restore_colors(ctx);
        self.erasing = true;
    }

    fn on_move(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        if !self.erasing {
            return;
        }
        self.mark_at(ctx, &event);
    }

    fn on_up(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        if !self.erasing {
            return;
        }
        self.erasing = false;
        self.mark_at(ctx, &event);
        self.flush(ctx);
    }

    fn cleanup(&mut self, ctx: &mut ToolContext<'_>) {
        self.restore_colors(ctx);
        self.erasing = false;
    }

    fn is_busy(&self) -> bool {
        self.erasing
    }
}
