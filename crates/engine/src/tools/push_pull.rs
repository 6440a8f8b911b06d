use shared::{GroundPoint, ObjectId, ObjectKind, ToolKind};

use super::{PointerEvent, Tool, ToolContext};
use crate::state::preview::{PreviewShape, PreviewSlot};
use crate::state::settings::PushPullSettings;

/// Face being extruded by the current drag
#[derive(Debug, Clone)]
struct ActiveFace {
    id: ObjectId,
    contour: Vec<GroundPoint>,
    base: GroundPoint,
    start_y: f64,
}

/// Drag a face vertically to extrude it into a prism.
#[derive(Debug, Default)]
pub struct PushPullTool {
    active: Option<ActiveFace>,
}

/// Signed height from the vertical drag, quantized to the step grid.
/// Dragging up (smaller y) gives positive heights.
pub fn drag_height(start_y: f64, y: f64, settings: &PushPullSettings) -> f64 {
    let raw = (start_y - y) * settings.units_per_pixel;
    if settings.height_step > 0.0 {
        (raw / settings.height_step).round() * settings.height_step
    } else {
        raw
    }
}

impl Tool for PushPullTool {
    fn kind(&self) -> ToolKind {
        ToolKind::PushPull
    }

    fn on_down(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        if !event.is_primary() {
            return;
        }
        let ray = ctx.ray(&event);
        let Some(hit) = ctx
            .registry
            .pick_selectable(&ray, ctx.settings.picking.line_tolerance)
        else {
            return;
        };
        let Some((contour, base)) = ctx.registry.get(hit.owner).and_then(|o| o.face()) else {
            tracing::debug!("Push/Pull: {} is not a face", hit.owner);
            return;
        };

        self.active = Some(ActiveFace {
            id: hit.owner,
            contour: contour.to_vec(),
            base,
            start_y: event.position.y,
        });
        ctx.preview.clear(PreviewSlot::Solid);
    }

    fn on_move(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        let Some(face) = &self.active else {
            return;
        };
        let settings = &ctx.settings.push_pull;
        let height = drag_height(face.start_y, event.position.y, settings);

        if height.abs() < settings.min_height {
            ctx.preview.clear(PreviewSlot::Solid);
            return;
        }

        let color = ctx
            .registry
            .get(face.id)
            .map(|o| o.color)
            .unwrap_or(ctx.settings.palette.face);
        ctx.preview.set(
            PreviewSlot::Solid,
            PreviewShape::Solid {
                contour: face.contour.clone(),
                base: face.base,
                height,
                color,
                opacity: settings.preview_opacity,
            },
        );
    }

    fn on_up(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        let Some(face) = self.active.take() else {
            return;
        };
        ctx.preview.clear(PreviewSlot::Solid);

        let height = drag_height(face.start_y, event.position.y, &ctx.settings.push_pull);
        if height.abs() < ctx.settings.push_pull.min_height {
            tracing::debug!("Push/Pull cancelled: height {height:.3} below minimum");
            return;
        }

        // The face may have been undone or erased mid-gesture
        let Some(current) = ctx
            .registry
            .get(face.id)
            .filter(|_| ctx.registry.is_selectable(face.id))
            .map(|o| o.color)
        else {
            return;
        };
        let color = ctx.selection.original_color(face.id).unwrap_or(current);

        let prism = ctx.registry.insert(
            ObjectKind::Prism {
                contour: face.contour,
                base: face.base,
                height,
            },
            color,
        );
        ctx.registry.remove(face.id);
        ctx.selection.prune(ctx.registry);
        tracing::info!("Extruded face {} into prism {} (height {:.2})", face.id, prism, height);
    }

    fn cleanup(&mut self, ctx: &mut ToolContext<'_>) {
        self.active = None;
        ctx.preview.clear(PreviewSlot::Solid);
    }

    fn is_busy(&self) -> bool {
        self.active.is_some()
    }
}
