use shared::{GroundPoint, ToolKind};

use super::snap::{snap_square, SquareSnap};
use super::{PointerEvent, Tool, ToolContext};
use crate::state::preview::{PreviewShape, PreviewSlot};

/// Drag from corner to corner; release commits four edges and a face.
#[derive(Debug, Default)]
pub struct RectangleTool {
    start: Option<GroundPoint>,
}

fn corners(start: GroundPoint, snap: SquareSnap) -> [GroundPoint; 4] {
    [
        start,
        GroundPoint::new(start.x + snap.dx, start.z),
        GroundPoint::new(start.x + snap.dx, start.z + snap.dz),
        GroundPoint::new(start.x, start.z + snap.dz),
    ]
}

impl RectangleTool {
    fn clear_preview(ctx: &mut ToolContext<'_>) {
        ctx.preview.clear(PreviewSlot::RectangleOutline);
        ctx.preview.clear(PreviewSlot::RectangleDiagonal);
    }
}

impl Tool for RectangleTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Rectangle
    }

    fn on_down(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        if !event.is_primary() {
            return;
        }
        self.start = Some(ctx.ground_point(&event));
    }

    fn on_move(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        let Some(start) = self.start else {
            return;
        };
        let current = ctx.ground_point(&event);
        let (dx, dz) = (current.x - start.x, current.z - start.z);
        let min_size = ctx.settings.rectangle.min_size;

        if dx.abs() < min_size && dz.abs() < min_size {
            Self::clear_preview(ctx);
            return;
        }

        let snap = snap_square(dx, dz, &ctx.settings.snap, min_size);
        let [p0, p1, p2, p3] = corners(start, snap);
        let color = ctx.settings.palette.rectangle_preview;

        ctx.preview.set(
            PreviewSlot::RectangleOutline,
            PreviewShape::Outline {
                points: vec![p0, p1, p2, p3],
                color,
            },
        );
        if snap.square {
            ctx.preview.set(
                PreviewSlot::RectangleDiagonal,
                PreviewShape::Segment {
                    from: p0,
                    to: p2,
                    color,
                    dashed: true,
                },
            );
        } else {
            ctx.preview.clear(PreviewSlot::RectangleDiagonal);
        }
    }

    fn on_up(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        let Some(start) = self.start.take() else {
            return;
        };
        Self::clear_preview(ctx);

        let end = ctx.ground_point(&event);
        let (dx, dz) = (end.x - start.x, end.z - start.z);
        let min_size = ctx.settings.rectangle.min_size;

        if dx.abs() < min_size || dz.abs() < min_size {
            tracing::debug!("Rectangle discarded: {dx:.3} x {dz:.3} below minimum size");
            return;
        }

        let snap = snap_square(dx, dz, &ctx.settings.snap, min_size);
        let [p0, p1, p2, p3] = corners(start, snap);

        ctx.add_edge(p0, p1);
        ctx.add_edge(p1, p2);
        ctx.add_edge(p2, p3);
        ctx.add_edge(p3, p0);
        if let Some(id) = ctx.add_face(vec![p0, p1, p2, p3]) {
            tracing::info!(
                "Rectangle face {} ({:.3} x {:.3}{})",
                id,
                snap.dx.abs(),
                snap.dz.abs(),
                if snap.square { ", square" } else { "" }
            );
        }
    }

    fn cleanup(&mut self, ctx: &mut ToolContext<'_>) {
        self.start = None;
        Self::clear_preview(ctx);
    }

    fn is_busy(&self) -> bool {
        self.start.is_some()
    }
}
