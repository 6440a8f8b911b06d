use shared::{GroundPoint, ToolKind};

use super::snap::{snap_path_point, PathSnap};
use super::{PointerEvent, Tool, ToolContext};
use crate::state::preview::{PreviewShape, PreviewSlot};

/// Click-by-click polygon drawing. Closing the loop commits a face.
#[derive(Debug, Default)]
pub struct DrawTool {
    /// Committed path points; empty while idle
    path: Vec<GroundPoint>,
}

impl DrawTool {
    pub fn path(&self) -> &[GroundPoint] {
        &self.path
    }

    pub fn is_building(&self) -> bool {
        !self.path.is_empty()
    }

    fn clear_preview(ctx: &mut ToolContext<'_>) {
        ctx.preview.clear(PreviewSlot::RubberBand);
        ctx.preview.clear(PreviewSlot::DirectionGuide);
        ctx.preview.clear(PreviewSlot::FromPointGuide);
    }

    fn snap(&self, ctx: &ToolContext<'_>, event: &PointerEvent) -> PathSnap {
        let raw = ctx.ground_point(event);
        snap_path_point(&self.path, raw, &ctx.settings.snap)
    }

    fn close_loop(&mut self, ctx: &mut ToolContext<'_>) {
        let contour = std::mem::take(&mut self.path);
        let (first, last) = (contour[0], contour[contour.len() - 1]);
        ctx.add_edge(last, first);
        if let Some(id) = ctx.add_face(contour) {
            tracing::info!("Closed path into face {}", id);
        }
        Self::clear_preview(ctx);
    }
}

impl Tool for DrawTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Draw
    }

    fn on_click(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        if !event.is_primary() {
            return;
        }

        if self.path.is_empty() {
            self.path.push(ctx.ground_point(&event));
            Self::clear_preview(ctx);
            return;
        }

        let point = self.snap(ctx, &event).point;
        let first = self.path[0];
        let last = self.path[self.path.len() - 1];

        if self.path.len() >= 3 && point.distance_to(first) < ctx.settings.draw.close_tolerance {
            self.close_loop(ctx);
            return;
        }

        if last.distance_to(point) < ctx.settings.draw.min_segment {
            tracing::debug!("Draw click ignored: segment too short");
            return;
        }

        ctx.add_edge(last, point);
        self.path.push(point);
        Self::clear_preview(ctx);
    }

    fn on_move(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) {
        let Some(&last) = self.path.last() else {
            return;
        };
        let snap = self.snap(ctx, &event);
        let palette = ctx.settings.palette.clone();

        ctx.preview.set(
            PreviewSlot::RubberBand,
            PreviewShape::Segment {
                from: last,
                to: snap.point,
                color: palette.preview_edge,
                dashed: true,
            },
        );

        match snap.guide {
            Some((from, to)) => ctx.preview.set(
                PreviewSlot::DirectionGuide,
                PreviewShape::Segment {
                    from,
                    to,
                    color: palette.guide,
                    dashed: true,
                },
            ),
            None => ctx.preview.clear(PreviewSlot::DirectionGuide),
        }

        match snap.from_point_guide {
            Some((from, to)) => ctx.preview.set(
                PreviewSlot::FromPointGuide,
                PreviewShape::Segment {
                    from,
                    to,
                    color: palette.from_point,
                    dashed: true,
                },
            ),
            None => ctx.preview.clear(PreviewSlot::FromPointGuide),
        }
    }

    fn cleanup(&mut self, ctx: &mut ToolContext<'_>) {
        if !self.path.is_empty() {
            tracing::debug!("Draw path discarded ({} points)", self.path.len());
        }
        self.path.clear();
        Self::clear_preview(ctx);
    }

    fn is_busy(&self) -> bool {
        self.is_building()
    }
}
