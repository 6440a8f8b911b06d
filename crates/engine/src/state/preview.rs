//! Preview layer: transient guide geometry owned by the active tool.
//!
//! Never part of the registry. Hosts draw it on top of the scene.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::{GroundPoint, Rgb};

/// Named slot a tool writes into; setting a slot replaces its previous shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewSlot {
    /// Segment from the last path point to the cursor
    RubberBand,
    /// Directional snap guide
    DirectionGuide,
    /// From-point guide from the path start to the candidate
    FromPointGuide,
    RectangleOutline,
    RectangleDiagonal,
    /// Translucent push/pull solid
    Solid,
    /// Selection drag rectangle (screen space)
    Marquee,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PreviewShape {
    Segment {
        from: GroundPoint,
        to: GroundPoint,
        color: Rgb,
        dashed: bool,
    },
    /// Closed ground outline
    Outline { points: Vec<GroundPoint>, color: Rgb },
    Solid {
        contour: Vec<GroundPoint>,
        base: GroundPoint,
        height: f64,
        color: Rgb,
        opacity: f32,
    },
    /// Canvas-relative pixel rectangle
    Marquee { min: [f64; 2], max: [f64; 2] },
}

#[derive(Debug, Clone, Serialize)]
struct PreviewEntry<'a> {
    slot: PreviewSlot,
    #[serde(flatten)]
    shape: &'a PreviewShape,
}

#[derive(Debug, Default)]
pub struct PreviewLayer {
    items: BTreeMap<PreviewSlot, PreviewShape>,
    version: u64,
}

impl PreviewLayer {
    pub fn set(&mut self, slot: PreviewSlot, shape: PreviewShape) {
        self.items.insert(slot, shape);
        self.version += 1;
    }

    pub fn clear(&mut self, slot: PreviewSlot) {
        if self.items.remove(&slot).is_some() {
            self.version += 1;
        }
    }

    pub fn clear_all(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.version += 1;
        }
    }

    pub fn get(&self, slot: PreviewSlot) -> Option<&PreviewShape> {
        self.items.get(&slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PreviewSlot, &PreviewShape)> + '_ {
        self.items.iter().map(|(slot, shape)| (*slot, shape))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn to_json(&self) -> String {
        let entries: Vec<PreviewEntry<'_>> = self
            .items
            .iter()
            .map(|(slot, shape)| PreviewEntry { slot: *slot, shape })
            .collect();
        serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment() -> PreviewShape {
        PreviewShape::Segment {
            from: GroundPoint::ORIGIN,
            to: GroundPoint::new(1.0, 0.0),
            color: Rgb(0x03045e),
            dashed: false,
        }
    }

    #[test]
    fn test_set_replaces_slot() {
        let mut layer = PreviewLayer::default();
        layer.set(PreviewSlot::RubberBand, segment());
        layer.set(PreviewSlot::RubberBand, segment());
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.version(), 2);
    }

    #[test]
    fn test_clear_all() {
        let mut layer = PreviewLayer::default();
        layer.set(PreviewSlot::RubberBand, segment());
        layer.set(
            PreviewSlot::Marquee,
            PreviewShape::Marquee {
                min: [0.0, 0.0],
                max: [10.0, 10.0],
            },
        );
        layer.clear(PreviewSlot::RubberBand);
        assert!(layer.get(PreviewSlot::RubberBand).is_none());
        layer.clear_all();
        assert!(layer.is_empty());
    }

    #[test]
    fn test_json_export() {
        let mut layer = PreviewLayer::default();
        layer.set(PreviewSlot::RubberBand, segment());
        let value: serde_json::Value = serde_json::from_str(&layer.to_json()).unwrap();
        assert_eq!(value[0]["slot"], "rubber_band");
        assert_eq!(value[0]["shape"], "segment");
        assert_eq!(value[0]["dashed"], false);
    }
}
