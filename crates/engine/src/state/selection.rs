use std::collections::HashMap;

use shared::{ObjectId, Rgb};

use super::scene::SceneRegistry;

/// Object selection state (supports multi-select)
#[derive(Debug, Default)]
pub struct Selection {
    /// Selected object IDs (in order of selection)
    selected: Vec<ObjectId>,
    /// Pre-highlight colors, recorded the first time an object is highlighted
    original_colors: HashMap<ObjectId, Rgb>,
}

impl Selection {
    /// Primary (first) selected object
    pub fn primary(&self) -> Option<ObjectId> {
        self.selected.first().copied()
    }

    /// All selected objects
    pub fn all(&self) -> &[ObjectId] {
        &self.selected
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selected.contains(&id)
    }

    /// Number of selected objects
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Color the object had before it was first highlighted
    pub fn original_color(&self, id: ObjectId) -> Option<Rgb> {
        self.original_colors.get(&id).copied()
    }

    /// Add an object to the selection and recolor it.
    pub fn highlight(&mut self, registry: &mut SceneRegistry, id: ObjectId, color: Rgb) {
        if !registry.is_selectable(id) {
            return;
        }
        if let Some(previous) = registry.set_color(id, color) {
            self.original_colors.entry(id).or_insert(previous);
        }
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    /// Restore every member's color and empty the selection.
    pub fn clear(&mut self, registry: &mut SceneRegistry) {
        for (id, color) in self.original_colors.drain() {
            // Objects removed since selection are skipped
            registry.set_color(id, color);
        }
        self.selected.clear();
    }

    /// Drop members that are no longer selectable (undone or removed)
    /// and give undone ones their pre-highlight color back.
    pub fn prune(&mut self, registry: &mut SceneRegistry) {
        let (kept, dropped): (Vec<_>, Vec<_>) = self
            .selected
            .drain(..)
            .partition(|id| registry.is_selectable(*id));
        self.selected = kept;
        for id in dropped {
            if let Some(color) = self.original_colors.remove(&id) {
                registry.set_color(id, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{GroundPoint, ObjectKind};

    const BLUE: Rgb = Rgb(0x0077ff);

    fn registry_with_edges(n: usize) -> (SceneRegistry, Vec<ObjectId>) {
        let mut reg = SceneRegistry::default();
        let ids = (0..n)
            .map(|i| {
                reg.insert(
                    ObjectKind::Edge {
                        start: GroundPoint::new(i as f64, 0.0),
                        end: GroundPoint::new(i as f64 + 1.0, 0.0),
                    },
                    Rgb(0x03045e),
                )
            })
            .collect();
        (reg, ids)
    }

    #[test]
    fn test_initial_empty() {
        let s = Selection::default();
        assert!(s.primary().is_none());
        assert!(s.all().is_empty());
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn test_highlight_and_clear_restores_colors() {
        let (mut reg, ids) = registry_with_edges(2);
        let mut s = Selection::default();
        s.highlight(&mut reg, ids[0], BLUE);
        s.highlight(&mut reg, ids[1], BLUE);
        assert_eq!(s.count(), 2);
        assert_eq!(s.primary(), Some(ids[0]));
        assert_eq!(reg.get(ids[0]).unwrap().color, BLUE);

        s.clear(&mut reg);
        assert!(s.is_empty());
        assert_eq!(reg.get(ids[0]).unwrap().color, Rgb(0x03045e));
        assert_eq!(reg.get(ids[1]).unwrap().color, Rgb(0x03045e));
    }

    #[test]
    fn test_original_color_recorded_once() {
        let (mut reg, ids) = registry_with_edges(1);
        let mut s = Selection::default();
        s.highlight(&mut reg, ids[0], BLUE);
        s.highlight(&mut reg, ids[0], Rgb(0xff0000));
        assert_eq!(s.count(), 1);
        s.clear(&mut reg);
        assert_eq!(reg.get(ids[0]).unwrap().color, Rgb(0x03045e));
    }

    #[test]
    fn test_clear_skips_removed_objects() {
        let (mut reg, ids) = registry_with_edges(2);
        let mut s = Selection::default();
        s.highlight(&mut reg, ids[0], BLUE);
        s.highlight(&mut reg, ids[1], BLUE);
        reg.remove(ids[0]);
        s.clear(&mut reg);
        assert_eq!(reg.get(ids[1]).unwrap().color, Rgb(0x03045e));
    }

    #[test]
    fn test_prune_restores_undone_color() {
        let (mut reg, ids) = registry_with_edges(2);
        let mut s = Selection::default();
        s.highlight(&mut reg, ids[0], BLUE);
        s.highlight(&mut reg, ids[1], BLUE);

        reg.undo();
        s.prune(&mut reg);
        assert_eq!(s.all(), &[ids[0]]);
        assert!(s.original_color(ids[1]).is_none());

        reg.redo();
        assert_eq!(reg.get(ids[1]).unwrap().color, Rgb(0x03045e));
        assert_eq!(reg.get(ids[0]).unwrap().color, BLUE);
    }

    #[test]
    fn test_non_selectable_is_ignored() {
        let (mut reg, ids) = registry_with_edges(1);
        reg.undo();
        let mut s = Selection::default();
        s.highlight(&mut reg, ids[0], BLUE);
        assert!(s.is_empty());
    }
}
