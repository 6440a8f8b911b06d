//! Undo/redo functionality

use serde::{Deserialize, Serialize};

use super::SceneRegistry;

/// Explicit history command passed in by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryCommand {
    Undo,
    Redo,
}

impl SceneRegistry {
    /// Apply a history command. Returns whether anything changed.
    pub fn apply(&mut self, command: HistoryCommand) -> bool {
        match command {
            HistoryCommand::Undo => self.undo(),
            HistoryCommand::Redo => self.redo(),
        }
    }

    /// Undo last placement: tail of `placed` moves to `redo`
    pub fn undo(&mut self) -> bool {
        let Some(id) = self.placed.pop() else {
            return false;
        };
        self.selectable.remove(&id);
        self.redo.push(id);
        self.version += 1;
        tracing::info!("Undo {}", id);
        true
    }

    /// Redo last undone placement
    pub fn redo(&mut self) -> bool {
        let Some(id) = self.redo.pop() else {
            return false;
        };
        self.placed.push(id);
        self.selectable.insert(id);
        self.version += 1;
        tracing::info!("Redo {}", id);
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.placed.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::settings::RedoPolicy;
    use shared::{GroundPoint, ObjectKind, Rgb};

    fn edge() -> ObjectKind {
        ObjectKind::Edge {
            start: GroundPoint::new(0.0, 0.0),
            end: GroundPoint::new(1.0, 0.0),
        }
    }

    #[test]
    fn test_undo_redo_inverse() {
        let mut reg = SceneRegistry::default();
        let a = reg.insert(edge(), Rgb::WHITE);
        let b = reg.insert(edge(), Rgb::WHITE);

        assert!(reg.apply(HistoryCommand::Undo));
        assert_eq!(reg.placed(), &[a]);
        assert_eq!(reg.redo_stack(), &[b]);
        assert!(!reg.is_selectable(b));

        assert!(reg.apply(HistoryCommand::Redo));
        assert_eq!(reg.placed(), &[a, b]);
        assert!(reg.redo_stack().is_empty());
        assert!(reg.is_selectable(b));
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut reg = SceneRegistry::default();
        assert!(!reg.can_undo());
        assert!(!reg.can_redo());
        assert!(!reg.undo());
        assert!(!reg.redo());
        assert_eq!(reg.version(), 0);
    }

    #[test]
    fn test_retain_policy_keeps_redo_after_edit() {
        let mut reg = SceneRegistry::new(RedoPolicy::Retain);
        let a = reg.insert(edge(), Rgb::WHITE);
        reg.undo();
        reg.insert(edge(), Rgb::WHITE);
        assert_eq!(reg.redo_stack(), &[a]);
        assert!(reg.redo());
        assert_eq!(reg.placed().last(), Some(&a));
    }

    #[test]
    fn test_clear_on_edit_policy_drops_redo() {
        let mut reg = SceneRegistry::new(RedoPolicy::ClearOnEdit);
        let a = reg.insert(edge(), Rgb::WHITE);
        reg.undo();
        reg.insert(edge(), Rgb::WHITE);
        assert!(reg.redo_stack().is_empty());
        assert!(!reg.redo());
        assert!(reg.get(a).is_none());
    }

    #[test]
    fn test_command_serde() {
        let cmd: HistoryCommand = serde_json::from_str("\"undo\"").unwrap();
        assert_eq!(cmd, HistoryCommand::Undo);
    }
}
