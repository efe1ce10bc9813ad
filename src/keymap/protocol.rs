//! Keyboard protocol shared by every cell editor
//!
//! Every editor interprets keys the same way:
//! - Enter (no Shift) while editing commits, then moves focus down a row
//! - Escape while editing cancels
//! - Tab / Shift+Tab while editing commit and move right / left
//! - Enter on a focused idle cell opens its editor, unless the cell just
//!   committed with Enter, in which case the keystroke is replayed as a
//!   move-down instead
//!
//! Keys never leave an editing cell: the host must not also run its own
//! navigation for them.

use crate::messages::Direction;
use crate::model::EditorKind;

use super::types::{KeyCode, Keystroke};

/// What a keystroke means to a cell that is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditingIntent {
    /// Accept the edit; optionally move focus afterwards
    Commit { then: Option<Direction> },
    /// Discard the edit
    Cancel,
    /// Hand the keystroke to the edit buffer
    Edit,
    /// Swallow the keystroke
    Ignore,
}

/// Interpret a keystroke for an open editor of `kind`
pub fn editing_intent(stroke: &Keystroke, kind: EditorKind) -> EditingIntent {
    let shift = stroke.mods.shift();
    match (stroke.key, kind) {
        (KeyCode::Escape, _) => EditingIntent::Cancel,
        // Dropdowns only react to Escape from the keyboard
        (_, EditorKind::Select { .. }) => EditingIntent::Ignore,
        (KeyCode::Enter, EditorKind::Badge) if !shift => EditingIntent::Commit { then: None },
        (KeyCode::Enter, _) if !shift => EditingIntent::Commit {
            then: Some(Direction::Down),
        },
        (KeyCode::Enter, k) if k.is_text_area() => EditingIntent::Edit,
        (KeyCode::Enter, _) => EditingIntent::Ignore,
        (KeyCode::Tab, _) => EditingIntent::Commit {
            then: Some(if shift {
                Direction::Left
            } else {
                Direction::Right
            }),
        },
        _ => EditingIntent::Edit,
    }
}

/// What a keystroke means to a focused cell that is not editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleIntent {
    /// Open the editor
    Open,
    /// Re-dispatch as a navigation signal instead of opening
    Replay(Direction),
    /// Not for this cell; let the host handle it
    Pass,
}

/// Interpret a keystroke for a focused idle cell
///
/// Consumes the cell's Enter guard when it is armed.
pub fn idle_intent(stroke: &Keystroke, guard: &mut EnterGuard) -> IdleIntent {
    match stroke.key {
        KeyCode::Enter if guard.take() => IdleIntent::Replay(Direction::Down),
        KeyCode::Enter => IdleIntent::Open,
        _ => IdleIntent::Pass,
    }
}

/// One-shot flag set when a cell commits with Enter
///
/// While armed, the next Enter reaching the idle cell is replayed as a
/// move-down instead of reopening the editor. Checking consumes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnterGuard {
    armed: bool,
}

impl EnterGuard {
    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Return whether the guard was armed, disarming it
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::Modifiers;

    fn shift(key: KeyCode) -> Keystroke {
        Keystroke::new(key, Modifiers::SHIFT)
    }

    #[test]
    fn test_enter_commits_and_moves_down() {
        assert_eq!(
            editing_intent(&Keystroke::key(KeyCode::Enter), EditorKind::Text),
            EditingIntent::Commit {
                then: Some(Direction::Down)
            }
        );
    }

    #[test]
    fn test_badge_enter_does_not_chain() {
        assert_eq!(
            editing_intent(&Keystroke::key(KeyCode::Enter), EditorKind::Badge),
            EditingIntent::Commit { then: None }
        );
    }

    #[test]
    fn test_shift_enter_inserts_in_text_area_only() {
        assert_eq!(
            editing_intent(&shift(KeyCode::Enter), EditorKind::Text),
            EditingIntent::Edit
        );
        assert_eq!(
            editing_intent(&shift(KeyCode::Enter), EditorKind::Number),
            EditingIntent::Ignore
        );
    }

    #[test]
    fn test_tab_directions() {
        assert_eq!(
            editing_intent(&Keystroke::key(KeyCode::Tab), EditorKind::Number),
            EditingIntent::Commit {
                then: Some(Direction::Right)
            }
        );
        assert_eq!(
            editing_intent(&shift(KeyCode::Tab), EditorKind::Text),
            EditingIntent::Commit {
                then: Some(Direction::Left)
            }
        );
    }

    #[test]
    fn test_select_only_escape() {
        let kind = EditorKind::Select { multi: true };
        assert_eq!(
            editing_intent(&Keystroke::key(KeyCode::Escape), kind),
            EditingIntent::Cancel
        );
        assert_eq!(
            editing_intent(&Keystroke::key(KeyCode::Enter), kind),
            EditingIntent::Ignore
        );
    }

    #[test]
    fn test_idle_enter_with_guard_replays_once() {
        let mut guard = EnterGuard::default();
        guard.arm();
        let enter = Keystroke::key(KeyCode::Enter);
        assert_eq!(idle_intent(&enter, &mut guard), IdleIntent::Replay(Direction::Down));
        assert!(!guard.is_armed());
        assert_eq!(idle_intent(&enter, &mut guard), IdleIntent::Open);
    }

    #[test]
    fn test_idle_other_keys_pass() {
        let mut guard = EnterGuard::default();
        guard.arm();
        assert_eq!(
            idle_intent(&Keystroke::key(KeyCode::Down), &mut guard),
            IdleIntent::Pass
        );
        assert!(guard.is_armed());
    }
}
