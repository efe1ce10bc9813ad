//! Overlay text editors (text, number, badge)

use crate::editable::{EditBuffer, EditConstraints};
use crate::keymap::{KeyCode, Keystroke};
use crate::model::EditorKind;
use crate::overlay::{OverlayPositioner, WidthMode};
use crate::surface::Surface;
use crate::transform::number;

/// An open text-like editor: its buffer plus its overlay
#[derive(Debug, Clone)]
pub struct FieldEditor {
    kind: EditorKind,
    buffer: EditBuffer,
    positioner: OverlayPositioner,
    focused: bool,
}

impl FieldEditor {
    pub fn new(kind: EditorKind, seed: String, positioner: OverlayPositioner) -> Self {
        let constraints = match kind {
            EditorKind::Number => EditConstraints::numeric(),
            _ => EditConstraints::text_area(),
        };
        Self {
            kind,
            buffer: EditBuffer::new(seed, constraints),
            positioner,
            focused: false,
        }
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn positioner(&self) -> &OverlayPositioner {
        &self.positioner
    }

    pub fn positioner_mut(&mut self) -> &mut OverlayPositioner {
        &mut self.positioner
    }

    /// Whether the post-mount pass gave the editor focus
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Post-mount pass: width, pending paste, focus, caret
    ///
    /// Numeric editors select everything for fast overwrite; the others
    /// put the caret at the end.
    pub fn mount(&mut self, measured_width: f32, pending_paste: Option<String>) {
        self.positioner.resolve_width(measured_width);
        if let Some(text) = pending_paste {
            let text = match self.kind {
                EditorKind::Number => number::sanitize(&text),
                _ => text,
            };
            self.buffer.set_text(text);
        }
        self.focused = true;
        match self.kind {
            EditorKind::Number => self.buffer.select_all(),
            _ => self.buffer.move_to_end(),
        }
    }

    /// Apply an editing keystroke; returns whether the text changed
    pub fn apply_key(&mut self, stroke: &Keystroke) -> bool {
        let extend = stroke.mods.shift();
        match stroke.key {
            // Only Shift+Enter in a text area gets here
            KeyCode::Enter => self.buffer.insert_char('\n'),
            KeyCode::Backspace => self.buffer.delete_backward(),
            KeyCode::Delete => self.buffer.delete_forward(),
            KeyCode::Left => {
                self.buffer.move_left(extend);
                false
            }
            KeyCode::Right => {
                self.buffer.move_right(extend);
                false
            }
            KeyCode::Home => {
                self.buffer.move_to_start();
                false
            }
            KeyCode::End => {
                self.buffer.move_to_end();
                false
            }
            KeyCode::Char('a' | 'A') if stroke.mods.has_shortcut() => {
                self.buffer.select_all();
                false
            }
            KeyCode::Char(_) => match stroke.typed_char() {
                Some(ch) => self.buffer.insert_char(ch),
                None => false,
            },
            _ => false,
        }
    }

    /// Type `text` at the caret, one character at a time
    pub fn insert_text(&mut self, text: &str) -> bool {
        let mut changed = false;
        for ch in text.chars() {
            changed |= self.buffer.insert_char(ch);
        }
        changed
    }

    /// Paste over the selection
    ///
    /// Numeric editors sanitize the whole composed value rather than the
    /// pasted fragment, keeping the caret before the untouched tail.
    pub fn paste(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        if self.kind != EditorKind::Number {
            self.buffer.replace_selection(text);
            return true;
        }
        let tail = self.buffer.len() - self.buffer.selection().end();
        let mut composed = self.buffer.clone();
        composed.replace_selection(text);
        let sanitized = number::sanitize(composed.text());
        let caret = sanitized.chars().count().saturating_sub(tail);
        self.buffer.set_text(sanitized);
        self.buffer.set_caret(caret);
        true
    }

    /// Re-measure content height for text areas; returns the new height
    pub fn autogrow(&mut self, surface: &dyn Surface) -> Option<f32> {
        if !self.kind.is_text_area() {
            return None;
        }
        let frame = self.positioner.frame();
        let width = match self.positioner.width_mode() {
            Some(WidthMode::Pinned(w)) => w,
            _ => frame.width.unwrap_or(frame.min_width),
        };
        let scroll_height = surface.content_height(self.buffer.text(), width);
        Some(self.positioner.autogrow(scroll_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::keymap::Modifiers;
    use crate::overlay::{OverlayMetrics, Placement};

    fn editor(kind: EditorKind, seed: &str) -> FieldEditor {
        let placement = Placement::for_kind(kind).unwrap();
        let positioner = OverlayPositioner::new(
            placement,
            Rect::new(0.0, 0.0, 200.0, 36.0),
            OverlayMetrics::default(),
        );
        FieldEditor::new(kind, seed.to_string(), positioner)
    }

    #[test]
    fn test_number_mount_selects_all() {
        let mut ed = editor(EditorKind::Number, "12");
        ed.mount(204.0, None);
        assert!(ed.is_focused());
        assert_eq!(ed.buffer().selected_text(), "12");
        ed.apply_key(&Keystroke::char('7'));
        assert_eq!(ed.text(), "7");
    }

    #[test]
    fn test_text_mount_caret_at_end() {
        let mut ed = editor(EditorKind::Text, "foo");
        ed.mount(0.0, None);
        assert_eq!(ed.positioner().width_mode(), Some(WidthMode::Pinned(200.0)));
        ed.apply_key(&Keystroke::char('d'));
        assert_eq!(ed.text(), "food");
    }

    #[test]
    fn test_mount_injects_pending_paste() {
        let mut ed = editor(EditorKind::Number, "5");
        ed.mount(1.0, Some("1,234.5.6".to_string()));
        assert_eq!(ed.text(), "1234.56");

        let mut ed = editor(EditorKind::Text, "old");
        ed.mount(1.0, Some("pasted".to_string()));
        assert_eq!(ed.text(), "pasted");
    }

    #[test]
    fn test_number_rejects_letters_but_not_shortcuts() {
        let mut ed = editor(EditorKind::Number, "");
        ed.mount(1.0, None);
        assert!(!ed.apply_key(&Keystroke::char('x')));
        let select_all = Keystroke::new(KeyCode::Char('a'), Modifiers::CTRL);
        assert!(!ed.apply_key(&select_all));
        assert!(ed.insert_text("-1a2"));
        assert_eq!(ed.text(), "-12");
    }

    #[test]
    fn test_number_paste_sanitizes_whole_value() {
        let mut ed = editor(EditorKind::Number, "1.5");
        ed.mount(1.0, None);
        ed.apply_key(&Keystroke::key(KeyCode::End));
        assert!(ed.paste(".25"));
        assert_eq!(ed.text(), "1.525");
        assert_eq!(ed.buffer().caret(), 5);
        assert!(!ed.paste(""));
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut ed = editor(EditorKind::Text, "a");
        ed.mount(1.0, None);
        assert!(ed.apply_key(&Keystroke::new(KeyCode::Enter, Modifiers::SHIFT)));
        assert_eq!(ed.text(), "a\n");
    }
}
