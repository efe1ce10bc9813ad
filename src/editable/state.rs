//! EditBuffer - editable text with a caret and selection.

use super::constraints::EditConstraints;
use super::selection::Selection;

/// Editable text of an open cell editor.
///
/// Offsets are char offsets, never byte offsets.
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
    text: String,
    selection: Selection,
    /// Constraints for this editing context
    pub constraints: EditConstraints,
}

impl EditBuffer {
    /// Create a buffer with the caret at the end of `text`
    pub fn new(text: impl Into<String>, constraints: EditConstraints) -> Self {
        let text = text.into();
        let end = text.chars().count();
        Self {
            text,
            selection: Selection::collapsed(end),
            constraints,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of chars
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Caret position (selection head)
    pub fn caret(&self) -> usize {
        self.selection.head
    }

    /// Get the selected text (empty string if no selection)
    pub fn selected_text(&self) -> &str {
        let range = self.byte_range(self.selection);
        &self.text[range]
    }

    /// Replace the whole text; caret goes to the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.move_to_end();
    }

    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.len());
    }

    pub fn move_to_end(&mut self) {
        self.selection = Selection::collapsed(self.len());
    }

    pub fn move_to_start(&mut self) {
        self.selection = Selection::collapsed(0);
    }

    /// Collapse the selection at `pos`, clamped to the text
    pub fn set_caret(&mut self, pos: usize) {
        self.selection = Selection::collapsed(pos.min(self.len()));
    }

    /// Move caret left by one character
    pub fn move_left(&mut self, extend_selection: bool) {
        if !extend_selection && !self.selection.is_empty() {
            self.selection = Selection::collapsed(self.selection.start());
            return;
        }
        let head = self.selection.head.saturating_sub(1);
        self.place_head(head, extend_selection);
    }

    /// Move caret right by one character
    pub fn move_right(&mut self, extend_selection: bool) {
        if !extend_selection && !self.selection.is_empty() {
            self.selection = Selection::collapsed(self.selection.end());
            return;
        }
        let head = (self.selection.head + 1).min(self.len());
        self.place_head(head, extend_selection);
    }

    fn place_head(&mut self, head: usize, extend_selection: bool) {
        if extend_selection {
            self.selection.head = head;
        } else {
            self.selection = Selection::collapsed(head);
        }
    }

    /// Type a character; rejected characters leave the buffer untouched
    pub fn insert_char(&mut self, ch: char) -> bool {
        if !self.constraints.is_char_allowed(ch) {
            return false;
        }
        let mut buf = [0u8; 4];
        self.replace_selection(ch.encode_utf8(&mut buf));
        true
    }

    /// Replace the selection with `text` unfiltered; caret lands after it
    pub fn replace_selection(&mut self, text: &str) {
        let range = self.byte_range(self.selection);
        let start = self.selection.start();
        self.text.replace_range(range, text);
        self.selection = Selection::collapsed(start + text.chars().count());
    }

    /// Delete the selection, or the char before the caret
    pub fn delete_backward(&mut self) -> bool {
        if self.selection.is_empty() {
            if self.selection.head == 0 {
                return false;
            }
            self.selection.anchor = self.selection.head - 1;
        }
        self.replace_selection("");
        true
    }

    /// Delete the selection, or the char after the caret
    pub fn delete_forward(&mut self) -> bool {
        if self.selection.is_empty() {
            if self.selection.head >= self.len() {
                return false;
            }
            self.selection.head += 1;
        }
        self.replace_selection("");
        true
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn byte_range(&self, sel: Selection) -> std::ops::Range<usize> {
        self.byte_offset(sel.start())..self.byte_offset(sel.end())
    }
}
