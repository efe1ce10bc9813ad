//! Edit constraints for in-cell editors.
//!
//! Constraints define what input an editor buffer accepts.

/// Character filter function type
pub type CharFilter = fn(char) -> bool;

/// Constraints that limit what an editing buffer accepts.
#[derive(Debug, Clone)]
pub struct EditConstraints {
    /// Allow multiple lines (Shift+Enter inserts a newline)
    pub allow_multiline: bool,

    /// Character filter for typed input (None = all characters allowed)
    /// Returns true if character is allowed
    pub char_filter: Option<CharFilter>,
}

impl Default for EditConstraints {
    fn default() -> Self {
        Self::text_area()
    }
}

impl EditConstraints {
    /// Text area constraints (text and badge editors)
    pub fn text_area() -> Self {
        Self {
            allow_multiline: true,
            char_filter: None,
        }
    }

    /// Numeric input constraints (digits, `.` and `-`)
    pub fn numeric() -> Self {
        Self {
            allow_multiline: false,
            char_filter: Some(crate::transform::number::is_numeric_char),
        }
    }

    /// Check if a character passes the filter (if any)
    pub fn is_char_allowed(&self, ch: char) -> bool {
        if ch == '\n' && !self.allow_multiline {
            return false;
        }
        match self.char_filter {
            Some(filter) => filter(ch),
            None => true,
        }
    }
}
