//! Value transforms per field type
//!
//! Pure, stateless sanitize/normalize/format functions. Every transform is
//! idempotent: applying it to its own output changes nothing.

pub mod boolean;
pub mod number;
pub mod select;
pub mod text;

use crate::model::{CellValue, EditorKind};

/// Initial editor text for a stored value
pub fn seed(kind: EditorKind, value: &CellValue) -> String {
    match kind {
        EditorKind::Number => number::seed(value),
        _ => text::seed(value),
    }
}

/// Value an editor of `kind` commits for the text `input`
pub fn commit(kind: EditorKind, input: &str, current: &CellValue) -> CellValue {
    match kind {
        EditorKind::Number => number::commit(input, current),
        EditorKind::Toggle => boolean::normalize(&CellValue::text(input.trim())),
        EditorKind::Select { multi: true } => select::multi_value(&CellValue::text(input)),
        EditorKind::Select { multi: false } => select::single_value(&CellValue::text(input.trim())),
        EditorKind::Text | EditorKind::Badge | EditorKind::Display => text::commit(input, current),
    }
}
