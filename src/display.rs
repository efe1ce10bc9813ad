//! Read-only cell rendering
//!
//! What an idle cell shows, per editor kind. Drawing is the host's job;
//! this only decides the content.

use serde::Serialize;

use crate::model::{CellValue, EditorKind};
use crate::transform::{boolean, number, select};

/// Placeholder for empty number and badge cells
pub const EDIT_PLACEHOLDER: &str = "Click to edit…";

/// Colors of one badge palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeColor {
    pub name: &'static str,
    pub border: &'static str,
    pub background: &'static str,
    pub text: &'static str,
}

const fn badge(
    name: &'static str,
    border: &'static str,
    background: &'static str,
    text: &'static str,
) -> BadgeColor {
    BadgeColor {
        name,
        border,
        background,
        text,
    }
}

pub const BADGE_PALETTE: [BadgeColor; 13] = [
    badge("pink", "#f9a8d4", "#fce7f3", "#be185d"),
    badge("yellow", "#fde047", "#fef9c3", "#854d0e"),
    badge("purple", "#c084fc", "#f3e8ff", "#7e22ce"),
    badge("orange", "#fb923c", "#ffedd5", "#c2410c"),
    badge("teal", "#2dd4bf", "#ccfbf1", "#115e59"),
    badge("blue", "#38bdf8", "#e0f2fe", "#0369a1"),
    badge("lime", "#a3e635", "#ecfccb", "#3f6212"),
    badge("ruby", "#fb7185", "#ffe4e6", "#be123c"),
    badge("indigo", "#818cf8", "#e0e7ff", "#3730a3"),
    badge("cyan", "#22d3ee", "#cffafe", "#155e75"),
    badge("green", "#6ee7b7", "#D1FAE5", "#065f46"),
    badge("red", "#fca5a5", "#fee2e2", "#991b1b"),
    badge("gray", "#94a3b8", "#f1f5f9", "#334155"),
];

/// Badge color for a row; cycles through the palette by row index
pub fn badge_color(row_index: usize) -> &'static BadgeColor {
    &BADGE_PALETTE[row_index % BADGE_PALETTE.len()]
}

/// Content of an idle cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CellDisplay {
    Empty,
    Text { text: String },
    Placeholder { text: &'static str },
    Badge { text: String, color: BadgeColor },
    Checkbox { checked: bool },
}

impl CellDisplay {
    /// Plain text form (checkboxes render as `[x]` / `[ ]`)
    pub fn plain(&self) -> String {
        match self {
            CellDisplay::Empty => String::new(),
            CellDisplay::Text { text } | CellDisplay::Badge { text, .. } => text.clone(),
            CellDisplay::Placeholder { text } => (*text).to_string(),
            CellDisplay::Checkbox { checked: true } => "[x]".to_string(),
            CellDisplay::Checkbox { checked: false } => "[ ]".to_string(),
        }
    }
}

fn text_or(text: String, placeholder: Option<&'static str>) -> CellDisplay {
    match (text.is_empty(), placeholder) {
        (false, _) => CellDisplay::Text { text },
        (true, Some(text)) => CellDisplay::Placeholder { text },
        (true, None) => CellDisplay::Empty,
    }
}

/// What a cell of `kind` shows for `value`
pub fn render(kind: EditorKind, value: &CellValue, row_index: usize) -> CellDisplay {
    match kind {
        EditorKind::Text | EditorKind::Display => text_or(value.to_plain_string(), None),
        EditorKind::Number => text_or(number::display(value), Some(EDIT_PLACEHOLDER)),
        EditorKind::Badge => {
            let text = value.to_plain_string();
            if text.is_empty() {
                CellDisplay::Placeholder {
                    text: EDIT_PLACEHOLDER,
                }
            } else {
                CellDisplay::Badge {
                    text,
                    color: *badge_color(row_index),
                }
            }
        }
        EditorKind::Toggle => CellDisplay::Checkbox {
            checked: boolean::truthy(value),
        },
        EditorKind::Select { multi } => {
            let selections = select::selections_of(value, multi);
            text_or(
                select::label(&selections, multi),
                Some(select::SELECT_PLACEHOLDER),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_color_cycles() {
        assert_eq!(badge_color(0).name, "pink");
        assert_eq!(badge_color(12).name, "gray");
        assert_eq!(badge_color(13).name, "pink");
    }

    #[test]
    fn test_number_placeholder() {
        assert_eq!(
            render(EditorKind::Number, &CellValue::Null, 0),
            CellDisplay::Placeholder {
                text: EDIT_PLACEHOLDER
            }
        );
        assert_eq!(
            render(EditorKind::Number, &CellValue::Number(3.0), 0).plain(),
            "3"
        );
    }

    #[test]
    fn test_select_labels() {
        let tags = CellValue::list(["New", "Featured"]);
        assert_eq!(
            render(EditorKind::Select { multi: true }, &tags, 0).plain(),
            "New, Featured"
        );
        assert_eq!(
            render(EditorKind::Select { multi: false }, &tags, 0).plain(),
            "New"
        );
        assert_eq!(
            render(EditorKind::Select { multi: false }, &CellValue::Null, 0).plain(),
            "Select…"
        );
    }

    #[test]
    fn test_text_empty_has_no_placeholder() {
        assert_eq!(render(EditorKind::Text, &CellValue::Null, 0), CellDisplay::Empty);
    }

    #[test]
    fn test_badge_uses_row_color() {
        match render(EditorKind::Badge, &CellValue::text("hot"), 5) {
            CellDisplay::Badge { color, .. } => assert_eq!(color.name, "blue"),
            other => panic!("expected badge, got {:?}", other),
        }
    }

    #[test]
    fn test_checkbox() {
        assert_eq!(
            render(EditorKind::Toggle, &CellValue::Null, 0).plain(),
            "[ ]"
        );
    }
}
