//! Column descriptors and field types

use serde::{Deserialize, Serialize};

/// Declared type of a column, as it appears in a table schema
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[default]
    Text,
    LongText,
    Number,
    Float,
    Date,
    Boolean,
    Url,
    Badge,
    Progress,
    SingleSelect,
    MultiSelect,
}

impl FieldType {
    /// Which editor handles this field type
    pub fn editor_kind(self) -> EditorKind {
        match self {
            FieldType::Text
            | FieldType::LongText
            | FieldType::Url
            | FieldType::Date
            | FieldType::Progress => EditorKind::Text,
            FieldType::Number | FieldType::Float => EditorKind::Number,
            FieldType::Badge => EditorKind::Badge,
            FieldType::Boolean => EditorKind::Toggle,
            FieldType::SingleSelect => EditorKind::Select { multi: false },
            FieldType::MultiSelect => EditorKind::Select { multi: true },
        }
    }
}

/// The editor family a cell uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    /// Auto-growing text area
    Text,
    /// Single-line numeric input
    Number,
    /// Text area rendered as a badge when idle
    Badge,
    /// Checkbox toggled in place, no overlay
    Toggle,
    /// Dropdown below the cell
    Select { multi: bool },
    /// Never editable (the `id` column)
    Display,
}

impl EditorKind {
    /// Whether this kind mounts a floating overlay while editing
    pub fn uses_overlay(self) -> bool {
        !matches!(self, EditorKind::Toggle | EditorKind::Display)
    }

    /// Whether the edit buffer is a text area (Shift+Enter, auto-grow)
    pub fn is_text_area(self) -> bool {
        matches!(self, EditorKind::Text | EditorKind::Badge)
    }
}

/// Column name reserved for the record identifier
pub const ID_COLUMN: &str = "id";

/// Immutable description of a column for the lifetime of a session
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub display_name: String,
    pub field_type: FieldType,
    pub readonly: bool,
    pub table: String,
}

impl ColumnDescriptor {
    pub fn new(table: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            display_name: display_name_for(&name),
            name,
            field_type,
            readonly: false,
            table: table.into(),
        }
    }

    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn is_id(&self) -> bool {
        self.name == ID_COLUMN
    }

    pub fn editor_kind(&self) -> EditorKind {
        if self.is_id() {
            EditorKind::Display
        } else {
            self.field_type.editor_kind()
        }
    }

    /// Whether a user gesture may open an editor on this column
    pub fn is_editable(&self) -> bool {
        !self.readonly && self.editor_kind() != EditorKind::Display
    }
}

/// Header text derived from a column name: `unit_price` -> `Unit Price`
pub fn display_name_for(column: &str) -> String {
    let spaced = column.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if at_word_start && ch.is_alphanumeric() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !(ch.is_alphanumeric() || ch == '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_kind_mapping() {
        assert_eq!(FieldType::LongText.editor_kind(), EditorKind::Text);
        assert_eq!(FieldType::Url.editor_kind(), EditorKind::Text);
        assert_eq!(FieldType::Float.editor_kind(), EditorKind::Number);
        assert_eq!(FieldType::Boolean.editor_kind(), EditorKind::Toggle);
        assert_eq!(
            FieldType::MultiSelect.editor_kind(),
            EditorKind::Select { multi: true }
        );
    }

    #[test]
    fn test_id_column_is_display_only() {
        let col = ColumnDescriptor::new("t", "id", FieldType::Number);
        assert_eq!(col.editor_kind(), EditorKind::Display);
        assert!(!col.is_editable());
    }

    #[test]
    fn test_readonly_column_not_editable() {
        let col = ColumnDescriptor::new("t", "name", FieldType::Text).with_readonly(true);
        assert!(!col.is_editable());
    }

    #[test]
    fn test_display_name_for() {
        assert_eq!(display_name_for("unit_price"), "Unit Price");
        assert_eq!(display_name_for("name"), "Name");
        assert_eq!(display_name_for("already Spaced"), "Already Spaced");
        assert_eq!(display_name_for("sku_2b"), "Sku 2b");
    }

    #[test]
    fn test_field_type_deserializes_from_schema_names() {
        let ft: FieldType = serde_json::from_str("\"SingleSelect\"").unwrap();
        assert_eq!(ft, FieldType::SingleSelect);
    }
}
