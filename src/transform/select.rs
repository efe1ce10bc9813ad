//! Select field transforms (SingleSelect, MultiSelect, Badge)

use crate::model::CellValue;

/// Label shown for an empty selection
pub const SELECT_PLACEHOLDER: &str = "Select…";

/// Shown in place of the option list when a column has no values yet
pub const NO_OPTIONS_HINT: &str = "No options (add values in this column to see them here)";

fn push_unique(out: &mut Vec<String>, item: &str) {
    if !item.is_empty() && !out.iter().any(|existing| existing == item) {
        out.push(item.to_string());
    }
}

/// Current selections of a stored value, in order and without repeats
///
/// Strings split on commas; every entry is trimmed and empties dropped.
pub fn parse_selection(value: &CellValue) -> Vec<String> {
    let mut out = Vec::new();
    match value {
        CellValue::Null => {}
        CellValue::List(items) => {
            for item in items {
                push_unique(&mut out, item.trim());
            }
        }
        CellValue::Text(s) => {
            for part in s.split(',') {
                push_unique(&mut out, part.trim());
            }
        }
        other => push_unique(&mut out, &other.to_plain_string()),
    }
    out
}

/// Canonical single-select value: one string or null
pub fn single_value(value: &CellValue) -> CellValue {
    match value {
        CellValue::Null => CellValue::Null,
        CellValue::Text(s) if s.is_empty() => CellValue::Null,
        CellValue::Text(s) => CellValue::text(s.clone()),
        CellValue::List(items) => items
            .first()
            .map(|s| CellValue::text(s.clone()))
            .unwrap_or(CellValue::Null),
        other => CellValue::text(other.to_plain_string()),
    }
}

/// Selections a select cell starts from
///
/// Only multi-select splits on commas; a single select keeps its text whole.
pub fn selections_of(value: &CellValue, multi: bool) -> Vec<String> {
    if multi {
        return parse_selection(value);
    }
    match single_value(value) {
        CellValue::Text(s) => vec![s],
        _ => Vec::new(),
    }
}

/// Canonical multi-select value: ordered unique strings
pub fn multi_value(value: &CellValue) -> CellValue {
    CellValue::List(parse_selection(value))
}

/// Value written for a set of selections
pub fn selection_value(selections: &[String], multi: bool) -> CellValue {
    if multi {
        CellValue::List(selections.to_vec())
    } else {
        selections
            .first()
            .map(|s| CellValue::text(s.clone()))
            .unwrap_or(CellValue::Null)
    }
}

/// Every option offered for a column
///
/// The union of every non-null value across `column_values` in first-seen
/// order, followed by the cell's own `selected` values that appear nowhere
/// else. Lists contribute each entry; multi-select columns also split
/// comma-separated strings.
pub fn options_universe(column_values: &[CellValue], selected: &[String], multi: bool) -> Vec<String> {
    let mut out = Vec::new();
    for value in column_values {
        match value {
            CellValue::Null => {}
            CellValue::List(items) => {
                for item in items {
                    push_unique(&mut out, item);
                }
            }
            CellValue::Text(s) if multi => {
                for part in s.split(',') {
                    push_unique(&mut out, part.trim());
                }
            }
            other => push_unique(&mut out, &other.to_plain_string()),
        }
    }
    for item in selected {
        push_unique(&mut out, item);
    }
    out
}

/// Idle label for a selection
pub fn label(selections: &[String], multi: bool) -> String {
    match selections.first() {
        None => String::new(),
        Some(first) if !multi => first.clone(),
        Some(_) => selections.join(", "),
    }
}
