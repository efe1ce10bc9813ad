//! Cell addressing
//!
//! A cell is addressed by (table, column, row index). The row index is a
//! display-order position, not a stable identity: reordering rows while a
//! session is open can move the address onto a different record.

use std::fmt;

use serde::Serialize;

/// Position of a cell in the grid (row index, column index)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Fully qualified address of a cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub table: String,
    pub column: String,
    pub row: usize,
}

impl CellAddress {
    pub fn new(table: impl Into<String>, column: impl Into<String>, row: usize) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            row,
        }
    }

    /// The globally unique edit key for this address
    pub fn edit_key(&self) -> EditKey {
        EditKey(format!("{}:{}:{}", self.table, self.column, self.row))
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.table, self.column, self.row)
    }
}

/// String key `"table:column:row"` identifying a cell's edit session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EditKey(String);

impl EditKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Row index from the trailing segment
    ///
    /// Table and column names may themselves contain ':', so the key is
    /// never split into more than the row.
    pub fn row(&self) -> Option<usize> {
        self.0.rsplit(':').next()?.parse().ok()
    }
}

impl fmt::Display for EditKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&CellAddress> for EditKey {
    fn from(address: &CellAddress) -> Self {
        address.edit_key()
    }
}

/// Everything the grid engine knows about a cell when it renders it
///
/// Carried verbatim in change notifications so consumers can locate the
/// edited cell without a reference to its controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellContext {
    pub table_name: String,
    pub column_name: String,
    /// Alias of `column_name` kept for consumers that read `prop`
    pub prop: String,
    pub row_index: usize,
    pub col_index: usize,
    pub readonly: bool,
}

impl CellContext {
    pub fn new(address: &CellAddress, col_index: usize, readonly: bool) -> Self {
        Self {
            table_name: address.table.clone(),
            column_name: address.column.clone(),
            prop: address.column.clone(),
            row_index: address.row,
            col_index,
            readonly,
        }
    }

    pub fn address(&self) -> CellAddress {
        CellAddress::new(&self.table_name, &self.column_name, self.row_index)
    }

    pub fn position(&self) -> CellPosition {
        CellPosition::new(self.row_index, self.col_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_key_format() {
        let address = CellAddress::new("products", "price", 7);
        assert_eq!(address.edit_key().as_str(), "products:price:7");
    }

    #[test]
    fn test_edit_key_row() {
        let address = CellAddress::new("schema:products", "a:b", 12);
        assert_eq!(address.edit_key().row(), Some(12));
        assert!(EditKey("t:c:x".to_string()).row().is_none());
    }

    #[test]
    fn test_context_serializes_camel_case() {
        let ctx = CellContext::new(&CellAddress::new("t", "name", 3), 1, false);
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["tableName"], "t");
        assert_eq!(json["columnName"], "name");
        assert_eq!(json["prop"], "name");
        assert_eq!(json["rowIndex"], 3);
    }
}
