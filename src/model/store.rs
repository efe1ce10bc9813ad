//! Shared row store
//!
//! An ordered, index-addressable sequence of rows owned by the host and
//! mutated in place. Every controller holds a cheap clone of the same
//! handle, so a write is visible to the very next read anywhere.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use super::value::{CellValue, Row};

/// Error raised by a row store access
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Row index past the end of the store
    MissingRow { index: usize, len: usize },
    /// The store is currently borrowed by someone else
    Busy,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::MissingRow { index, len } => {
                write!(f, "row {} out of range (store has {} rows)", index, len)
            }
            StoreError::Busy => write!(f, "row store is busy"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Handle to the host's rows
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    rows: Rc<RefCell<Vec<Row>>>,
}

impl RowStore {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: Rc::new(RefCell::new(rows)),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read access to every row
    ///
    /// Writes fail with [`StoreError::Busy`] while the guard is alive.
    pub fn rows(&self) -> Ref<'_, Vec<Row>> {
        self.rows.borrow()
    }

    /// Clone of all rows
    pub fn snapshot(&self) -> Vec<Row> {
        self.rows.borrow().clone()
    }

    /// Value at `rows[index][column]`; `None` when the row is missing
    ///
    /// A present row without the column reads as [`CellValue::Null`].
    pub fn get(&self, index: usize, column: &str) -> Option<CellValue> {
        let rows = self.rows.try_borrow().ok()?;
        let row = rows.get(index)?;
        Some(row.get(column).cloned().unwrap_or_default())
    }

    /// Write `rows[index][column] = value` in place
    pub fn set(&self, index: usize, column: &str, value: CellValue) -> Result<(), StoreError> {
        let mut rows = self.rows.try_borrow_mut().map_err(|_| StoreError::Busy)?;
        let len = rows.len();
        let row = rows
            .get_mut(index)
            .ok_or(StoreError::MissingRow { index, len })?;
        row.insert(column.to_string(), value);
        Ok(())
    }

    /// Every value stored under `column`, in row order, nulls included
    pub fn column_values(&self, column: &str) -> Vec<CellValue> {
        self.rows
            .borrow()
            .iter()
            .map(|row| row.get(column).cloned().unwrap_or_default())
            .collect()
    }

    /// Arbitrary structural mutation (append, reorder, filter)
    pub fn update<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Vec<Row>),
    {
        let mut rows = self.rows.try_borrow_mut().map_err(|_| StoreError::Busy)?;
        f(&mut rows);
        Ok(())
    }

    /// Whether two handles share the same underlying rows
    pub fn ptr_eq(&self, other: &RowStore) -> bool {
        Rc::ptr_eq(&self.rows, &other.rows)
    }
}

impl From<Vec<Row>> for RowStore {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::value::row;

    fn store() -> RowStore {
        RowStore::new(vec![row([("v", "a")]), row([("v", "b")])])
    }

    #[test]
    fn test_get_missing_column_reads_null() {
        let s = store();
        assert_eq!(s.get(0, "other"), Some(CellValue::Null));
        assert_eq!(s.get(5, "v"), None);
    }

    #[test]
    fn test_set_is_visible_through_clones() {
        let s = store();
        let other = s.clone();
        s.set(1, "v", CellValue::text("B")).unwrap();
        assert_eq!(other.get(1, "v"), Some(CellValue::text("B")));
        assert!(s.ptr_eq(&other));
    }

    #[test]
    fn test_set_missing_row() {
        let s = store();
        assert_eq!(
            s.set(9, "v", CellValue::Null),
            Err(StoreError::MissingRow { index: 9, len: 2 })
        );
    }

    #[test]
    fn test_set_while_borrowed_is_busy() {
        let s = store();
        let _guard = s.rows();
        assert_eq!(s.set(0, "v", CellValue::Null), Err(StoreError::Busy));
    }

    #[test]
    fn test_update_reorders_rows() {
        let s = store();
        s.update(|rows| rows.reverse()).unwrap();
        assert_eq!(s.get(0, "v"), Some(CellValue::text("b")));
    }
}
