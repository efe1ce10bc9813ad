//! Grid data model - rows, addresses and column descriptors
//!
//! This module contains the plain data the editing core reads and writes.

pub mod address;
pub mod column;
pub mod store;
pub mod value;

pub use address::{CellAddress, CellContext, CellPosition, EditKey};
pub use column::{display_name_for, ColumnDescriptor, EditorKind, FieldType, ID_COLUMN};
pub use store::{RowStore, StoreError};
pub use value::{row, CellValue, Row};
