//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use cellgrid::commands::{GridEvent, NavigationSignal};
use cellgrid::config::GridConfig;
use cellgrid::coordinator::EditingCoordinator;
use cellgrid::grid::CellGrid;
use cellgrid::keymap::{KeyCode, Keystroke, Modifiers};
use cellgrid::messages::GridMsg;
use cellgrid::model::{row, CellPosition, CellValue, ColumnDescriptor, FieldType, Row, RowStore};

pub const TABLE: &str = "t";

/// Rows with a single text column `v`
pub fn text_rows(values: &[&str]) -> RowStore {
    RowStore::new(values.iter().map(|v| row([("v", *v)])).collect())
}

pub fn store(rows: Vec<Row>) -> RowStore {
    RowStore::new(rows)
}

/// Grid on its own edit slot, so tests never share state through the global one
pub fn test_grid(columns: &[(&str, FieldType)], rows: RowStore) -> CellGrid {
    let columns = columns
        .iter()
        .map(|(name, field_type)| ColumnDescriptor::new(TABLE, *name, *field_type))
        .collect();
    CellGrid::with_coordinator(
        TABLE,
        columns,
        rows,
        &GridConfig::default(),
        EditingCoordinator::new(),
    )
}

/// One Text column `v` over the given values
pub fn text_grid(values: &[&str]) -> CellGrid {
    test_grid(&[("v", FieldType::Text)], text_rows(values))
}

pub fn pos(row: usize, col: usize) -> CellPosition {
    CellPosition::new(row, col)
}

pub fn key(code: KeyCode) -> GridMsg {
    GridMsg::Key(Keystroke::key(code))
}

pub fn key_with(code: KeyCode, mods: Modifiers) -> GridMsg {
    GridMsg::Key(Keystroke::new(code, mods))
}

/// Open a cell by clicking it and let the overlay mount
pub fn open(grid: &mut CellGrid, row: usize, col: usize) {
    grid.update(GridMsg::Click { row, col });
    grid.update(GridMsg::Tick);
}

/// Replace the open editor's text
pub fn retype(grid: &mut CellGrid, text: &str) {
    grid.update(key_with(KeyCode::Char('a'), Modifiers::CTRL));
    grid.update(GridMsg::Type(text.to_string()));
}

/// Committed values carried by `afteredit` events, in order
pub fn committed(events: &[GridEvent]) -> Vec<CellValue> {
    events
        .iter()
        .filter_map(|e| match e {
            GridEvent::AfterEdit(edit) => Some(edit.val().clone()),
            _ => None,
        })
        .collect()
}

pub fn navigations(events: &[GridEvent]) -> Vec<NavigationSignal> {
    events
        .iter()
        .filter_map(|e| match e {
            GridEvent::Navigate(signal) => Some(*signal),
            _ => None,
        })
        .collect()
}
