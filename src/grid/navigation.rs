//! Focus movement for the grid host
//!
//! Handles navigation signals from cells, arrow keys on idle cells, and
//! viewport scrolling to keep focus on screen.

use crate::messages::{CellMsg, Direction};
use crate::model::CellPosition;

use super::viewport::GridViewport;
use super::CellGrid;

/// Step one cell in `direction`, clamped to the grid
pub fn step(from: CellPosition, direction: Direction, rows: usize, cols: usize) -> CellPosition {
    let last_row = rows.saturating_sub(1);
    let last_col = cols.saturating_sub(1);
    match direction {
        Direction::Up => CellPosition::new(from.row.saturating_sub(1), from.col),
        Direction::Down => CellPosition::new((from.row + 1).min(last_row), from.col),
        Direction::Left => CellPosition::new(from.row, from.col.saturating_sub(1)),
        Direction::Right => CellPosition::new(from.row, (from.col + 1).min(last_col)),
    }
}

impl CellGrid {
    /// Move focus to a cell (clamped) and scroll it into view
    pub fn set_focus(&mut self, pos: CellPosition) {
        let rows = self.rows.len();
        let cols = self.columns.len();
        if rows == 0 || cols == 0 {
            self.focus = None;
            return;
        }
        let pos = CellPosition::new(pos.row.min(rows - 1), pos.col.min(cols - 1));
        if self.focus != Some(pos) {
            tracing::debug!("Focus -> ({}, {})", pos.row, pos.col);
        }
        self.focus = Some(pos);
        self.ensure_focus_visible();
    }

    /// Move focus one step from `from`
    pub fn move_focus(&mut self, from: CellPosition, direction: Direction) {
        let next = step(from, direction, self.rows.len(), self.columns.len());
        self.set_focus(next);
    }

    /// Ensure the focused cell is visible, scrolling the layout if necessary
    pub fn ensure_focus_visible(&mut self) {
        let Some(focus) = self.focus else {
            return;
        };
        let mut viewport = GridViewport::of(&self.layout);
        viewport.ensure_visible(focus.row, focus.col, self.rows.len(), self.columns.len());
        if viewport.apply(&mut self.layout) {
            self.layout_changed();
        }
    }

    /// Re-virtualize and let the live cells re-measure
    pub(super) fn layout_changed(&mut self) {
        self.virtualize();
        let positions: Vec<CellPosition> = self.controllers.keys().copied().collect();
        for pos in positions {
            self.send(pos, CellMsg::LayoutChanged);
        }
    }
}
