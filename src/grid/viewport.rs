//! Grid viewport calculations
//!
//! Tracks which portion of the grid is visible, in whole rows and columns.

use crate::surface::GridLayout;

/// Viewport state for the grid body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridViewport {
    /// First visible row (0-indexed)
    pub top_row: usize,
    /// First visible column (0-indexed)
    pub left_col: usize,
    /// Number of rows that fit in the viewport
    pub visible_rows: usize,
    /// Number of columns that fit, counted from `left_col`
    pub visible_cols: usize,
}

impl GridViewport {
    /// Create a new viewport with given dimensions
    pub fn new(visible_rows: usize, visible_cols: usize) -> Self {
        Self {
            top_row: 0,
            left_col: 0,
            visible_rows,
            visible_cols,
        }
    }

    /// Snapshot of a pixel layout
    pub fn of(layout: &GridLayout) -> Self {
        let left_col = layout.visible_columns().start;
        Self {
            top_row: layout.first_visible_row(),
            left_col,
            visible_rows: layout.full_rows(),
            visible_cols: layout.full_columns_from(left_col),
        }
    }

    /// Ensure a cell is visible, scrolling if necessary
    pub fn ensure_visible(&mut self, row: usize, col: usize, total_rows: usize, total_cols: usize) {
        if row < self.top_row {
            self.top_row = row;
        } else if row >= self.top_row + self.visible_rows && self.visible_rows > 0 {
            self.top_row = row.saturating_sub(self.visible_rows - 1);
        }

        if col < self.left_col {
            self.left_col = col;
        } else if col >= self.left_col + self.visible_cols && self.visible_cols > 0 {
            self.left_col = col.saturating_sub(self.visible_cols - 1);
        }

        let max_top = total_rows.saturating_sub(self.visible_rows);
        let max_left = total_cols.saturating_sub(self.visible_cols);
        self.top_row = self.top_row.min(max_top);
        self.left_col = self.left_col.min(max_left);
    }

    /// Scroll `layout` to match; returns whether it moved
    pub fn apply(&self, layout: &mut GridLayout) -> bool {
        let before = (layout.scroll_top, layout.scroll_left);
        if layout.first_visible_row() != self.top_row {
            layout.scroll_to_row(self.top_row);
        }
        if layout.visible_columns().start != self.left_col {
            layout.scroll_to_column(self.left_col);
        }
        before != (layout.scroll_top, layout.scroll_left)
    }
}
