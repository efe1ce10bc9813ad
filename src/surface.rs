//! Measurement seam between the editing core and whatever draws the grid
//!
//! Controllers never compute pixel positions themselves. They ask a
//! [`Surface`] where a cell currently is, how wide a freshly mounted
//! overlay laid out, and how tall some text wraps to.

use crate::config::GridConfig;
use crate::geometry::Rect;
use crate::model::CellAddress;

/// Live layout measurements
pub trait Surface {
    /// Bounding box of a cell in viewport coordinates
    ///
    /// `None` when the address does not exist in the layout.
    fn cell_rect(&self, address: &CellAddress) -> Option<Rect>;

    /// Intrinsic width of a just-mounted overlay; 0 while layout is unsettled
    fn overlay_width(&self) -> f32;

    /// Natural scroll height of `text` wrapped into a text area `width` wide
    fn content_height(&self, text: &str, width: f32) -> f32;
}

/// Horizontal padding inside editors (12px each side)
const TEXT_PADDING_X: f32 = 24.0;
/// Vertical padding inside editors (6px each side)
const TEXT_PADDING_Y: f32 = 12.0;

/// Geometric grid layout
///
/// Computes rectangles from fixed row/header heights, per-column widths,
/// the container origin and the current scroll offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Container top-left in viewport coordinates
    pub origin_top: f32,
    pub origin_left: f32,
    /// Container size
    pub width: f32,
    pub height: f32,
    pub header_height: f32,
    pub row_height: f32,
    pub scroll_top: f32,
    pub scroll_left: f32,
    /// Reported width of mounted overlays; 0 simulates a portal target
    /// with no layout yet
    pub intrinsic_overlay_width: f32,
    pub line_height: f32,
    pub char_width: f32,
    table: String,
    columns: Vec<(String, f32)>,
    row_count: usize,
}

impl GridLayout {
    pub fn new(table: impl Into<String>, config: &GridConfig) -> Self {
        Self {
            origin_top: 0.0,
            origin_left: 0.0,
            width: 800.0,
            height: 600.0,
            header_height: config.header_height,
            row_height: config.row_height,
            scroll_top: 0.0,
            scroll_left: 0.0,
            intrinsic_overlay_width: 1.0,
            line_height: config.line_height,
            char_width: config.char_width,
            table: table.into(),
            columns: Vec::new(),
            row_count: 0,
        }
    }

    /// Set the columns in display order with their widths
    pub fn set_columns<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(|(n, w)| (n.into(), w)).collect();
        self.clamp_scroll();
    }

    pub fn set_row_count(&mut self, rows: usize) {
        self.row_count = rows;
        self.clamp_scroll();
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|(name, _)| name == column)
    }

    /// Total width of all columns
    pub fn content_width(&self) -> f32 {
        self.columns.iter().map(|(_, w)| w).sum()
    }

    /// Total height of all rows
    pub fn content_height_px(&self) -> f32 {
        self.row_count as f32 * self.row_height
    }

    /// Height available to rows below the header
    pub fn body_height(&self) -> f32 {
        (self.height - self.header_height).max(0.0)
    }

    pub fn max_scroll_top(&self) -> f32 {
        (self.content_height_px() - self.body_height()).max(0.0)
    }

    pub fn max_scroll_left(&self) -> f32 {
        (self.content_width() - self.width).max(0.0)
    }

    /// Scroll by a delta, clamped to the content; returns whether it moved
    pub fn scroll_by(&mut self, dy: f32, dx: f32) -> bool {
        let before = (self.scroll_top, self.scroll_left);
        self.scroll_top += dy;
        self.scroll_left += dx;
        self.clamp_scroll();
        before != (self.scroll_top, self.scroll_left)
    }

    /// Resize the container; returns whether anything changed
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if (self.width, self.height) == (width, height) {
            return false;
        }
        self.width = width;
        self.height = height;
        self.clamp_scroll();
        true
    }

    fn clamp_scroll(&mut self) {
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll_top());
        self.scroll_left = self.scroll_left.clamp(0.0, self.max_scroll_left());
    }

    /// First row at least partly visible
    pub fn first_visible_row(&self) -> usize {
        if self.row_height <= 0.0 {
            return 0;
        }
        (self.scroll_top / self.row_height).floor() as usize
    }

    /// Rows that fit entirely in the body
    pub fn full_rows(&self) -> usize {
        if self.row_height <= 0.0 {
            return 0;
        }
        (self.body_height() / self.row_height).floor() as usize
    }

    /// Row indices at least partly visible
    pub fn visible_rows(&self) -> std::ops::Range<usize> {
        if self.row_height <= 0.0 {
            return 0..0;
        }
        let first = self.first_visible_row();
        let last = ((self.scroll_top + self.body_height()) / self.row_height).ceil() as usize;
        first..last.min(self.row_count)
    }

    /// Scroll so the row at `top_row` is the first visible one
    pub fn scroll_to_row(&mut self, top_row: usize) {
        self.scroll_top = top_row as f32 * self.row_height;
        self.clamp_scroll();
    }

    /// Scroll so the column at `left_col` is the first visible one
    pub fn scroll_to_column(&mut self, left_col: usize) {
        self.scroll_left = self.columns.iter().take(left_col).map(|(_, w)| w).sum();
        self.clamp_scroll();
    }

    /// Columns starting at `left_col` that fit entirely in the container
    pub fn full_columns_from(&self, left_col: usize) -> usize {
        let mut used = 0.0;
        let mut count = 0;
        for (_, w) in self.columns.iter().skip(left_col) {
            used += w;
            if used > self.width {
                break;
            }
            count += 1;
        }
        count
    }

    /// Column indices at least partly visible
    pub fn visible_columns(&self) -> std::ops::Range<usize> {
        let mut x = 0.0;
        let mut first = None;
        let mut end = 0;
        for (i, (_, w)) in self.columns.iter().enumerate() {
            let right = x + w;
            if right > self.scroll_left && x < self.scroll_left + self.width {
                first.get_or_insert(i);
                end = i + 1;
            }
            x = right;
        }
        first.unwrap_or(0)..end
    }
}

impl Surface for GridLayout {
    fn cell_rect(&self, address: &CellAddress) -> Option<Rect> {
        if address.table != self.table || address.row >= self.row_count {
            return None;
        }
        let col = self.column_index(&address.column)?;
        let left: f32 = self.columns[..col].iter().map(|(_, w)| w).sum();
        Some(Rect::new(
            self.origin_top + self.header_height + address.row as f32 * self.row_height
                - self.scroll_top,
            self.origin_left + left - self.scroll_left,
            self.columns[col].1,
            self.row_height,
        ))
    }

    fn overlay_width(&self) -> f32 {
        self.intrinsic_overlay_width
    }

    fn content_height(&self, text: &str, width: f32) -> f32 {
        let usable = (width - TEXT_PADDING_X).max(self.char_width);
        let per_line = ((usable / self.char_width).floor() as usize).max(1);
        let lines: usize = text
            .split('\n')
            .map(|line| line.chars().count().div_ceil(per_line).max(1))
            .sum();
        lines as f32 * self.line_height + TEXT_PADDING_Y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GridLayout {
        let mut layout = GridLayout::new("t", &GridConfig::default());
        layout.set_columns([("id", 70.0), ("name", 200.0), ("price", 200.0)]);
        layout.set_row_count(100);
        layout
    }

    #[test]
    fn test_cell_rect() {
        let l = layout();
        let rect = l.cell_rect(&CellAddress::new("t", "price", 2)).unwrap();
        assert_eq!(rect, Rect::new(48.0 + 72.0, 270.0, 200.0, 36.0));
    }

    #[test]
    fn test_cell_rect_unknown() {
        let l = layout();
        assert!(l.cell_rect(&CellAddress::new("t", "nope", 0)).is_none());
        assert!(l.cell_rect(&CellAddress::new("other", "name", 0)).is_none());
        assert!(l.cell_rect(&CellAddress::new("t", "name", 100)).is_none());
    }

    #[test]
    fn test_scroll_moves_rect_and_clamps() {
        let mut l = layout();
        assert!(l.scroll_by(72.0, 0.0));
        let rect = l.cell_rect(&CellAddress::new("t", "name", 2)).unwrap();
        assert_eq!(rect.top, 48.0);
        assert!(l.scroll_by(-1000.0, 0.0));
        assert_eq!(l.scroll_top, 0.0);
        assert!(!l.scroll_by(-10.0, 0.0));
    }

    #[test]
    fn test_visible_rows() {
        let mut l = layout();
        // 552px body / 36px rows
        assert_eq!(l.visible_rows(), 0..16);
        l.scroll_by(18.0, 0.0);
        assert_eq!(l.visible_rows(), 0..16);
        l.scroll_by(18.0, 0.0);
        assert_eq!(l.visible_rows(), 1..17);
    }

    #[test]
    fn test_content_height_wraps() {
        let l = layout();
        // (200 - 24) / 7 = 25 chars per line
        assert_eq!(l.content_height("short", 200.0), 21.6 + 12.0);
        let long = "x".repeat(60);
        assert_eq!(l.content_height(&long, 200.0), 3.0 * 21.6 + 12.0);
        assert_eq!(l.content_height("a\nb", 200.0), 2.0 * 21.6 + 12.0);
    }
}
