//! Floating editor overlay positioning
//!
//! An open editor is drawn on a top-level surface, detached from the
//! clipped grid body, so it has to track its anchor cell by itself. The
//! positioner owns the anchor rectangle for the lifetime of one session,
//! derives the overlay frame from it, and recomputes everything whenever
//! the host reports a scroll or resize.

use crate::geometry::Rect;
use crate::model::EditorKind;

/// How an overlay sits relative to its anchor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// On top of the cell, grown outward by the expansion
    ///
    /// With `expand_right == false` the right edge stays flush with the
    /// cell and only the left side grows.
    Cover { expand_right: bool },
    /// Directly under the cell (dropdowns)
    Below,
}

impl Placement {
    /// Placement for an editor kind; `None` for kinds without an overlay
    pub fn for_kind(kind: EditorKind) -> Option<Self> {
        match kind {
            EditorKind::Text => Some(Placement::Cover {
                expand_right: false,
            }),
            EditorKind::Number | EditorKind::Badge => Some(Placement::Cover { expand_right: true }),
            EditorKind::Select { .. } => Some(Placement::Below),
            EditorKind::Toggle | EditorKind::Display => None,
        }
    }
}

/// Sizing constants for overlays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayMetrics {
    /// Outward growth on each applicable side, in pixels
    pub expansion: f32,
    /// Smallest height an auto-growing text area may shrink to
    pub min_cell_height: f32,
    /// Extra pixels added once content outgrows the minimum
    pub autogrow_buffer: f32,
}

impl Default for OverlayMetrics {
    fn default() -> Self {
        Self {
            expansion: 2.0,
            min_cell_height: 36.0,
            autogrow_buffer: 2.0,
        }
    }
}

/// Computed overlay style (viewport coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame {
    pub top: f32,
    pub left: f32,
    /// Fixed width; `None` when only min/max constrain it
    pub width: Option<f32>,
    pub min_width: f32,
    pub max_width: f32,
    /// Zero for dropdowns, which size to their content
    pub min_height: f32,
    /// Explicit height set by auto-grow
    pub height: Option<f32>,
}

/// Frame for an anchor rectangle under a placement
pub fn compute_frame(placement: Placement, anchor: Rect, expansion: f32) -> OverlayFrame {
    match placement {
        Placement::Cover { expand_right } => {
            let width = if expand_right {
                anchor.width + expansion * 2.0
            } else {
                anchor.width + expansion
            };
            OverlayFrame {
                top: anchor.top - expansion,
                left: anchor.left - expansion,
                width: Some(width),
                min_width: width,
                max_width: width,
                min_height: anchor.height + expansion * 2.0,
                height: None,
            }
        }
        Placement::Below => {
            let width = anchor.width + expansion * 2.0;
            OverlayFrame {
                top: anchor.bottom() + expansion,
                left: anchor.left - expansion,
                width: None,
                min_width: width,
                max_width: width,
                min_height: 0.0,
                height: None,
            }
        }
    }
}

/// Height of an auto-growing text area for its natural scroll height
pub fn autogrow_height(scroll_height: f32, min_height: f32, buffer: f32) -> f32 {
    if scroll_height > min_height {
        scroll_height + buffer
    } else {
        min_height
    }
}

/// Width of the editor element inside its overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidthMode {
    /// Layout had not settled; pinned to the anchor's captured width
    Pinned(f32),
    /// Fill the overlay (100%)
    Fill,
}

/// Tracks one open overlay against its anchor cell
#[derive(Debug, Clone)]
pub struct OverlayPositioner {
    placement: Placement,
    metrics: OverlayMetrics,
    anchor: Rect,
    frame: OverlayFrame,
    width_mode: Option<WidthMode>,
}

impl OverlayPositioner {
    /// Capture the anchor and compute the initial frame
    pub fn new(placement: Placement, anchor: Rect, metrics: OverlayMetrics) -> Self {
        Self {
            placement,
            metrics,
            anchor,
            frame: compute_frame(placement, anchor, metrics.expansion),
            width_mode: None,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn anchor(&self) -> Rect {
        self.anchor
    }

    pub fn frame(&self) -> OverlayFrame {
        self.frame
    }

    /// `None` until the post-mount width pass ran
    pub fn width_mode(&self) -> Option<WidthMode> {
        self.width_mode
    }

    /// Recompute from a fresh anchor measurement
    ///
    /// Keeps any auto-grown height. Returns whether the frame moved.
    pub fn resync(&mut self, anchor: Rect) -> bool {
        if anchor == self.anchor {
            return false;
        }
        let height = self.frame.height;
        self.anchor = anchor;
        self.frame = compute_frame(self.placement, anchor, self.metrics.expansion);
        self.frame.height = height;
        if let Some(WidthMode::Pinned(_)) = self.width_mode {
            self.width_mode = Some(WidthMode::Pinned(anchor.width));
        }
        tracing::trace!(
            "Overlay resynced to top={} left={}",
            self.frame.top,
            self.frame.left
        );
        true
    }

    /// Second width pass, run once the overlay has been mounted
    ///
    /// A zero intrinsic width means the render target had no layout yet, so
    /// the element is pinned to the anchor's pixel width.
    pub fn resolve_width(&mut self, measured_width: f32) -> WidthMode {
        let mode = if measured_width <= 0.0 {
            WidthMode::Pinned(self.anchor.width)
        } else {
            WidthMode::Fill
        };
        self.width_mode = Some(mode);
        mode
    }

    /// Resize for the content's natural scroll height; returns the new height
    pub fn autogrow(&mut self, scroll_height: f32) -> f32 {
        let height = autogrow_height(
            scroll_height,
            self.metrics.min_cell_height,
            self.metrics.autogrow_buffer,
        );
        self.frame.height = Some(height);
        height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> Rect {
        Rect::new(100.0, 50.0, 200.0, 36.0)
    }

    #[test]
    fn test_cover_flush_right() {
        let frame = compute_frame(
            Placement::Cover {
                expand_right: false,
            },
            anchor(),
            2.0,
        );
        assert_eq!(frame.top, 98.0);
        assert_eq!(frame.left, 48.0);
        assert_eq!(frame.width, Some(202.0));
        assert_eq!(frame.min_height, 40.0);
    }

    #[test]
    fn test_cover_expand_right() {
        let frame = compute_frame(Placement::Cover { expand_right: true }, anchor(), 2.0);
        assert_eq!(frame.width, Some(204.0));
        assert_eq!(frame.max_width, 204.0);
    }

    #[test]
    fn test_below() {
        let frame = compute_frame(Placement::Below, anchor(), 2.0);
        assert_eq!(frame.top, 138.0);
        assert_eq!(frame.left, 48.0);
        assert_eq!(frame.width, None);
        assert_eq!(frame.min_width, 204.0);
    }

    #[test]
    fn test_autogrow_height() {
        assert_eq!(autogrow_height(20.0, 36.0, 2.0), 36.0);
        assert_eq!(autogrow_height(36.0, 36.0, 2.0), 36.0);
        assert_eq!(autogrow_height(60.0, 36.0, 2.0), 62.0);
    }

    #[test]
    fn test_resync_moves_frame_keeps_height() {
        let mut pos = OverlayPositioner::new(
            Placement::Cover { expand_right: true },
            anchor(),
            OverlayMetrics::default(),
        );
        pos.autogrow(80.0);
        assert!(pos.resync(anchor().translated(0.0, -40.0)));
        assert_eq!(pos.frame().top, 58.0);
        assert_eq!(pos.frame().height, Some(82.0));
        assert!(!pos.resync(anchor().translated(0.0, -40.0)));
    }

    #[test]
    fn test_resolve_width_two_pass() {
        let mut pos = OverlayPositioner::new(Placement::Below, anchor(), OverlayMetrics::default());
        assert_eq!(pos.width_mode(), None);
        assert_eq!(pos.resolve_width(0.0), WidthMode::Pinned(200.0));
        assert_eq!(pos.resolve_width(204.0), WidthMode::Fill);
    }

    #[test]
    fn test_placement_for_kind() {
        assert_eq!(Placement::for_kind(EditorKind::Toggle), None);
        assert_eq!(
            Placement::for_kind(EditorKind::Select { multi: false }),
            Some(Placement::Below)
        );
    }
}
