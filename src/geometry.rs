//! Viewport-space geometry

/// Axis-aligned rectangle in viewport pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Get the right edge X coordinate
    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Get the bottom edge Y coordinate
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Same size, moved by (dx, dy)
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            top: self.top + dy,
            left: self.left + dx,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 36.0);
        assert_eq!(r.right(), 120.0);
        assert_eq!(r.bottom(), 46.0);
        assert_eq!(r.translated(-5.0, 4.0).top, 14.0);
    }
}
