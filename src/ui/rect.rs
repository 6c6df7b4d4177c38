//! Rectangle type for page layout

/// A rectangle defined by position and size, in logical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create from screen dimensions
    pub fn screen(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    /// Check if point is inside
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by padding on all sides
    pub fn pad(&self, padding: f32) -> Self {
        Self::new(
            self.x + padding,
            self.y + padding,
            (self.w - padding * 2.0).max(0.0),
            (self.h - padding * 2.0).max(0.0),
        )
    }

    /// Scale around a pivot (CSS `transform: scale()` with a transform origin)
    pub fn scaled_about(&self, pivot_x: f32, pivot_y: f32, factor: f32) -> Self {
        Self::new(
            pivot_x + (self.x - pivot_x) * factor,
            pivot_y + (self.y - pivot_y) * factor,
            self.w * factor,
            self.h * factor,
        )
    }

    /// Move vertically (entrance slide offsets)
    pub fn offset_y(&self, dy: f32) -> Self {
        Self::new(self.x, self.y + dy, self.w, self.h)
    }

    /// Centered sub-rect of the given size (flex centering)
    pub fn centered(&self, w: f32, h: f32) -> Self {
        Self::new(self.center_x() - w * 0.5, self.center_y() - h * 0.5, w, h)
    }

    /// Split horizontally at ratio (0.0 - 1.0), returns (left, right)
    pub fn split_h(&self, ratio: f32) -> (Self, Self) {
        let split_x = self.w * ratio.clamp(0.0, 1.0);
        (
            Self::new(self.x, self.y, split_x, self.h),
            Self::new(self.x + split_x, self.y, self.w - split_x, self.h),
        )
    }

    /// Split vertically at fixed pixel position from top
    pub fn split_v_px(&self, pixels: f32) -> (Self, Self) {
        let split_y = pixels.clamp(0.0, self.h);
        (
            Self::new(self.x, self.y, self.w, split_y),
            Self::new(self.x, self.y + split_y, self.w, self.h - split_y),
        )
    }

    /// Divide into `count` equal columns separated by `gap`
    pub fn columns(&self, count: usize, gap: f32) -> Vec<Self> {
        if count == 0 {
            return Vec::new();
        }
        let total_gap = gap * (count as f32 - 1.0);
        let col_w = ((self.w - total_gap) / count as f32).max(0.0);
        (0..count)
            .map(|i| Self::new(self.x + i as f32 * (col_w + gap), self.y, col_w, self.h))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_h() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        let (left, right) = r.split_h(0.3);
        assert!((left.w - 30.0).abs() < 0.001);
        assert!((right.w - 70.0).abs() < 0.001);
        assert!((right.x - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_contains() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(50.0, 40.0));
        assert!(!r.contains(5.0, 40.0));
        assert!(!r.contains(50.0, 100.0));
    }

    #[test]
    fn test_scaled_about_center_keeps_center() {
        let r = Rect::new(0.0, 0.0, 100.0, 200.0);
        let s = r.scaled_about(r.center_x(), r.center_y(), 1.05);
        assert!((s.center_x() - 50.0).abs() < 0.001);
        assert!((s.center_y() - 100.0).abs() < 0.001);
        assert!((s.w - 105.0).abs() < 0.001);
    }

    #[test]
    fn test_columns() {
        let r = Rect::new(0.0, 0.0, 320.0, 10.0);
        let cols = r.columns(3, 10.0);
        assert_eq!(cols.len(), 3);
        assert!((cols[0].w - 100.0).abs() < 0.001);
        assert!((cols[2].x - 220.0).abs() < 0.001);
        assert!(r.columns(0, 10.0).is_empty());
    }
}
