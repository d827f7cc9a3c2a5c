//! Layout geometry read from the host

/// Bounding box of an element, relative to the viewport (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
    pub width: f64,
}

impl Rect {
    pub const fn new(top: f64, height: f64, width: f64) -> Self {
        Self { top, height, width }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// The element takes up space on screen.
    pub fn is_rendered(&self) -> bool {
        self.width > 0.0 || self.height > 0.0
    }

    /// Overlaps the vertical band `[from, to)`.
    pub fn intersects_band(&self, from: f64, to: f64) -> bool {
        self.is_rendered() && self.top < to && self.bottom() > from
    }
}

/// Window size and vertical scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
}
