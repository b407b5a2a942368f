#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// Integer raster dimensions in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const ZERO: Self = Self { width: 0, height: 0 };

    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either axis is zero. Nothing can be read from an empty surface.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Convert CSS pixel measurements to a raster size.
    ///
    /// Fractions are truncated; negative and NaN values become zero and
    /// anything past `u32::MAX` saturates.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_css(width: f64, height: f64) -> Self {
        // `as` saturates float-to-int casts and maps NaN to zero.
        Self { width: width.max(0.0) as u32, height: height.max(0.0) as u32 }
    }

    /// Pixel count, or `None` if it does not fit in `usize` (32 bits on wasm32).
    #[must_use]
    pub fn area(self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }
}

/// Axis-aligned pixel rectangle with a non-negative origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// The rectangle covering `size`, anchored at the origin.
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        Self { x: 0, y: 0, width: size.width, height: size.height }
    }

    #[must_use]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.size().is_empty()
    }

    /// Exclusive right edge. Widened so `x + width` cannot overflow.
    #[must_use]
    pub fn right(self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub fn bottom(self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    #[must_use]
    pub fn contains(self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && u64::from(x) < self.right() && u64::from(y) < self.bottom()
    }

    /// Overlapping region of two rectangles, or `None` if they do not overlap.
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= u64::from(x) || bottom <= u64::from(y) {
            return None;
        }
        // Both edges are bounded by an input's u32 extent, so the spans fit.
        let width = u32::try_from(right - u64::from(x)).unwrap_or(u32::MAX);
        let height = u32::try_from(bottom - u64::from(y)).unwrap_or(u32::MAX);
        Some(Self { x, y, width, height })
    }
}
