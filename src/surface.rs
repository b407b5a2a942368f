//! The seam between sizing logic and whatever owns the pixels.
//!
//! [`RasterSurface`] models the parts of a 2D canvas that sizing needs: the
//! backing resolution plus rectangular reads and writes. The browser
//! implementation lives in [`crate::browser`]; [`crate::raster::PixelSurface`]
//! implements the same semantics in memory.

use std::cell::Cell;

use crate::error::SurfaceError;
use crate::geom::{Rect, Size};

/// A snapshot of surface pixels paired with the rectangle it was read from.
///
/// Created and consumed inside a single resize; never stored across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedFrame<P> {
    pub rect: Rect,
    pub pixels: P,
}

/// A drawing surface with a resizable backing store.
///
/// Implementations follow 2D canvas semantics:
/// - changing the backing size clears every pixel to transparent, even when
///   the new size equals the old one;
/// - `capture` of a region extending past the bounds yields transparent
///   pixels for the outside part;
/// - `restore` writes only the part of the frame that lands inside the bounds.
pub trait RasterSurface {
    /// Pixel storage carried by a [`CapturedFrame`].
    type Pixels;

    fn backing_size(&self) -> Size;

    /// Change the raster resolution. Discards all pixel content.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::TooLarge`] if the backing store cannot hold `size`;
    /// the surface is left unchanged.
    fn set_backing_size(&mut self, size: Size) -> Result<(), SurfaceError>;

    /// Read the pixels in `rect`.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::EmptyRegion`] when `rect` has zero area, or
    /// [`SurfaceError::Host`] if the host context rejects the read.
    fn capture(&self, rect: Rect) -> Result<CapturedFrame<Self::Pixels>, SurfaceError>;

    /// Write `frame` with its top-left corner at `(x, y)`, clipped to bounds.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the frame is malformed or the host context rejects the write.
    fn restore(&mut self, frame: &CapturedFrame<Self::Pixels>, x: u32, y: u32) -> Result<(), SurfaceError>;
}

/// Source of the host viewport dimensions.
pub trait Viewport {
    fn size(&self) -> Size;
}

/// A viewport whose size is set explicitly. Used headless and in tests.
#[derive(Debug, Default)]
pub struct FixedViewport {
    size: Cell<Size>,
}

impl FixedViewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { size: Cell::new(Size::new(width, height)) }
    }

    pub fn set(&self, width: u32, height: u32) {
        self.size.set(Size::new(width, height));
    }
}

impl Viewport for FixedViewport {
    fn size(&self) -> Size {
        self.size.get()
    }
}

impl<V: Viewport + ?Sized> Viewport for &V {
    fn size(&self) -> Size {
        (**self).size()
    }
}
