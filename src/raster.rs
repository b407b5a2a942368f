//! In-memory RGBA surface with the same sizing semantics as a 2D canvas.
//!
//! Useful wherever a real canvas is unavailable: native tests, headless
//! runs, or as an offscreen buffer a consumer draws into.

use crate::consts::BYTES_PER_PIXEL;
use crate::error::SurfaceError;
use crate::geom::{Rect, Size};
use crate::surface::{CapturedFrame, RasterSurface};

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

/// One pixel, straight (non-premultiplied) RGBA.
pub type Rgba = [u8; 4];

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Row-major RGBA8 pixel buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelSurface {
    size: Size,
    data: Vec<u8>,
}

impl PixelSurface {
    /// A transparent surface of the given size.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::TooLarge`] if the buffer length overflows `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let size = Size::new(width, height);
        Ok(Self { size, data: vec![0; byte_len(size)?] })
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    /// The pixel at `(x, y)`, or `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let at = self.offset(x, y)?;
        let mut px = TRANSPARENT;
        px.copy_from_slice(&self.data[at..at + BYTES_PER_PIXEL]);
        Some(px)
    }

    /// Write one pixel. Out-of-bounds writes are dropped, as on a canvas.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(at) = self.offset(x, y) {
            self.data[at..at + BYTES_PER_PIXEL].copy_from_slice(&color);
        }
    }

    /// Fill `rect`, clipped to the surface.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some(clip) = rect.intersect(self.bounds()) else {
            return;
        };
        for y in clip.y..clip.y + clip.height {
            for x in clip.x..clip.x + clip.width {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// True when every pixel is transparent.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    /// Raw RGBA bytes, row-major.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        Some((y as usize * self.size.width as usize + x as usize) * BYTES_PER_PIXEL)
    }

    fn row_stride(&self) -> usize {
        self.size.width as usize * BYTES_PER_PIXEL
    }
}

impl RasterSurface for PixelSurface {
    type Pixels = Vec<u8>;

    fn backing_size(&self) -> Size {
        self.size
    }

    fn set_backing_size(&mut self, size: Size) -> Result<(), SurfaceError> {
        let len = byte_len(size)?;
        self.size = size;
        self.data.clear();
        self.data.resize(len, 0);
        Ok(())
    }

    fn capture(&self, rect: Rect) -> Result<CapturedFrame<Vec<u8>>, SurfaceError> {
        if rect.is_empty() {
            return Err(SurfaceError::EmptyRegion(rect));
        }
        let mut pixels = vec![0; byte_len(rect.size())?];
        if let Some(clip) = rect.intersect(self.bounds()) {
            let frame_stride = rect.width as usize * BYTES_PER_PIXEL;
            let span = clip.width as usize * BYTES_PER_PIXEL;
            for row in 0..clip.height {
                let src_y = (clip.y + row) as usize;
                let dst_y = (clip.y - rect.y + row) as usize;
                let src = src_y * self.row_stride() + clip.x as usize * BYTES_PER_PIXEL;
                let dst = dst_y * frame_stride + (clip.x - rect.x) as usize * BYTES_PER_PIXEL;
                pixels[dst..dst + span].copy_from_slice(&self.data[src..src + span]);
            }
        }
        Ok(CapturedFrame { rect, pixels })
    }

    fn restore(&mut self, frame: &CapturedFrame<Vec<u8>>, x: u32, y: u32) -> Result<(), SurfaceError> {
        let expected = byte_len(frame.rect.size())?;
        if frame.pixels.len() != expected {
            return Err(SurfaceError::FrameLength { expected, actual: frame.pixels.len() });
        }
        let target = Rect::new(x, y, frame.rect.width, frame.rect.height);
        let Some(clip) = target.intersect(self.bounds()) else {
            return Ok(());
        };
        let frame_stride = frame.rect.width as usize * BYTES_PER_PIXEL;
        let span = clip.width as usize * BYTES_PER_PIXEL;
        let stride = self.row_stride();
        for row in 0..clip.height {
            let src_y = (clip.y - y + row) as usize;
            let dst_y = (clip.y + row) as usize;
            let src = src_y * frame_stride + (clip.x - x) as usize * BYTES_PER_PIXEL;
            let dst = dst_y * stride + clip.x as usize * BYTES_PER_PIXEL;
            self.data[dst..dst + span].copy_from_slice(&frame.pixels[src..src + span]);
        }
        Ok(())
    }
}

/// RGBA8 buffer length for `size`, checked against `usize` overflow.
///
/// Once a buffer of this length exists, row strides and in-bounds offsets
/// derived from it cannot overflow either.
fn byte_len(size: Size) -> Result<usize, SurfaceError> {
    size.area()
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or(SurfaceError::TooLarge(size))
}
