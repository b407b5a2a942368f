//! Keeps a drawing surface's backing resolution in step with the viewport.
//!
//! Changing a canvas's backing size wipes it. [`SurfaceSizeManager::handle_resize`]
//! captures the current pixels, resizes, and writes them back unscaled at the
//! top-left origin: clipped when the surface shrinks, padded with transparent
//! pixels when it grows.
//!
//! ## Atomicity
//!
//! Capture, resize and restore must not interleave with any other mutation of
//! the surface. `handle_resize` takes `&mut self` and has no suspension point,
//! so the exclusive borrow is the mutual-exclusion scope. On the browser's
//! single event-loop thread the manager sits in an `Rc<RefCell<..>>` behind a
//! [`ResizeDispatcher`]: each resize event borrows it for one complete call,
//! and an event that arrives while it is borrowed is deferred, never dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::SurfaceError;
use crate::geom::{Rect, Size};
use crate::surface::{RasterSurface, Viewport};

#[cfg(test)]
#[path = "sizing_test.rs"]
mod sizing_test;

/// Lifecycle of the managed surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingState {
    /// No resize has run yet; the surface has the host's placeholder size.
    Uninitialized,
    /// At least one resize has completed.
    Sized,
}

/// What one [`SurfaceSizeManager::handle_resize`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeReport {
    /// Backing size before the call.
    pub previous: Size,
    /// Backing size after the call; equals the viewport size.
    pub current: Size,
    /// Region written back after clipping, if any content was carried over.
    pub preserved: Option<Rect>,
    /// Set when the pre-resize capture failed and content was dropped.
    pub capture_error: Option<SurfaceError>,
}

/// Owns the resize protocol for one surface.
pub struct SurfaceSizeManager<S, V> {
    surface: S,
    viewport: V,
    state: SizingState,
    resize_count: u64,
}

impl<S: RasterSurface, V: Viewport> SurfaceSizeManager<S, V> {
    #[must_use]
    pub fn new(surface: S, viewport: V) -> Self {
        Self { surface, viewport, state: SizingState::Uninitialized, resize_count: 0 }
    }

    /// Resize the backing store to the viewport, preserving drawn content.
    ///
    /// A zero-area surface has nothing to preserve and skips the capture.
    /// A failed capture does not stop the resize: the surface is still synced
    /// to the viewport, comes out blank, and the failure is returned in
    /// [`ResizeReport::capture_error`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backing store cannot take the viewport size (the
    /// surface is left as it was) or the host rejects the write-back (the
    /// surface is resized but blank).
    pub fn handle_resize(&mut self) -> Result<ResizeReport, SurfaceError> {
        let previous = self.surface.backing_size();
        let target = self.viewport.size();

        let mut capture_error = None;
        let prior_frame = if previous.is_empty() {
            None
        } else {
            match self.surface.capture(Rect::from_size(previous)) {
                Ok(frame) => Some(frame),
                Err(err) => {
                    log::warn!("surface capture failed, resizing without content: {err}");
                    capture_error = Some(err);
                    None
                }
            }
        };

        self.surface.set_backing_size(target)?;
        self.state = SizingState::Sized;
        self.resize_count += 1;

        let preserved = match prior_frame {
            Some(frame) => {
                self.surface.restore(&frame, 0, 0)?;
                frame.rect.intersect(Rect::from_size(target))
            }
            None => None,
        };

        log::debug!(
            "surface resized {}x{} -> {}x{} (preserved {:?})",
            previous.width,
            previous.height,
            target.width,
            target.height,
            preserved
        );

        Ok(ResizeReport { previous, current: target, preserved, capture_error })
    }

    #[must_use]
    pub fn state(&self) -> SizingState {
        self.state
    }

    /// Number of completed resizes, the startup one included.
    #[must_use]
    pub fn resize_count(&self) -> u64 {
        self.resize_count
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for consumers that draw into the surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Release the surface and viewport.
    pub fn into_parts(self) -> (S, V) {
        (self.surface, self.viewport)
    }
}

/// Outcome of one [`ResizeDispatcher::signal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The manager was free and the resize ran to completion.
    Ran(Result<ResizeReport, SurfaceError>),
    /// The manager was borrowed; a resize is pending until [`ResizeDispatcher::drain`].
    Deferred,
}

/// Routes resize signals to a shared [`SurfaceSizeManager`].
///
/// A signal that finds the manager borrowed marks a resize pending instead of
/// dropping it. Any number of deferred signals coalesce into one pending
/// resize, which reads the viewport when it finally runs.
pub struct ResizeDispatcher<S, V> {
    sizer: Rc<RefCell<SurfaceSizeManager<S, V>>>,
    pending: Cell<bool>,
}

impl<S: RasterSurface, V: Viewport> ResizeDispatcher<S, V> {
    #[must_use]
    pub fn new(manager: SurfaceSizeManager<S, V>) -> Self {
        Self { sizer: Rc::new(RefCell::new(manager)), pending: Cell::new(false) }
    }

    /// Run a resize now, or defer it if the manager is borrowed.
    #[must_use]
    pub fn signal(&self) -> Dispatch {
        match self.sizer.try_borrow_mut() {
            Ok(mut manager) => {
                self.pending.set(false);
                Dispatch::Ran(manager.handle_resize())
            }
            Err(_) => {
                self.pending.set(true);
                Dispatch::Deferred
            }
        }
    }

    /// Run the pending resize, if any. `None` when nothing was pending.
    #[must_use]
    pub fn drain(&self) -> Option<Dispatch> {
        if self.pending.get() { Some(self.signal()) } else { None }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// The shared manager, for consumers that draw into the surface.
    #[must_use]
    pub fn sizer(&self) -> &Rc<RefCell<SurfaceSizeManager<S, V>>> {
        &self.sizer
    }
}
