//! Shared constants for the bootstrap crate.

// ── Host document ───────────────────────────────────────────────

/// Element id of the full-window drawing surface.
pub const DEFAULT_CANVAS_ID: &str = "canvas";

/// Locator of the external computation module, relative to this crate's
/// deployment bundle.
pub const DEFAULT_MODULE_PATH: &str = "./compute/index.js";

/// Name of the 2D raster context requested from the canvas.
pub const CONTEXT_2D: &str = "2d";

/// Window event that drives [`crate::sizing::SurfaceSizeManager::handle_resize`].
pub const RESIZE_EVENT: &str = "resize";

/// Delay between attempts to run a resize deferred by a held surface borrow.
pub const RESIZE_RETRY_MS: u64 = 16;

// ── Raster ──────────────────────────────────────────────────────

/// RGBA8: one byte per channel.
pub const BYTES_PER_PIXEL: usize = 4;
