//! Error types for surface operations and page bootstrap.

use wasm_bindgen::{JsCast, JsValue};

use crate::geom::{Rect, Size};

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure of a raster operation on a [`crate::surface::RasterSurface`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// A region read was requested over zero pixels.
    #[error("cannot capture an empty region: {0:?}")]
    EmptyRegion(Rect),
    /// The pixel buffer for this size would not fit in memory.
    #[error("{}x{} surface exceeds addressable memory", .0.width, .0.height)]
    TooLarge(Size),
    /// A captured frame's pixel data does not match its rectangle.
    #[error("frame holds {actual} bytes, expected {expected}")]
    FrameLength { expected: usize, actual: usize },
    /// The host raster context rejected the call.
    #[error("host raster context error: {0}")]
    Host(String),
}

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        Self::Host(describe_js(&value))
    }
}

/// Failure to bind the page before any sizing can happen.
///
/// All of these are fatal: without a raster context there is nothing to size.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootstrapError {
    #[error("no global window")]
    MissingWindow,
    #[error("window has no document")]
    MissingDocument,
    #[error("no element with id `{0}`")]
    MissingElement(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("canvas `{0}` has no 2d context")]
    MissingContext(String),
    #[error("invalid bootstrap config: {0}")]
    Config(String),
    #[error("failed to register resize listener: {0}")]
    Listener(String),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl From<BootstrapError> for JsValue {
    fn from(err: BootstrapError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Render a thrown JS value for diagnostics.
///
/// Strings pass through; `Error` objects contribute their message; anything
/// else falls back to its debug form.
pub(crate) fn describe_js(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}
