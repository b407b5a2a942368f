//! Browser bindings: the canvas element, the window viewport, dynamic
//! `import()`, and the resize listener that ties them together.
//!
//! Everything here runs on the page's single event-loop thread. Nothing in
//! this module is exercised by native tests; the logic it delegates to is.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, ImageData, Window};

use crate::config::BootstrapConfig;
use crate::consts::{CONTEXT_2D, RESIZE_EVENT, RESIZE_RETRY_MS};
use crate::error::{BootstrapError, SurfaceError, describe_js};
use crate::geom::{Rect, Size};
use crate::loader::{LoadError, ModuleLoader, ModuleSource};
use crate::sizing::{Dispatch, ResizeDispatcher, ResizeReport, SurfaceSizeManager};
use crate::surface::{CapturedFrame, RasterSurface, Viewport};

// =============================================================
// Surface
// =============================================================

/// A `<canvas>` element and its 2D context.
pub struct HtmlSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl HtmlSurface {
    /// Look up `canvas_id` in `document` and obtain its 2D context.
    ///
    /// # Errors
    ///
    /// Fails fast if the element is missing, is not a canvas, or has no 2D context.
    pub fn from_document(document: &Document, canvas_id: &str) -> Result<Self, BootstrapError> {
        let element = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| BootstrapError::MissingElement(canvas_id.to_string()))?;
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| BootstrapError::NotACanvas(canvas_id.to_string()))?;
        let context = match canvas.get_context(CONTEXT_2D) {
            Ok(Some(ctx)) => ctx
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| BootstrapError::MissingContext(canvas_id.to_string()))?,
            Ok(None) | Err(_) => return Err(BootstrapError::MissingContext(canvas_id.to_string())),
        };
        Ok(Self { canvas, context })
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// The 2D context, for consumers that draw.
    #[must_use]
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.context
    }
}

impl RasterSurface for HtmlSurface {
    type Pixels = ImageData;

    fn backing_size(&self) -> Size {
        Size::new(self.canvas.width(), self.canvas.height())
    }

    fn set_backing_size(&mut self, size: Size) -> Result<(), SurfaceError> {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        Ok(())
    }

    fn capture(&self, rect: Rect) -> Result<CapturedFrame<ImageData>, SurfaceError> {
        if rect.is_empty() {
            return Err(SurfaceError::EmptyRegion(rect));
        }
        let pixels = self.context.get_image_data(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        )?;
        Ok(CapturedFrame { rect, pixels })
    }

    fn restore(&mut self, frame: &CapturedFrame<ImageData>, x: u32, y: u32) -> Result<(), SurfaceError> {
        self.context.put_image_data(&frame.pixels, f64::from(x), f64::from(y))?;
        Ok(())
    }
}

// =============================================================
// Viewport
// =============================================================

/// `window.innerWidth` × `window.innerHeight`.
pub struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Viewport for WindowViewport {
    fn size(&self) -> Size {
        Size::from_css(css_px(self.window.inner_width(), "innerWidth"), css_px(self.window.inner_height(), "innerHeight"))
    }
}

fn css_px(value: Result<JsValue, JsValue>, name: &str) -> f64 {
    match value {
        Ok(v) => v.as_f64().unwrap_or_else(|| {
            log::warn!("window.{name} is not a number: {v:?}");
            0.0
        }),
        Err(err) => {
            log::warn!("window.{name} unavailable: {}", describe_js(&err));
            0.0
        }
    }
}

// =============================================================
// Module source
// =============================================================

// The generated snippet lives at `<bundle>/snippets/<crate>-<hash>/inline0.js`; two
// levels up is the bundle root.
#[wasm_bindgen(inline_js = "export function import_module(path) { \
    return import(new URL(path, new URL('../../', import.meta.url)).href); \
}")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn import_module(path: &str) -> Result<js_sys::Promise, JsValue>;
}

/// Loads an ES module with the host's dynamic `import()`.
///
/// Relative paths resolve against this crate's deployment bundle (the
/// directory holding the generated JS glue), not the page's base URI, so the
/// module is found wherever the page itself is served from. Absolute URLs
/// pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicImport;

impl ModuleSource for DynamicImport {
    type Module = js_sys::Object;

    async fn load(&self, path: &str) -> Result<js_sys::Object, LoadError> {
        let promise = import_module(path).map_err(|e| LoadError::Import(describe_js(&e)))?;
        let namespace = JsFuture::from(promise).await.map_err(|e| LoadError::Import(describe_js(&e)))?;
        namespace.dyn_into::<js_sys::Object>().map_err(|v| LoadError::NotAModule(describe_js(&v)))
    }
}

// =============================================================
// Resize wiring
// =============================================================

/// A `resize` listener on `window`. Unregistered on drop.
pub struct ResizeListener {
    window: Window,
    callback: Closure<dyn FnMut(Event)>,
}

impl ResizeListener {
    /// Call `on_resize` for every `resize` event the window delivers.
    ///
    /// # Errors
    ///
    /// [`BootstrapError::Listener`] if the window refuses the listener.
    pub fn register(window: &Window, mut on_resize: impl FnMut() + 'static) -> Result<Self, BootstrapError> {
        let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| on_resize());
        window
            .add_event_listener_with_callback(RESIZE_EVENT, callback.as_ref().unchecked_ref())
            .map_err(|e| BootstrapError::Listener(describe_js(&e)))?;
        Ok(Self { window: window.clone(), callback })
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback(RESIZE_EVENT, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove resize listener: {}", describe_js(&err));
        }
    }
}

pub type BrowserSizer = SurfaceSizeManager<HtmlSurface, WindowViewport>;
type BrowserDispatcher = ResizeDispatcher<HtmlSurface, WindowViewport>;

/// A bound page: the sized canvas plus its live resize listener.
pub struct Bootstrap {
    dispatcher: Rc<BrowserDispatcher>,
    _listener: ResizeListener,
}

impl Bootstrap {
    /// Bind the canvas named by `config` to the window.
    ///
    /// The startup resize runs to completion before the listener exists, so
    /// no host resize event can precede it.
    ///
    /// # Errors
    ///
    /// Any [`BootstrapError`]; the page is left without a resize listener.
    pub fn start(config: &BootstrapConfig) -> Result<Self, BootstrapError> {
        let window = web_sys::window().ok_or(BootstrapError::MissingWindow)?;
        let document = window.document().ok_or(BootstrapError::MissingDocument)?;

        let surface = HtmlSurface::from_document(&document, &config.canvas_id)?;
        let mut sizer = SurfaceSizeManager::new(surface, WindowViewport::new(window.clone()));
        let report = sizer.handle_resize()?;
        log::info!(
            "canvas `{}` bound at {}x{}",
            config.canvas_id,
            report.current.width,
            report.current.height
        );

        let dispatcher = Rc::new(ResizeDispatcher::new(sizer));
        let handler = Rc::clone(&dispatcher);
        let listener = ResizeListener::register(&window, move || on_resize(&handler))?;

        Ok(Self { dispatcher, _listener: listener })
    }

    /// Shared handle to the sizer, for consumers that draw into the canvas.
    ///
    /// A resize that arrives while a consumer holds the borrow runs once it
    /// is released.
    #[must_use]
    pub fn sizer(&self) -> Rc<RefCell<BrowserSizer>> {
        Rc::clone(self.dispatcher.sizer())
    }
}

fn on_resize(dispatcher: &Rc<BrowserDispatcher>) {
    let retry_scheduled = dispatcher.is_pending();
    match dispatcher.signal() {
        Dispatch::Ran(result) => log_resize(result),
        Dispatch::Deferred if retry_scheduled => {}
        Dispatch::Deferred => {
            log::debug!("resize deferred while the surface is borrowed");
            wasm_bindgen_futures::spawn_local(retry_resize(Rc::clone(dispatcher)));
        }
    }
}

/// Poll until the deferred resize has run.
async fn retry_resize(dispatcher: Rc<BrowserDispatcher>) {
    loop {
        gloo_timers::future::sleep(Duration::from_millis(RESIZE_RETRY_MS)).await;
        match dispatcher.drain() {
            Some(Dispatch::Deferred) => {}
            Some(Dispatch::Ran(result)) => {
                log_resize(result);
                return;
            }
            None => return,
        }
    }
}

fn log_resize(result: Result<ResizeReport, SurfaceError>) {
    if let Err(err) = result {
        log::error!("resize failed: {err}");
    }
}

/// Spawn the external module load; never awaited.
pub fn spawn_module_load(path: &str) {
    ModuleLoader::new(DynamicImport, path).spawn();
}

/// Route `log` to the browser console at `level`. Safe to call repeatedly.
pub fn install_logger(level: log::LevelFilter) {
    let Some(max) = level.to_level() else {
        log::set_max_level(log::LevelFilter::Off);
        return;
    };
    if console_log::init_with_level(max).is_err() {
        // Already installed by an earlier boot; only the filter changes.
        log::set_max_level(level);
    }
}
