//! Page bootstrap for a full-window canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. On startup it
//! kicks off an asynchronous load of an external computation module and keeps
//! the `<canvas>` backing store sized to the window, carrying previously drawn
//! pixels across every resize. The module load and the sizing never depend on
//! each other: a failed load is logged and the canvas keeps resizing.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`sizing`] | [`sizing::SurfaceSizeManager`]: capture, resize, restore; [`sizing::ResizeDispatcher`] |
//! | [`surface`] | The [`surface::RasterSurface`] and [`surface::Viewport`] seams |
//! | [`raster`] | In-memory RGBA surface with canvas semantics |
//! | [`loader`] | Fire-and-forget [`loader::ModuleLoader`] with an injectable diagnostic sink |
//! | [`browser`] | `web-sys` implementations and the page wiring |
//! | [`config`] | [`config::BootstrapConfig`] and its JSON form |
//! | [`geom`] | `Size` and `Rect` |
//! | [`error`] | Error types |
//! | [`consts`] | Shared constants (element id, module path, pixel layout) |

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub mod browser;
pub mod config;
pub mod consts;
pub mod error;
pub mod geom;
pub mod loader;
pub mod raster;
pub mod sizing;
pub mod surface;

use browser::Bootstrap;
use config::BootstrapConfig;

thread_local! {
    static ACTIVE: RefCell<Option<Bootstrap>> = const { RefCell::new(None) };
    static LOADED_MODULE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Runs when the wasm module is instantiated: binds the page with defaults.
///
/// # Errors
///
/// Throws if the canvas or its 2D context cannot be obtained.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    bind(&BootstrapConfig::default())
}

/// Rebind the page with a JSON config, replacing the current binding.
///
/// The external module is loaded again only if `module_path` changed.
///
/// # Errors
///
/// Throws on an invalid config or if the configured canvas cannot be bound.
/// The previous binding is released either way.
#[wasm_bindgen]
pub fn boot(config_json: &str) -> Result<(), JsValue> {
    let config = BootstrapConfig::from_json(config_json)?;
    bind(&config)
}

fn bind(config: &BootstrapConfig) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    browser::install_logger(config.level_filter()?);

    // Independent of the canvas: started even if binding fails below.
    load_module_once(&config.module_path);

    ACTIVE.with(|active| {
        // Drop the old listener before the new startup resize runs.
        drop(active.borrow_mut().take());
        let bootstrap = Bootstrap::start(config)?;
        *active.borrow_mut() = Some(bootstrap);
        Ok(())
    })
}

fn load_module_once(path: &str) {
    LOADED_MODULE.with(|loaded| {
        let mut loaded = loaded.borrow_mut();
        if loaded.as_deref() == Some(path) {
            return;
        }
        browser::spawn_module_load(path);
        *loaded = Some(path.to_string());
    });
}
