//! WebAssembly bindings for the pagetoc sidebar.
//!
//! Loading the module registers the widget with the host page: a plugin
//! function is appended to `window.$docsify.plugins`, after any plugins the
//! page already lists. When the host runs its plugins the widget reads
//! `window.$docsify.toc` and attaches to the `mounted` and `doneEach` hooks.
//!
//! ## Module Structure
//!
//! - [`dom`] - `WebDom`, the `Dom` implementation over `web-sys`
//! - [`scheduler`] - `RafScheduler`, frames via `requestAnimationFrame`
//! - [`host`] - reading options and joining the host's plugin list
//! - [`error`] - Error types with JavaScript interop
//!
//! # Example
//!
//! ```javascript
//! window.$docsify = {
//!   toc: { tocMaxLevel: 3, ignoreHeaders: ["^Changelog"] },
//! };
//!
//! import init from '@pagetoc/wasm';
//! await init();
//! ```

pub mod dom;
pub mod error;
pub mod host;
pub mod scheduler;

pub use dom::WebDom;
pub use error::{ErrorCode, TocWasmError};
pub use scheduler::RafScheduler;

use pagetoc_core::TocConfig;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// Sets up panic messages and registers the widget with the host page.
/// Called automatically when using wasm-pack's generated JavaScript.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-logging")]
    {
        console_log::init_with_level(log::Level::Debug).ok();
    }

    if let Err(err) = register() {
        log::warn!("ToC plugin not registered ({}): {}", err.code().as_str(), err);
    }
}

fn register() -> Result<bool, TocWasmError> {
    let window = web_sys::window().ok_or_else(|| TocWasmError::host("No window object available"))?;
    host::install(&window)
}

/// Registers the widget with the host page if that has not happened yet.
///
/// Returns `true` if the plugin was appended by this call.
#[wasm_bindgen(js_name = registerPlugin)]
pub fn register_plugin() -> Result<bool, JsValue> {
    Ok(register()?)
}

/// Checks a ToC options object, failing on malformed values and invalid
/// `ignoreHeaders` patterns. `RegExp` entries are accepted.
#[wasm_bindgen(js_name = validateConfig)]
pub fn validate_config(options: JsValue) -> Result<(), JsValue> {
    let config = host::config_from_value(&options)?;
    config.compile().map_err(TocWasmError::from)?;
    Ok(())
}

/// The default ToC options as a plain object.
#[wasm_bindgen(js_name = defaultConfig)]
pub fn default_config() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&TocConfig::default())
        .map_err(|err| TocWasmError::from(err).into())
}

/// Get the version of the pagetoc-wasm library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
