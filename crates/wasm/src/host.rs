//! Integration with the host page's `window.$docsify` object.
//!
//! The host owns a plugin list at `$docsify.plugins`. Each entry is a
//! function called once with a hook object exposing `mounted(fn)` and
//! `doneEach(fn)`. We append one bridge function that applies the
//! process-wide [`PluginRegistry`] to a Rust [`Hook`] and hands the
//! resulting callbacks to the host's hook object.

use crate::dom::WebDom;
use crate::error::{ErrorCode, TocWasmError};
use crate::scheduler::RafScheduler;
use js_sys::{Array, Function, Object, Reflect, RegExp};
use pagetoc_core::{Hook, PluginRegistry, RenderContext, TocConfig, TocPlugin};
use serde::de::DeserializeOwned;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

const HOST_GLOBAL: &str = "$docsify";
const CONFIG_KEY: &str = "toc";
const PLUGINS_KEY: &str = "plugins";
const IGNORE_KEY: &str = "ignoreHeaders";

thread_local! {
    static INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// The host's `$docsify` object, created if the page has none yet.
pub fn host_object(window: &Window) -> Result<Object, TocWasmError> {
    let existing = Reflect::get(window, &HOST_GLOBAL.into())
        .map_err(|err| TocWasmError::host(format!("Cannot read {}: {:?}", HOST_GLOBAL, err)))?;
    if let Ok(object) = existing.dyn_into::<Object>() {
        return Ok(object);
    }

    let object = Object::new();
    Reflect::set(window, &HOST_GLOBAL.into(), &object)
        .map_err(|err| TocWasmError::host(format!("Cannot create {}: {:?}", HOST_GLOBAL, err)))?;
    Ok(object)
}

/// Reads `$docsify.toc`; a missing object yields the defaults.
///
/// Options are read one field at a time, so a malformed field falls back
/// to its default without discarding the others.
pub fn read_config(window: &Window) -> Result<TocConfig, TocWasmError> {
    let host = host_object(window)?;
    let value = Reflect::get(&host, &CONFIG_KEY.into()).unwrap_or(JsValue::UNDEFINED);
    Ok(config_from_value_lenient(&value))
}

/// Strict conversion: the first malformed field is an error.
pub fn config_from_value(value: &JsValue) -> Result<TocConfig, TocWasmError> {
    read_options(value, |err| Err(err))
}

/// Conversion that logs and skips malformed fields and pattern entries.
pub fn config_from_value_lenient(value: &JsValue) -> TocConfig {
    read_options(value, |err| {
        log::warn!("{}; using the default for it", err);
        Ok(())
    })
    .unwrap_or_default()
}

fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

fn read_options(
    options: &JsValue,
    on_error: impl Fn(TocWasmError) -> Result<(), TocWasmError>,
) -> Result<TocConfig, TocWasmError> {
    let mut config = TocConfig::default();
    if is_absent(options) {
        return Ok(config);
    }
    if !options.is_object() {
        on_error(TocWasmError::new(ErrorCode::Json, "ToC options must be an object"))?;
        return Ok(config);
    }

    if let Some(target) = recover(field(options, "target"), &on_error)? {
        config.target = target;
    }
    if let Some(level) = recover(field(options, "tocMaxLevel"), &on_error)? {
        config.toc_max_level = level;
    }
    if let Some(threshold) = recover(field(options, "noTocIfHeadingsFoundIs"), &on_error)? {
        config.no_toc_if_headings_found_is = threshold;
    }
    if let Some(patterns) = ignore_patterns(options, &on_error)? {
        config.ignore_headers = patterns;
    }
    Ok(config)
}

fn recover<T>(
    result: Result<Option<T>, TocWasmError>,
    on_error: &impl Fn(TocWasmError) -> Result<(), TocWasmError>,
) -> Result<Option<T>, TocWasmError> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => on_error(err).map(|()| None),
    }
}

fn field<T: DeserializeOwned>(options: &JsValue, key: &str) -> Result<Option<T>, TocWasmError> {
    let value = Reflect::get(options, &key.into()).unwrap_or(JsValue::UNDEFINED);
    if is_absent(&value) {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|err| TocWasmError::new(ErrorCode::Json, format!("Invalid '{}': {}", key, err)))
}

/// Reads `ignoreHeaders`, whose entries may be strings or `RegExp` objects.
fn ignore_patterns(
    options: &JsValue,
    on_error: &impl Fn(TocWasmError) -> Result<(), TocWasmError>,
) -> Result<Option<Vec<String>>, TocWasmError> {
    let value = Reflect::get(options, &IGNORE_KEY.into()).unwrap_or(JsValue::UNDEFINED);
    if is_absent(&value) {
        return Ok(None);
    }
    let Some(entries) = value.dyn_ref::<Array>() else {
        on_error(TocWasmError::new(
            ErrorCode::Json,
            format!("Invalid '{}': expected an array", IGNORE_KEY),
        ))?;
        return Ok(None);
    };

    let mut patterns = Vec::with_capacity(entries.length() as usize);
    for (index, entry) in entries.iter().enumerate() {
        match pattern_source(&entry) {
            Some(pattern) => patterns.push(pattern),
            None => on_error(TocWasmError::new(
                ErrorCode::Json,
                format!("Invalid '{}[{}]': expected a string or RegExp", IGNORE_KEY, index),
            ))?,
        }
    }
    Ok(Some(patterns))
}

/// A pattern string, or a `RegExp`'s source with its `i`, `m` and `s` flags
/// carried over as an inline group.
fn pattern_source(entry: &JsValue) -> Option<String> {
    if let Some(regex) = entry.dyn_ref::<RegExp>() {
        let source = String::from(regex.source());
        let flags: String = String::from(regex.flags())
            .chars()
            .filter(|flag| matches!(flag, 'i' | 'm' | 's'))
            .collect();
        if flags.is_empty() {
            return Some(source);
        }
        return Some(format!("(?{}){}", flags, source));
    }
    entry.as_string()
}

/// Registers the widget and appends the bridge to the host's plugin list.
///
/// Returns `false` if this was already done.
pub fn install(window: &Window) -> Result<bool, TocWasmError> {
    if INSTALLED.with(Cell::get) {
        return Ok(false);
    }

    let host = host_object(window)?;
    let plugins = match Reflect::get(&host, &PLUGINS_KEY.into()) {
        Ok(value) if Array::is_array(&value) => value.unchecked_into::<Array>(),
        _ => Array::new(),
    };

    PluginRegistry::with_global(|registry| {
        let window = window.clone();
        registry.register(Rc::new(move |hook: &mut Hook| install_toc(&window, hook)));
    });

    plugins.push(&bridge().into_js_value());
    Reflect::set(&host, &PLUGINS_KEY.into(), &plugins)
        .map_err(|err| TocWasmError::host(format!("Cannot set plugin list: {:?}", err)))?;

    INSTALLED.with(|installed| installed.set(true));
    log::debug!("ToC plugin appended at position {}", plugins.length() - 1);
    Ok(true)
}

/// Builds the widget for the live page. Runs when the host starts its
/// plugins, so the options are read after the page has set them.
fn install_toc(window: &Window, hook: &mut Hook) {
    let Some(document) = window.document() else {
        log::warn!("No document; ToC plugin not installed");
        return;
    };

    let config = match read_config(window) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("{}; using default ToC options", err);
            TocConfig::default()
        }
    };

    let ctx = RenderContext::new(
        Rc::new(WebDom::with_window(window.clone(), document)),
        Rc::new(RafScheduler::new(window.clone())),
        config.compile_lenient(),
    );
    TocPlugin::new(ctx).install(hook);
}

/// The function placed in the host's plugin list.
fn bridge() -> Closure<dyn FnMut(JsValue, JsValue)> {
    Closure::wrap(Box::new(|js_hook: JsValue, _vm: JsValue| {
        let mut hook = Hook::new();
        PluginRegistry::with_global(|registry| registry.apply(&mut hook));
        if let Err(err) = forward(&js_hook, hook) {
            log::warn!("{}", err);
        }
    }) as Box<dyn FnMut(JsValue, JsValue)>)
}

/// Hands each collected callback to the host hook slot of the same name.
fn forward(js_hook: &JsValue, mut hook: Hook) -> Result<(), TocWasmError> {
    let (mounted, done_each) = hook.take();
    for (slot, callbacks) in [("mounted", mounted), ("doneEach", done_each)] {
        let register = Reflect::get(js_hook, &slot.into())
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
            .ok_or_else(|| TocWasmError::host(format!("Host hook has no '{}' slot", slot)))?;

        for callback in callbacks {
            let callback = Closure::wrap(Box::new(move || callback()) as Box<dyn FnMut()>);
            register
                .call1(js_hook, &callback.into_js_value())
                .map_err(|err| TocWasmError::host(format!("hook.{} failed: {:?}", slot, err)))?;
        }
    }
    Ok(())
}
