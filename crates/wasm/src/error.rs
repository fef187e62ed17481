//! Error handling for WASM bindings.
//!
//! Converts configuration errors into JavaScript `Error` objects carrying a
//! `code` property. Rendering never produces an error.

use pagetoc_core::TocError;
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Error codes for TypeScript consumption.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid option value, such as a bad `ignoreHeaders` pattern
    Config,
    /// The options object could not be deserialized
    Json,
    /// The host page is not usable (no window, no plugin list)
    Host,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG_ERROR",
            ErrorCode::Json => "JSON_ERROR",
            ErrorCode::Host => "HOST_ERROR",
        }
    }
}

/// A JavaScript-friendly error type.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TocWasmError {
    code: ErrorCode,
    message: String,
}

impl TocWasmError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn host(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Host, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl From<TocError> for TocWasmError {
    fn from(err: TocError) -> Self {
        let code = match &err {
            TocError::InvalidPattern { .. } | TocError::Config(_) => ErrorCode::Config,
            TocError::Json(_) => ErrorCode::Json,
        };
        Self::new(code, err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for TocWasmError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::new(ErrorCode::Json, err.to_string())
    }
}

impl From<TocWasmError> for JsValue {
    fn from(err: TocWasmError) -> Self {
        let js_error = js_sys::Error::new(&err.message);
        js_sys::Reflect::set(&js_error, &"code".into(), &JsValue::from_str(err.code.as_str())).ok();
        js_error.into()
    }
}
