//! Shared helpers for WASM API operations
//!
//! This module contains common patterns for serialization, deserialization
//! and error conversion across the JavaScript boundary. Every failure is
//! logged before it is handed back to JavaScript.

use wasm_bindgen::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::models::LayoutError;

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize an optional value, mapping `None` to `undefined`
pub fn serialize_opt<T: Serialize>(value: Option<&T>, error_context: &str) -> Result<JsValue, JsValue> {
    match value {
        Some(value) => serialize(value, error_context),
        None => Ok(JsValue::UNDEFINED),
    }
}

// ============================================================================
// Error Conversion
// ============================================================================

/// Convert an engine error into a JavaScript error string
pub fn to_js_error(error: LayoutError, context: &str) -> JsValue {
    let msg = format!("{}: {}", context, error);
    log::warn!("{}", msg);
    JsValue::from_str(&msg)
}

/// True for `undefined` and `null`
pub fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}
