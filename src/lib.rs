//! Trading Terminal Grid Layout WASM Module
//!
//! Collision-aware grid layout engine for the dashboard: widget geometry,
//! first-fit placement, pointer-to-grid mapping, drag/resize gestures and
//! responsive breakpoints. Widget content and rendering live in JavaScript.

pub mod models;
pub mod layout;
pub mod interaction;
pub mod undo;
pub mod engine;
pub mod api;

// Re-export commonly used types
pub use models::*;
pub use layout::{LayoutModel, LayoutSnapshot};
pub use interaction::{GestureKind, GestureOutcome, LayoutPreview, PointerEvent, RevertReason};
pub use engine::GridEngine;
pub use api::GridLayoutEngine;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if console_log::init_with_level(log::Level::Debug).is_err() {
            log::warn!("logger was already initialized");
        }
    }

    log::info!("Grid layout WASM module initialized");
}
