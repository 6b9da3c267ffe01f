//! Grid Layout Engine WASM API
//!
//! This module provides the JavaScript-facing API for the layout engine.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization and error conversion
//! - `core`: The `GridLayoutEngine` class wrapping `engine::GridEngine`

pub mod helpers;
pub mod core;

pub use core::GridLayoutEngine;
