//! Models module for the grid layout engine
//!
//! Geometry, configuration and error types shared by the layout
//! algorithms, the gesture controllers and the WASM API.

pub mod item;
pub mod config;
pub mod errors;

// Re-export commonly used types
pub use item::{GridCoord, LayoutItem, WidgetSpec, MAX_ROWS};
pub use config::{BreakpointSpec, ContainerGeometry, EngineConfig, GridConfig, PointerPosition};
pub use errors::{LayoutError, LayoutResult};
