//! Grid layout core
//!
//! Pure geometry (collision, placement, pointer mapping) plus the owned
//! per-breakpoint layout state built on top of it.

pub mod collision;
pub mod placement;
pub mod pointer;
pub mod model;
pub mod breakpoints;

pub use collision::{collides, first_collision};
pub use placement::{find_position, find_position_for};
pub use pointer::{grid_to_pixels, to_grid, unit_delta, PixelRect};
pub use model::{LayoutModel, LayoutSnapshot};
pub use breakpoints::{Breakpoint, BreakpointManager};
