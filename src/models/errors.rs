//! Error types for the layout engine
//!
//! Rejected gestures are not errors (they revert). These variants cover
//! requests that are malformed or would break a layout invariant.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("item '{0}' is already registered")]
    DuplicateId(String),

    #[error("unknown item '{0}'")]
    UnknownItem(String),

    #[error("unknown breakpoint '{0}'")]
    UnknownBreakpoint(String),

    #[error("invalid widget constraints for '{id}': {reason}")]
    InvalidConstraints { id: String, reason: String },

    /// Item would extend past the last column
    #[error("item '{id}' out of bounds: x={x}, w={w}, columns={columns}")]
    OutOfBounds { id: String, x: u32, w: u32, columns: u32 },

    /// Item would extend past the last row
    #[error("item '{id}' out of bounds: y={y}, h={h}, row limit={limit}")]
    RowLimit { id: String, y: u32, h: u32, limit: u32 },

    /// Size outside of the item's min/max constraints
    #[error("item '{id}' violates size constraints: {reason}")]
    ConstraintViolation { id: String, reason: String },

    #[error("item '{id}' collides with '{other}'")]
    Collision { id: String, other: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),

    #[error("a {0} gesture is in flight")]
    GestureInFlight(String),

    #[error("nothing to {0}")]
    EmptyHistory(&'static str),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
