//! Pointer gestures over the grid
//!
//! Drag and resize share one lifecycle:
//!
//! ```text
//! Idle --grab--> Active --move--> Active (preview only)
//!                Active --release--> Idle (commit or revert)
//! ```
//!
//! Controllers never write to a `LayoutModel` before release, and release
//! always re-validates the final candidate against the current model.

pub mod drag;
pub mod resize;

pub use drag::DragController;
pub use resize::ResizeController;

use serde::{Deserialize, Serialize};
use crate::layout::LayoutModel;
use crate::models::{LayoutError, LayoutItem, PointerPosition};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum GestureKind {
    Drag,
    Resize,
}

/// Tentative rectangle published while a gesture is in flight
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LayoutPreview {
    pub gesture: GestureKind,
    pub item: LayoutItem,
    /// False when the candidate overlaps another item
    pub valid: bool,
}

/// Why a gesture ended without writing anything
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RevertReason {
    /// Final candidate overlapped another item
    Collision,
    /// Pointer never produced a different rectangle
    Unchanged,
    /// Cancelled, or the active breakpoint changed mid-gesture
    Interrupted,
    /// Final candidate broke a bounds or size constraint
    Invalid,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum GestureOutcome {
    Committed {
        gesture: GestureKind,
        item: LayoutItem,
        previous: LayoutItem,
    },
    Reverted {
        gesture: GestureKind,
        id: String,
        reason: RevertReason,
    },
}

impl GestureOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, GestureOutcome::Committed { .. })
    }
}

/// Input to the engine's pointer router
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerEvent {
    /// Pointer down on an item's drag handle
    GrabDrag { id: String, position: PointerPosition },
    /// Pointer down on an item's resize handle
    GrabResize { id: String, position: PointerPosition },
    Move { position: PointerPosition },
    Release { position: Option<PointerPosition> },
    Cancel,
}

/// State captured when a gesture starts
#[derive(Clone, Debug)]
pub(crate) struct GestureSession {
    pub breakpoint: String,
    pub start: LayoutItem,
    pub start_pointer: PointerPosition,
    pub candidate: Option<LayoutItem>,
}

impl GestureSession {
    /// Capture `id` from `model` if it can be grabbed
    pub(crate) fn capture(
        kind: GestureKind,
        model: &LayoutModel,
        breakpoint: &str,
        id: &str,
        pointer: PointerPosition,
    ) -> Option<Self> {
        if !pointer.is_finite() {
            log::debug!("{:?} grab on '{}' ignored: non-finite pointer", kind, id);
            return None;
        }
        let Some(item) = model.get(id) else {
            log::warn!("{:?} grab on unknown item '{}' ignored", kind, id);
            return None;
        };
        if item.fixed {
            log::debug!("{:?} grab on fixed item '{}' ignored", kind, id);
            return None;
        }

        Some(Self {
            breakpoint: breakpoint.to_string(),
            start: item.clone(),
            start_pointer: pointer,
            candidate: None,
        })
    }

    /// Validate the last candidate and write it, or revert
    pub(crate) fn finish(self, kind: GestureKind, model: &mut LayoutModel) -> GestureOutcome {
        let id = self.start.id.clone();
        let reverted = |reason| GestureOutcome::Reverted {
            gesture: kind,
            id: id.clone(),
            reason,
        };

        let candidate = match self.candidate {
            Some(candidate) if !candidate.same_rect(&self.start) => candidate,
            _ => return reverted(RevertReason::Unchanged),
        };

        match model.commit(&candidate) {
            Ok(previous) => {
                log::info!(
                    "{:?} committed '{}': ({}, {}, {}x{}) -> ({}, {}, {}x{})",
                    kind, id, previous.x, previous.y, previous.w, previous.h,
                    candidate.x, candidate.y, candidate.w, candidate.h
                );
                let item = model.get(&id).cloned().unwrap_or(candidate);
                GestureOutcome::Committed {
                    gesture: kind,
                    item,
                    previous,
                }
            }
            Err(LayoutError::Collision { other, .. }) => {
                log::debug!("{:?} of '{}' reverted: collides with '{}'", kind, id, other);
                reverted(RevertReason::Collision)
            }
            Err(e) => {
                log::warn!("{:?} of '{}' reverted: {}", kind, id, e);
                reverted(RevertReason::Invalid)
            }
        }
    }

    pub(crate) fn interrupt(self, kind: GestureKind) -> GestureOutcome {
        log::debug!("{:?} of '{}' interrupted", kind, self.start.id);
        GestureOutcome::Reverted {
            gesture: kind,
            id: self.start.id,
            reason: RevertReason::Interrupted,
        }
    }
}
