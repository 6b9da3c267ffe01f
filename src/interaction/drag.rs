//! Drag gesture: moves an item's origin, size unchanged

use crate::layout::{collides, to_grid, LayoutModel};
use crate::models::{ContainerGeometry, LayoutItem, PointerPosition, MAX_ROWS};
use super::{GestureKind, GestureOutcome, GestureSession, LayoutPreview};

#[derive(Debug, Default)]
pub struct DragController {
    session: Option<GestureSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Id of the item being dragged
    pub fn active_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.start.id.as_str())
    }

    /// Rectangle captured at grab time
    pub fn start_item(&self) -> Option<&LayoutItem> {
        self.session.as_ref().map(|s| &s.start)
    }

    /// Breakpoint the gesture was started in
    pub fn breakpoint(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.breakpoint.as_str())
    }

    /// Start dragging `id`. Returns false (and changes nothing) if a drag is
    /// already in flight or the item cannot be grabbed.
    pub fn begin(&mut self, model: &LayoutModel, breakpoint: &str, id: &str, pointer: PointerPosition) -> bool {
        if let Some(current) = self.active_id() {
            log::debug!("drag grab on '{}' ignored: '{}' is already dragging", id, current);
            return false;
        }
        self.session = GestureSession::capture(GestureKind::Drag, model, breakpoint, id, pointer);
        if self.session.is_some() {
            log::debug!("drag started on '{}' in '{}'", id, breakpoint);
        }
        self.session.is_some()
    }

    /// Recompute the candidate origin. Never mutates `model`.
    pub fn update(
        &mut self,
        model: &LayoutModel,
        container: &ContainerGeometry,
        pointer: PointerPosition,
    ) -> Option<LayoutPreview> {
        let session = self.session.as_mut()?;
        let config = model.config();
        let coord = to_grid(pointer, container, config)?;

        let max_x = config.columns.saturating_sub(session.start.w);
        let max_y = MAX_ROWS.saturating_sub(session.start.h);
        let candidate = session.start.moved_to(coord.x.min(max_x), coord.y.min(max_y));
        let valid = !collides(&candidate, model.items(), Some(candidate.id.as_str()));

        session.candidate = Some(candidate.clone());
        Some(LayoutPreview {
            gesture: GestureKind::Drag,
            item: candidate,
            valid,
        })
    }

    /// Pointer up: commit the last candidate if it still fits, else revert
    pub fn release(&mut self, model: &mut LayoutModel) -> Option<GestureOutcome> {
        let session = self.session.take()?;
        Some(session.finish(GestureKind::Drag, model))
    }

    /// Abandon the gesture without touching the model
    pub fn cancel(&mut self) -> Option<GestureOutcome> {
        let session = self.session.take()?;
        Some(session.interrupt(GestureKind::Drag))
    }
}
