//! Resize gesture: changes an item's size, origin fixed
//!
//! The pointer delta since the grab is converted to whole grid units and
//! added to the size captured at grab time, then clamped to the item's
//! constraints and the right edge of the grid. A clamped candidate that
//! still collides reverts the whole gesture on release.

use crate::layout::{collides, unit_delta, LayoutModel};
use crate::models::{ContainerGeometry, LayoutItem, PointerPosition, MAX_ROWS};
use super::{GestureKind, GestureOutcome, GestureSession, LayoutPreview};

#[derive(Debug, Default)]
pub struct ResizeController {
    session: Option<GestureSession>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.start.id.as_str())
    }

    pub fn start_item(&self) -> Option<&LayoutItem> {
        self.session.as_ref().map(|s| &s.start)
    }

    pub fn breakpoint(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.breakpoint.as_str())
    }

    pub fn begin(&mut self, model: &LayoutModel, breakpoint: &str, id: &str, pointer: PointerPosition) -> bool {
        if let Some(current) = self.active_id() {
            log::debug!("resize grab on '{}' ignored: '{}' is already resizing", id, current);
            return false;
        }
        self.session = GestureSession::capture(GestureKind::Resize, model, breakpoint, id, pointer);
        if self.session.is_some() {
            log::debug!("resize started on '{}' in '{}'", id, breakpoint);
        }
        self.session.is_some()
    }

    pub fn update(
        &mut self,
        model: &LayoutModel,
        container: &ContainerGeometry,
        pointer: PointerPosition,
    ) -> Option<LayoutPreview> {
        let session = self.session.as_mut()?;
        if !pointer.is_finite() || !container.is_finite() {
            return None;
        }

        let config = model.config();
        let column_width = config.column_width_px(container.width_px);
        let delta_w = unit_delta(pointer.x - session.start_pointer.x, column_width, config.gutter_px);
        let delta_h = unit_delta(pointer.y - session.start_pointer.y, config.row_height_px, config.gutter_px);

        let candidate = clamped_size(&session.start, delta_w, delta_h, config.columns);
        let valid = !collides(&candidate, model.items(), Some(candidate.id.as_str()));

        session.candidate = Some(candidate.clone());
        Some(LayoutPreview {
            gesture: GestureKind::Resize,
            item: candidate,
            valid,
        })
    }

    pub fn release(&mut self, model: &mut LayoutModel) -> Option<GestureOutcome> {
        let session = self.session.take()?;
        Some(session.finish(GestureKind::Resize, model))
    }

    pub fn cancel(&mut self) -> Option<GestureOutcome> {
        let session = self.session.take()?;
        Some(session.interrupt(GestureKind::Resize))
    }
}

/// `start` grown by the given deltas, clamped to its constraints.
///
/// Width is capped at `columns - x` even when `max_w` is larger, height at
/// `MAX_ROWS - y`.
fn clamped_size(start: &LayoutItem, delta_w: i64, delta_h: i64, columns: u32) -> LayoutItem {
    let room = columns.saturating_sub(start.x) as i64;
    let max_w = start.max_w.map_or(room, |m| (m as i64).min(room));
    let rows_left = MAX_ROWS.saturating_sub(start.y) as i64;
    let max_h = start.max_h.map_or(rows_left, |m| (m as i64).min(rows_left));

    let w = (start.w as i64).saturating_add(delta_w).min(max_w).max(start.min_w as i64);
    let h = (start.h as i64).saturating_add(delta_h).min(max_h).max(start.min_h as i64);

    start.resized_to(w as u32, h as u32)
}
