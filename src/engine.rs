//! Grid layout engine
//!
//! Owns every breakpoint's layout, the gesture controllers and the undo
//! history, and routes pointer events between them. Observers only ever see
//! owned snapshots; nothing mutable escapes.
//!
//! Events are processed one at a time, to completion. At most one gesture
//! (drag or resize) is in flight; a second grab is dropped.

use crate::interaction::{
    DragController, GestureKind, GestureOutcome, LayoutPreview, PointerEvent, ResizeController,
};
use crate::layout::{find_position_for, BreakpointManager, LayoutModel, LayoutSnapshot};
use crate::models::{
    ContainerGeometry, EngineConfig, GridConfig, LayoutError, LayoutItem, LayoutResult, PointerPosition,
    WidgetSpec,
};
use crate::undo::{LayoutCommand, LayoutHistory};

pub type ChangeListener = Box<dyn FnMut(&LayoutSnapshot)>;
pub type PreviewListener = Box<dyn FnMut(&LayoutPreview)>;

/// Handle returned by `on_change` / `on_preview`, used to unsubscribe
pub type ListenerId = u32;

/// Which gesture controller is in flight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ActiveGesture {
    Drag,
    Resize,
}

pub struct GridEngine {
    layouts: BreakpointManager,
    container: ContainerGeometry,
    drag: DragController,
    resize: ResizeController,
    history: LayoutHistory,
    change_listeners: Vec<(ListenerId, ChangeListener)>,
    preview_listeners: Vec<(ListenerId, PreviewListener)>,
    next_listener_id: ListenerId,
}

impl GridEngine {
    pub fn new(config: EngineConfig) -> LayoutResult<Self> {
        let layouts = BreakpointManager::new(&config)?;
        let width = config.initial_width_px.unwrap_or(0.0);

        log::info!(
            "grid engine created: breakpoints={:?}, active='{}'",
            layouts.names(),
            layouts.active_name()
        );

        Ok(Self {
            layouts,
            container: ContainerGeometry::new(0.0, 0.0, width, 0.0),
            drag: DragController::new(),
            resize: ResizeController::new(),
            history: LayoutHistory::new(config.history_limit),
            change_listeners: Vec::new(),
            preview_listeners: Vec::new(),
            next_listener_id: 1,
        })
    }

    // ------------------------------------------------------------------
    // Widget lifecycle
    // ------------------------------------------------------------------

    /// Register a widget, placing it independently in every breakpoint.
    ///
    /// Either every breakpoint gets the item or none does.
    pub fn register(&mut self, spec: WidgetSpec) -> LayoutResult<()> {
        spec.validate()?;
        if self.layouts.iter().any(|bp| bp.model.contains(&spec.id)) {
            return Err(LayoutError::DuplicateId(spec.id));
        }

        let mut placed = Vec::new();
        for bp in self.layouts.iter() {
            let item = place(&bp.model, &spec);
            bp.model.validate(&item, None)?;
            placed.push(item);
        }

        for (bp, item) in self.layouts.iter_mut().zip(placed) {
            log::info!(
                "registered '{}' in '{}' at ({}, {}) size {}x{}",
                item.id, bp.name, item.x, item.y, item.w, item.h
            );
            bp.model.insert(item)?;
        }

        self.notify_change();
        Ok(())
    }

    /// Remove a widget from every breakpoint. Unknown ids are a no-op.
    pub fn unregister(&mut self, id: &str) -> bool {
        if self.drag.active_id() == Some(id) || self.resize.active_id() == Some(id) {
            self.interrupt_gesture();
        }

        let mut removed = false;
        for bp in self.layouts.iter_mut() {
            removed |= bp.model.remove(id).is_some();
        }

        if removed {
            log::info!("unregistered '{}'", id);
            self.history.forget_item(id);
            self.notify_change();
        }
        removed
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn active_layout(&self) -> LayoutSnapshot {
        self.layouts.active_snapshot()
    }

    pub fn layout(&self, breakpoint: &str) -> LayoutResult<LayoutSnapshot> {
        Ok(self.layouts.get(breakpoint)?.snapshot(breakpoint))
    }

    pub fn layout_config(&self, breakpoint: &str) -> LayoutResult<GridConfig> {
        Ok(*self.layouts.get(breakpoint)?.config())
    }

    pub fn active_breakpoint(&self) -> &str {
        self.layouts.active_name()
    }

    pub fn breakpoints(&self) -> Vec<String> {
        self.layouts.names()
    }

    pub fn container(&self) -> ContainerGeometry {
        self.container
    }

    pub fn is_gesture_active(&self) -> bool {
        self.active_gesture().is_some()
    }

    /// Full invariant scan over every breakpoint
    pub fn check_invariants(&self) -> LayoutResult<()> {
        for bp in self.layouts.iter() {
            bp.model.check_invariants()?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Host geometry
    // ------------------------------------------------------------------

    /// Update the hosting surface geometry, switching breakpoints if the
    /// width crosses a threshold. Non-finite geometry is ignored.
    ///
    /// Returns the outcome of a gesture interrupted by the switch.
    pub fn set_container(&mut self, container: ContainerGeometry) -> Option<GestureOutcome> {
        if !container.is_finite() {
            log::warn!("ignoring non-finite container geometry {:?}", container);
            return None;
        }
        self.container = container;

        let name = self.layouts.update_width(container.width_px)?.to_string();
        log::info!("breakpoint switched to '{}' at width {}px", name, container.width_px);

        // Captured geometry belongs to the previous breakpoint
        let interrupted = self.interrupt_gesture();
        self.notify_change();
        interrupted
    }

    // ------------------------------------------------------------------
    // Pointer routing
    // ------------------------------------------------------------------

    /// Route one pointer event.
    ///
    /// Returns the gesture outcome for events that end a gesture.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<GestureOutcome> {
        match event {
            PointerEvent::GrabDrag { id, position } => {
                self.grab(GestureKind::Drag, &id, position);
                None
            }
            PointerEvent::GrabResize { id, position } => {
                self.grab(GestureKind::Resize, &id, position);
                None
            }
            PointerEvent::Move { position } => {
                self.pointer_move(position);
                None
            }
            PointerEvent::Release { position } => self.release(position),
            PointerEvent::Cancel => self.cancel_gesture(),
        }
    }

    /// Start a gesture on `id`. Returns false if the grab was dropped.
    pub fn grab(&mut self, kind: GestureKind, id: &str, position: PointerPosition) -> bool {
        if let Some(active) = self.active_gesture() {
            log::debug!("{:?} grab on '{}' dropped: {:?} in flight", kind, id, active);
            return false;
        }

        let breakpoint = self.layouts.active_name().to_string();
        let model = self.layouts.active();
        match kind {
            GestureKind::Drag => self.drag.begin(model, &breakpoint, id, position),
            GestureKind::Resize => self.resize.begin(model, &breakpoint, id, position),
        }
    }

    /// Pointer move: update the in-flight gesture's preview
    pub fn pointer_move(&mut self, position: PointerPosition) -> Option<LayoutPreview> {
        let model = self.layouts.active();
        let preview = match self.active_gesture()? {
            ActiveGesture::Drag => self.drag.update(model, &self.container, position),
            ActiveGesture::Resize => self.resize.update(model, &self.container, position),
        }?;

        log::debug!(
            "preview '{}' ({}, {}, {}x{}) valid={}",
            preview.item.id, preview.item.x, preview.item.y, preview.item.w, preview.item.h, preview.valid
        );
        self.notify_preview(&preview);
        Some(preview)
    }

    /// Pointer up: commit or revert the in-flight gesture.
    ///
    /// A final position, if given, is applied as a move first.
    pub fn release(&mut self, position: Option<PointerPosition>) -> Option<GestureOutcome> {
        let active = self.active_gesture()?;
        if let Some(position) = position {
            self.pointer_move(position);
        }

        let started_in = match active {
            ActiveGesture::Drag => self.drag.breakpoint(),
            ActiveGesture::Resize => self.resize.breakpoint(),
        };
        let breakpoint = started_in.unwrap_or(self.layouts.active_name()).to_string();
        let Ok(model) = self.layouts.get_mut(&breakpoint) else {
            return self.cancel_gesture();
        };
        let outcome = match active {
            ActiveGesture::Drag => self.drag.release(model),
            ActiveGesture::Resize => self.resize.release(model),
        }?;

        if let GestureOutcome::Committed { item, previous, .. } = &outcome {
            self.history.push(LayoutCommand::between(&breakpoint, previous, item));
            self.notify_change();
        }
        Some(outcome)
    }

    /// Abandon the in-flight gesture, leaving the layout untouched
    pub fn cancel_gesture(&mut self) -> Option<GestureOutcome> {
        match self.active_gesture()? {
            ActiveGesture::Drag => self.drag.cancel(),
            ActiveGesture::Resize => self.resize.cancel(),
        }
    }

    /// Cancel a gesture the host did not end itself.
    ///
    /// Preview listeners get a last `valid = false` preview at the grab-time
    /// rectangle so the host can drop its drag feedback.
    fn interrupt_gesture(&mut self) -> Option<GestureOutcome> {
        let (gesture, start) = match self.active_gesture()? {
            ActiveGesture::Drag => (GestureKind::Drag, self.drag.start_item().cloned()),
            ActiveGesture::Resize => (GestureKind::Resize, self.resize.start_item().cloned()),
        };
        let outcome = self.cancel_gesture();

        if let Some(item) = start {
            self.notify_preview(&LayoutPreview {
                gesture,
                item,
                valid: false,
            });
        }
        outcome
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> LayoutResult<()> {
        self.ensure_idle()?;
        let command = self.history.undo(&mut self.layouts)?;
        log::info!("undid change to '{}' in '{}'", command.id, command.breakpoint);
        self.notify_if_active(&command.breakpoint);
        Ok(())
    }

    pub fn redo(&mut self) -> LayoutResult<()> {
        self.ensure_idle()?;
        let command = self.history.redo(&mut self.layouts)?;
        log::info!("redid change to '{}' in '{}'", command.id, command.breakpoint);
        self.notify_if_active(&command.breakpoint);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Called once per committed mutation with the new active layout
    pub fn on_change(&mut self, listener: impl FnMut(&LayoutSnapshot) + 'static) -> ListenerId {
        let id = self.allocate_listener_id();
        let listener: ChangeListener = Box::new(listener);
        self.change_listeners.push((id, listener));
        id
    }

    /// Called for every preview during a gesture
    pub fn on_preview(&mut self, listener: impl FnMut(&LayoutPreview) + 'static) -> ListenerId {
        let id = self.allocate_listener_id();
        let listener: PreviewListener = Box::new(listener);
        self.preview_listeners.push((id, listener));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.change_listeners.len() + self.preview_listeners.len();
        self.change_listeners.retain(|(lid, _)| *lid != id);
        self.preview_listeners.retain(|(lid, _)| *lid != id);
        before != self.change_listeners.len() + self.preview_listeners.len()
    }

    fn allocate_listener_id(&mut self) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id = self.next_listener_id.wrapping_add(1);
        id
    }

    fn notify_change(&mut self) {
        if self.change_listeners.is_empty() {
            return;
        }
        let snapshot = self.layouts.active_snapshot();
        for (_, listener) in self.change_listeners.iter_mut() {
            listener(&snapshot);
        }
    }

    fn notify_if_active(&mut self, breakpoint: &str) {
        if breakpoint == self.layouts.active_name() {
            self.notify_change();
        }
    }

    fn notify_preview(&mut self, preview: &LayoutPreview) {
        for (_, listener) in self.preview_listeners.iter_mut() {
            listener(preview);
        }
    }

    fn active_gesture(&self) -> Option<ActiveGesture> {
        if self.drag.is_active() {
            Some(ActiveGesture::Drag)
        } else if self.resize.is_active() {
            Some(ActiveGesture::Resize)
        } else {
            None
        }
    }

    fn ensure_idle(&self) -> LayoutResult<()> {
        match self.active_gesture() {
            Some(active) => Err(LayoutError::GestureInFlight(format!("{:?}", active))),
            None => Ok(()),
        }
    }
}

/// First free rectangle for `spec` in one breakpoint's layout
fn place(model: &LayoutModel, spec: &WidgetSpec) -> LayoutItem {
    let item = spec.to_item(model.columns());
    let origin = find_position_for(model.items(), item.w, item.h, model.columns());
    item.moved_to(origin.x, origin.y)
}
