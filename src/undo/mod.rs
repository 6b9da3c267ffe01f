use crate::layout::BreakpointManager;
use crate::models::{LayoutError, LayoutItem, LayoutResult};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A grid rectangle without constraints
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl From<&LayoutItem> for Rect {
    fn from(item: &LayoutItem) -> Self {
        Rect { x: item.x, y: item.y, w: item.w, h: item.h }
    }
}

/// A committed, reversible geometry change
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutCommand {
    pub breakpoint: String,
    pub id: String,
    pub before: Rect,
    pub after: Rect,
}

impl LayoutCommand {
    /// Record the change between two versions of the same item
    pub fn between(breakpoint: &str, before: &LayoutItem, after: &LayoutItem) -> Self {
        Self {
            breakpoint: breakpoint.to_string(),
            id: after.id.clone(),
            before: Rect::from(before),
            after: Rect::from(after),
        }
    }

    /// Re-apply the change
    pub fn execute(&self, layouts: &mut BreakpointManager) -> LayoutResult<()> {
        self.apply(layouts, self.after)
    }

    /// Reverse the change
    pub fn undo(&self, layouts: &mut BreakpointManager) -> LayoutResult<()> {
        self.apply(layouts, self.before)
    }

    fn apply(&self, layouts: &mut BreakpointManager, rect: Rect) -> LayoutResult<()> {
        let model = layouts.get_mut(&self.breakpoint)?;
        let current = model
            .get(&self.id)
            .ok_or_else(|| LayoutError::UnknownItem(self.id.clone()))?;

        // Constraints come from the stored item; commit re-validates everything
        let candidate = LayoutItem {
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            ..current.clone()
        };
        model.commit(&candidate)?;
        Ok(())
    }
}

/// Undo/redo history of committed drag and resize gestures
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayoutHistory {
    /// Stack of commands that can be undone
    pub commands: VecDeque<LayoutCommand>,
    /// Current position in the stack (for redo support)
    pub current_index: usize,
    /// Maximum number of commands to keep in history
    max_size: usize,
}

impl Default for LayoutHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

impl LayoutHistory {
    pub fn new(max_size: usize) -> Self {
        Self {
            commands: VecDeque::new(),
            current_index: 0,
            max_size,
        }
    }

    /// Record a committed change, dropping any redo history
    pub fn push(&mut self, command: LayoutCommand) {
        if self.max_size == 0 {
            return;
        }

        self.commands.truncate(self.current_index);
        self.commands.push_back(command);
        self.current_index = self.commands.len();

        // Enforce max size
        if self.commands.len() > self.max_size {
            self.commands.pop_front();
            self.current_index = self.current_index.saturating_sub(1);
        }
    }

    /// Undo the last command.
    ///
    /// If the old rectangle is no longer free the error is returned and the
    /// stack position is left unchanged.
    pub fn undo(&mut self, layouts: &mut BreakpointManager) -> LayoutResult<LayoutCommand> {
        if !self.can_undo() {
            return Err(LayoutError::EmptyHistory("undo"));
        }

        let command = self.commands[self.current_index - 1].clone();
        command.undo(layouts)?;
        self.current_index -= 1;
        Ok(command)
    }

    /// Redo the last undone command
    pub fn redo(&mut self, layouts: &mut BreakpointManager) -> LayoutResult<LayoutCommand> {
        if !self.can_redo() {
            return Err(LayoutError::EmptyHistory("redo"));
        }

        let command = self.commands[self.current_index].clone();
        command.execute(layouts)?;
        self.current_index += 1;
        Ok(command)
    }

    /// Drop every command that touches `id` (the item was unregistered)
    pub fn forget_item(&mut self, id: &str) {
        let undoable_removed = self
            .commands
            .iter()
            .take(self.current_index)
            .filter(|cmd| cmd.id == id)
            .count();
        self.commands.retain(|cmd| cmd.id != id);
        self.current_index -= undoable_removed;
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index < self.commands.len()
    }

    /// Get the number of available undo steps
    pub fn undo_count(&self) -> usize {
        self.current_index
    }

    /// Get the number of available redo steps
    pub fn redo_count(&self) -> usize {
        self.commands.len() - self.current_index
    }
}
