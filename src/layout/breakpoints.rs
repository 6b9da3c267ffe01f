//! Breakpoint selection
//!
//! One `LayoutModel` per named breakpoint. The active breakpoint is the one
//! with the largest threshold not above the host width; the smallest
//! threshold is the fallback. Geometry is never copied between breakpoints.

use crate::models::{EngineConfig, GridConfig, LayoutError, LayoutResult};
use super::model::{LayoutModel, LayoutSnapshot};

#[derive(Clone, Debug)]
pub struct Breakpoint {
    pub name: String,
    pub min_width_px: f64,
    pub model: LayoutModel,
}

#[derive(Clone, Debug)]
pub struct BreakpointManager {
    /// Sorted by ascending threshold
    breakpoints: Vec<Breakpoint>,
    active: usize,
}

impl BreakpointManager {
    pub fn new(config: &EngineConfig) -> LayoutResult<Self> {
        config.validate()?;

        let mut breakpoints: Vec<Breakpoint> = config
            .breakpoints
            .iter()
            .map(|spec| Breakpoint {
                name: spec.name.clone(),
                min_width_px: spec.min_width_px,
                model: LayoutModel::new(spec.grid),
            })
            .collect();
        breakpoints.sort_by(|a, b| a.min_width_px.total_cmp(&b.min_width_px));

        let mut manager = Self { breakpoints, active: 0 };
        if let Some(width) = config.initial_width_px {
            manager.update_width(width);
        }
        Ok(manager)
    }

    /// Index of the breakpoint that applies at `width_px`
    pub fn select_for_width(&self, width_px: f64) -> usize {
        self.breakpoints
            .iter()
            .rposition(|bp| bp.min_width_px <= width_px)
            .unwrap_or(0)
    }

    /// Re-select for a new host width.
    ///
    /// Returns the new breakpoint name if the active one changed. Non-finite
    /// widths are ignored.
    pub fn update_width(&mut self, width_px: f64) -> Option<&str> {
        if !width_px.is_finite() {
            return None;
        }
        let next = self.select_for_width(width_px);
        if next == self.active {
            return None;
        }
        self.active = next;
        Some(self.breakpoints[next].name.as_str())
    }

    pub fn active_name(&self) -> &str {
        &self.breakpoints[self.active].name
    }

    pub fn active(&self) -> &LayoutModel {
        &self.breakpoints[self.active].model
    }

    pub fn active_mut(&mut self) -> &mut LayoutModel {
        &mut self.breakpoints[self.active].model
    }

    pub fn active_grid(&self) -> &GridConfig {
        self.active().config()
    }

    pub fn get(&self, name: &str) -> LayoutResult<&LayoutModel> {
        self.breakpoints
            .iter()
            .find(|bp| bp.name == name)
            .map(|bp| &bp.model)
            .ok_or_else(|| LayoutError::UnknownBreakpoint(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> LayoutResult<&mut LayoutModel> {
        self.breakpoints
            .iter_mut()
            .find(|bp| bp.name == name)
            .map(|bp| &mut bp.model)
            .ok_or_else(|| LayoutError::UnknownBreakpoint(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.breakpoints.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Breakpoint> {
        self.breakpoints.iter_mut()
    }

    pub fn names(&self) -> Vec<String> {
        self.breakpoints.iter().map(|bp| bp.name.clone()).collect()
    }

    pub fn active_snapshot(&self) -> LayoutSnapshot {
        self.active().snapshot(self.active_name())
    }
}
