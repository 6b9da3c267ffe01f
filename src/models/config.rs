//! Grid and breakpoint configuration
//!
//! The breakpoint table can come from JavaScript (via serde-wasm-bindgen),
//! from JSON or from YAML. All loaders funnel through `EngineConfig::validate`.

use serde::{Deserialize, Serialize};
use super::errors::{LayoutError, LayoutResult};

const DEFAULT_ROW_HEIGHT_PX: f64 = 30.0;
const DEFAULT_GUTTER_PX: f64 = 10.0;
const DEFAULT_PADDING_PX: f64 = 10.0;
const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Pixel-to-unit conversion parameters for one breakpoint
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub columns: u32,
    pub row_height_px: f64,
    pub gutter_px: f64,
    pub padding_px: f64,
}

impl GridConfig {
    pub fn new(columns: u32) -> Self {
        Self {
            columns,
            row_height_px: DEFAULT_ROW_HEIGHT_PX,
            gutter_px: DEFAULT_GUTTER_PX,
            padding_px: DEFAULT_PADDING_PX,
        }
    }

    /// Width of one column for a container `container_width_px` wide
    pub fn column_width_px(&self, container_width_px: f64) -> f64 {
        let columns = self.columns.max(1) as f64;
        let gutters = self.gutter_px * (columns - 1.0);
        (container_width_px - 2.0 * self.padding_px - gutters) / columns
    }

    pub fn validate(&self) -> LayoutResult<()> {
        if self.columns == 0 {
            return Err(LayoutError::InvalidConfig("columns must be at least 1".to_string()));
        }
        let lengths = [
            ("rowHeightPx", self.row_height_px),
            ("gutterPx", self.gutter_px),
            ("paddingPx", self.padding_px),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.row_height_px + self.gutter_px <= 0.0 {
            return Err(LayoutError::InvalidConfig(
                "rowHeightPx + gutterPx must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(12)
    }
}

/// One named breakpoint: active when the host is at least `min_width_px` wide
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointSpec {
    pub name: String,
    pub min_width_px: f64,
    pub grid: GridConfig,
}

impl BreakpointSpec {
    pub fn new(name: impl Into<String>, min_width_px: f64, grid: GridConfig) -> Self {
        Self {
            name: name.into(),
            min_width_px,
            grid,
        }
    }
}

/// Complete engine configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub breakpoints: Vec<BreakpointSpec>,

    /// Host width used to pick the first active breakpoint
    #[serde(default)]
    pub initial_width_px: Option<f64>,

    /// Maximum number of undo steps kept
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            breakpoints: vec![
                BreakpointSpec::new("wide", 1200.0, GridConfig::new(12)),
                BreakpointSpec::new("medium", 768.0, GridConfig::new(8)),
                BreakpointSpec::new("narrow", 0.0, GridConfig::new(4)),
            ],
            initial_width_px: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(text: &str) -> LayoutResult<Self> {
        let config: EngineConfig = serde_json::from_str(text)
            .map_err(|e| LayoutError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML configuration
    pub fn from_yaml_str(text: &str) -> LayoutResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(text)
            .map_err(|e| LayoutError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LayoutResult<()> {
        if self.breakpoints.is_empty() {
            return Err(LayoutError::InvalidConfig(
                "at least one breakpoint is required".to_string(),
            ));
        }

        for (i, bp) in self.breakpoints.iter().enumerate() {
            if bp.name.is_empty() {
                return Err(LayoutError::InvalidConfig(format!(
                    "breakpoint #{} has an empty name",
                    i
                )));
            }
            if self.breakpoints[..i].iter().any(|other| other.name == bp.name) {
                return Err(LayoutError::InvalidConfig(format!(
                    "duplicate breakpoint name '{}'",
                    bp.name
                )));
            }
            if !bp.min_width_px.is_finite() || bp.min_width_px < 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "breakpoint '{}' has invalid minWidthPx {}",
                    bp.name, bp.min_width_px
                )));
            }
            if let Err(LayoutError::InvalidConfig(reason)) = bp.grid.validate() {
                return Err(LayoutError::InvalidConfig(format!(
                    "breakpoint '{}': {}",
                    bp.name, reason
                )));
            }
        }

        Ok(())
    }
}

/// Geometry of the hosting surface in page pixels
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerGeometry {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width_px: f64,
    pub height_px: f64,
}

impl ContainerGeometry {
    pub fn new(origin_x: f64, origin_y: f64, width_px: f64, height_px: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            width_px,
            height_px,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.origin_x.is_finite()
            && self.origin_y.is_finite()
            && self.width_px.is_finite()
            && self.height_px.is_finite()
    }
}

/// A pointer position in page pixels
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
