//! Pointer to grid coordinate mapping
//!
//! Converts page-pixel pointer positions into grid cells using the
//! container's origin and width and the active breakpoint's `GridConfig`.
//! Nothing here touches the layout model.

use serde::{Deserialize, Serialize};
use crate::models::{ContainerGeometry, GridConfig, GridCoord, LayoutItem, PointerPosition, MAX_ROWS};

/// Pixel box of a grid rectangle, relative to the container origin
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Map a pointer position to the grid cell under it.
///
/// Returns `None` for non-finite input so callers can drop the event.
/// Columns are clamped to `[0, columns-1]`, rows to `[0, MAX_ROWS-1]`.
pub fn to_grid(
    pointer: PointerPosition,
    container: &ContainerGeometry,
    config: &GridConfig,
) -> Option<GridCoord> {
    if !pointer.is_finite() || !container.is_finite() {
        return None;
    }

    let relative_x = pointer.x - container.origin_x - config.padding_px;
    let relative_y = pointer.y - container.origin_y - config.padding_px;

    let column_pitch = config.column_width_px(container.width_px) + config.gutter_px;
    let row_pitch = config.row_height_px + config.gutter_px;

    let last_column = config.columns.saturating_sub(1);
    let x = cells_at(relative_x, column_pitch).min(last_column);
    let y = cells_at(relative_y, row_pitch).min(MAX_ROWS - 1);

    Some(GridCoord::new(x, y))
}

/// Convert a pixel delta into whole grid units, rounding to nearest
pub fn unit_delta(delta_px: f64, unit_px: f64, gutter_px: f64) -> i64 {
    let pitch = unit_px + gutter_px;
    if !delta_px.is_finite() || !pitch.is_finite() || pitch <= 0.0 {
        return 0;
    }
    (delta_px / pitch).round() as i64
}

/// Pixel box of `item` inside a container `container_width_px` wide
pub fn grid_to_pixels(item: &LayoutItem, config: &GridConfig, container_width_px: f64) -> PixelRect {
    let column_width = config.column_width_px(container_width_px);
    let gutter = config.gutter_px;

    PixelRect {
        left: config.padding_px + item.x as f64 * (column_width + gutter),
        top: config.padding_px + item.y as f64 * (config.row_height_px + gutter),
        width: item.w as f64 * column_width + item.w.saturating_sub(1) as f64 * gutter,
        height: item.h as f64 * config.row_height_px + item.h.saturating_sub(1) as f64 * gutter,
    }
}

/// floor(offset / pitch), clamped at zero
fn cells_at(offset_px: f64, pitch_px: f64) -> u32 {
    if pitch_px <= 0.0 || offset_px <= 0.0 {
        return 0;
    }
    let cells = (offset_px / pitch_px).floor();
    if cells >= u32::MAX as f64 {
        u32::MAX
    } else {
        cells as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 12 columns of 100px with 10px gutters and 10px padding
    fn container() -> ContainerGeometry {
        ContainerGeometry::new(50.0, 20.0, 1330.0, 800.0)
    }

    #[test]
    fn test_maps_inside_cells() {
        let config = GridConfig::new(12);

        // First cell starts at origin + padding
        let coord = to_grid(PointerPosition::new(61.0, 31.0), &container(), &config);
        assert_eq!(coord, Some(GridCoord::new(0, 0)));

        // Column pitch 110, row pitch 40
        let coord = to_grid(PointerPosition::new(50.0 + 10.0 + 230.0, 20.0 + 10.0 + 85.0), &container(), &config);
        assert_eq!(coord, Some(GridCoord::new(2, 2)));
    }

    #[test]
    fn test_clamps_to_grid_bounds() {
        let config = GridConfig::new(12);

        let left_of_grid = to_grid(PointerPosition::new(-500.0, -500.0), &container(), &config);
        assert_eq!(left_of_grid, Some(GridCoord::new(0, 0)));

        let right_of_grid = to_grid(PointerPosition::new(5000.0, 20000.0), &container(), &config);
        assert_eq!(right_of_grid, Some(GridCoord::new(11, 499)));
    }

    #[test]
    fn test_far_pointer_stops_at_last_row() {
        let config = GridConfig::new(12);
        let coord = to_grid(PointerPosition::new(1e12, 1e12), &container(), &config);
        assert_eq!(coord, Some(GridCoord::new(11, MAX_ROWS - 1)));
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let config = GridConfig::new(12);
        assert_eq!(to_grid(PointerPosition::new(f64::NAN, 10.0), &container(), &config), None);
        assert_eq!(to_grid(PointerPosition::new(10.0, f64::INFINITY), &container(), &config), None);
    }

    #[test]
    fn test_unit_delta_rounds_to_nearest() {
        assert_eq!(unit_delta(0.0, 100.0, 10.0), 0);
        assert_eq!(unit_delta(54.0, 100.0, 10.0), 0);
        assert_eq!(unit_delta(56.0, 100.0, 10.0), 1);
        assert_eq!(unit_delta(-170.0, 100.0, 10.0), -2);
        assert_eq!(unit_delta(f64::NAN, 100.0, 10.0), 0);
    }

    #[test]
    fn test_grid_to_pixels() {
        let config = GridConfig::new(12);
        let rect = grid_to_pixels(&LayoutItem::new("a", 2, 1, 3, 2), &config, 1330.0);
        assert_eq!(rect.left, 230.0);
        assert_eq!(rect.top, 50.0);
        assert_eq!(rect.width, 320.0);
        assert_eq!(rect.height, 70.0);
    }
}
