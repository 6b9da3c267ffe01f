//! Layout item geometry
//!
//! A `LayoutItem` is one widget's rectangle on the grid, in grid units.
//! Pixel geometry never reaches this module.

use serde::{Deserialize, Serialize};
use super::errors::{LayoutError, LayoutResult};

/// Exclusive bottom edge limit for every item, in rows
pub const MAX_ROWS: u32 = 10_000;

/// A position on the grid (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: u32,
    pub y: u32,
}

impl GridCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// One widget's rectangle plus its size constraints
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub min_w: u32,
    pub min_h: u32,
    #[serde(default)]
    pub max_w: Option<u32>,
    #[serde(default)]
    pub max_h: Option<u32>,
    /// Fixed items cannot be grabbed, but still block other items
    #[serde(default)]
    pub fixed: bool,
}

impl LayoutItem {
    /// Create an unconstrained item (min size 1x1)
    pub fn new(id: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            min_w: 1,
            min_h: 1,
            max_w: None,
            max_h: None,
            fixed: false,
        }
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    pub fn origin(&self) -> GridCoord {
        GridCoord::new(self.x, self.y)
    }

    /// Same item moved to a new origin
    pub fn moved_to(&self, x: u32, y: u32) -> Self {
        Self { x, y, ..self.clone() }
    }

    /// Same item with a new size
    pub fn resized_to(&self, w: u32, h: u32) -> Self {
        Self { w, h, ..self.clone() }
    }

    /// Whether the two rectangles overlap on both axes
    pub fn overlaps(&self, other: &LayoutItem) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Whether position and size match (constraints ignored)
    pub fn same_rect(&self, other: &LayoutItem) -> bool {
        self.x == other.x && self.y == other.y && self.w == other.w && self.h == other.h
    }
}

/// Registration request for a widget
///
/// The engine turns one `WidgetSpec` into one `LayoutItem` per breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSpec {
    pub id: String,
    pub min_w: u32,
    pub min_h: u32,
    #[serde(default)]
    pub max_w: Option<u32>,
    #[serde(default)]
    pub max_h: Option<u32>,
    /// Preferred starting width (defaults to `min_w`)
    #[serde(default)]
    pub w: Option<u32>,
    /// Preferred starting height (defaults to `min_h`)
    #[serde(default)]
    pub h: Option<u32>,
    #[serde(default)]
    pub fixed: bool,
}

impl WidgetSpec {
    pub fn new(id: impl Into<String>, min_w: u32, min_h: u32) -> Self {
        Self {
            id: id.into(),
            min_w,
            min_h,
            max_w: None,
            max_h: None,
            w: None,
            h: None,
            fixed: false,
        }
    }

    pub fn with_max(mut self, max_w: Option<u32>, max_h: Option<u32>) -> Self {
        self.max_w = max_w;
        self.max_h = max_h;
        self
    }

    pub fn with_size(mut self, w: u32, h: u32) -> Self {
        self.w = Some(w);
        self.h = Some(h);
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Reject constraints no breakpoint could satisfy
    pub fn validate(&self) -> LayoutResult<()> {
        let invalid = |reason: String| LayoutError::InvalidConstraints {
            id: self.id.clone(),
            reason,
        };

        if self.id.is_empty() {
            return Err(invalid("id must not be empty".to_string()));
        }
        if self.min_w == 0 || self.min_h == 0 {
            return Err(invalid(format!(
                "minimum size must be at least 1x1, got {}x{}",
                self.min_w, self.min_h
            )));
        }
        if self.min_h > MAX_ROWS {
            return Err(invalid(format!("minH {} exceeds the {} row limit", self.min_h, MAX_ROWS)));
        }
        if let Some(max_w) = self.max_w {
            if max_w < self.min_w {
                return Err(invalid(format!("maxW {} < minW {}", max_w, self.min_w)));
            }
        }
        if let Some(max_h) = self.max_h {
            if max_h < self.min_h {
                return Err(invalid(format!("maxH {} < minH {}", max_h, self.min_h)));
            }
        }
        Ok(())
    }

    /// Build the item for a grid with `columns` columns, placed at the origin.
    ///
    /// Width constraints are capped to the column count so a wide widget
    /// still fits a narrow breakpoint.
    pub fn to_item(&self, columns: u32) -> LayoutItem {
        let max_w = self.max_w.map(|m| m.min(columns));
        let min_w = self.min_w.min(columns);
        let width_cap = max_w.unwrap_or(columns);
        let w = self.w.unwrap_or(self.min_w).min(width_cap).max(min_w);
        let height_cap = self.max_h.unwrap_or(MAX_ROWS).min(MAX_ROWS);
        let h = self.h.unwrap_or(self.min_h).min(height_cap).max(self.min_h);

        LayoutItem {
            id: self.id.clone(),
            x: 0,
            y: 0,
            w,
            h,
            min_w,
            min_h: self.min_h,
            max_w,
            max_h: self.max_h,
            fixed: self.fixed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_requires_both_axes() {
        let a = LayoutItem::new("a", 0, 0, 3, 3);
        let beside = LayoutItem::new("b", 3, 0, 3, 3);
        let below = LayoutItem::new("c", 0, 3, 3, 3);
        let inside = LayoutItem::new("d", 1, 1, 1, 1);

        assert!(!a.overlaps(&beside)); // edges touch only
        assert!(!a.overlaps(&below));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_spec_to_item_caps_width_to_columns() {
        let spec = WidgetSpec::new("book", 6, 4).with_size(8, 5);
        let item = spec.to_item(4);

        assert_eq!(item.min_w, 4);
        assert_eq!(item.w, 4);
        assert_eq!(item.h, 5);
    }

    #[test]
    fn test_spec_to_item_defaults_to_min_size() {
        let item = WidgetSpec::new("quote", 2, 3).to_item(12);
        assert_eq!((item.w, item.h), (2, 3));
        assert!(!item.fixed);
    }

    #[test]
    fn test_spec_to_item_caps_height_to_row_limit() {
        let item = WidgetSpec::new("tall", 1, 2).with_size(1, u32::MAX).to_item(12);
        assert_eq!(item.h, MAX_ROWS);

        assert!(WidgetSpec::new("huge", 1, MAX_ROWS + 1).validate().is_err());
    }

    #[test]
    fn test_edges_saturate() {
        let item = LayoutItem::new("far", 0, u32::MAX - 1, 1, 5);
        assert_eq!(item.bottom(), u32::MAX);
    }

    #[test]
    fn test_spec_validation() {
        assert!(WidgetSpec::new("a", 1, 1).validate().is_ok());
        assert!(WidgetSpec::new("", 1, 1).validate().is_err());
        assert!(WidgetSpec::new("a", 0, 1).validate().is_err());

        let inverted = WidgetSpec::new("a", 4, 2).with_max(Some(3), None);
        assert!(matches!(
            inverted.validate(),
            Err(LayoutError::InvalidConstraints { .. })
        ));
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = LayoutItem::new("a", 1, 2, 3, 4);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"minW\":1"));
        assert!(json.contains("\"maxH\":null"));
    }
}
