//! Per-breakpoint layout state
//!
//! `LayoutModel` owns the item set for one breakpoint and is the only place
//! items are written. Every mutation is validated first, so a model that
//! was built through this API always satisfies:
//!
//! - `x + w <= columns`
//! - `min <= size <= max` on both axes
//! - no two items overlap
//! - ids are unique

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::models::{GridConfig, LayoutError, LayoutItem, LayoutResult, MAX_ROWS};
use super::collision::first_collision;

/// Read-only copy of one breakpoint's layout handed to observers
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LayoutSnapshot {
    pub breakpoint: String,
    pub columns: u32,
    /// Ordered by (y, x, id)
    pub items: Vec<LayoutItem>,
}

impl LayoutSnapshot {
    pub fn get(&self, id: &str) -> Option<&LayoutItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

#[derive(Clone, Debug)]
pub struct LayoutModel {
    config: GridConfig,
    items: BTreeMap<String, LayoutItem>,
}

impl LayoutModel {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            items: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn columns(&self) -> u32 {
        self.config.columns
    }

    pub fn items(&self) -> impl Iterator<Item = &LayoutItem> {
        self.items.values()
    }

    pub fn get(&self, id: &str) -> Option<&LayoutItem> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a new item
    pub fn insert(&mut self, item: LayoutItem) -> LayoutResult<()> {
        if self.items.contains_key(&item.id) {
            return Err(LayoutError::DuplicateId(item.id));
        }
        self.validate(&item, None)?;
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// Replace the geometry of an existing item.
    ///
    /// The stored constraints are kept; only `x`, `y`, `w` and `h` are taken
    /// from `candidate`. Returns the previous item.
    pub fn commit(&mut self, candidate: &LayoutItem) -> LayoutResult<LayoutItem> {
        let current = self
            .items
            .get(&candidate.id)
            .ok_or_else(|| LayoutError::UnknownItem(candidate.id.clone()))?;

        let next = LayoutItem {
            x: candidate.x,
            y: candidate.y,
            w: candidate.w,
            h: candidate.h,
            ..current.clone()
        };
        self.validate(&next, Some(&next.id))?;

        let previous = self.items.insert(next.id.clone(), next);
        previous.ok_or_else(|| LayoutError::UnknownItem(candidate.id.clone()))
    }

    pub fn remove(&mut self, id: &str) -> Option<LayoutItem> {
        self.items.remove(id)
    }

    /// Check `item` against bounds, constraints and every other item
    pub fn validate(&self, item: &LayoutItem, exclude_id: Option<&str>) -> LayoutResult<()> {
        self.validate_geometry(item)?;

        if let Some(other) = first_collision(item, self.items.values(), exclude_id) {
            return Err(LayoutError::Collision {
                id: item.id.clone(),
                other: other.id.clone(),
            });
        }
        Ok(())
    }

    /// Bounds and size constraints only, no collision test
    pub fn validate_geometry(&self, item: &LayoutItem) -> LayoutResult<()> {
        let columns = self.config.columns;
        if item.w == 0 || item.right() > columns {
            return Err(LayoutError::OutOfBounds {
                id: item.id.clone(),
                x: item.x,
                w: item.w,
                columns,
            });
        }

        let fits_rows = item.y.checked_add(item.h).map_or(false, |bottom| bottom <= MAX_ROWS);
        if !fits_rows {
            return Err(LayoutError::RowLimit {
                id: item.id.clone(),
                y: item.y,
                h: item.h,
                limit: MAX_ROWS,
            });
        }

        let violation = |reason: String| LayoutError::ConstraintViolation {
            id: item.id.clone(),
            reason,
        };

        if item.w < item.min_w || item.h < item.min_h || item.h == 0 {
            return Err(violation(format!(
                "size {}x{} below minimum {}x{}",
                item.w, item.h, item.min_w, item.min_h
            )));
        }
        if let Some(max_w) = item.max_w {
            if item.w > max_w {
                return Err(violation(format!("width {} above maximum {}", item.w, max_w)));
            }
        }
        if let Some(max_h) = item.max_h {
            if item.h > max_h {
                return Err(violation(format!("height {} above maximum {}", item.h, max_h)));
            }
        }
        Ok(())
    }

    /// Full invariant scan over the stored items
    pub fn check_invariants(&self) -> LayoutResult<()> {
        for item in self.items.values() {
            self.validate(item, Some(&item.id))?;
        }
        Ok(())
    }

    pub fn snapshot(&self, breakpoint: &str) -> LayoutSnapshot {
        let mut items: Vec<LayoutItem> = self.items.values().cloned().collect();
        items.sort_by(|a, b| (a.y, a.x, &a.id).cmp(&(b.y, b.x, &b.id)));

        LayoutSnapshot {
            breakpoint: breakpoint.to_string(),
            columns: self.config.columns,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with(items: &[LayoutItem]) -> LayoutModel {
        let mut model = LayoutModel::new(GridConfig::new(12));
        for item in items {
            model.insert(item.clone()).unwrap();
        }
        model
    }

    #[test]
    fn test_insert_rejects_duplicates_and_overlap() {
        let mut model = model_with(&[LayoutItem::new("a", 0, 0, 4, 2)]);

        assert_eq!(
            model.insert(LayoutItem::new("a", 6, 0, 2, 2)),
            Err(LayoutError::DuplicateId("a".to_string()))
        );
        assert_eq!(
            model.insert(LayoutItem::new("b", 2, 1, 4, 2)),
            Err(LayoutError::Collision { id: "b".to_string(), other: "a".to_string() })
        );
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_insert_rejects_out_of_bounds() {
        let mut model = LayoutModel::new(GridConfig::new(12));
        let result = model.insert(LayoutItem::new("wide", 10, 0, 3, 1));
        assert!(matches!(result, Err(LayoutError::OutOfBounds { columns: 12, .. })));
    }

    #[test]
    fn test_rejects_rows_past_the_limit() {
        let mut model = model_with(&[LayoutItem::new("a", 0, 2, 12, 2)]);

        let overflowing = LayoutItem::new("a", 0, 2, 12, u32::MAX);
        assert!(matches!(
            model.commit(&overflowing),
            Err(LayoutError::RowLimit { limit: MAX_ROWS, .. })
        ));
        assert!(model.insert(LayoutItem::new("b", 0, MAX_ROWS - 1, 1, 2)).is_err());
        assert!(model.insert(LayoutItem::new("b", 0, MAX_ROWS - 2, 1, 2)).is_ok());
    }

    #[test]
    fn test_commit_keeps_constraints_and_validates() {
        let mut constrained = LayoutItem::new("a", 0, 0, 3, 2);
        constrained.min_w = 2;
        constrained.max_w = Some(4);
        let mut model = model_with(&[constrained, LayoutItem::new("b", 6, 0, 3, 2)]);

        // Constraints in the candidate are ignored
        let mut candidate = LayoutItem::new("a", 0, 0, 5, 2);
        candidate.max_w = None;
        assert!(matches!(
            model.commit(&candidate),
            Err(LayoutError::ConstraintViolation { .. })
        ));

        let previous = model.commit(&LayoutItem::new("a", 2, 3, 4, 2)).unwrap();
        assert_eq!((previous.x, previous.y), (0, 0));
        let stored = model.get("a").unwrap();
        assert_eq!((stored.x, stored.y, stored.w, stored.h), (2, 3, 4, 2));
        assert_eq!(stored.max_w, Some(4));

        assert!(matches!(
            model.commit(&LayoutItem::new("a", 5, 0, 3, 2)),
            Err(LayoutError::Collision { .. })
        ));
        assert!(model.check_invariants().is_ok());
    }

    #[test]
    fn test_commit_unknown_item() {
        let mut model = LayoutModel::new(GridConfig::new(12));
        assert_eq!(
            model.commit(&LayoutItem::new("ghost", 0, 0, 1, 1)),
            Err(LayoutError::UnknownItem("ghost".to_string()))
        );
    }

    #[test]
    fn test_snapshot_is_ordered() {
        let model = model_with(&[
            LayoutItem::new("c", 0, 4, 2, 1),
            LayoutItem::new("b", 6, 0, 2, 1),
            LayoutItem::new("a", 0, 0, 2, 1),
        ]);
        let snapshot = model.snapshot("wide");
        let ids: Vec<&str> = snapshot.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(snapshot.columns, 12);
        assert_eq!(snapshot.breakpoint, "wide");
    }
}
