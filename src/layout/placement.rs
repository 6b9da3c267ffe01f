//! First-fit placement for newly registered items
//!
//! Scans rows top to bottom and columns left to right, returning the first
//! origin where the new rectangle fits. The scan always returns an origin:
//! in the worst case the item starts a new row below everything else, and
//! `LayoutModel` rejects it there if that crosses `MAX_ROWS`.

use crate::models::{GridCoord, LayoutItem};

/// Find a free origin for a one-row-tall item `new_width` columns wide
pub fn find_position<'a, I>(items: I, new_width: u32, columns: u32) -> GridCoord
where
    I: IntoIterator<Item = &'a LayoutItem>,
{
    find_position_for(items, new_width, 1, columns)
}

/// Find a free origin for a `new_width` x `new_height` item.
///
/// Every row the candidate would cover is checked, so a tall item dropped
/// into a gap never runs into an item starting further down.
pub fn find_position_for<'a, I>(items: I, new_width: u32, new_height: u32, columns: u32) -> GridCoord
where
    I: IntoIterator<Item = &'a LayoutItem>,
{
    let items: Vec<&LayoutItem> = items.into_iter().collect();
    if items.is_empty() {
        return GridCoord::new(0, 0);
    }

    let columns = columns.max(1);
    let width = new_width.clamp(1, columns);
    let height = new_height.max(1);
    let max_y = items.iter().map(|item| item.bottom()).max().unwrap_or(0);

    for y in 0..=max_y {
        // Horizontal intervals [x, x+w) occupied anywhere in rows y..y+height
        let occupied: Vec<(u32, u32)> = items
            .iter()
            .filter(|item| item.y < y.saturating_add(height) && item.bottom() > y)
            .map(|item| (item.x, item.right()))
            .collect();

        let free_x = (0..=columns - width)
            .find(|&x| occupied.iter().all(|&(start, end)| x + width <= start || x >= end));

        if let Some(x) = free_x {
            return GridCoord::new(x, y);
        }
    }

    GridCoord::new(0, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::collision::collides;

    #[test]
    fn test_empty_layout_places_at_origin() {
        assert_eq!(find_position(&Vec::new(), 4, 12), GridCoord::new(0, 0));
    }

    #[test]
    fn test_fills_row_beside_existing_item() {
        let items = vec![LayoutItem::new("A", 0, 0, 3, 5)];
        assert_eq!(find_position(&items, 3, 12), GridCoord::new(3, 0));
    }

    #[test]
    fn test_full_row_moves_to_next_free_row() {
        let items = vec![
            LayoutItem::new("A", 0, 0, 6, 4),
            LayoutItem::new("B", 6, 0, 6, 4),
        ];
        assert_eq!(find_position(&items, 6, 12), GridCoord::new(0, 4));
    }

    #[test]
    fn test_tall_item_skips_gap_that_is_too_short() {
        // Gap at x=4..8 on row 0 only, blocked by C on row 1
        let items = vec![
            LayoutItem::new("A", 0, 0, 4, 3),
            LayoutItem::new("B", 8, 0, 4, 3),
            LayoutItem::new("C", 4, 1, 4, 2),
        ];
        assert_eq!(find_position(&items, 4, 12), GridCoord::new(4, 0));
        assert_eq!(find_position_for(&items, 4, 2, 12), GridCoord::new(0, 3));
    }

    #[test]
    fn test_width_wider_than_grid_is_clamped() {
        let items = vec![LayoutItem::new("A", 0, 0, 2, 2)];
        assert_eq!(find_position(&items, 20, 4), GridCoord::new(0, 2));
    }

    #[test]
    fn test_placed_rectangle_never_overlaps() {
        // Build a ragged layout by repeated placement, checking every step
        let widths = [3, 5, 2, 7, 4, 4, 1, 6, 12, 2, 9, 3];
        let heights = [2, 1, 4, 3, 2, 5, 1, 2, 1, 3, 2, 4];
        let mut items: Vec<LayoutItem> = Vec::new();

        for (i, (&w, &h)) in widths.iter().zip(heights.iter()).enumerate() {
            let pos = find_position_for(&items, w, h, 12);
            let item = LayoutItem::new(format!("w{}", i), pos.x, pos.y, w, h);
            assert!(item.right() <= 12);
            assert!(!collides(&item, &items, None), "item {} overlaps", i);
            items.push(item);
        }
    }
}
