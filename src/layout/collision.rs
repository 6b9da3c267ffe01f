//! Collision detection between grid rectangles

use crate::models::LayoutItem;

/// Does `candidate` overlap any item other than `exclude_id`?
pub fn collides<'a, I>(candidate: &LayoutItem, items: I, exclude_id: Option<&str>) -> bool
where
    I: IntoIterator<Item = &'a LayoutItem>,
{
    first_collision(candidate, items, exclude_id).is_some()
}

/// The first item `candidate` overlaps, skipping `exclude_id`
pub fn first_collision<'a, I>(
    candidate: &LayoutItem,
    items: I,
    exclude_id: Option<&str>,
) -> Option<&'a LayoutItem>
where
    I: IntoIterator<Item = &'a LayoutItem>,
{
    items
        .into_iter()
        .filter(|item| exclude_id != Some(item.id.as_str()))
        .find(|item| candidate.overlaps(item))
}
