//! Selection and popup placement shared by every view.

use atlas_corpus::WorkId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::layout::{Point, Size, Viewport};

/// The selected work and the works visited this session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: Option<WorkId>,
    /// Visited works in first-visit order.
    visited: Vec<WorkId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a work and record it as visited.
    pub fn select(&mut self, id: WorkId) {
        if !self.is_visited(&id) {
            self.visited.push(id.clone());
        }
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&WorkId> {
        self.selected.as_ref()
    }

    pub fn is_visited(&self, id: &WorkId) -> bool {
        self.visited.contains(id)
    }

    pub fn visited(&self) -> &[WorkId] {
        &self.visited
    }
}

/// The user's bookmarked works.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bookmarks(BTreeSet<WorkId>);

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a bookmark. Returns whether the work is now bookmarked.
    pub fn toggle(&mut self, id: &WorkId) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.clone());
            true
        }
    }

    pub fn contains(&self, id: &WorkId) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Snapshot for the layout engine.
    pub fn to_set(&self) -> BTreeSet<WorkId> {
        self.0.clone()
    }
}

/// Place a popup of `size` near `cursor`, offset by `offset` pixels.
///
/// The popup prefers the bottom-right of the cursor, flips to the other side
/// on an axis where it would overflow, and is finally clamped inside the
/// viewport. A popup larger than the viewport is pinned to its top-left.
pub fn anchor_popup(cursor: Point, size: Size, viewport: &Viewport, offset: f64) -> Point {
    Point::new(
        place_axis(cursor.x, size.width, viewport.width, offset),
        place_axis(cursor.y, size.height, viewport.height, offset),
    )
}

fn place_axis(cursor: f64, length: f64, extent: f64, offset: f64) -> f64 {
    let cursor = if cursor.is_finite() { cursor } else { 0.0 };
    let mut start = cursor + offset;
    if start + length > extent {
        start = cursor - offset - length;
    }
    start.clamp(0.0, (extent - length).max(0.0))
}

/// A hover preview anchored near the cursor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverPreview {
    pub work: WorkId,
    pub anchor: Point,
}

impl HoverPreview {
    pub const OFFSET: f64 = 16.0;

    pub fn new(work: WorkId, cursor: Point, size: Size, viewport: &Viewport) -> Self {
        Self {
            work,
            anchor: anchor_popup(cursor, size, viewport, Self::OFFSET),
        }
    }
}

/// A context menu opened by a secondary click on a work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextMenu {
    pub work: WorkId,
    pub anchor: Point,
}

impl ContextMenu {
    pub fn open(work: WorkId, cursor: Point, size: Size, viewport: &Viewport) -> Self {
        Self {
            work,
            anchor: anchor_popup(cursor, size, viewport, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_select_records_visits() {
        let mut selection = SelectionState::new();
        selection.select(WorkId::from("a"));
        selection.select(WorkId::from("b"));
        selection.select(WorkId::from("a"));

        assert_eq!(selection.selected(), Some(&WorkId::from("a")));
        assert_eq!(selection.visited(), &[WorkId::from("a"), WorkId::from("b")]);
        assert!(selection.is_visited(&WorkId::from("b")));

        selection.clear();
        assert_eq!(selection.selected(), None);
        assert!(selection.is_visited(&WorkId::from("a")));
    }

    #[test]
    fn test_bookmark_toggle() {
        let mut bookmarks = Bookmarks::new();
        let id = WorkId::from("w");

        assert!(bookmarks.toggle(&id));
        assert!(bookmarks.contains(&id));
        assert!(!bookmarks.toggle(&id));
        assert!(bookmarks.is_empty());
    }

    #[test]
    fn test_popup_prefers_bottom_right() {
        let viewport = Viewport::new(800.0, 600.0);
        let size = Size::new(200.0, 100.0);
        let anchor = anchor_popup(Point::new(100.0, 100.0), size, &viewport, 10.0);
        assert_eq!(anchor, Point::new(110.0, 110.0));
    }

    #[test]
    fn test_popup_flips_near_edges() {
        let viewport = Viewport::new(800.0, 600.0);
        let size = Size::new(200.0, 100.0);
        let anchor = anchor_popup(Point::new(750.0, 580.0), size, &viewport, 10.0);
        assert_eq!(anchor, Point::new(540.0, 470.0));
    }

    #[test]
    fn test_oversized_popup_pins_to_origin() {
        let viewport = Viewport::new(100.0, 100.0);
        let anchor = anchor_popup(Point::new(50.0, 50.0), Size::new(300.0, 300.0), &viewport, 10.0);
        assert_eq!(anchor, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_context_menu_anchors_at_cursor() {
        let viewport = Viewport::new(800.0, 600.0);
        let menu = ContextMenu::open(
            WorkId::from("w"),
            Point::new(20.0, 30.0),
            Size::new(150.0, 90.0),
            &viewport,
        );
        assert_eq!(menu.anchor, Point::new(20.0, 30.0));
    }

    proptest! {
        #[test]
        fn preview_stays_inside_viewport(
            x in -100.0f64..1100.0,
            y in -100.0f64..900.0,
            w in 1.0f64..400.0,
            h in 1.0f64..300.0,
        ) {
            let viewport = Viewport::new(1000.0, 800.0);
            let preview =
                HoverPreview::new(WorkId::from("w"), Point::new(x, y), Size::new(w, h), &viewport);
            prop_assert!(preview.anchor.x >= 0.0 && preview.anchor.x + w <= 1000.0 + 1e-9);
            prop_assert!(preview.anchor.y >= 0.0 && preview.anchor.y + h <= 800.0 + 1e-9);
        }
    }
}
