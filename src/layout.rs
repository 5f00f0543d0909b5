//! Slot allocation: which popup sits where in a stack, and at which pixel.

use crate::config::LayoutSettings;
use crate::types::{Point, PopupId, Position, Rect, Size};

/// One stack of popups: a screen and the anchor they grow from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GroupKey {
    pub screen: usize,
    pub anchor: Position,
}

/// Ordered members of a stack; index 0 is nearest the anchor.
///
/// Removal closes the gap immediately, so occupied slots always form the
/// range `0..len()`.
#[derive(Debug, Default, Clone)]
pub struct SlotGroup {
    ids: Vec<PopupId>,
}

impl SlotGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` following the anchor policy and return its slot.
    ///
    /// Upper anchors append (newest farthest from the corner); lower anchors
    /// insert at slot 0 and push the others outward. Either way the most
    /// recent popup ends up next to the edge the reader is watching.
    pub fn insert(&mut self, id: PopupId, anchor: Position) -> usize {
        if anchor.is_upper() {
            self.ids.push(id);
            self.ids.len() - 1
        } else {
            self.ids.insert(0, id);
            0
        }
    }

    /// Remove `id` and return the slot it vacated.
    pub fn remove(&mut self, id: PopupId) -> Option<usize> {
        let slot = self.slot_of(id)?;
        self.ids.remove(slot);
        Some(slot)
    }

    #[must_use]
    pub fn slot_of(&self, id: PopupId) -> Option<usize> {
        self.ids.iter().position(|member| *member == id)
    }

    #[must_use]
    pub fn ids(&self) -> &[PopupId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Top-left pixel of a popup of `size` whose stack offset from the anchored
/// edge is `offset` (heights plus spacing of every slot before it).
#[must_use]
pub const fn slot_origin(
    bounds: Rect,
    anchor: Position,
    offset: i32,
    size: Size,
    layout: &LayoutSettings,
) -> Point {
    let margin = layout.edge_margin;
    let x = match anchor {
        Position::TopLeft | Position::BottomLeft => bounds.x.saturating_add(margin),
        Position::TopCenter | Position::BottomCenter => {
            bounds.x.saturating_add(bounds.width.saturating_sub(size.width) / 2)
        }
        Position::TopRight | Position::BottomRight => bounds
            .right()
            .saturating_sub(margin)
            .saturating_sub(size.width),
    };
    let y = if anchor.is_upper() {
        bounds.y.saturating_add(margin).saturating_add(offset)
    } else {
        bounds
            .bottom()
            .saturating_sub(margin)
            .saturating_sub(size.height)
            .saturating_sub(offset)
    };
    Point::new(x, y)
}

/// Target origin of every member of `group`, in slot order.
pub fn stack_targets(
    group: &SlotGroup,
    bounds: Rect,
    anchor: Position,
    layout: &LayoutSettings,
    size_of: impl Fn(PopupId) -> Size,
) -> Vec<(PopupId, Point)> {
    let mut offset = 0;
    group
        .ids()
        .iter()
        .map(|&id| {
            let size = size_of(id);
            let origin = slot_origin(bounds, anchor, offset, size, layout);
            offset = offset
                .saturating_add(size.height)
                .saturating_add(layout.spacing);
            (id, origin)
        })
        .collect()
}
