// Padded bounding boxes and overlap testing.
//
// Boxes are centred horizontally on the node's x and hang down from its y,
// padded on every side. Nodes with an open discussion panel never collide:
// the layout must not jump while someone is reading a thread.

use crate::model::{Node, PointI};
use super::{LayoutConfig, SizeI};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn around(position: PointI, size: SizeI, padding: i32) -> Self {
        let half_w = size.w / 2 + padding;
        Self {
            left: position.x.saturating_sub(half_w),
            right: position.x.saturating_add(half_w),
            top: position.y.saturating_sub(padding),
            bottom: position.y.saturating_add(size.h + padding),
        }
    }

    /// Touching edges count as intersecting.
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }
}

pub fn bounding_box(node: &Node, cfg: &LayoutConfig) -> Bounds {
    Bounds::around(node.position, cfg.size_for(node.state()), cfg.collision_padding)
}

pub fn overlaps(a: &Node, b: &Node, cfg: &LayoutConfig) -> bool {
    if a.is_discussion_expanded || b.is_discussion_expanded {
        return false;
    }
    bounding_box(a, cfg).intersects(&bounding_box(b, cfg))
}

/// Overlap test for a box that has no node yet (placement probes).
pub fn probe_hits(probe: &Bounds, node: &Node, cfg: &LayoutConfig) -> bool {
    !node.is_discussion_expanded && probe.intersects(&bounding_box(node, cfg))
}
