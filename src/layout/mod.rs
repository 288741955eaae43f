// Incremental tree layout for argument maps.
//
// Goals:
// - Deterministic: no randomness, same input order => same output
// - Incremental: a new child is placed near its parent, never a full re-layout
// - Bounded: fixed retry / pass budgets, residual overlap is acceptable
// - Geometry derived from node state (normal / editing / discussion)
//
// Submodules:
// - collision: padded bounding boxes and overlap tests
// - adjacency: parent/child index built from the edge list
// - routing: direct vs branching edge classification
// - placement: first position for a new child
// - redistribute: even fan-out of a parent's children
// - rebalance: bounded relaxation over the whole node set

use serde::{Deserialize, Serialize};

use crate::model::{Edge, Node, NodeState};

pub mod adjacency;
pub mod collision;
pub mod placement;
pub mod rebalance;
pub mod redistribute;
pub mod routing;

pub use adjacency::Adjacency;
pub use collision::{Bounds, bounding_box, overlaps};
pub use placement::find_child_position;
pub use rebalance::{RebalanceReport, rebalance};
pub use redistribute::redistribute_children;
pub use routing::{classify_edges, routing_for};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeI {
    pub w: i32,
    pub h: i32,
}

/// Unpadded node rectangle, top-left anchored, as handed to the renderer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct RectI {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl RectI {
    pub fn right(&self) -> i32 { self.x.saturating_add(self.w) }
    pub fn bottom(&self) -> i32 { self.y.saturating_add(self.h) }
}

/// How the rebalancer groups nodes before relaxing them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthBuckets {
    /// Root, children of the root, everything else.
    #[default]
    Flat,
    /// True hop count from the root.
    Exact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Size of a node at rest.
    pub node_size: SizeI,
    /// Size while the text editor is open.
    pub editing_size: SizeI,
    /// Size while the discussion panel is open.
    pub discussion_size: SizeI,
    /// Added on every side of a box before overlap testing.
    pub collision_padding: i32,
    /// Distance from a parent's top edge to its children's top edge.
    pub vertical_spacing: i32,
    /// Floor for every horizontal spacing value.
    pub min_horizontal_spacing: i32,
    /// Margin added to the node width when placing a new sibling.
    pub sibling_margin: i32,
    /// Fan-out at which redistribution starts compressing sibling spacing.
    pub fan_out_reference: i32,
    /// Lower bound for the redistribution spacing before compression.
    pub redistribute_base_spacing: i32,
    /// Probes the placement solver makes before giving up.
    pub placement_retries: usize,
    /// Relaxation passes the rebalancer makes at most.
    pub rebalance_passes: usize,
    /// Margin added to the node height for vertical rebalancer pushes.
    pub rebalance_vertical_margin: i32,
    pub depth_buckets: DepthBuckets,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_size: SizeI { w: 300, h: 120 },
            editing_size: SizeI { w: 400, h: 180 },
            discussion_size: SizeI { w: 300, h: 300 },
            collision_padding: 20,
            vertical_spacing: 280,
            min_horizontal_spacing: 50,
            sibling_margin: 50,
            fan_out_reference: 4,
            redistribute_base_spacing: 300,
            placement_retries: 20,
            rebalance_passes: 3,
            rebalance_vertical_margin: 50,
            depth_buckets: DepthBuckets::Flat,
        }
    }
}

impl LayoutConfig {
    pub fn size_for(&self, state: NodeState) -> SizeI {
        match state {
            NodeState::Normal => self.node_size,
            NodeState::Editing => self.editing_size,
            NodeState::DiscussionExpanded => self.discussion_size,
        }
    }

    /// Horizontal unit the placement solver steps in.
    pub fn placement_spacing(&self) -> i32 {
        self.min_horizontal_spacing
            .max(self.node_size.w + self.sibling_margin)
    }
}

pub fn node_rect(node: &Node, cfg: &LayoutConfig) -> RectI {
    let size = cfg.size_for(node.state());
    RectI {
        x: node.position.x.saturating_sub(size.w / 2),
        y: node.position.y,
        w: size.w,
        h: size.h,
    }
}

/// Re-fan every parent's children, then relax the whole map.
/// Parents are visited in the order their first edge appears.
pub fn relayout_all(nodes: &mut [Node], edges: &[Edge], cfg: &LayoutConfig) -> RebalanceReport {
    let adjacency = Adjacency::from_edges(edges);
    for parent in adjacency.parents_in_order() {
        redistribute_children(parent.as_str(), nodes, edges, cfg);
    }
    rebalance(nodes, edges, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeId, Polarity, PointI};

    #[test]
    fn test_size_follows_state() {
        let cfg = LayoutConfig::default();
        let mut node = Node::draft(NodeId::from("2"), Polarity::Support, PointI { x: 100, y: 40 });
        assert_eq!(node_rect(&node, &cfg), RectI { x: -100, y: 40, w: 400, h: 180 });

        node.is_editing = false;
        let rect = node_rect(&node, &cfg);
        assert_eq!(rect, RectI { x: -50, y: 40, w: 300, h: 120 });
        assert_eq!(rect.right(), 250);
        assert_eq!(rect.bottom(), 160);
    }

    #[test]
    fn test_placement_spacing_default() {
        assert_eq!(LayoutConfig::default().placement_spacing(), 350);
    }

    #[test]
    fn test_partial_config_from_json() {
        let cfg: LayoutConfig =
            serde_json::from_str(r#"{ "vertical_spacing": 200, "depth_buckets": "exact" }"#).unwrap();
        assert_eq!(cfg.vertical_spacing, 200);
        assert_eq!(cfg.depth_buckets, DepthBuckets::Exact);
        assert_eq!(cfg.node_size, SizeI { w: 300, h: 120 });
    }
}
