// Placement of a newly added child.
//
// The first child of a parent sits straight below it. Later children start one
// spacing unit further out on their polarity's side than the siblings already
// there, then step outward in half units until a probe box clears every
// existing node. Depth lives purely in y: a child is always exactly one
// vertical spacing below its parent.

use std::collections::HashMap;

use log::trace;

use crate::model::{Edge, Node, NodeState, Polarity, PointI, Side};
use super::LayoutConfig;
use super::adjacency::Adjacency;
use super::collision::{Bounds, probe_hits};

/// Propose a position for a new `polarity` child of `parent`.
///
/// Only nodes already in `nodes` count as children or obstacles; the child
/// being placed is not one of them yet. Best effort: if every probe collides
/// the unshifted base position is returned.
pub fn find_child_position(
    parent: &Node,
    polarity: Polarity,
    nodes: &[Node],
    edges: &[Edge],
    cfg: &LayoutConfig,
) -> PointI {
    let y = parent.position.y.saturating_add(cfg.vertical_spacing);
    let centred = PointI { x: parent.position.x, y };

    let present: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    let adjacency = Adjacency::from_edges(edges);
    let children: Vec<&Node> = adjacency
        .get_children(parent.id.as_str())
        .iter()
        .filter_map(|id| present.get(id.as_str()).copied())
        .collect();

    if children.is_empty() {
        return centred;
    }

    let Some(side) = polarity.side() else {
        return centred;
    };

    let same_side = children.iter().filter(|c| c.polarity == polarity).count() as i32;
    let spacing = cfg.placement_spacing();
    let offset = spacing.saturating_mul(same_side.saturating_add(1));
    let (base_x, step) = match side {
        Side::Left => (parent.position.x.saturating_sub(offset), -spacing / 2),
        Side::Right => (parent.position.x.saturating_add(offset), spacing / 2),
    };

    // Probes use the resting size, like any node the user is not touching.
    let probe_size = cfg.size_for(NodeState::Normal);
    let mut test_x = base_x;

    for attempt in 0..cfg.placement_retries {
        let candidate = PointI { x: test_x, y };
        let probe = Bounds::around(candidate, probe_size, cfg.collision_padding);

        if !nodes.iter().any(|n| probe_hits(&probe, n, cfg)) {
            trace!(
                "placed child of '{}' at {:?} after {} probes",
                parent.id,
                candidate,
                attempt + 1
            );
            return candidate;
        }

        test_x = test_x.saturating_add(step);
    }

    trace!(
        "no free slot for child of '{}' after {} probes, using base x {}",
        parent.id, cfg.placement_retries, base_x
    );
    PointI { x: base_x, y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeId;

    fn node(id: &str, polarity: Polarity, x: i32, y: i32) -> Node {
        let mut n = Node::draft(NodeId::from(id), polarity, PointI { x, y });
        n.is_editing = false;
        n
    }

    fn edge(source: &str, target: &str, polarity: Polarity) -> Edge {
        Edge::new(NodeId::from(source), NodeId::from(target), polarity)
    }

    #[test]
    fn test_first_child_is_centred() {
        let cfg = LayoutConfig::default();
        let root = node("1", Polarity::Root, 600, 50);
        let nodes = vec![root.clone()];

        let pos = find_child_position(&root, Polarity::Objection, &nodes, &[], &cfg);
        assert_eq!(pos, PointI { x: 600, y: 330 });
    }

    #[test]
    fn test_edge_to_missing_node_is_not_a_child() {
        let cfg = LayoutConfig::default();
        let root = node("1", Polarity::Root, 0, 0);
        let nodes = vec![root.clone()];
        // The edge for the node being created may already exist.
        let edges = vec![edge("1", "2", Polarity::Support)];

        let pos = find_child_position(&root, Polarity::Support, &nodes, &edges, &cfg);
        assert_eq!(pos, PointI { x: 0, y: 280 });
    }

    #[test]
    fn test_sides_follow_polarity() {
        let cfg = LayoutConfig::default();
        let root = node("1", Polarity::Root, 0, 0);
        let nodes = vec![root.clone(), node("2", Polarity::Support, -1200, 280)];
        let edges = vec![edge("1", "2", Polarity::Support)];

        let support = find_child_position(&root, Polarity::Support, &nodes, &edges, &cfg);
        assert_eq!(support, PointI { x: -700, y: 280 });

        let objection = find_child_position(&root, Polarity::Objection, &nodes, &edges, &cfg);
        assert_eq!(objection, PointI { x: 350, y: 280 });
    }

    #[test]
    fn test_collision_shifts_outward_by_half_unit() {
        let cfg = LayoutConfig::default();
        let root = node("1", Polarity::Root, 0, 0);
        // Existing support child sits right on the first objection slot.
        let nodes = vec![root.clone(), node("2", Polarity::Support, 350, 280)];
        let edges = vec![edge("1", "2", Polarity::Support)];

        let pos = find_child_position(&root, Polarity::Objection, &nodes, &edges, &cfg);
        // 350 and 525 collide, 700 is clear
        assert_eq!(pos, PointI { x: 700, y: 280 });
    }

    #[test]
    fn test_exhausted_budget_returns_base() {
        let cfg = LayoutConfig { placement_retries: 2, ..LayoutConfig::default() };
        let root = node("1", Polarity::Root, 0, 0);
        let nodes = vec![
            root.clone(),
            node("2", Polarity::Objection, 350, 280),
            node("3", Polarity::Objection, 525, 280),
            node("4", Polarity::Objection, 700, 280),
        ];
        let edges = vec![edge("1", "2", Polarity::Objection)];

        let pos = find_child_position(&root, Polarity::Objection, &nodes, &edges, &cfg);
        // one objection child already => base is two units out
        assert_eq!(pos, PointI { x: 700, y: 280 });
    }

    #[test]
    fn test_expanded_nodes_are_not_obstacles() {
        let cfg = LayoutConfig::default();
        let root = node("1", Polarity::Root, 0, 0);
        let mut blocker = node("2", Polarity::Support, 350, 280);
        blocker.is_discussion_expanded = true;
        let nodes = vec![root.clone(), blocker];
        let edges = vec![edge("1", "2", Polarity::Support)];

        let pos = find_child_position(&root, Polarity::Objection, &nodes, &edges, &cfg);
        assert_eq!(pos, PointI { x: 350, y: 280 });
    }

    #[test]
    fn test_placement_is_deterministic() {
        let cfg = LayoutConfig::default();
        let root = node("1", Polarity::Root, 0, 0);
        let nodes = vec![
            root.clone(),
            node("2", Polarity::Support, -350, 280),
            node("3", Polarity::Objection, 350, 280),
        ];
        let edges = vec![edge("1", "2", Polarity::Support), edge("1", "3", Polarity::Objection)];

        let first = find_child_position(&root, Polarity::Support, &nodes, &edges, &cfg);
        let second = find_child_position(&root, Polarity::Support, &nodes, &edges, &cfg);
        assert_eq!(first, second);
    }

    #[test]
    fn test_far_edge_of_canvas_saturates() {
        let cfg = LayoutConfig::default();
        let root = node("1", Polarity::Root, i32::MAX, i32::MAX);
        let nodes = vec![root.clone(), node("2", Polarity::Objection, i32::MAX, i32::MAX)];
        let edges = vec![edge("1", "2", Polarity::Objection)];

        let first = find_child_position(&root, Polarity::Support, &nodes, &[], &cfg);
        assert_eq!(first, PointI { x: i32::MAX, y: i32::MAX });

        let pos = find_child_position(&root, Polarity::Objection, &nodes, &edges, &cfg);
        assert_eq!(pos.y, i32::MAX);
    }
}
