// Sibling redistribution.
//
// Re-fans all children of one parent symmetrically: support to the left,
// objections to the right, each group ordered outward from the parent so the
// child already nearest keeps the innermost slot. Spacing shrinks once the
// fan-out passes `fan_out_reference`, floored at `min_horizontal_spacing`.
// Only x changes.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::model::{Edge, Node, Side};
use super::LayoutConfig;
use super::adjacency::Adjacency;

/// Spacing between neighbouring siblings for a fan-out of `total_children`.
pub fn adaptive_spacing(total_children: usize, cfg: &LayoutConfig) -> i32 {
    let base = (cfg.node_size.w + cfg.min_horizontal_spacing).max(cfg.redistribute_base_spacing);
    let total = total_children.max(1) as i32;
    let compressed = base * cfg.fan_out_reference / total;
    base.min(compressed).max(cfg.min_horizontal_spacing)
}

/// Returns true if any child moved.
pub fn redistribute_children(
    parent_id: &str,
    nodes: &mut [Node],
    edges: &[Edge],
    cfg: &LayoutConfig,
) -> bool {
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let Some(&parent_idx) = index.get(parent_id) else {
        return false;
    };

    let adjacency = Adjacency::from_edges(edges);
    let children: Vec<usize> = adjacency
        .get_children(parent_id)
        .iter()
        .filter_map(|id| index.get(id.as_str()).copied())
        .collect();

    if children.len() <= 1 {
        return false;
    }

    let mut left: Vec<usize> = Vec::new();
    let mut right: Vec<usize> = Vec::new();
    for &i in &children {
        match nodes[i].polarity.side() {
            Some(Side::Left) => left.push(i),
            Some(Side::Right) => right.push(i),
            None => {}
        }
    }

    // Outward order; stable sort keeps node order on ties.
    left.sort_by_key(|&i| (Reverse(nodes[i].position.x), i));
    right.sort_by_key(|&i| (nodes[i].position.x, i));

    let spacing = adaptive_spacing(left.len() + right.len(), cfg);
    let parent_x = nodes[parent_idx].position.x;
    let mut moved = false;

    for (slot, &i) in left.iter().enumerate() {
        let x = parent_x.saturating_sub(spacing.saturating_mul(slot as i32 + 1));
        moved |= nodes[i].position.x != x;
        nodes[i].position.x = x;
    }
    for (slot, &i) in right.iter().enumerate() {
        let x = parent_x.saturating_add(spacing.saturating_mul(slot as i32 + 1));
        moved |= nodes[i].position.x != x;
        nodes[i].position.x = x;
    }

    moved
}
