// Parent/child index for the argument tree.
//
// Built from the edge list on demand, used to:
// 1. Enumerate a parent's children in edge order (placement, redistribution)
// 2. Count fan-out per source (edge routing)
// 3. Walk parent links to bucket nodes by depth (rebalancing)

use std::collections::{HashMap, HashSet};

use crate::model::{Edge, NodeId};

#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    /// For each source, its targets in edge order.
    pub children: HashMap<NodeId, Vec<NodeId>>,
    /// For each target, its source.
    pub parent: HashMap<NodeId, NodeId>,
    /// Sources in order of their first edge.
    order: Vec<NodeId>,
}

impl Adjacency {
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut adjacency = Self::default();

        for edge in edges {
            let children = adjacency.children.entry(edge.source.clone()).or_default();
            if children.is_empty() {
                adjacency.order.push(edge.source.clone());
            }
            children.push(edge.target.clone());
            adjacency.parent.insert(edge.target.clone(), edge.source.clone());
        }

        adjacency
    }

    /// Children of a node, or empty slice if none.
    pub fn get_children(&self, id: &str) -> &[NodeId] {
        self.children.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn get_parent(&self, id: &str) -> Option<&NodeId> {
        self.parent.get(id)
    }

    pub fn fan_out(&self, id: &str) -> usize {
        self.get_children(id).len()
    }

    pub fn parents_in_order(&self) -> &[NodeId] {
        &self.order
    }

    /// Hops from `id` up to a node without a parent.
    /// Capped at `limit` so a malformed cycle cannot spin forever.
    pub fn depth(&self, id: &str, limit: usize) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.get_parent(current) {
            depth += 1;
            if depth >= limit {
                break;
            }
            current = parent.as_str();
        }
        depth
    }

    /// `id` and everything below it, parents before children.
    pub fn subtree(&self, id: &str) -> Vec<NodeId> {
        let mut out = vec![NodeId::from(id)];
        let mut seen: HashSet<NodeId> = out.iter().cloned().collect();
        let mut i = 0;
        while i < out.len() {
            for child in self.get_children(out[i].as_str()) {
                if seen.insert(child.clone()) {
                    out.push(child.clone());
                }
            }
            i += 1;
        }
        out
    }
}
