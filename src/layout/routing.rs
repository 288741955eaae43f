// Edge routing classification.
//
// A source with a single child gets a direct connector; two or more children
// share a branching one. Must be recomputed for every edge of a source whenever
// that source gains or loses a child.

use crate::model::{Edge, NodeId, Routing};
use super::adjacency::Adjacency;

pub fn routing_for(source: &NodeId, edges: &[Edge]) -> Routing {
    let fan_out = edges.iter().filter(|e| &e.source == source).count();
    Routing::from_fan_out(fan_out)
}

/// Recompute routing for all edges. Returns how many changed.
pub fn classify_edges(edges: &mut [Edge]) -> usize {
    let adjacency = Adjacency::from_edges(edges);
    let mut changed = 0;

    for edge in edges.iter_mut() {
        let routing = Routing::from_fan_out(adjacency.fan_out(edge.source.as_str()));
        if edge.routing != routing {
            edge.routing = routing;
            changed += 1;
        }
    }

    changed
}
