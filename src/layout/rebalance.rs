// Global rebalancing: bounded relaxation over the whole map.
//
// Nodes are bucketed by depth and processed bucket by bucket; the root never
// moves. Each processed node is tested against every other node and, on its
// first overlap, pushed half a node size (plus margin) away along the axis
// where the two are further apart. A pass without moves ends early.
//
// Skipped entirely while any discussion panel is open.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::model::{Edge, Node, Polarity};
use super::{DepthBuckets, LayoutConfig};
use super::adjacency::Adjacency;
use super::collision::overlaps;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RebalanceReport {
    /// Passes actually run.
    pub passes: usize,
    /// Individual pushes applied.
    pub moves: usize,
    /// The last pass made no moves.
    pub settled: bool,
    /// Nothing ran because a discussion panel is open.
    pub skipped: bool,
}

pub fn rebalance(nodes: &mut [Node], edges: &[Edge], cfg: &LayoutConfig) -> RebalanceReport {
    if nodes.iter().any(|n| n.is_discussion_expanded) {
        return RebalanceReport { skipped: true, ..RebalanceReport::default() };
    }

    let buckets = depth_buckets(nodes, edges, cfg.depth_buckets);
    let push_x = (cfg.node_size.w + cfg.min_horizontal_spacing) / 2;
    let push_y = (cfg.node_size.h + cfg.rebalance_vertical_margin) / 2;

    let mut report = RebalanceReport::default();

    for _pass in 0..cfg.rebalance_passes {
        report.passes += 1;
        let mut any_moved = false;

        for (_, bucket) in buckets.range(1..) {
            for &i in bucket {
                let Some(j) = (0..nodes.len())
                    .find(|&j| j != i && overlaps(&nodes[i], &nodes[j], cfg))
                else {
                    continue;
                };

                let dx = i64::from(nodes[i].position.x) - i64::from(nodes[j].position.x);
                let dy = i64::from(nodes[i].position.y) - i64::from(nodes[j].position.y);
                let pos = &mut nodes[i].position;

                if dx.abs() > dy.abs() {
                    pos.x = pos.x.saturating_add(if dx > 0 { push_x } else { -push_x });
                } else {
                    pos.y = pos.y.saturating_add(if dy > 0 { push_y } else { -push_y });
                }

                report.moves += 1;
                any_moved = true;
            }
        }

        if !any_moved {
            report.settled = true;
            break;
        }
    }

    if !report.settled {
        debug!("rebalance stopped after {} passes with overlap left", report.passes);
    }

    report
}

/// Node indices grouped by depth bucket, node order kept within a bucket.
fn depth_buckets(
    nodes: &[Node],
    edges: &[Edge],
    mode: DepthBuckets,
) -> BTreeMap<usize, Vec<usize>> {
    let adjacency = Adjacency::from_edges(edges);
    let polarity: HashMap<&str, Polarity> =
        nodes.iter().map(|n| (n.id.as_str(), n.polarity)).collect();
    let mut buckets: BTreeMap<usize, Vec<usize>> = BTreeMap::new();

    for (i, node) in nodes.iter().enumerate() {
        let bucket = if node.polarity == Polarity::Root {
            0
        } else {
            match mode {
                DepthBuckets::Flat => match adjacency.get_parent(node.id.as_str()) {
                    None => 0,
                    Some(parent) if polarity.get(parent.as_str()) == Some(&Polarity::Root) => 1,
                    Some(_) => 2,
                },
                DepthBuckets::Exact => adjacency.depth(node.id.as_str(), nodes.len()),
            }
        };
        buckets.entry(bucket).or_default().push(i);
    }

    buckets
}
