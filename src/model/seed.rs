//! Seed trees: the starter data a map is created from.
//!
//! A seed only carries what a host can know up front. Edge ids, edge polarity,
//! routing and `has_children` are derived when the seed is turned into nodes
//! and edges; validation happens in [`crate::ArgumentMap::from_seed`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MapError;
use super::types::{Comment, Edge, Node, NodeId, Polarity, PointI};

const STARTER: &str = include_str!("starter.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTree {
    pub nodes: Vec<SeedNode>,
    #[serde(default)]
    pub edges: Vec<SeedEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedNode {
    pub id: NodeId,
    pub polarity: Polarity,
    /// Any JSON number is accepted; fractions are rounded to the nearest
    /// integer and values past the `i32` range are clamped.
    #[serde(deserialize_with = "rounded_point")]
    pub position: PointI,
    pub text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub votes: u32,
    #[serde(default)]
    pub dislikes: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEdge {
    pub source: NodeId,
    pub target: NodeId,
}

fn rounded_point<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PointI, D::Error> {
    #[derive(Deserialize)]
    struct Raw {
        x: f64,
        y: f64,
    }

    // `as` saturates at the i32 bounds.
    let raw = Raw::deserialize(deserializer)?;
    Ok(PointI { x: raw.x.round() as i32, y: raw.y.round() as i32 })
}

impl SeedTree {
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        serde_json::from_str(json).map_err(MapError::SeedDecode)
    }

    /// The seven-node debate the editor opens with.
    pub fn starter() -> Result<Self, MapError> {
        Self::from_json(STARTER)
    }

    /// A map holding nothing but its root claim at the origin.
    pub fn single_root(id: &str, text: &str, author: &str) -> Self {
        Self {
            nodes: vec![SeedNode {
                id: NodeId::from(id),
                polarity: Polarity::Root,
                position: PointI { x: 0, y: 0 },
                text: text.to_string(),
                author: author.to_string(),
                votes: 0,
                dislikes: 0,
                comments: Vec::new(),
            }],
            edges: Vec::new(),
        }
    }

    /// Nodes and edges as stored; routing and flags are not derived yet.
    pub(crate) fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        let edges: Vec<Edge> = self
            .edges
            .iter()
            .map(|e| {
                // Unknown targets are caught by validation; the polarity is a
                // placeholder until then.
                let polarity = self
                    .nodes
                    .iter()
                    .find(|n| n.id == e.target)
                    .map(|n| n.polarity)
                    .unwrap_or(Polarity::Support);
                Edge::new(e.source.clone(), e.target.clone(), polarity)
            })
            .collect();

        let nodes = self
            .nodes
            .into_iter()
            .map(|n| Node {
                id: n.id,
                polarity: n.polarity,
                position: n.position,
                text: n.text,
                author: n.author,
                votes: n.votes,
                dislikes: n.dislikes,
                comments: n.comments,
                has_children: false,
                is_editing: false,
                is_discussion_expanded: false,
            })
            .collect();

        (nodes, edges)
    }
}
