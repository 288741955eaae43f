//! Output types for the renderer.
//!
//! A [`MapOutput`] is a read-only snapshot of an [`ArgumentMap`], serialized to
//! JSON and handed to the frontend for drawing.

use serde::Serialize;

use crate::error::MapError;
use crate::layout::{RectI, node_rect};
use crate::map::ArgumentMap;
use crate::model::{Comment, Edge, Node, NodeState, Polarity, PointI, Routing};

/// A node ready for the frontend to display
#[derive(Debug, Clone, Serialize)]
pub struct NodeOutput {
    pub id: String,
    pub polarity: Polarity,
    /// Horizontal centre and top edge
    pub position: PointI,
    /// Unpadded box for the current state, top-left anchored
    pub bounds: RectI,
    pub state: NodeState,
    pub text: String,
    pub author: String,
    pub votes: u32,
    pub dislikes: u32,
    pub comments: Vec<Comment>,
    pub has_children: bool,
    pub is_editing: bool,
    pub is_discussion_expanded: bool,
}

/// A parent-to-child connector
#[derive(Debug, Clone, Serialize)]
pub struct EdgeOutput {
    pub id: String,
    pub source: String,
    pub target: String,
    pub polarity: Polarity,
    /// "direct" for an only child, "branching" otherwise
    pub routing: Routing,
}

/// The combined snapshot sent to the frontend
#[derive(Debug, Clone, Serialize)]
pub struct MapOutput {
    pub nodes: Vec<NodeOutput>,
    pub edges: Vec<EdgeOutput>,
}

impl MapOutput {
    pub fn from_map(map: &ArgumentMap) -> Self {
        let nodes = map
            .nodes()
            .iter()
            .map(|n| NodeOutput::from_node(n, map))
            .collect();
        let edges = map.edges().iter().map(EdgeOutput::from).collect();
        Self { nodes, edges }
    }

    pub fn to_json(&self) -> Result<String, MapError> {
        serde_json::to_string(self).map_err(MapError::Encode)
    }
}

impl NodeOutput {
    fn from_node(node: &Node, map: &ArgumentMap) -> Self {
        Self {
            id: node.id.to_string(),
            polarity: node.polarity,
            position: node.position,
            bounds: node_rect(node, map.config()),
            state: node.state(),
            text: node.text.clone(),
            author: node.author.clone(),
            votes: node.votes,
            dislikes: node.dislikes,
            comments: node.comments.clone(),
            has_children: node.has_children,
            is_editing: node.is_editing,
            is_discussion_expanded: node.is_discussion_expanded,
        }
    }
}

impl From<&Edge> for EdgeOutput {
    fn from(edge: &Edge) -> Self {
        Self {
            id: edge.id.clone(),
            source: edge.source.to_string(),
            target: edge.target.to_string(),
            polarity: edge.polarity,
            routing: edge.routing,
        }
    }
}
