use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Author recorded on nodes created through the editor.
pub const NEW_NODE_AUTHOR: &str = "New user";
/// Author recorded on comments added through the editor.
pub const COMMENT_AUTHOR: &str = "Current user";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointI {
    pub x: i32,
    pub y: i32,
}

/// Which side of its parent a child fans out to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Root,
    Support,
    Objection,
}

impl Polarity {
    /// Text a freshly created node of this polarity starts with.
    /// The root is never created through the editor, so it has none.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Polarity::Root => None,
            Polarity::Support => Some("New argument in support"),
            Polarity::Objection => Some("New argument against"),
        }
    }

    /// Supporting statements sit left of their parent, objections right.
    pub fn side(self) -> Option<Side> {
        match self {
            Polarity::Root => None,
            Polarity::Support => Some(Side::Left),
            Polarity::Objection => Some(Side::Right),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Polarity::Root => "root",
            Polarity::Support => "support",
            Polarity::Objection => "objection",
        }
    }
}

impl FromStr for Polarity {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "root" | "main" => Ok(Polarity::Root),
            "support" => Ok(Polarity::Support),
            "objection" => Ok(Polarity::Objection),
            other => Err(MapError::UnknownPolarity(other.to_string())),
        }
    }
}

/// Edge routing: a lone child gets a straight connector, siblings share a
/// stepped one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Routing {
    Direct,
    Branching,
}

impl Routing {
    pub fn from_fan_out(fan_out: usize) -> Self {
        if fan_out == 1 {
            Routing::Direct
        } else {
            Routing::Branching
        }
    }
}

/// Interaction state a node's size is derived from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeState {
    Normal,
    Editing,
    DiscussionExpanded,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Up,
    Down,
}

impl FromStr for Vote {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" | "like" => Ok(Vote::Up),
            "down" | "dislike" => Ok(Vote::Down),
            other => Err(MapError::UnknownVote(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub votes: u32,
}

/// One argument statement on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub polarity: Polarity,
    /// `x` is the horizontal centre, `y` the top edge.
    pub position: PointI,
    pub text: String,
    pub author: String,
    pub votes: u32,
    pub dislikes: u32,
    pub comments: Vec<Comment>,
    pub has_children: bool,
    pub is_editing: bool,
    pub is_discussion_expanded: bool,
}

impl Node {
    /// A new child in editing state carrying its polarity's placeholder text.
    pub fn draft(id: NodeId, polarity: Polarity, position: PointI) -> Self {
        Self {
            id,
            polarity,
            position,
            text: polarity.placeholder().unwrap_or_default().to_string(),
            author: NEW_NODE_AUTHOR.to_string(),
            votes: 0,
            dislikes: 0,
            comments: Vec::new(),
            has_children: false,
            is_editing: true,
            is_discussion_expanded: false,
        }
    }

    pub fn state(&self) -> NodeState {
        if self.is_discussion_expanded {
            NodeState::DiscussionExpanded
        } else if self.is_editing {
            NodeState::Editing
        } else {
            NodeState::Normal
        }
    }

    pub fn has_placeholder_text(&self) -> bool {
        self.polarity.placeholder() == Some(self.text.as_str())
    }

    /// Never edited since creation: still editing, still the placeholder.
    pub fn is_draft(&self) -> bool {
        self.is_editing && self.has_placeholder_text()
    }
}

/// Directed parent -> child link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    /// Mirrors the target's polarity.
    pub polarity: Polarity,
    pub routing: Routing,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId, polarity: Polarity) -> Self {
        Self {
            id: edge_id(&source, &target),
            source,
            target,
            polarity,
            routing: Routing::Direct,
        }
    }
}

pub fn edge_id(source: &NodeId, target: &NodeId) -> String {
    format!("e{}-{}", source, target)
}
