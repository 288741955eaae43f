//! The argument map store and its mutation operations.
//!
//! [`ArgumentMap`] owns the node and edge lists and is their only writer.
//! Every operation runs to completion under `&mut self`, keeps the tree
//! invariants, and calls the layout passes in a fixed order: edge routing,
//! placement, sibling redistribution, global rebalancing.
//!
//! Precondition failures (unknown node, empty text) are silent no-ops that
//! return `false` / `None`; nothing here returns an error.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::error::{InvariantViolation, MapError};
use crate::layout::{
    self, Adjacency, LayoutConfig, RebalanceReport, classify_edges, find_child_position,
    rebalance, redistribute_children,
};
use crate::model::{
    COMMENT_AUTHOR, Comment, Edge, Node, NodeId, Polarity, PointI, Routing, SeedTree, Vote,
    edge_id,
};

/// Positions as they were before the latest `add_child`, put back if that
/// draft is discarded before the layout moves again.
#[derive(Debug, Clone)]
struct PendingDraft {
    id: NodeId,
    positions: Vec<(NodeId, PointI)>,
}

#[derive(Debug, Clone)]
pub struct ArgumentMap {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    config: LayoutConfig,
    next_id: u64,
    pending: Option<PendingDraft>,
}

impl ArgumentMap {
    /// Build a map from a seed, deriving routing and `has_children` and
    /// rejecting anything that is not a single tree.
    pub fn from_seed(seed: SeedTree, config: LayoutConfig) -> Result<Self, MapError> {
        let (nodes, edges) = seed.into_parts();
        let mut map = Self { nodes, edges, config, next_id: 1, pending: None };

        classify_edges(&mut map.edges);
        map.refresh_has_children();
        map.check_invariants()?;

        map.next_id = map
            .nodes
            .iter()
            .filter_map(|n| n.id.as_str().parse::<u64>().ok())
            .max()
            .map_or(1, |max| max.wrapping_add(1));

        debug!("loaded map with {} nodes, {} edges", map.nodes.len(), map.edges.len());
        Ok(map)
    }

    pub fn starter(config: LayoutConfig) -> Result<Self, MapError> {
        Self::from_seed(SeedTree::starter()?, config)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| e.source.as_str() == source && e.target.as_str() == target)
    }

    pub fn root_id(&self) -> Option<&NodeId> {
        self.nodes.iter().find(|n| n.polarity == Polarity::Root).map(|n| &n.id)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id.as_str() == id)
    }

    fn allocate_id(&mut self) -> NodeId {
        loop {
            let id = NodeId(self.next_id.to_string());
            self.next_id = self.next_id.wrapping_add(1);
            if self.index_of(id.as_str()).is_none() {
                return id;
            }
        }
    }

    /// Add a `polarity` child under `parent_id` and lay it out.
    /// The new node starts in editing state with placeholder text.
    pub fn add_child(&mut self, parent_id: &str, polarity: Polarity) -> Option<NodeId> {
        if polarity == Polarity::Root {
            debug!("add_child: a second root cannot be added");
            return None;
        }
        let Some(parent_idx) = self.index_of(parent_id) else {
            debug!("add_child: parent '{}' not found", parent_id);
            return None;
        };

        let id = self.allocate_id();
        let before: Vec<(NodeId, PointI)> =
            self.nodes.iter().map(|n| (n.id.clone(), n.position)).collect();
        let parent_key = self.nodes[parent_idx].id.clone();

        self.edges.push(Edge::new(parent_key, id.clone(), polarity));
        classify_edges(&mut self.edges);
        self.nodes[parent_idx].has_children = true;

        let position = find_child_position(
            &self.nodes[parent_idx],
            polarity,
            &self.nodes,
            &self.edges,
            &self.config,
        );
        self.nodes.push(Node::draft(id.clone(), polarity, position));

        redistribute_children(parent_id, &mut self.nodes, &self.edges, &self.config);
        let report = rebalance(&mut self.nodes, &self.edges, &self.config);
        self.pending = Some(PendingDraft { id: id.clone(), positions: before });

        debug!(
            "added {} '{}' under '{}' at {:?} ({} rebalance moves)",
            polarity.as_str(),
            id,
            parent_id,
            position,
            report.moves
        );
        Some(id)
    }

    /// Save edited text. Blank text is ignored.
    pub fn commit_edit(&mut self, node_id: &str, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            debug!("commit_edit: empty text for '{}'", node_id);
            return false;
        }
        let Some(idx) = self.index_of(node_id) else {
            debug!("commit_edit: node '{}' not found", node_id);
            return false;
        };

        let node = &mut self.nodes[idx];
        node.text = text.to_string();
        node.is_editing = false;
        true
    }

    /// Leave editing. A node still carrying its placeholder text was never
    /// written and is discarded together with its edge.
    pub fn cancel_edit(&mut self, node_id: &str) -> bool {
        let Some(idx) = self.index_of(node_id) else {
            debug!("cancel_edit: node '{}' not found", node_id);
            return false;
        };

        if self.nodes[idx].has_placeholder_text() {
            let id = self.nodes[idx].id.clone();
            self.remove_subtrees(&[id]);
        } else {
            self.nodes[idx].is_editing = false;
        }
        true
    }

    /// Put an existing node into editing and let its neighbours make room.
    pub fn begin_edit(&mut self, node_id: &str) -> bool {
        let Some(idx) = self.index_of(node_id) else {
            debug!("begin_edit: node '{}' not found", node_id);
            return false;
        };
        if self.nodes[idx].is_editing {
            return false;
        }

        self.nodes[idx].is_editing = true;
        self.pending = None;
        rebalance(&mut self.nodes, &self.edges, &self.config);
        true
    }

    /// A click on a node. Unless that node is being edited, every draft is
    /// discarded and all other editors close. Returns true if nodes were removed.
    pub fn select_node(&mut self, node_id: &str) -> bool {
        let Some(idx) = self.index_of(node_id) else {
            debug!("select_node: node '{}' not found", node_id);
            return false;
        };
        if self.nodes[idx].is_editing {
            return false;
        }

        let drafts: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|n| n.is_draft())
            .map(|n| n.id.clone())
            .collect();

        let removed = self.remove_subtrees(&drafts);
        for node in &mut self.nodes {
            node.is_editing = false;
        }
        removed > 0
    }

    /// Unbounded: nothing stops the same user voting again.
    pub fn vote(&mut self, node_id: &str, vote: Vote) -> bool {
        let Some(idx) = self.index_of(node_id) else {
            debug!("vote: node '{}' not found", node_id);
            return false;
        };

        let node = &mut self.nodes[idx];
        match vote {
            Vote::Up => node.votes = node.votes.saturating_add(1),
            Vote::Down => node.dislikes = node.dislikes.saturating_add(1),
        }
        true
    }

    /// Open or close one node's discussion panel; other panels are untouched.
    pub fn toggle_discussion(&mut self, node_id: &str) -> bool {
        let Some(idx) = self.index_of(node_id) else {
            debug!("toggle_discussion: node '{}' not found", node_id);
            return false;
        };

        let node = &mut self.nodes[idx];
        node.is_discussion_expanded = !node.is_discussion_expanded;
        self.pending = None;
        rebalance(&mut self.nodes, &self.edges, &self.config);
        true
    }

    /// A click on empty canvas: close every discussion panel.
    pub fn close_all_discussions(&mut self) -> bool {
        let mut closed = false;
        for node in self.nodes.iter_mut().filter(|n| n.is_discussion_expanded) {
            node.is_discussion_expanded = false;
            closed = true;
        }
        if closed {
            self.pending = None;
            rebalance(&mut self.nodes, &self.edges, &self.config);
        }
        closed
    }

    /// Append a comment stamped with `timestamp` (epoch milliseconds).
    pub fn add_comment(&mut self, node_id: &str, text: &str, timestamp: u64) -> bool {
        let text = text.trim();
        if text.is_empty() {
            debug!("add_comment: empty text for '{}'", node_id);
            return false;
        }
        let Some(idx) = self.index_of(node_id) else {
            debug!("add_comment: node '{}' not found", node_id);
            return false;
        };

        let node = &mut self.nodes[idx];
        let base = format!("c{}-{}", node.id, timestamp);
        let mut id = base.clone();
        let mut n = 1;
        while node.comments.iter().any(|c| c.id == id) {
            id = format!("{}-{}", base, n);
            n += 1;
        }

        node.comments.push(Comment {
            id,
            author: COMMENT_AUTHOR.to_string(),
            text: text.to_string(),
            timestamp,
            votes: 0,
        });
        true
    }

    /// Re-fan every parent's children and relax the whole map.
    pub fn relayout(&mut self) -> RebalanceReport {
        self.pending = None;
        layout::relayout_all(&mut self.nodes, &self.edges, &self.config)
    }

    /// Remove each listed node with everything below it, plus their edges.
    /// Returns how many nodes went.
    fn remove_subtrees(&mut self, roots: &[NodeId]) -> usize {
        if roots.is_empty() {
            return 0;
        }

        let adjacency = Adjacency::from_edges(&self.edges);
        let doomed: HashSet<NodeId> = roots
            .iter()
            .flat_map(|id| adjacency.subtree(id.as_str()))
            .collect();

        let before = self.nodes.len();
        self.nodes.retain(|n| !doomed.contains(&n.id));
        self.edges.retain(|e| !doomed.contains(&e.target) && !doomed.contains(&e.source));
        classify_edges(&mut self.edges);
        self.refresh_has_children();

        if let Some(pending) = self.pending.take() {
            if doomed.contains(&pending.id) {
                self.restore_positions(&pending.positions);
            }
        }

        let removed = before - self.nodes.len();
        debug!("removed {} draft node(s)", removed);
        removed
    }

    fn restore_positions(&mut self, positions: &[(NodeId, PointI)]) {
        let saved: HashMap<&NodeId, PointI> = positions.iter().map(|(id, p)| (id, *p)).collect();
        for node in &mut self.nodes {
            if let Some(&position) = saved.get(&node.id) {
                node.position = position;
            }
        }
    }

    fn refresh_has_children(&mut self) {
        let adjacency = Adjacency::from_edges(&self.edges);
        for node in &mut self.nodes {
            node.has_children = adjacency.fan_out(node.id.as_str()) > 0;
        }
    }

    /// Verify the tree invariants. The operations above never break them;
    /// this exists for seeds, tests and debug assertions.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let roots = self.nodes.iter().filter(|n| n.polarity == Polarity::Root).count();
        if roots != 1 {
            return Err(InvariantViolation::RootCount(roots));
        }

        let mut by_id: HashMap<&str, &Node> = HashMap::new();
        for node in &self.nodes {
            if by_id.insert(node.id.as_str(), node).is_some() {
                return Err(InvariantViolation::DuplicateNode(node.id.to_string()));
            }
        }

        let mut incoming: HashMap<&str, usize> = HashMap::new();
        for edge in &self.edges {
            for end in [&edge.source, &edge.target] {
                if !by_id.contains_key(end.as_str()) {
                    return Err(InvariantViolation::DanglingEdge {
                        edge: edge.id.clone(),
                        node: end.to_string(),
                    });
                }
            }
            if edge.id != edge_id(&edge.source, &edge.target) {
                return Err(InvariantViolation::EdgeId(edge.id.clone()));
            }
            if by_id[edge.target.as_str()].polarity != edge.polarity {
                return Err(InvariantViolation::PolarityMismatch(edge.id.clone()));
            }
            *incoming.entry(edge.target.as_str()).or_default() += 1;
        }

        for node in &self.nodes {
            let count = incoming.get(node.id.as_str()).copied().unwrap_or(0);
            let expected = if node.polarity == Polarity::Root { 0 } else { 1 };
            if count != expected {
                return Err(InvariantViolation::ParentCount {
                    node: node.id.to_string(),
                    count,
                    expected,
                });
            }
        }

        let adjacency = Adjacency::from_edges(&self.edges);
        for edge in &self.edges {
            if edge.routing != Routing::from_fan_out(adjacency.fan_out(edge.source.as_str())) {
                return Err(InvariantViolation::StaleRouting(edge.id.clone()));
            }
        }
        for node in &self.nodes {
            if node.has_children != (adjacency.fan_out(node.id.as_str()) > 0) {
                return Err(InvariantViolation::StaleHasChildren(node.id.to_string()));
            }
        }

        // Single parents everywhere, so reaching every node from the root
        // rules out cycles too.
        if let Some(root) = self.root_id() {
            let reachable: HashSet<NodeId> = adjacency.subtree(root.as_str()).into_iter().collect();
            if let Some(lost) = self.nodes.iter().find(|n| !reachable.contains(&n.id)) {
                return Err(InvariantViolation::Unreachable(lost.id.to_string()));
            }
        }

        Ok(())
    }
}
