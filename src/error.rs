//! Error types.
//!
//! Façade operations never fail: a missing node or empty text is a silent
//! no-op. Errors only come out of seed loading, config decoding and the wasm
//! boundary, plus the invariant checker used by tests.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("Failed to decode seed tree: {0}")]
    SeedDecode(#[source] serde_json::Error),

    #[error("Failed to decode layout config: {0}")]
    ConfigDecode(#[source] serde_json::Error),

    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid seed tree: {0}")]
    InvalidSeed(#[from] InvariantViolation),

    #[error("Unknown polarity '{0}'")]
    UnknownPolarity(String),

    #[error("Unknown vote direction '{0}'")]
    UnknownVote(String),
}

/// A broken tree invariant. The façade never produces one; seeds can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("expected exactly one root node, found {0}")]
    RootCount(usize),

    #[error("node id '{0}' is used more than once")]
    DuplicateNode(String),

    #[error("edge '{edge}' references missing node '{node}'")]
    DanglingEdge { edge: String, node: String },

    #[error("node '{node}' has {count} incoming edges, expected {expected}")]
    ParentCount { node: String, count: usize, expected: usize },

    #[error("node '{0}' is not reachable from the root")]
    Unreachable(String),

    #[error("edge '{0}' polarity does not match its target")]
    PolarityMismatch(String),

    #[error("edge '{0}' has a stale routing style")]
    StaleRouting(String),

    #[error("edge '{0}' id is not derived from its endpoints")]
    EdgeId(String),

    #[error("node '{0}' has a stale has_children flag")]
    StaleHasChildren(String),
}
