//! Argument map core: an incremental tree layout and collision-avoidance
//! engine for debate maps.
//!
//! A root claim fans out into supporting statements (placed left) and
//! objections (placed right), recursively. [`ArgumentMap`] owns the tree and
//! keeps it laid out as nodes are added, edited, removed and expanded.

pub mod error;
pub mod layout;
pub mod map;
pub mod model;
pub mod output;
mod wasm;

pub use error::{InvariantViolation, MapError};
pub use layout::LayoutConfig;
pub use map::ArgumentMap;
pub use model::{Comment, Edge, Node, NodeId, NodeState, Polarity, PointI, Routing, SeedTree, Vote};
pub use output::MapOutput;
pub use wasm::ArgumentMapHandle;
