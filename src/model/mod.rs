mod seed;
mod types;

pub use seed::{SeedEdge, SeedNode, SeedTree};
pub use types::*;
