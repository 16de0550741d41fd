//! Layer arena: slotmap-backed forest of floating elements with priority resolution.

pub mod dump;
pub mod node;
pub mod resolve;
pub mod tree;

pub use node::{LayerData, LayerId, LayerRole};
pub use resolve::{Resolution, ResolvedLayer};
pub use tree::{StackTree, TreeError};
