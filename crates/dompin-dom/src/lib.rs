pub mod arena;
pub mod document;

pub use arena::{ElementData, MemoryDocument};
pub use indextree::NodeId;
pub use document::{classes, Document};
