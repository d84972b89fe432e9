//! Arena-backed in-memory document.
//!
//! All nodes live in one `indextree::Arena`; handles are `NodeId`s, so clones
//! of a handle always name the same slot. The model is element-only; this
//! engine never consumes text or comment nodes.

use std::collections::HashMap;

use indextree::{Arena, NodeId};

use crate::document::Document;

/// What goes in each arena slot.
#[derive(Debug, Clone)]
pub struct ElementData {
    tag: String,
    attrs: HashMap<String, String>,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: HashMap::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// An element tree owned in memory.
///
/// Built top-down: start from a root tag, `append` children, `set_attr` as
/// needed. `new_detached` creates a node outside the tree for orphan cases.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    arena: Arena<ElementData>,
    root: NodeId,
}

impl MemoryDocument {
    pub fn new(root_tag: &str) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(ElementData::new(root_tag));
        Self { arena, root }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Append a new last child under `parent`.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let child = self.arena.new_node(ElementData::new(tag));
        parent.append(child, &mut self.arena);
        child
    }

    /// Create a node that belongs to no tree.
    pub fn new_detached(&mut self, tag: &str) -> NodeId {
        self.arena.new_node(ElementData::new(tag))
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.arena[node]
            .get_mut()
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, node: NodeId) -> &ElementData {
        self.arena[node].get()
    }

    pub fn len(&self) -> usize {
        self.arena.count()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.count() == 0
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn root(&self) -> Option<NodeId> {
        Some(self.root)
    }

    fn tag(&self, node: NodeId) -> &str {
        self.arena[node].get().tag()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.arena[node].get().attr(name)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena[node].parent()
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        node.children(&self.arena).collect()
    }
}
