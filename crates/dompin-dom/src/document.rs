//! Read-only document abstraction.
//!
//! Selector generation has to run against trees it does not own: an in-memory
//! fixture in tests, a scraped snapshot, a bridge into a live page. `Document`
//! is the capability surface the engine needs from any of them: tag name,
//! attributes, parent, ordered children. Element identity is handle equality,
//! never value equality.

/// A read-only view of an element tree.
///
/// Implementations must report children in document order; sibling ranks
/// (`nth-of-type`) are derived from it. Nothing here mutates the tree.
pub trait Document {
    /// Opaque element handle. Two handles compare equal iff they name the
    /// same element.
    type Node: Copy + Eq;

    /// The root element, if the document has one.
    fn root(&self) -> Option<Self::Node>;

    /// Tag name as stored (any case).
    fn tag(&self, node: Self::Node) -> &str;

    /// Attribute value, if present.
    fn attr(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Parent element, `None` at the tree root or on a detached node.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Direct children, in document order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// The `id` attribute, if present.
    fn id(&self, node: Self::Node) -> Option<&str> {
        self.attr(node, "id")
    }

    /// The raw `class` attribute, if present.
    fn class(&self, node: Self::Node) -> Option<&str> {
        self.attr(node, "class")
    }

    /// Pre-order walk of `from` and everything below it.
    fn descendants(&self, from: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(node) = stack.pop() {
            out.push(node);
            let mut kids = self.children(node);
            kids.reverse();
            stack.append(&mut kids);
        }
        out
    }

    /// Every element in the document, in document order.
    fn elements(&self) -> Vec<Self::Node> {
        match self.root() {
            Some(root) => self.descendants(root),
            None => Vec::new(),
        }
    }
}

/// Split a raw `class` attribute into its tokens.
pub fn classes(class_attr: &str) -> impl Iterator<Item = &str> {
    class_attr.split_whitespace()
}
