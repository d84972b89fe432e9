//! Selector evaluation against a document.
//!
//! Standard CSS semantics for the emitted subset: the last compound matches
//! the candidate element, each preceding compound must match the successive
//! parent (direct child chain), and the outermost compound may sit anywhere
//! in the tree. Results come back in document order.

use dompin_dom::{classes, Document};
use tracing::trace;

use crate::selector::{Compound, Selector};

/// All elements matching `selector`, in document order.
pub fn query_all<D: Document>(doc: &D, selector: &Selector) -> Vec<D::Node> {
    if selector.compounds.is_empty() {
        return Vec::new();
    }
    let matches: Vec<D::Node> = doc
        .elements()
        .into_iter()
        .filter(|&node| matches_at(doc, selector, node))
        .collect();
    trace!(selector = %selector, matches = matches.len(), "query");
    matches
}

/// First match in document order, if any.
pub fn query_first<D: Document>(doc: &D, selector: &Selector) -> Option<D::Node> {
    query_all(doc, selector).into_iter().next()
}

/// Number of elements matching `selector`.
pub fn count<D: Document>(doc: &D, selector: &Selector) -> usize {
    query_all(doc, selector).len()
}

fn matches_at<D: Document>(doc: &D, selector: &Selector, node: D::Node) -> bool {
    let mut steps = selector.compounds.iter().rev();
    let last = match steps.next() {
        Some(compound) => compound,
        None => return false,
    };
    if !matches_compound(doc, last, node) {
        return false;
    }

    let mut current = node;
    for step in steps {
        current = match doc.parent(current) {
            Some(parent) => parent,
            None => return false,
        };
        if !matches_compound(doc, step, current) {
            return false;
        }
    }
    true
}

fn matches_compound<D: Document>(doc: &D, compound: &Compound, node: D::Node) -> bool {
    match compound {
        Compound::Id(id) => doc.id(node) == Some(id.as_str()),
        Compound::Part {
            tag,
            classes: wanted,
            nth,
        } => {
            if !doc.tag(node).eq_ignore_ascii_case(tag) {
                return false;
            }
            let has_class = |wanted_class: &String| {
                doc.class(node)
                    .map(|attr| classes(attr).any(|c| c == wanted_class))
                    .unwrap_or(false)
            };
            if !wanted.iter().all(has_class) {
                return false;
            }
            match nth {
                Some(k) => same_tag_rank(doc, node) == *k,
                None => true,
            }
        }
    }
}

/// 1-based rank of `node` among same-tag siblings (`nth-of-type` semantics);
/// rank 1 when there is no parent.
pub(crate) fn same_tag_rank<D: Document>(doc: &D, node: D::Node) -> usize {
    let parent = match doc.parent(node) {
        Some(parent) => parent,
        None => return 1,
    };
    let tag = doc.tag(node);
    let mut rank = 0;
    for sibling in doc.children(parent) {
        if doc.tag(sibling).eq_ignore_ascii_case(tag) {
            rank += 1;
            if sibling == node {
                return rank;
            }
        }
    }
    1
}
