//! Selector generation.
//!
//! Given an element of a live snapshot, produce a CSS selector that finds it
//! again: a unique id wins outright, otherwise a structural path of tag names
//! with `:nth-of-type` disambiguation, climbing until a unique-id ancestor or
//! the level just below `html`. Generation is pure and synchronous over the
//! snapshot it is handed; if the tree mutates mid-walk the result carries no
//! guarantee, and persistence of the output is the caller's concern.

use dompin_dom::{classes, Document};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::escape::escape_ident;
use crate::matcher::query_all;
use crate::parser::{parse, ParseError};
use crate::selector::{Compound, Selector};

/// Structural selectors rendering longer than this are candidates for the
/// class-based readable form.
pub const READABLE_MAX_LEN: usize = 100;

/// Compute a selector identifying `node` within `doc`.
///
/// Total: every input yields a selector, though for a detached node or a
/// document with no disambiguating structure it may be ambiguous. Callers
/// who care should use [`locate`].
pub fn generate_selector<D: Document>(doc: &D, node: D::Node) -> Selector {
    if let Some(id) = nonempty_id(doc, node) {
        if id_is_unique(doc, id) {
            return Selector::single(Compound::Id(id.to_string()));
        }
    }

    let mut compounds = Vec::new();
    let mut current = Some(node);
    while let Some(step) = current {
        if let Some(id) = nonempty_id(doc, step) {
            if id_is_unique(doc, id) {
                // Unique-id ancestor anchors the path; nothing above it
                // matters.
                compounds.push(Compound::Id(id.to_string()));
                break;
            }
        }

        compounds.push(Compound::Part {
            tag: doc.tag(step).to_ascii_lowercase(),
            classes: Vec::new(),
            nth: positional_index(doc, step),
        });

        match doc.parent(step) {
            // The html element itself is never a path step.
            Some(parent) if doc.tag(parent).eq_ignore_ascii_case("html") => break,
            next => current = next,
        }
    }

    compounds.reverse();
    Selector::new(compounds)
}

/// Like [`generate_selector`], but when the structural path renders longer
/// than [`READABLE_MAX_LEN`], try `tag` plus the element's first two class
/// tokens as a single flat step. The flat form is returned only if it matches
/// exactly one element and renders shorter; otherwise the structural path
/// stands. Never longer than the structural result.
pub fn readable_selector<D: Document>(doc: &D, node: D::Node) -> Selector {
    let structural = generate_selector(doc, node);
    let structural_len = structural.to_string().len();
    if structural_len <= READABLE_MAX_LEN {
        return structural;
    }

    if let Some(flat) = class_compound(doc, node) {
        let candidate = Selector::single(flat);
        if candidate.to_string().len() < structural_len && query_all(doc, &candidate).len() == 1 {
            debug!(selector = %candidate, "class form replaces structural path");
            return candidate;
        }
    }
    structural
}

/// How uniquely a generated selector pinned its element down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Uniqueness {
    /// Exactly one match: the element itself.
    Unique,
    /// The element is in the match set, along with others.
    Ambiguous { matches: usize },
    /// The element is not in the match set (detached/orphan subtree).
    Detached,
}

/// A generated selector together with its uniqueness against the same
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub selector: Selector,
    pub uniqueness: Uniqueness,
}

/// Generate a selector for `node` and report how uniquely it resolves.
/// Ambiguity is data here, never an error.
pub fn locate<D: Document>(doc: &D, node: D::Node) -> Location {
    let selector = generate_selector(doc, node);
    let matches = query_all(doc, &selector);

    let uniqueness = if !matches.contains(&node) {
        Uniqueness::Detached
    } else if matches.len() == 1 {
        Uniqueness::Unique
    } else {
        Uniqueness::Ambiguous {
            matches: matches.len(),
        }
    };
    if uniqueness != Uniqueness::Unique {
        debug!(selector = %selector, ?uniqueness, "non-unique selector generated");
    }
    Location {
        selector,
        uniqueness,
    }
}

/// Outcome of re-resolving a stored selector against a (possibly changed)
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<N> {
    /// Nothing matches any more.
    None,
    /// Exactly one element matches.
    One(N),
    /// Several elements match, in document order.
    Many(Vec<N>),
}

/// Re-resolve a previously stored selector string. Only a malformed selector
/// is an error; zero or many matches are outcomes for the caller to act on.
pub fn resolve<D: Document>(doc: &D, input: &str) -> Result<Resolution<D::Node>, ParseError> {
    let selector = parse(input)?;
    let mut matches = query_all(doc, &selector);
    Ok(match matches.len() {
        0 => Resolution::None,
        1 => Resolution::One(matches.remove(0)),
        _ => Resolution::Many(matches),
    })
}

fn nonempty_id<'d, D: Document>(doc: &'d D, node: D::Node) -> Option<&'d str> {
    doc.id(node).filter(|id| !id.is_empty())
}

/// A real scoped query for `#<escaped-id>`: unique means exactly one match.
/// A probe that fails to parse counts as not unique.
fn id_is_unique<D: Document>(doc: &D, id: &str) -> bool {
    let rendered = format!("#{}", escape_ident(id));
    match parse(&rendered) {
        Ok(probe) => query_all(doc, &probe).len() == 1,
        Err(err) => {
            debug!(id, %err, "id probe unparseable, treated as non-unique");
            false
        }
    }
}

/// 1-based position among the parent's children sharing the node's tag name,
/// emitted only when more than one such sibling exists. Tags compare ASCII
/// case-insensitively, the same rule the matcher ranks by, so the emitted
/// index always resolves back to the node it was computed from.
fn positional_index<D: Document>(doc: &D, node: D::Node) -> Option<usize> {
    let parent = doc.parent(node)?;
    let tag = doc.tag(node);
    let same_tag: Vec<D::Node> = doc
        .children(parent)
        .into_iter()
        .filter(|&sibling| doc.tag(sibling).eq_ignore_ascii_case(tag))
        .collect();
    if same_tag.len() < 2 {
        return None;
    }
    same_tag
        .iter()
        .position(|&sibling| sibling == node)
        .map(|i| i + 1)
}

fn class_compound<D: Document>(doc: &D, node: D::Node) -> Option<Compound> {
    let attr = doc.class(node)?;
    let picked: Vec<String> = classes(attr).take(2).map(str::to_string).collect();
    if picked.is_empty() {
        return None;
    }
    Some(Compound::Part {
        tag: doc.tag(node).to_ascii_lowercase(),
        classes: picked,
        nth: None,
    })
}
