//! Re-resolution of stored selector strings, the way a periodic re-check
//! consumes them.

use dompin_core::{generate_selector, resolve, ParseError, Resolution};
use dompin_dom::{Document, MemoryDocument, NodeId};

fn monitored_page() -> (MemoryDocument, NodeId) {
    let mut doc = MemoryDocument::new("html");
    let body = doc.append(doc.root_id(), "body");
    let ul = doc.append(body, "ul");
    doc.append(ul, "li");
    doc.append(ul, "li");
    let watched = doc.append(ul, "li");
    (doc, watched)
}

#[test]
fn stored_selector_resolves_to_one() {
    let (doc, watched) = monitored_page();
    let stored = generate_selector(&doc, watched).to_string();

    match resolve(&doc, &stored) {
        Ok(Resolution::One(node)) => assert_eq!(node, watched),
        other => panic!("expected a single match, got {:?}", other),
    }
}

#[test]
fn resolution_survives_appended_content() {
    let (mut doc, watched) = monitored_page();
    let stored = generate_selector(&doc, watched).to_string();

    // The page grows after the selector was stored; the watched element's
    // sibling rank is unchanged.
    let body = doc.children(doc.root_id())[0];
    let aside = doc.append(body, "aside");
    doc.append(aside, "p");

    assert_eq!(resolve(&doc, &stored).unwrap(), Resolution::One(watched));
}

#[test]
fn vanished_element_resolves_to_none() {
    let (doc, _) = monitored_page();
    assert_eq!(
        resolve(&doc, "li:nth-of-type(9)").unwrap(),
        Resolution::None
    );
    assert_eq!(resolve(&doc, "#gone").unwrap(), Resolution::None);
    // Valid CSS that can never match is an outcome, not an error.
    assert_eq!(
        resolve(&doc, "li:nth-of-type(0)").unwrap(),
        Resolution::None
    );
}

#[test]
fn drifted_page_resolves_to_many() {
    let (doc, _) = monitored_page();
    match resolve(&doc, "li").unwrap() {
        Resolution::Many(nodes) => assert_eq!(nodes.len(), 3),
        other => panic!("expected many matches, got {:?}", other),
    }
}

#[test]
fn malformed_selector_is_an_error() {
    let (doc, _) = monitored_page();
    assert!(matches!(
        resolve(&doc, "li >"),
        Err(ParseError::Pest(_))
    ));
}
