//! Dotted-path field selection for nested log documents.
//!
//! A selector is a dotted string path such as `kubernetes.pod_name`. The first
//! segment names a top-level key; the remainder (the sub-selector) is applied
//! recursively to that key's value when the value is itself a document.
//! Matching is case-sensitive and exact, with no wildcards or quoting.
//!
//! Projection is destructive: [`project_fields`] prunes the given document in
//! place, removing every key that no selector names. Callers that need the
//! original document must clone it first.

use serde_json::{Map, Value};

/// Match `key` against a list of dotted selectors.
///
/// Selectors are scanned in the order given and the first match wins, so
/// duplicate or conflicting entries (`"a"` and `"a.b"` both present) resolve
/// to whichever the caller listed first.
///
/// Returns `Some(sub_selector)` when a selector's first segment equals `key`.
/// An empty sub-selector means the matched key's entire value is kept
/// unpruned; a non-empty one is the remainder to recurse with. A selector
/// with a trailing dot (`"a."`) degrades to an empty sub-selector.
pub fn select<'a>(selectors: &[&'a str], key: &str) -> Option<&'a str> {
    for entry in selectors {
        let (head, rest) = match entry.split_once('.') {
            Some((head, rest)) => (head, rest),
            None => (*entry, ""),
        };
        if head == key {
            return Some(rest);
        }
    }
    None
}

/// Prune `doc` in place, keeping only the keys named by `selectors`.
///
/// An empty selector list is a no-op: filtering is opt-in, and "no selectors"
/// means "keep everything". For a selected key whose selector carried a
/// sub-selector, the same pruning recurses into the nested document; if the
/// value is a scalar (or an array) the sub-selector cannot apply and the
/// value is kept in full. Recursion depth is bounded by the document itself,
/// which is always an acyclic tree since it comes from decoded JSON.
pub fn project_fields(doc: &mut Map<String, Value>, selectors: &[String]) {
    if selectors.is_empty() {
        return;
    }
    let selectors: Vec<&str> = selectors.iter().map(String::as_str).collect();
    prune(doc, &selectors);
}

fn prune(doc: &mut Map<String, Value>, selectors: &[&str]) {
    doc.retain(|key, value| match select(selectors, key) {
        None => false,
        Some("") => true,
        Some(sub) => {
            if let Value::Object(nested) = value {
                prune(nested, &[sub]);
            }
            true
        }
    });
}
