//! Camel/Pascal-case token splitting.
//!
//! Load-bearing for clustering: the boundary rule here is pinned by tests and
//! must not drift independently of the clusterer.

use std::collections::BTreeSet;

/// Split an identifier on camel/Pascal-case boundaries and non-word
/// characters, lowercase the pieces, and drop fragments of length <= 2.
///
/// Equivalent to splitting on `(?<!^)(?=[A-Z])` and `[^A-Za-z0-9]+`, which the
/// `regex` crate cannot express directly (no lookaround); implemented here as
/// an explicit character scan instead. A boundary is inserted before *every*
/// uppercase letter past position 0, so acronym runs split one letter at a
/// time rather than being grouped as a unit — `"HTTPRequest"` yields the
/// single-letter fragments `h`, `t`, `t`, `p` (all dropped by the length
/// filter) plus `request`.
pub fn split_identifier(ident: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();

    for (i, c) in ident.chars().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                fragments.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && i > 0 && !current.is_empty() {
            fragments.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        fragments.push(current);
    }

    fragments
        .into_iter()
        .map(|f| f.to_lowercase())
        .filter(|f| f.len() > 2)
        .collect()
}

/// Build the per-method token bag: the union of split fragments from the
/// method name, each parameter's declared type, and each call-site target.
pub fn build_token_bag<'a>(
    name: &str,
    param_types: impl Iterator<Item = &'a str>,
    call_targets: impl Iterator<Item = &'a str>,
) -> BTreeSet<String> {
    let mut bag = BTreeSet::new();
    for fragment in split_identifier(name) {
        bag.insert(fragment);
    }
    for ty in param_types {
        for fragment in split_identifier(ty) {
            bag.insert(fragment);
        }
    }
    for target in call_targets {
        for fragment in split_identifier(target) {
            bag.insert(fragment);
        }
    }
    bag
}
