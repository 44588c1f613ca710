//! Shared builders for command tests.

use crate::forest::Forest;
use crate::model::{Document, DocumentId};
use std::collections::HashMap;

/// Builds a live forest from `(id, parent)` pairs. Titles equal ids and each
/// sibling group gets orders `0..n` in the given sequence.
pub(crate) fn forest(nodes: &[(&str, Option<&str>)]) -> Forest {
    let mut next_order: HashMap<Option<&str>, f64> = HashMap::new();
    let docs = nodes
        .iter()
        .map(|(id, parent)| {
            let order = next_order.entry(*parent).or_insert(0.0);
            let doc = Document::new(
                DocumentId::from(*id),
                id,
                parent.map(DocumentId::from),
                *order,
                1_000,
            );
            *order += 1.0;
            doc
        })
        .collect();
    Forest::from_parts(docs, Vec::new()).expect("fixture forest is valid")
}

pub(crate) fn child_ids(forest: &Forest, parent: Option<&str>) -> Vec<String> {
    forest
        .children_of(parent)
        .iter()
        .map(|d| d.id.to_string())
        .collect()
}

pub(crate) fn orders(forest: &Forest, parent: Option<&str>) -> Vec<f64> {
    forest.children_of(parent).iter().map(|d| d.order).collect()
}

pub(crate) fn assert_normalized(forest: &Forest, parent: Option<&str>) {
    let expected: Vec<f64> = (0..forest.children_of(parent).len())
        .map(|i| i as f64)
        .collect();
    assert_eq!(orders(forest, parent), expected);
}
