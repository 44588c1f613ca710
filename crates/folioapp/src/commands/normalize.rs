use crate::forest::Forest;

/// Reassigns `order = 0, 1, 2, ...` to the children of `parent_id` in their
/// current sorted order. Idempotent.
pub fn run(forest: &mut Forest, parent_id: Option<&str>) {
    let ids: Vec<String> = forest
        .children_of(parent_id)
        .iter()
        .map(|d| d.id.to_string())
        .collect();

    for (index, id) in ids.iter().enumerate() {
        if let Some(doc) = forest.live_mut(id) {
            doc.order = index as f64;
        }
    }
}
