use crate::commands::{normalize, CmdResult};
use crate::forest::Forest;
use crate::model::{now_millis, DocumentId, Placement, Position};

/// Reparents or reorders `source_id` relative to `target_id`.
///
/// Preconditions, checked in order. Violating any of them is a silent no-op:
/// 1. both ids name live documents
/// 2. `source_id != target_id`
/// 3. the target is not a descendant of the source (a move may never create a cycle)
///
/// - [`Position::Inside`]: source becomes the last child of the target.
/// - [`Position::Before`] / [`Position::After`]: source joins the target's sibling
///   group at `target.order ∓ 0.5`.
///
/// Both the old and the new sibling group are normalized afterwards.
///
/// Giving a restored orphan a parent settles it: it no longer waits for the
/// parent it was archived from.
pub fn run(forest: &mut Forest, source_id: &str, target_id: &str, position: Position) -> CmdResult {
    let (Some(source), Some(target)) = (forest.find_live(source_id), forest.find_live(target_id))
    else {
        tracing::debug!(source_id, target_id, "move skipped: unknown document");
        return CmdResult::default();
    };
    if source_id == target_id {
        tracing::debug!(source_id, "move skipped: cannot drop a document on itself");
        return CmdResult::default();
    }
    if forest.is_descendant_of(target_id, source_id) {
        tracing::debug!(source_id, target_id, "move skipped: target is a descendant");
        return CmdResult::default();
    }

    let old_parent: Option<DocumentId> = source.parent_id.clone();
    let (new_parent, new_order) = match position {
        Position::Inside => (
            Some(target.id.clone()),
            forest.next_order(Some(target.id.as_str())),
        ),
        Position::Before => (target.parent_id.clone(), target.order - 0.5),
        Position::After => (target.parent_id.clone(), target.order + 0.5),
    };

    let Some(source) = forest.live_mut(source_id) else {
        return CmdResult::default();
    };
    source.parent_id = new_parent.clone();
    source.order = new_order;
    if new_parent.is_some() {
        source.placement = Placement::Attached;
    }
    source.touch(now_millis());

    normalize::run(forest, old_parent.as_deref());
    if new_parent != old_parent {
        normalize::run(forest, new_parent.as_deref());
    }

    tracing::debug!(source_id, target_id, %position, "document moved");
    let moved = forest.find_live(source_id).cloned();
    CmdResult::default().with_affected_documents(moved.into_iter().collect())
}
