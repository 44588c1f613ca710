use crate::commands::{CmdMessage, CmdResult};
use crate::forest::Forest;
use crate::model::{DocumentId, Placement};
use std::collections::HashSet;

/// Permanently removes a trashed document together with its trashed lineage.
///
/// Lineage is recomputed at purge time by following `original_parent_id` links
/// between trashed documents (see [`Forest::trashed_lineage_of`]). Live documents
/// are never removed. Live restored orphans that were waiting for a purged
/// document can no longer be re-attached, so they become ordinary root documents.
///
/// Ids not in the trash are a silent no-op.
pub fn run(forest: &mut Forest, id: &str) -> CmdResult {
    if !forest.is_trashed(id) {
        tracing::debug!(id, "purge skipped: not in trash");
        return CmdResult::default();
    }

    let mut targets = vec![DocumentId::from(id)];
    targets.extend(forest.trashed_lineage_of(id));

    let mut result = CmdResult::default();
    for target in &targets {
        if let Some(trashed) = forest.remove_trashed(target) {
            result.affected_documents.push(trashed.document);
        }
    }

    let purged: HashSet<&str> = targets.iter().map(|t| t.as_str()).collect();
    let mut released = 0;
    for doc in forest.live_documents_mut() {
        let waiting_on_purged = doc
            .awaited_parent()
            .is_some_and(|parent| purged.contains(parent.as_str()));
        if waiting_on_purged {
            doc.placement = Placement::Attached;
            released += 1;
        }
    }

    tracing::debug!(id, count = targets.len(), released, "purged from trash");
    result.add_message(CmdMessage::success(format!(
        "Permanently deleted {} document(s)",
        result.affected_documents.len()
    )));
    result
}
