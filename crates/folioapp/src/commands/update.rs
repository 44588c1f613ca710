use crate::commands::CmdResult;
use crate::forest::Forest;
use crate::model::{now_millis, DocumentPatch};

/// Applies `patch` to a live document and bumps `updated_at`.
///
/// Unknown or trashed ids are a silent no-op. Structure (`parent_id`, `order`)
/// is never touched here.
pub fn run(forest: &mut Forest, id: &str, patch: &DocumentPatch) -> CmdResult {
    let Some(doc) = forest.live_mut(id) else {
        tracing::debug!(id, "update skipped: not a live document");
        return CmdResult::default();
    };

    doc.apply_patch(patch);
    doc.touch(now_millis());
    tracing::debug!(id, "document updated");

    CmdResult::default().with_affected_documents(vec![doc.clone()])
}
