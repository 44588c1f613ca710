use crate::commands::{normalize, CmdMessage, CmdResult};
use crate::forest::Forest;
use crate::model::{now_millis, DocumentId, Placement, TrashedDocument};

/// Moves a live document and its entire live subtree to the trash.
///
/// Each archived document records its structural parent in
/// `original_parent_id` and gets `parent_id = None`. A restored orphan records
/// the parent it is still waiting for, so a later restore retries that parent.
///
/// All or nothing: an id that is not live changes nothing. The former sibling
/// group of the archived root is normalized so no gap is left behind.
pub fn run(forest: &mut Forest, id: &str) -> CmdResult {
    let Some(root) = forest.find_live(id) else {
        tracing::debug!(id, "archive skipped: not a live document");
        return CmdResult::default();
    };

    let former_parent = root.parent_id.clone();
    let mut subtree: Vec<DocumentId> = vec![root.id.clone()];
    subtree.extend(forest.descendants_of(id).iter().map(|d| d.id.clone()));

    let now = now_millis();
    let mut result = CmdResult::default();
    for doc_id in &subtree {
        let Some(mut doc) = forest.remove_live(doc_id) else {
            continue;
        };
        let original_parent_id = match std::mem::take(&mut doc.placement) {
            Placement::RestoredOrphan { original_parent_id } => Some(original_parent_id),
            Placement::Attached => doc.parent_id.take(),
        };
        doc.parent_id = None;
        doc.touch(now);
        result.affected_documents.push(doc.clone());
        forest.insert_trashed(TrashedDocument {
            document: doc,
            original_parent_id,
            archived_at: now,
        });
    }

    normalize::run(forest, former_parent.as_deref());

    tracing::debug!(id, count = subtree.len(), "archived subtree");
    if subtree.len() > 1 {
        result.add_message(CmdMessage::info(format!(
            "Moved {} documents to the trash",
            subtree.len()
        )));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{assert_normalized, child_ids, forest};

    #[test]
    fn archives_whole_subtree() {
        let mut forest = forest(&[
            ("p", None),
            ("c1", Some("p")),
            ("c2", Some("p")),
            ("g", Some("c1")),
            ("other", None),
        ]);

        let result = run(&mut forest, "p");

        assert_eq!(result.affected_documents.len(), 4);
        for id in ["p", "c1", "c2", "g"] {
            assert!(!forest.exists_live(id), "{id} should not be live");
            let trashed = forest.find_trashed(id).unwrap();
            assert_eq!(trashed.document.parent_id, None);
        }
        assert_eq!(forest.find_trashed("p").unwrap().original_parent_id, None);
        assert_eq!(
            forest.find_trashed("c1").unwrap().original_parent_id,
            Some(DocumentId::from("p"))
        );
        assert_eq!(
            forest.find_trashed("c2").unwrap().original_parent_id,
            Some(DocumentId::from("p"))
        );
        assert_eq!(
            forest.find_trashed("g").unwrap().original_parent_id,
            Some(DocumentId::from("c1"))
        );
        assert_eq!(child_ids(&forest, None), vec!["other"]);
    }

    #[test]
    fn leaf_archive_leaves_parent_alone() {
        let mut forest = forest(&[("p", None), ("a", Some("p")), ("b", Some("p")), ("c", Some("p"))]);

        run(&mut forest, "a");

        assert!(forest.exists_live("p"));
        assert_eq!(child_ids(&forest, Some("p")), vec!["b", "c"]);
        assert_normalized(&forest, Some("p"));
        assert_eq!(forest.trash_count(), 1);
    }

    #[test]
    fn unknown_id_is_noop() {
        let mut forest = forest(&[("a", None)]);
        assert!(run(&mut forest, "ghost").is_noop());
        assert_eq!(forest.live_count(), 1);
        assert_eq!(forest.trash_count(), 0);
    }

    #[test]
    fn archiving_twice_is_noop() {
        let mut forest = forest(&[("a", None)]);
        run(&mut forest, "a");
        assert!(run(&mut forest, "a").is_noop());
        assert_eq!(forest.trash_count(), 1);
    }

    #[test]
    fn orphan_keeps_its_awaited_parent() {
        let mut forest = forest(&[("c", None)]);
        forest.live_mut("c").unwrap().placement = Placement::RestoredOrphan {
            original_parent_id: "p".into(),
        };

        run(&mut forest, "c");

        let trashed = forest.find_trashed("c").unwrap();
        assert_eq!(trashed.original_parent_id, Some(DocumentId::from("p")));
        assert!(!trashed.document.is_restored_orphan());
    }
}
