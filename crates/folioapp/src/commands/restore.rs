use crate::commands::{normalize, CmdMessage, CmdResult};
use crate::forest::Forest;
use crate::model::{now_millis, DocumentId, Placement, Timestamp};

/// Moves one document from the trash back into the live forest.
///
/// The document goes back under its `original_parent_id`. If that parent is not
/// live (still trashed, or purged) it is placed at root as a restored orphan that
/// remembers the parent, and an informational notice is added.
///
/// After insertion every live orphan waiting for *this* document is re-attached
/// under it. Trashed descendants stay in the trash until restored individually.
///
/// Unknown ids are a silent no-op.
pub fn run(forest: &mut Forest, id: &str) -> CmdResult {
    let Some(trashed) = forest.remove_trashed(id) else {
        tracing::debug!(id, "restore skipped: not in trash");
        return CmdResult::default();
    };

    let mut result = CmdResult::default();
    let now = now_millis();
    let mut doc = trashed.document;

    match trashed.original_parent_id {
        Some(parent) if !forest.exists_live(&parent) => {
            tracing::info!(id, parent = %parent, "parent not live, restored to root");
            result.add_message(CmdMessage::info(format!(
                "The parent of \"{}\" is still in the trash, restored to the top level",
                doc.title
            )));
            doc.parent_id = None;
            doc.order = forest.next_order(None);
            doc.placement = Placement::RestoredOrphan {
                original_parent_id: parent,
            };
        }
        desired => {
            doc.parent_id = desired;
            doc.placement = Placement::Attached;
        }
    }
    doc.touch(now);

    let doc_id = doc.id.clone();
    let parent = doc.parent_id.clone();
    forest.insert_live(doc);
    normalize::run(forest, parent.as_deref());

    let reattached = reattach_orphans(forest, &doc_id, now);
    if !reattached.is_empty() {
        tracing::info!(id, count = reattached.len(), "re-attached restored orphans");
        result.add_message(CmdMessage::info(format!(
            "Re-attached {} document(s) that were waiting for this one",
            reattached.len()
        )));
    }

    if let Some(restored) = forest.find_live(&doc_id) {
        result.affected_documents.push(restored.clone());
    }
    result.affected_documents.extend(
        reattached
            .iter()
            .filter_map(|orphan| forest.find_live(orphan).cloned()),
    );
    result
}

/// Moves every live orphan awaiting `parent_id` under it and clears the flag.
///
/// An orphan that now sits above `parent_id` stays where it is, since attaching
/// it would close a cycle. It stops waiting either way.
fn reattach_orphans(forest: &mut Forest, parent_id: &DocumentId, now: Timestamp) -> Vec<DocumentId> {
    let waiting: Vec<(DocumentId, Option<DocumentId>)> = forest
        .orphans_awaiting(parent_id)
        .iter()
        .map(|d| (d.id.clone(), d.parent_id.clone()))
        .collect();

    let mut reattached = Vec::new();
    let mut former_groups: Vec<Option<DocumentId>> = Vec::new();
    for (orphan_id, former_parent) in waiting {
        let attachable =
            former_parent.is_none() && !forest.is_descendant_of(parent_id, &orphan_id);
        let Some(orphan) = forest.live_mut(&orphan_id) else {
            continue;
        };
        orphan.placement = Placement::Attached;
        if !attachable {
            tracing::debug!(orphan = %orphan_id, parent = %parent_id, "orphan kept in place");
            continue;
        }
        orphan.parent_id = Some(parent_id.clone());
        orphan.touch(now);
        if !former_groups.contains(&former_parent) {
            former_groups.push(former_parent);
        }
        reattached.push(orphan_id);
    }

    if !reattached.is_empty() {
        normalize::run(forest, Some(parent_id.as_str()));
    }
    for group in &former_groups {
        normalize::run(forest, group.as_deref());
    }
    reattached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{assert_normalized, child_ids, forest};
    use crate::commands::{archive, move_docs, purge};
    use crate::model::Position;

    fn archived_family() -> Forest {
        let mut forest = forest(&[
            ("p", None),
            ("c1", Some("p")),
            ("c2", Some("p")),
            ("other", None),
        ]);
        archive::run(&mut forest, "p");
        forest
    }

    #[test]
    fn restores_root_document_to_root() {
        let mut forest = archived_family();

        let result = run(&mut forest, "p");

        let p = forest.find_live("p").unwrap();
        assert_eq!(p.parent_id, None);
        assert!(!p.is_restored_orphan());
        assert_eq!(result.affected_documents[0].id.as_str(), "p");
        assert!(forest.is_trashed("c1"));
        assert!(forest.is_trashed("c2"));
        assert_normalized(&forest, None);
    }

    #[test]
    fn child_after_parent_goes_back_under_parent() {
        let mut forest = archived_family();
        run(&mut forest, "p");
        run(&mut forest, "c2");

        let c2 = forest.find_live("c2").unwrap();
        assert_eq!(c2.parent_id, Some(DocumentId::from("p")));
        assert!(!c2.is_restored_orphan());
        assert_normalized(&forest, Some("p"));
    }

    #[test]
    fn child_before_parent_becomes_orphan_then_reattaches() {
        let mut forest = archived_family();

        let result = run(&mut forest, "c1");
        let c1 = forest.find_live("c1").unwrap();
        assert_eq!(c1.parent_id, None);
        assert_eq!(c1.awaited_parent(), Some(&DocumentId::from("p")));
        assert!(result.messages[0].content.contains("still in the trash"));

        let result = run(&mut forest, "p");
        let c1 = forest.find_live("c1").unwrap();
        assert_eq!(c1.parent_id, Some(DocumentId::from("p")));
        assert!(!c1.is_restored_orphan());
        assert_eq!(child_ids(&forest, Some("p")), vec!["c1"]);
        assert_eq!(child_ids(&forest, None), vec!["other", "p"]);
        assert_normalized(&forest, None);
        assert_normalized(&forest, Some("p"));
        assert_eq!(result.affected_documents.len(), 2);
    }

    #[test]
    fn reattaches_only_matching_orphans() {
        let mut forest = forest(&[("a", None), ("a1", Some("a")), ("b", None), ("b1", Some("b"))]);
        archive::run(&mut forest, "a");
        archive::run(&mut forest, "b");
        run(&mut forest, "a1");
        run(&mut forest, "b1");

        run(&mut forest, "a");

        assert_eq!(child_ids(&forest, Some("a")), vec!["a1"]);
        assert!(forest.find_live("b1").unwrap().is_restored_orphan());
    }

    #[test]
    fn orphan_holding_its_awaited_parent_is_not_reattached() {
        // a > p > c
        let mut forest = forest(&[("a", None), ("p", Some("a")), ("c", Some("p"))]);
        archive::run(&mut forest, "p");
        run(&mut forest, "c");
        move_docs::run(&mut forest, "a", "c", Position::Inside);

        let result = run(&mut forest, "p");

        // c > a > p, no cycle
        assert_eq!(forest.find_live("p").unwrap().parent_id, Some(DocumentId::from("a")));
        assert_eq!(forest.find_live("a").unwrap().parent_id, Some(DocumentId::from("c")));
        let c = forest.find_live("c").unwrap();
        assert_eq!(c.parent_id, None);
        assert!(!c.is_restored_orphan());
        assert_eq!(child_ids(&forest, None), vec!["c"]);
        assert!(forest.validate().is_ok());
        assert!(result.messages.is_empty());
    }

    #[test]
    fn orphan_reordered_at_root_above_parent_stays_put() {
        let mut forest = forest(&[("a", None), ("p", Some("a")), ("c", Some("p")), ("z", None)]);
        archive::run(&mut forest, "p");
        run(&mut forest, "c");
        move_docs::run(&mut forest, "a", "c", Position::Inside);
        // Still at root, so still waiting for p.
        move_docs::run(&mut forest, "c", "z", Position::After);
        assert!(forest.find_live("c").unwrap().is_restored_orphan());

        run(&mut forest, "p");

        assert_eq!(forest.find_live("c").unwrap().parent_id, None);
        assert!(forest.validate().is_ok());
        assert_eq!(child_ids(&forest, None), vec!["z", "c"]);
    }

    #[test]
    fn orphan_moved_under_another_document_stays_there() {
        let mut forest = forest(&[("p", None), ("c", Some("p")), ("l", None), ("l1", Some("l"))]);
        archive::run(&mut forest, "p");
        run(&mut forest, "c");
        move_docs::run(&mut forest, "c", "l", Position::Inside);

        run(&mut forest, "p");

        assert_eq!(child_ids(&forest, Some("l")), vec!["l1", "c"]);
        assert!(forest.children_of(Some("p")).is_empty());
        assert_normalized(&forest, Some("l"));

        // Archiving it now remembers its new parent.
        archive::run(&mut forest, "c");
        assert_eq!(
            forest.find_trashed("c").unwrap().original_parent_id,
            Some(DocumentId::from("l"))
        );
    }

    #[test]
    fn parent_purged_leaves_child_at_root() {
        let mut forest = archived_family();
        purge::run(&mut forest, "p");
        assert!(forest.find_trashed("c1").is_none());

        // Nothing left to restore.
        assert!(run(&mut forest, "c1").is_noop());
    }

    #[test]
    fn unknown_id_is_noop() {
        let mut forest = archived_family();
        assert!(run(&mut forest, "ghost").is_noop());
        assert!(run(&mut forest, "other").is_noop());
        assert_eq!(forest.trash_count(), 3);
    }

    #[test]
    fn restored_document_keeps_its_content() {
        let mut forest = forest(&[("a", None)]);
        forest.live_mut("a").unwrap().content = "<p>body</p>".into();
        forest.live_mut("a").unwrap().starred = true;
        archive::run(&mut forest, "a");

        run(&mut forest, "a");

        let a = forest.find_live("a").unwrap();
        assert_eq!(a.content, "<p>body</p>");
        assert!(a.starred);
    }
}
