use crate::commands::{normalize, CmdMessage, CmdResult};
use crate::forest::Forest;
use crate::ids::IdGenerator;
use crate::model::{now_millis, Document, DocumentId};

/// Creates a live document and returns it as the single affected document.
///
/// - `parent_id = None` creates at root level. A parent that is not live
///   falls back to root with a warning.
/// - `after_id` naming a sibling in the target group inserts right after it
///   (`sibling.order + 0.5`). Otherwise the document is appended.
///
/// Never fails.
pub fn run<G: IdGenerator + ?Sized>(
    forest: &mut Forest,
    ids: &mut G,
    title: &str,
    parent_id: Option<&str>,
    after_id: Option<&str>,
) -> CmdResult {
    let mut result = CmdResult::default();

    let parent_id = match parent_id {
        Some(parent) if !forest.exists_live(parent) => {
            tracing::warn!(parent = parent, "create under non-live parent, using root");
            result.add_message(CmdMessage::warning(format!(
                "Parent {} is not available, created at the top level",
                parent
            )));
            None
        }
        other => other,
    };

    let order = after_id
        .and_then(|after| {
            forest
                .children_of(parent_id)
                .into_iter()
                .find(|sibling| sibling.id.as_str() == after)
                .map(|sibling| sibling.order + 0.5)
        })
        .unwrap_or_else(|| forest.next_order(parent_id));

    let id = fresh_id(forest, ids);
    let doc = Document::new(
        id.clone(),
        title,
        parent_id.map(DocumentId::from),
        order,
        now_millis(),
    );
    forest.insert_live(doc);
    normalize::run(forest, parent_id);

    if let Some(doc) = forest.find_live(&id) {
        tracing::debug!(id = %doc.id, parent = ?parent_id, "document created");
        result.add_message(CmdMessage::success(format!(
            "Document created: {}",
            doc.title
        )));
        result.affected_documents.push(doc.clone());
    }
    result
}

fn fresh_id<G: IdGenerator + ?Sized>(forest: &Forest, ids: &mut G) -> DocumentId {
    loop {
        let id = ids.next_id();
        if !forest.exists_live(&id) && !forest.is_trashed(&id) {
            return id;
        }
    }
}
