//! # Document Store
//!
//! [`Forest`] owns the two collections, the live documents and the trash, and
//! answers every structural question about them. Everything here is a read;
//! the only writers are the command modules, through the crate-private mutators
//! at the bottom of the impl.
//!
//! ## Sibling Order
//!
//! Siblings are sorted by `order` ascending, then by title, then by id. The id
//! tie-break only matters for documents that share both order and title, and
//! keeps every listing deterministic.
//!
//! ## Lineage in the Trash
//!
//! Once archived, a document's `parent_id` is `None`, so live-tree traversal can
//! no longer find it. [`Forest::trashed_lineage_of`] walks `original_parent_id`
//! links between trashed documents instead.

use crate::model::{Document, DocumentId, TrashedDocument};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Clone, Default)]
pub struct Forest {
    documents: HashMap<DocumentId, Document>,
    trash: HashMap<DocumentId, TrashedDocument>,
}

/// A live document together with its rendered subtree.
#[derive(Debug, Clone)]
pub struct TreeNode<'a> {
    pub document: &'a Document,
    pub depth: usize,
    pub expanded: bool,
    pub children: Vec<TreeNode<'a>>,
}

impl TreeNode<'_> {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

pub fn sibling_cmp(a: &Document, b: &Document) -> Ordering {
    a.order
        .total_cmp(&b.order)
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.id.cmp(&b.id))
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a forest from loaded collections, rejecting structurally invalid input.
    pub fn from_parts(
        documents: Vec<Document>,
        trash: Vec<TrashedDocument>,
    ) -> std::result::Result<Self, String> {
        let mut forest = Forest::new();
        for doc in documents {
            if forest.documents.contains_key(&doc.id) {
                return Err(format!("duplicate document id '{}'", doc.id));
            }
            forest.documents.insert(doc.id.clone(), doc);
        }
        for trashed in trash {
            let id = trashed.id().clone();
            if forest.documents.contains_key(&id) || forest.trash.contains_key(&id) {
                return Err(format!("duplicate document id '{}'", id));
            }
            forest.trash.insert(id, trashed);
        }
        forest.validate()?;
        Ok(forest)
    }

    /// Checks that the live forest is acyclic and that every live parent exists.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for doc in self.documents.values() {
            if let Some(parent) = &doc.parent_id {
                if !self.documents.contains_key(parent) {
                    return Err(format!(
                        "document '{}' references missing parent '{}'",
                        doc.id, parent
                    ));
                }
            }
        }

        for doc in self.documents.values() {
            let mut seen = HashSet::new();
            let mut current = doc;
            while let Some(parent) = &current.parent_id {
                if !seen.insert(parent.clone()) || parent == &doc.id {
                    return Err(format!("document '{}' is part of a cycle", doc.id));
                }
                match self.documents.get(parent) {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }

        for trashed in self.trash.values() {
            if trashed.document.parent_id.is_some() {
                return Err(format!(
                    "trashed document '{}' still has a live parent",
                    trashed.id()
                ));
            }
        }
        Ok(())
    }

    // --- Live queries ---

    /// Live documents under `parent_id` (`None` = root level), in sibling order.
    pub fn children_of(&self, parent_id: Option<&str>) -> Vec<&Document> {
        let mut children: Vec<&Document> = self
            .documents
            .values()
            .filter(|d| d.parent_id.as_deref() == parent_id)
            .collect();
        children.sort_by(|a, b| sibling_cmp(a, b));
        children
    }

    /// Default append position: one past the highest sibling order, or 0.
    pub fn next_order(&self, parent_id: Option<&str>) -> f64 {
        self.documents
            .values()
            .filter(|d| d.parent_id.as_deref() == parent_id)
            .map(|d| d.order)
            .reduce(f64::max)
            .map(|max| max + 1.0)
            .unwrap_or(0.0)
    }

    pub fn find_live(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn exists_live(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    /// True if `maybe_ancestor_id` appears on the live parent chain above `id`.
    ///
    /// A document is not its own descendant.
    pub fn is_descendant_of(&self, id: &str, maybe_ancestor_id: &str) -> bool {
        let mut current = match self.documents.get(id) {
            Some(doc) => doc,
            None => return false,
        };
        // The forest is acyclic, but never walk more steps than there are nodes.
        for _ in 0..self.documents.len() {
            match &current.parent_id {
                Some(parent) if parent.as_str() == maybe_ancestor_id => return true,
                Some(parent) => match self.documents.get(parent) {
                    Some(next) => current = next,
                    None => return false,
                },
                None => return false,
            }
        }
        false
    }

    /// Every live document below `id`, depth-first in sibling order.
    pub fn descendants_of(&self, id: &str) -> Vec<&Document> {
        let mut result = Vec::new();
        self.collect_descendants(id, &mut result);
        result
    }

    fn collect_descendants<'a>(&'a self, id: &str, into: &mut Vec<&'a Document>) {
        for child in self.children_of(Some(id)) {
            into.push(child);
            self.collect_descendants(child.id.as_str(), into);
        }
    }

    /// Breadcrumb chain from the root down to `id`. Empty if `id` is not live.
    pub fn path_of(&self, id: &str) -> Vec<&Document> {
        let mut path = Vec::new();
        let mut current = self.documents.get(id);
        while let Some(doc) = current {
            path.push(doc);
            if path.len() > self.documents.len() {
                break;
            }
            current = doc.parent_id.as_deref().and_then(|p| self.documents.get(p));
        }
        path.reverse();
        path
    }

    /// Starred live documents, by title.
    pub fn starred(&self) -> Vec<&Document> {
        let mut starred: Vec<&Document> = self.documents.values().filter(|d| d.starred).collect();
        starred.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        starred
    }

    /// Live restored orphans waiting for `parent_id` to come back.
    pub fn orphans_awaiting(&self, parent_id: &str) -> Vec<&Document> {
        let mut orphans: Vec<&Document> = self
            .documents
            .values()
            .filter(|d| d.awaited_parent().map(|p| p.as_str()) == Some(parent_id))
            .collect();
        orphans.sort_by(|a, b| sibling_cmp(a, b));
        orphans
    }

    pub fn live_documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn live_count(&self) -> usize {
        self.documents.len()
    }

    /// The nested render model of the live forest.
    pub fn tree<F>(&self, is_expanded: F) -> Vec<TreeNode<'_>>
    where
        F: Fn(&DocumentId) -> bool + Copy,
    {
        self.subtree(None, 0, is_expanded)
    }

    fn subtree<F>(&self, parent_id: Option<&str>, depth: usize, is_expanded: F) -> Vec<TreeNode<'_>>
    where
        F: Fn(&DocumentId) -> bool + Copy,
    {
        self.children_of(parent_id)
            .into_iter()
            .map(|doc| TreeNode {
                document: doc,
                depth,
                expanded: is_expanded(&doc.id),
                children: self.subtree(Some(doc.id.as_str()), depth + 1, is_expanded),
            })
            .collect()
    }

    // --- Trash queries ---

    pub fn find_trashed(&self, id: &str) -> Option<&TrashedDocument> {
        self.trash.get(id)
    }

    pub fn is_trashed(&self, id: &str) -> bool {
        self.trash.contains_key(id)
    }

    /// Trash contents, most recently archived first.
    pub fn trash_listing(&self) -> Vec<&TrashedDocument> {
        let mut listing: Vec<&TrashedDocument> = self.trash.values().collect();
        listing.sort_by(|a, b| {
            b.archived_at
                .cmp(&a.archived_at)
                .then_with(|| a.title().cmp(b.title()))
                .then_with(|| a.id().cmp(b.id()))
        });
        listing
    }

    pub fn trash_count(&self) -> usize {
        self.trash.len()
    }

    /// Trashed documents whose `original_parent_id` chain leads back to `id`.
    pub fn trashed_lineage_of(&self, id: &str) -> Vec<DocumentId> {
        let mut by_parent: HashMap<&str, Vec<&DocumentId>> = HashMap::new();
        for trashed in self.trash.values() {
            if let Some(parent) = &trashed.original_parent_id {
                by_parent.entry(parent.as_str()).or_default().push(trashed.id());
            }
        }

        let mut lineage = Vec::new();
        let mut seen: HashSet<&str> = HashSet::from([id]);
        let mut queue: VecDeque<&str> = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            let Some(children) = by_parent.get(current) else {
                continue;
            };
            for child in children {
                if seen.insert(child.as_str()) {
                    lineage.push((*child).clone());
                    queue.push_back(child.as_str());
                }
            }
        }
        lineage.sort();
        lineage
    }

    // --- Crate-private mutators, used by the command layer only ---

    pub(crate) fn live_mut(&mut self, id: &str) -> Option<&mut Document> {
        self.documents.get_mut(id)
    }

    pub(crate) fn live_documents_mut(&mut self) -> impl Iterator<Item = &mut Document> {
        self.documents.values_mut()
    }

    pub(crate) fn insert_live(&mut self, doc: Document) {
        self.documents.insert(doc.id.clone(), doc);
    }

    pub(crate) fn remove_live(&mut self, id: &str) -> Option<Document> {
        self.documents.remove(id)
    }

    pub(crate) fn insert_trashed(&mut self, trashed: TrashedDocument) {
        self.trash.insert(trashed.id().clone(), trashed);
    }

    pub(crate) fn remove_trashed(&mut self, id: &str) -> Option<TrashedDocument> {
        self.trash.remove(id)
    }
}
