//! # Snapshot Wire Format
//!
//! One JSON object with camelCase keys:
//!
//! ```text
//! {
//!   "documents": [ { id, title, icon, parentId, content, starred, order,
//!                    createdAt, updatedAt, originalParentId?, isRestoredOrphan? } ],
//!   "trash":     [ { ...same fields..., originalParentId, archivedAt } ],
//!   "expansionState": { "<id>": true },
//!   "activeId": "<id>" | null
//! }
//! ```
//!
//! Live documents only carry `originalParentId` and `isRestoredOrphan: true` while
//! they are restored orphans. Trash entries always carry `originalParentId`, which
//! is `null` for documents archived from the top level.
//!
//! Older blobs used `docs` and `expanded` as top-level keys and marked orphans
//! with `__restoredOrphan` / `__origParentId`; all of these are accepted on read.
//! Missing fields fall back to their empty values, except a missing
//! `documents` list, which is reported so the caller can substitute seed data.

use crate::forest::Forest;
use crate::model::{
    normalize_icon, normalize_title, Document, DocumentId, Placement, Timestamp, TrashedDocument,
};
use crate::navigation::ViewState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, alias = "docs", skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<LiveRecord>>,
    #[serde(default)]
    pub trash: Vec<TrashRecord>,
    #[serde(default, alias = "expanded")]
    pub expansion_state: BTreeMap<DocumentId, bool>,
    #[serde(default)]
    pub active_id: Option<DocumentId>,
}

/// Fields shared by live and trashed records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFields {
    pub id: DocumentId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub parent_id: Option<DocumentId>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub order: f64,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveRecord {
    #[serde(flatten)]
    pub fields: DocumentFields,
    #[serde(
        default,
        alias = "__origParentId",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_parent_id: Option<DocumentId>,
    #[serde(default, alias = "__restoredOrphan", skip_serializing_if = "is_false")]
    pub is_restored_orphan: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashRecord {
    #[serde(flatten)]
    pub fields: DocumentFields,
    #[serde(default, alias = "__origParentId")]
    pub original_parent_id: Option<DocumentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<Timestamp>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl DocumentFields {
    fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title.clone(),
            icon: doc.icon.clone(),
            parent_id: doc.parent_id.clone(),
            content: doc.content.clone(),
            starred: doc.starred,
            order: doc.order,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }

    fn into_document(self, placement: Placement) -> Document {
        Document {
            id: self.id,
            title: normalize_title(&self.title),
            icon: self.icon.as_deref().and_then(normalize_icon),
            parent_id: self.parent_id,
            content: self.content,
            starred: self.starred,
            order: self.order,
            created_at: self.created_at,
            updated_at: self.updated_at.max(self.created_at),
            placement,
        }
    }
}

impl LiveRecord {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            fields: DocumentFields::from_document(doc),
            original_parent_id: doc.awaited_parent().cloned(),
            is_restored_orphan: doc.is_restored_orphan(),
        }
    }

    pub fn into_document(self) -> Document {
        // An orphan flag without the parent it waits for has nothing to re-attach to.
        let placement = match (self.is_restored_orphan, self.original_parent_id) {
            (true, Some(original_parent_id)) => Placement::RestoredOrphan { original_parent_id },
            _ => Placement::Attached,
        };
        self.fields.into_document(placement)
    }
}

impl TrashRecord {
    pub fn from_trashed(trashed: &TrashedDocument) -> Self {
        Self {
            fields: DocumentFields::from_document(&trashed.document),
            original_parent_id: trashed.original_parent_id.clone(),
            archived_at: Some(trashed.archived_at),
        }
    }

    pub fn into_trashed(self) -> TrashedDocument {
        let archived_at = self.archived_at.unwrap_or(self.fields.updated_at);
        // Blobs that predate `originalParentId` on trash entries kept the parent here.
        let original_parent_id = self
            .original_parent_id
            .or_else(|| self.fields.parent_id.clone());
        let mut document = self.fields.into_document(Placement::Attached);
        document.parent_id = None;
        TrashedDocument {
            document,
            original_parent_id,
            archived_at,
        }
    }
}

impl Snapshot {
    /// Captures the full state. Collections are sorted by id so identical state
    /// always serializes identically.
    pub fn capture(forest: &Forest, view: &ViewState) -> Self {
        let mut documents: Vec<LiveRecord> =
            forest.live_documents().map(LiveRecord::from_document).collect();
        documents.sort_by(|a, b| a.fields.id.cmp(&b.fields.id));

        let mut trash: Vec<TrashRecord> = forest
            .trash_listing()
            .into_iter()
            .map(TrashRecord::from_trashed)
            .collect();
        trash.sort_by(|a, b| a.fields.id.cmp(&b.fields.id));

        Self {
            documents: Some(documents),
            trash,
            expansion_state: view.expansion().clone(),
            active_id: view.active_id().cloned(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(blob: &str) -> serde_json::Result<Self> {
        serde_json::from_str(blob)
    }

    /// Rebuilds the forest and view state, validating structure.
    ///
    /// `seed` supplies the live documents when the snapshot has none at all.
    pub fn into_state(
        self,
        seed: impl FnOnce() -> Vec<Document>,
    ) -> std::result::Result<(Forest, ViewState), String> {
        let documents = match self.documents {
            Some(records) => records.into_iter().map(LiveRecord::into_document).collect(),
            None => seed(),
        };
        let trash = self.trash.into_iter().map(TrashRecord::into_trashed).collect();
        let forest = Forest::from_parts(documents, trash)?;
        let view = ViewState::new(self.active_id, self.expansion_state);
        Ok((forest, view))
    }
}
