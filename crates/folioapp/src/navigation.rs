//! # Navigation and View State
//!
//! Which document is active, and which tree rows are expanded. Neither is
//! structural: the active id may name a document that does not exist (the UI
//! shows a "not found" page), and expansion entries are plain flags.
//!
//! ## Routes
//!
//! The active document is driven by an external location fragment:
//!
//! | Fragment              | Route                         |
//! |-----------------------|-------------------------------|
//! | `#/documents`         | nothing selected              |
//! | `#/documents/`        | nothing selected              |
//! | `#/documents/<id>`    | `<id>`                        |
//! | `#/documents<id>`     | `<id>` (legacy, slash-less)   |
//!
//! Anything else resolves to nothing selected. [`Route::to_fragment`] always
//! emits the slash form.

use crate::forest::Forest;
use crate::model::{Document, DocumentId};
use std::collections::BTreeMap;
use std::fmt;

const ROUTE_PREFIX: &str = "#/documents";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    pub document: Option<DocumentId>,
}

impl Route {
    pub fn to(id: impl Into<DocumentId>) -> Self {
        Self {
            document: Some(id.into()),
        }
    }

    pub fn home() -> Self {
        Self::default()
    }

    pub fn parse(fragment: &str) -> Self {
        let Some(rest) = fragment.trim().strip_prefix(ROUTE_PREFIX) else {
            return Self::home();
        };
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        let valid = !rest.is_empty()
            && rest
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
        if valid {
            Self::to(rest)
        } else {
            Self::home()
        }
    }

    pub fn to_fragment(&self) -> String {
        match &self.document {
            Some(id) => format!("{}/{}", ROUTE_PREFIX, id),
            None => ROUTE_PREFIX.to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fragment())
    }
}

/// What the page area should show for the current active id.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveView<'a> {
    Nothing,
    Found(&'a Document),
    NotFound(&'a DocumentId),
}

/// Persisted UI state: active document and tree expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    active_id: Option<DocumentId>,
    expanded: BTreeMap<DocumentId, bool>,
}

impl ViewState {
    pub fn new(active_id: Option<DocumentId>, expanded: BTreeMap<DocumentId, bool>) -> Self {
        Self {
            active_id,
            expanded,
        }
    }

    pub fn active_id(&self) -> Option<&DocumentId> {
        self.active_id.as_ref()
    }

    /// Returns the previously active id.
    pub fn navigate(&mut self, route: Route) -> Option<DocumentId> {
        std::mem::replace(&mut self.active_id, route.document)
    }

    pub fn resolve<'a>(&'a self, forest: &'a Forest) -> ActiveView<'a> {
        match &self.active_id {
            None => ActiveView::Nothing,
            Some(id) => match forest.find_live(id) {
                Some(doc) => ActiveView::Found(doc),
                None => ActiveView::NotFound(id),
            },
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    pub fn set_expanded(&mut self, id: DocumentId, expanded: bool) {
        self.expanded.insert(id, expanded);
    }

    /// Flips the flag and returns the new value.
    pub fn toggle_expanded(&mut self, id: &str) -> bool {
        let next = !self.is_expanded(id);
        self.expanded.insert(DocumentId::from(id), next);
        next
    }

    pub fn expansion(&self) -> &BTreeMap<DocumentId, bool> {
        &self.expanded
    }

    /// Drops the expansion entries of documents that no longer exist anywhere.
    pub fn forget<'a>(&mut self, ids: impl IntoIterator<Item = &'a DocumentId>) {
        for id in ids {
            self.expanded.remove(id);
        }
    }
}
