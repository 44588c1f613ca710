//! # Command Layer: the Tree Mutator
//!
//! This module contains the **core business logic** of folio. Each command lives in
//! its own submodule and is a plain Rust function over an explicitly passed
//! [`Forest`](crate::forest::Forest). These are the only functions that change the
//! live documents or the trash.
//!
//! ## Role and Responsibilities
//!
//! - Enforce the tree invariants *before* mutating (cycle guard, live-parent rule).
//! - Keep sibling groups normalized after every insert, removal or reorder.
//! - Return a structured [`CmdResult`] with the affected documents and messages.
//!
//! ## What Commands Do NOT Do
//!
//! - **Persistence**: the API facade saves one snapshot per logical operation.
//! - **Errors for bad input**: stale ids, self-moves and cycle-inducing moves are
//!   silent no-ops. The result simply carries no affected documents.
//! - **Any I/O**: no stdout, stderr or terminal concerns.
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests build a
//! small forest in memory and assert on its structure afterwards.
//!
//! ## Command Modules
//!
//! - [`create`]: Create a document, optionally right after a sibling
//! - [`update`]: Patch title, icon, content or star flag
//! - [`move_docs`]: Reparent or reorder relative to a drop target
//! - [`archive`]: Move a document and its live subtree to the trash
//! - [`restore`]: Bring one document back, re-attaching waiting orphans
//! - [`purge`]: Permanently remove a trashed document and its trashed lineage
//! - [`normalize`]: Reassign consecutive sibling orders

use crate::model::{Document, DocumentId};
use serde::Serialize;

pub mod archive;
pub mod create;
pub mod move_docs;
pub mod normalize;
pub mod purge;
pub mod restore;
pub mod update;

#[cfg(test)]
pub(crate) mod fixtures;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Outcome of a command.
///
/// An empty `affected_documents` means the command was a no-op.
#[derive(Debug, Default, Clone)]
pub struct CmdResult {
    pub affected_documents: Vec<Document>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_documents(mut self, documents: Vec<Document>) -> Self {
        self.affected_documents = documents;
        self
    }

    /// Folds another result into this one, keeping order.
    pub fn merge(&mut self, other: CmdResult) {
        self.affected_documents.extend(other.affected_documents);
        self.messages.extend(other.messages);
    }

    pub fn is_noop(&self) -> bool {
        self.affected_documents.is_empty()
    }

    /// Id of the first affected document, e.g. the one `create` just made.
    pub fn first_id(&self) -> Option<&DocumentId> {
        self.affected_documents.first().map(|d| &d.id)
    }
}
