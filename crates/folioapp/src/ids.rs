//! Identifier generation for new documents.
//!
//! Ids are opaque strings. Production uses random v4 UUIDs in their compact
//! (hyphen-less) form; tests use [`SequentialIds`] for predictable output.

use crate::model::DocumentId;
use uuid::Uuid;

pub trait IdGenerator {
    fn next_id(&mut self) -> DocumentId;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> DocumentId {
        DocumentId::new(Uuid::new_v4().simple().to_string())
    }
}

/// Yields `{prefix}1`, `{prefix}2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("doc-")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> DocumentId {
        let id = DocumentId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
