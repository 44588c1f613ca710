//! # Domain Model: Documents, Placement and Trash
//!
//! This module defines the core data structures for folio: [`Document`],
//! [`TrashedDocument`], [`DocumentPatch`] and [`Position`].
//!
//! ## Live vs Trashed
//!
//! A document is either part of the live forest or sitting in the trash. The two
//! states are separate types rather than one record with optional side fields:
//!
//! - [`Document`] is a live node. Its `parent_id` is either `None` (root level) or
//!   the id of another live document.
//! - [`TrashedDocument`] wraps the document as it was when archived. The wrapped
//!   document always has `parent_id = None`; the structural parent it had at
//!   archive time lives in `original_parent_id` so restore can try to put it back.
//!
//! ## Restored Orphans
//!
//! Restoring a document whose original parent is still trashed places it at root.
//! That live document remembers the parent it is waiting for through
//! [`Placement::RestoredOrphan`]. When the parent is restored later, the orphan is
//! re-attached automatically. Every other live document is [`Placement::Attached`],
//! so a live document can never carry stale archival metadata.
//!
//! ## Titles and Icons
//!
//! - Titles are trimmed. An empty title is stored as [`UNTITLED`].
//! - An empty icon string means "no icon" and is stored as `None`.
//!
//! ## Ordering
//!
//! `order` is an `f64`. Fractional values (`x.5`) appear only transiently during
//! insertion and moves; every operation that touches a sibling group normalizes it
//! back to `0..n-1` (see [`crate::commands::normalize`]).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Epoch milliseconds.
pub type Timestamp = i64;

/// Placeholder stored instead of an empty title.
pub const UNTITLED: &str = "Untitled";

pub fn now_millis() -> Timestamp {
    Utc::now().timestamp_millis()
}

/// Opaque, immutable document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for DocumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for DocumentId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

/// How a live document relates to its structural parent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Attached,
    /// Restored while its original parent was still trashed. Sits at root until
    /// that parent comes back.
    RestoredOrphan { original_parent_id: DocumentId },
}

/// A node of the live forest.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub icon: Option<String>,
    pub parent_id: Option<DocumentId>,
    /// Opaque rich-text blob. Never interpreted here.
    pub content: String,
    pub starred: bool,
    pub order: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub placement: Placement,
}

impl Document {
    pub fn new(
        id: DocumentId,
        title: &str,
        parent_id: Option<DocumentId>,
        order: f64,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            title: normalize_title(title),
            icon: None,
            parent_id,
            content: String::new(),
            starred: false,
            order,
            created_at: now,
            updated_at: now,
            placement: Placement::Attached,
        }
    }

    /// Bumps `updated_at`, guaranteeing it strictly increases.
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now.max(self.updated_at + 1);
    }

    pub fn is_restored_orphan(&self) -> bool {
        matches!(self.placement, Placement::RestoredOrphan { .. })
    }

    /// The parent this orphan is waiting for, if any.
    pub fn awaited_parent(&self) -> Option<&DocumentId> {
        match &self.placement {
            Placement::Attached => None,
            Placement::RestoredOrphan { original_parent_id } => Some(original_parent_id),
        }
    }

    /// Applies the non-structural fields of `patch`. Does not touch timestamps.
    pub fn apply_patch(&mut self, patch: &DocumentPatch) {
        if let Some(title) = &patch.title {
            self.title = normalize_title(title);
        }
        if let Some(icon) = &patch.icon {
            self.icon = normalize_icon(icon);
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(starred) = patch.starred {
            self.starred = starred;
        }
    }
}

/// A soft-deleted document.
#[derive(Debug, Clone, PartialEq)]
pub struct TrashedDocument {
    /// The document as archived, with `parent_id` forced to `None`.
    pub document: Document,
    /// Structural parent at archive time. `None` means it was a root document.
    pub original_parent_id: Option<DocumentId>,
    pub archived_at: Timestamp,
}

impl TrashedDocument {
    pub fn id(&self) -> &DocumentId {
        &self.document.id
    }

    pub fn title(&self) -> &str {
        &self.document.title
    }
}

/// Partial update of the editable, non-structural fields.
///
/// `parent_id`, `order`, `id` and `created_at` are deliberately absent: structure
/// only changes through `move`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub content: Option<String>,
    pub starred: Option<bool>,
}

impl DocumentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn starred(mut self, starred: bool) -> Self {
        self.starred = Some(starred);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.icon.is_none()
            && self.content.is_none()
            && self.starred.is_none()
    }
}

/// Drop position of a move relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Before,
    After,
    Inside,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::Before => "before",
            Position::After => "after",
            Position::Inside => "inside",
        };
        f.write_str(s)
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "before" => Ok(Position::Before),
            "after" => Ok(Position::After),
            "inside" | "into" => Ok(Position::Inside),
            other => Err(format!(
                "Invalid position '{}': expected before, after or inside",
                other
            )),
        }
    }
}

pub fn normalize_title(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn normalize_icon(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
