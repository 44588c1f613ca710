//! # Debounced Content Edits
//!
//! Typing in the editor produces a stream of content snapshots. Committing every
//! one of them would write a full snapshot per keystroke, so edits are buffered
//! and committed once the document has been quiet for a while (400 ms by default).
//!
//! There is at most one pending edit per document. A newer edit replaces the
//! pending one and restarts its quiet period; nothing is queued behind it.
//!
//! The debouncer holds no timer of its own. The host calls
//! [`ContentDebouncer::take_due`] from its event loop with the current
//! [`Instant`], which keeps it deterministic in tests.

use crate::model::DocumentId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub id: DocumentId,
    pub content: String,
    last_edit: Instant,
}

#[derive(Debug, Clone)]
pub struct ContentDebouncer {
    quiet: Duration,
    pending: HashMap<DocumentId, PendingEdit>,
}

impl Default for ContentDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl ContentDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: HashMap::new(),
        }
    }

    /// Records an edit, superseding any pending edit for the same document.
    pub fn push(&mut self, id: DocumentId, content: String, now: Instant) {
        self.pending.insert(
            id.clone(),
            PendingEdit {
                id,
                content,
                last_edit: now,
            },
        );
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Removes and returns every edit whose quiet period has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Vec<PendingEdit> {
        let due: Vec<DocumentId> = self
            .pending
            .values()
            .filter(|p| now.saturating_duration_since(p.last_edit) >= self.quiet)
            .map(|p| p.id.clone())
            .collect();
        let mut edits: Vec<PendingEdit> = due
            .iter()
            .filter_map(|id| self.pending.remove(id))
            .collect();
        edits.sort_by(|a, b| a.last_edit.cmp(&b.last_edit));
        edits
    }

    /// Removes and returns the pending edit for one document, due or not.
    pub fn take(&mut self, id: &str) -> Option<PendingEdit> {
        self.pending.remove(id)
    }

    /// Removes and returns everything, due or not.
    pub fn take_all(&mut self) -> Vec<PendingEdit> {
        let mut edits: Vec<PendingEdit> = self.pending.drain().map(|(_, p)| p).collect();
        edits.sort_by(|a, b| a.last_edit.cmp(&b.last_edit));
        edits
    }

    /// Drops a pending edit without committing it.
    pub fn discard(&mut self, id: &str) -> bool {
        self.pending.remove(id).is_some()
    }
}
