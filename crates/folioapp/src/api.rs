//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the single
//! entry point for all folio operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns the state**: the [`Forest`], the [`ViewState`] and the pending content edits
//! - **Dispatches** to the appropriate command function
//! - **Persists** exactly one snapshot after each logical operation
//! - **Resolves ids**: a unique id prefix is accepted wherever an id is expected
//!
//! ## What the API Does NOT Do
//!
//! - **Tree logic**: That belongs in `commands/*.rs`
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Persistence Failures
//!
//! Mutations are applied in memory first. If the following save fails, the error
//! is returned but the in-memory state keeps the change; the next successful save
//! writes it out.
//!
//! ## Debounced Content
//!
//! [`FolioApi::edit_content`] only records the edit. Hosts call
//! [`FolioApi::flush_due`] from their event loop, and [`FolioApi::flush_all`]
//! on shutdown. Navigating away from a document commits its pending edit first,
//! and archiving commits every pending edit so no typed content is lost.
//!
//! ## Generic Over SnapshotBackend
//!
//! `FolioApi<B: SnapshotBackend>` is generic over the storage backend:
//! - Production: `FolioApi<FsBackend>`
//! - Testing: `FolioApi<MemBackend>`

use crate::commands::{self, CmdResult};
use crate::editing::{ContentDebouncer, PendingEdit};
use crate::error::{FolioError, Result};
use crate::forest::{Forest, TreeNode};
use crate::ids::{IdGenerator, UuidIds};
use crate::model::{Document, DocumentId, DocumentPatch, Position, TrashedDocument};
use crate::navigation::{ActiveView, Route, ViewState};
use crate::store::{LoadOutcome, SnapshotBackend, SnapshotStore};
use std::time::{Duration, Instant};

/// The main API facade for folio operations.
pub struct FolioApi<B: SnapshotBackend> {
    forest: Forest,
    view: ViewState,
    store: SnapshotStore<B>,
    ids: Box<dyn IdGenerator>,
    pending: ContentDebouncer,
    load_outcome: LoadOutcome,
}

impl<B: SnapshotBackend> FolioApi<B> {
    /// Loads the stored snapshot (or the seed dataset) and wraps it.
    pub fn open(store: SnapshotStore<B>) -> Result<Self> {
        let loaded = store.load()?;
        Ok(Self {
            forest: loaded.forest,
            view: loaded.view,
            store,
            ids: Box::new(UuidIds),
            pending: ContentDebouncer::default(),
            load_outcome: loaded.outcome,
        })
    }

    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_debounce(mut self, quiet: Duration) -> Self {
        self.pending = ContentDebouncer::new(quiet);
        self
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub fn store(&self) -> &SnapshotStore<B> {
        &self.store
    }

    // --- Queries ---

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn children_of(&self, parent_id: Option<&str>) -> Vec<&Document> {
        self.forest.children_of(parent_id)
    }

    pub fn descendants_of(&self, id: &str) -> Vec<&Document> {
        self.forest.descendants_of(id)
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.forest.find_live(id)
    }

    pub fn trash(&self) -> Vec<&TrashedDocument> {
        self.forest.trash_listing()
    }

    pub fn favorites(&self) -> Vec<&Document> {
        self.forest.starred()
    }

    pub fn breadcrumbs(&self, id: &str) -> Vec<&Document> {
        self.forest.path_of(id)
    }

    pub fn tree(&self) -> Vec<TreeNode<'_>> {
        let view = &self.view;
        self.forest.tree(|id: &DocumentId| view.is_expanded(id))
    }

    pub fn active_view(&self) -> ActiveView<'_> {
        self.view.resolve(&self.forest)
    }

    // --- Id resolution ---

    /// Resolves an exact id or a unique prefix among live documents.
    pub fn resolve_live(&self, input: &str) -> Result<DocumentId> {
        resolve_among(input, self.forest.live_documents().map(|d| &d.id))
    }

    /// Resolves an exact id or a unique prefix among trashed documents.
    pub fn resolve_trashed(&self, input: &str) -> Result<DocumentId> {
        resolve_among(input, self.forest.trash_listing().into_iter().map(|t| t.id()))
    }

    // --- Tree mutations ---

    /// Creates a document. Creating under a parent expands that parent.
    pub fn create_document(
        &mut self,
        title: &str,
        parent_id: Option<&str>,
        after_id: Option<&str>,
    ) -> Result<CmdResult> {
        let result = commands::create::run(
            &mut self.forest,
            self.ids.as_mut(),
            title,
            parent_id,
            after_id,
        );
        if let Some(parent) = result.affected_documents.first().and_then(|d| d.parent_id.clone()) {
            self.view.set_expanded(parent, true);
        }
        self.persist(result)
    }

    pub fn update_document(&mut self, id: &str, patch: &DocumentPatch) -> Result<CmdResult> {
        if patch.content.is_some() {
            // An explicit content write wins over whatever the editor had pending.
            self.pending.discard(id);
        }
        let result = commands::update::run(&mut self.forest, id, patch);
        self.persist(result)
    }

    pub fn rename(&mut self, id: &str, title: &str) -> Result<CmdResult> {
        self.update_document(id, &DocumentPatch::new().title(title))
    }

    /// Sets the icon; an empty string clears it.
    pub fn set_icon(&mut self, id: &str, icon: &str) -> Result<CmdResult> {
        self.update_document(id, &DocumentPatch::new().icon(icon))
    }

    pub fn set_starred(&mut self, id: &str, starred: bool) -> Result<CmdResult> {
        self.update_document(id, &DocumentPatch::new().starred(starred))
    }

    pub fn toggle_star(&mut self, id: &str) -> Result<CmdResult> {
        let Some(doc) = self.forest.find_live(id) else {
            return self.persist(CmdResult::default());
        };
        let starred = !doc.starred;
        self.set_starred(id, starred)
    }

    pub fn move_document(
        &mut self,
        source_id: &str,
        target_id: &str,
        position: Position,
    ) -> Result<CmdResult> {
        let result = commands::move_docs::run(&mut self.forest, source_id, target_id, position);
        self.persist(result)
    }

    pub fn archive_document(&mut self, id: &str) -> Result<CmdResult> {
        let pending = self.pending.take_all();
        let mut result = self.commit_pending(pending);
        result.merge(commands::archive::run(&mut self.forest, id));
        self.persist(result)
    }

    pub fn restore_document(&mut self, id: &str) -> Result<CmdResult> {
        let result = commands::restore::run(&mut self.forest, id);
        self.persist(result)
    }

    /// Permanently deletes from the trash. Expansion flags of the purged
    /// documents are dropped too.
    pub fn purge_document(&mut self, id: &str) -> Result<CmdResult> {
        let result = commands::purge::run(&mut self.forest, id);
        self.view
            .forget(result.affected_documents.iter().map(|d| &d.id));
        self.persist(result)
    }

    pub fn normalize(&mut self, parent_id: Option<&str>) -> Result<()> {
        commands::normalize::run(&mut self.forest, parent_id);
        self.save()
    }

    // --- View state ---

    /// Makes `route` the active document. Pending edits of the document being
    /// left are committed first.
    pub fn navigate(&mut self, route: Route) -> Result<CmdResult> {
        let mut result = CmdResult::default();
        let leaving = self.view.active_id().cloned();
        if let Some(previous) = leaving.filter(|prev| Some(prev) != route.document.as_ref()) {
            if let Some(edit) = self.pending.take(&previous) {
                result = self.commit_pending(vec![edit]);
            }
        }
        tracing::debug!(route = %route, "navigate");
        self.view.navigate(route);
        self.persist(result)
    }

    pub fn navigate_fragment(&mut self, fragment: &str) -> Result<CmdResult> {
        self.navigate(Route::parse(fragment))
    }

    pub fn set_expanded(&mut self, id: &str, expanded: bool) -> Result<()> {
        self.view.set_expanded(DocumentId::from(id), expanded);
        self.save()
    }

    /// Returns the new expansion state.
    pub fn toggle_expanded(&mut self, id: &str) -> Result<bool> {
        let expanded = self.view.toggle_expanded(id);
        self.save()?;
        Ok(expanded)
    }

    // --- Debounced content ---

    /// Records an editor change. Nothing is written until the edit is flushed.
    pub fn edit_content(&mut self, id: &str, content: impl Into<String>, now: Instant) {
        self.pending.push(DocumentId::from(id), content.into(), now);
    }

    pub fn has_pending_edits(&self) -> bool {
        self.pending.pending_count() > 0
    }

    /// Commits the edits whose quiet period has elapsed. Saves only if something
    /// was committed.
    pub fn flush_due(&mut self, now: Instant) -> Result<CmdResult> {
        let due = self.pending.take_due(now);
        if due.is_empty() {
            return Ok(CmdResult::default());
        }
        let result = self.commit_pending(due);
        self.persist(result)
    }

    /// Commits every pending edit, due or not.
    pub fn flush_all(&mut self) -> Result<CmdResult> {
        let all = self.pending.take_all();
        if all.is_empty() {
            return Ok(CmdResult::default());
        }
        let result = self.commit_pending(all);
        self.persist(result)
    }

    /// Writes the current state out.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.forest, &self.view)
    }

    fn commit_pending(&mut self, edits: Vec<PendingEdit>) -> CmdResult {
        let mut result = CmdResult::default();
        for edit in edits {
            let patch = DocumentPatch::new().content(edit.content);
            result.merge(commands::update::run(&mut self.forest, &edit.id, &patch));
        }
        result
    }

    fn persist(&self, result: CmdResult) -> Result<CmdResult> {
        self.save()?;
        Ok(result)
    }
}

fn resolve_among<'a>(
    input: &str,
    candidates: impl Iterator<Item = &'a DocumentId>,
) -> Result<DocumentId> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FolioError::Api("Empty document id".to_string()));
    }

    let mut matches: Vec<&DocumentId> = Vec::new();
    for id in candidates {
        if id.as_str() == input {
            return Ok(id.clone());
        }
        if id.starts_with(input) {
            matches.push(id);
        }
    }

    match matches.as_slice() {
        [] => Err(FolioError::DocumentNotFound(DocumentId::from(input))),
        [only] => Ok((*only).clone()),
        many => Err(FolioError::Api(format!(
            "Id prefix '{}' is ambiguous ({} matches)",
            input,
            many.len()
        ))),
    }
}

pub use crate::commands::{CmdMessage, MessageLevel};
