use super::seed::{seed_documents, seed_forest, LANDING_ID};
use super::snapshot::Snapshot;
use super::SnapshotBackend;
use crate::error::Result;
use crate::forest::Forest;
use crate::model::{now_millis, DocumentId};
use crate::navigation::ViewState;
use std::collections::BTreeMap;

/// How the state handed out by [`SnapshotStore::load`] came about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was stored yet; the seed dataset was used.
    Fresh,
    /// The stored snapshot was used.
    Loaded,
    /// The stored snapshot was unusable; the seed dataset was used instead.
    Recovered { reason: String },
}

impl LoadOutcome {
    pub fn is_recovered(&self) -> bool {
        matches!(self, LoadOutcome::Recovered { .. })
    }
}

#[derive(Debug)]
pub struct LoadedState {
    pub forest: Forest,
    pub view: ViewState,
    pub outcome: LoadOutcome,
}

/// Load/save gateway between the in-memory state and a [`SnapshotBackend`].
pub struct SnapshotStore<B: SnapshotBackend> {
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    key: String,
}

impl<B: SnapshotBackend> SnapshotStore<B> {
    pub fn with_backend(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads the stored snapshot, falling back to the seed dataset.
    ///
    /// Corruption is never an error: it is logged and reported through
    /// [`LoadOutcome::Recovered`]. Only backend I/O failures return `Err`.
    pub fn load(&self) -> Result<LoadedState> {
        let Some(blob) = self.backend.read(&self.key)? else {
            tracing::debug!(key = %self.key, "no snapshot stored, using seed data");
            return Ok(Self::seeded(LoadOutcome::Fresh));
        };

        let parsed = Snapshot::from_json(&blob)
            .map_err(|e| format!("unreadable snapshot: {}", e))
            .and_then(|snapshot| {
                snapshot
                    .into_state(|| seed_documents(now_millis()))
                    .map_err(|e| format!("invalid snapshot: {}", e))
            });

        match parsed {
            Ok((forest, view)) => {
                tracing::debug!(
                    key = %self.key,
                    documents = forest.live_count(),
                    trash = forest.trash_count(),
                    "snapshot loaded"
                );
                Ok(LoadedState {
                    forest,
                    view,
                    outcome: LoadOutcome::Loaded,
                })
            }
            Err(reason) => {
                tracing::warn!(key = %self.key, %reason, "failed to load snapshot, using seed data");
                Ok(Self::seeded(LoadOutcome::Recovered { reason }))
            }
        }
    }

    /// Overwrites the stored snapshot with the full current state.
    pub fn save(&self, forest: &Forest, view: &ViewState) -> Result<()> {
        let blob = Snapshot::capture(forest, view).to_json()?;
        self.backend.write(&self.key, &blob)?;
        tracing::trace!(key = %self.key, bytes = blob.len(), "snapshot saved");
        Ok(())
    }

    /// Seed data opens on the landing document.
    fn seeded(outcome: LoadOutcome) -> LoadedState {
        LoadedState {
            forest: seed_forest(now_millis()),
            view: ViewState::new(Some(DocumentId::from(LANDING_ID)), BTreeMap::new()),
            outcome,
        }
    }
}
