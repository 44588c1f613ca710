//! # Storage Layer
//!
//! Folio persists its whole state as one snapshot blob: the live documents, the
//! trash, the sidebar expansion flags and the last active document. There is no
//! per-document storage and no partial write; every save overwrites the blob.
//!
//! ## Split of Responsibilities
//!
//! - [`SnapshotBackend`] is the "how": raw blob I/O keyed by a namespace string.
//! - [`SnapshotStore`] is the "what": wire format, seeding and the recovery policy.
//!
//! ## Recovery Policy
//!
//! | Blob state                         | Result                              |
//! |------------------------------------|-------------------------------------|
//! | absent                             | seed dataset, [`LoadOutcome::Fresh`] |
//! | valid                              | stored state, [`LoadOutcome::Loaded`] |
//! | unparseable or structurally broken | seed dataset, [`LoadOutcome::Recovered`] |
//!
//! A corrupt blob is never partially salvaged and never overwritten at load
//! time. It is replaced by the next successful save.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file per key in a data directory.
//! - [`mem_backend::MemBackend`]: for testing without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── folio.toml          # Configuration (optional)
//! └── folio_v1.json       # Snapshot for key "folio:v1"
//! ```

use crate::error::Result;

pub mod fs_backend;
pub mod mem_backend;
pub mod seed;
pub mod snapshot;
pub mod snapshot_store;

pub use snapshot_store::{LoadOutcome, LoadedState, SnapshotStore};

/// Abstract interface for raw snapshot I/O.
pub trait SnapshotBackend {
    /// Read the blob stored under `key`.
    /// Returns Ok(None) if nothing has been stored yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, key: &str, blob: &str) -> Result<()>;
}
