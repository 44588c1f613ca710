//! # Folio Architecture
//!
//! Folio is a **UI-agnostic document tree library**: an unbounded hierarchy of
//! notes with a trash, orphan-aware restore and drag-and-drop style reordering.
//! The `folio` binary is one client of it; a browser shell or an editor plugin
//! would be another.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (e.g. the folio CLI)                                │
//! │  - Parses input, renders output, owns the terminal          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the state, dispatches, saves once per operation     │
//! │  - Resolves id prefixes, debounces editor content           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - The only code that mutates the tree                      │
//! │  - Invalid requests are silent no-ops                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Document Store (forest.rs) + Storage Layer (store/)        │
//! │  - Structural queries over live documents and trash         │
//! │  - Snapshot load/save: FsBackend, MemBackend                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tree Invariants
//!
//! Every operation preserves these:
//! - The live documents form a forest: no document is its own ancestor.
//! - A live document's parent is `None` or another live document.
//! - Trashed documents have no structural parent; they remember the one they
//!   had in `original_parent_id`.
//! - After any operation, the sibling groups it touched have orders `0..n-1`.
//! - An id lives in at most one of the two collections.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Nothing in this crate writes to stdout/stderr or exits the process. Diagnostics
//! go through `tracing`; it is up to the client to install a subscriber.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Tree mutations (create, update, move, archive, restore, purge)
//! - [`forest`]: The document store and its queries
//! - [`model`]: Core data types (`Document`, `TrashedDocument`, `DocumentPatch`)
//! - [`navigation`]: Active document, routes and expansion state
//! - [`editing`]: Debounced content edits
//! - [`store`]: Snapshot persistence and the seed dataset
//! - [`ids`]: Identifier generation
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod editing;
pub mod error;
pub mod forest;
pub mod ids;
pub mod init;
pub mod model;
pub mod navigation;
pub mod store;
