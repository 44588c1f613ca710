//! # CLI Behavior
//!
//! This is **one possible UI client** for folio, not the application itself.
//! It is the only place that knows about terminal I/O, exit codes and output
//! formatting.
//!
//! ## Naked Execution (`folio`)
//!
//! Running `folio` with no arguments prints the document tree, honoring the
//! stored expansion state. A data directory without a snapshot starts on the
//! Welcome document, so `folio show` has something to show.
//!
//! ## Ids
//!
//! Every command taking a document accepts the full id or any unique prefix of
//! it. `restore` and `purge` look the id up in the trash instead of the live tree.
//!
//! ## Content
//!
//! `folio write <id> -` reads the new content from stdin. Writes go through the
//! same debounced path as an editor would and are flushed before exit.
//!
//! ## Module Structure
//!
//! - `commands`: Logging setup, context wiring and per-command handlers
//! - `render`: Output formatting (tree, pages, trash, messages)
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::{report_error, run};
