//! # Folio CLI Architecture
//!
//! Folio ships with a terminal client, but the binary is intentionally thin:
//! the CLI lives in `src/cli/`, while this file only invokes `cli::run()` and
//! handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/folioapp/`: the UI-agnostic document tree library
//! - `crates/folio/`: this CLI tool, depends on `folioapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/folio/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Logging, context wiring and dispatch (commands.rs)       │
//! │  - Terminal rendering (render.rs, styles.rs)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/folioapp/src/api.rs)                     │
//! │  - Resolves id prefixes, saves once per operation           │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/folioapp/src/commands/*)             │
//! │  - Pure tree logic                                          │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI layer owns every
//! user-facing concern: argument parsing, logging setup, dispatch, error
//! reporting and rendering.
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests per command, property tests over random forests,
//!   and scenario tests through the API facade.
//! - **CLI**: rendering is tested with canned documents in `render.rs`; the
//!   end-to-end tests in `tests/` run the binary against a temporary data
//!   directory (`FOLIO_DATA`).

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        cli::report_error(&e);
        std::process::exit(1);
    }
}
