//! # Data Directory and Context Setup
//!
//! All folio state lives in a single data directory: the snapshot blob and an
//! optional `folio.toml`.
//!
//! ## Resolution Order
//!
//! 1. An explicit `data_override` (the CLI's `--data` flag).
//! 2. The `FOLIO_DATA` environment variable. Primarily used by tests to isolate state.
//! 3. The OS-appropriate data directory via the `directories` crate
//!    (e.g. `~/.local/share/folio` on Linux).
//!
//! [`initialize`] resolves the directory, loads configuration from it, and opens
//! the API over a filesystem backend keyed by the configured `storage_key`.

use crate::api::FolioApi;
use crate::config::FolioConfig;
use crate::error::{FolioError, Result};
use crate::store::fs_backend::FsBackend;
use crate::store::SnapshotStore;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::PathBuf;

pub const DATA_ENV: &str = "FOLIO_DATA";
pub const CONFIG_FILE: &str = "folio.toml";

pub struct FolioContext {
    pub api: FolioApi<FsBackend>,
    pub config: FolioConfig,
    pub data_dir: PathBuf,
}

/// Picks the data directory following the resolution order above.
pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "folio", "folio")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| FolioError::Store("Could not determine a data directory".to_string()))
}

/// Loads `folio.toml` from `data_dir`, falling back to defaults.
pub fn load_config(data_dir: &std::path::Path) -> FolioConfig {
    Clapfig::builder()
        .app_name("folio")
        .file_name(CONFIG_FILE)
        .search_paths(vec![SearchPath::Path(data_dir.to_path_buf())])
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default()
}

/// Initialize the folio context: data directory, configuration and API.
///
/// A corrupt snapshot does not fail initialization; check
/// [`FolioApi::load_outcome`] to report it.
pub fn initialize(data_override: Option<PathBuf>) -> Result<FolioContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = load_config(&data_dir);
    open_context(data_dir, config)
}

/// Opens the API over an already resolved data directory and configuration.
pub fn open_context(data_dir: PathBuf, config: FolioConfig) -> Result<FolioContext> {
    let store = SnapshotStore::with_backend(FsBackend::new(data_dir.clone()), config.storage_key());
    let api = FolioApi::open(store)?.with_debounce(config.content_debounce());
    tracing::debug!(data_dir = %data_dir.display(), key = config.storage_key(), "folio initialized");

    Ok(FolioContext {
        api,
        config,
        data_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LoadOutcome;
    use tempfile::TempDir;

    #[test]
    fn explicit_override_wins() {
        let temp = TempDir::new().unwrap();
        let dir = resolve_data_dir(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(dir, temp.path());
    }

    #[test]
    fn initialize_in_empty_dir_uses_seed() {
        let temp = TempDir::new().unwrap();
        let ctx = initialize(Some(temp.path().to_path_buf())).unwrap();

        assert_eq!(ctx.api.load_outcome(), &LoadOutcome::Fresh);
        assert_eq!(ctx.config, FolioConfig::default());
        assert!(ctx.api.get("welcome").is_some());
        // Nothing is written until the first operation.
        assert!(!temp.path().join("folio_v1.json").exists());
    }

    #[test]
    fn state_is_written_under_the_data_dir() {
        let temp = TempDir::new().unwrap();
        let mut ctx = initialize(Some(temp.path().to_path_buf())).unwrap();
        ctx.api.create_document("Notes", None, None).unwrap();
        assert!(temp.path().join("folio_v1.json").exists());

        let reopened = initialize(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(reopened.api.load_outcome(), &LoadOutcome::Loaded);
        assert_eq!(reopened.api.forest().live_count(), 5);
    }
}
