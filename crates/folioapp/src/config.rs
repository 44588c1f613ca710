//! # Configuration
//!
//! Folio configuration is managed by [`clapfig`], which handles layered loading
//! from TOML files and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Data Directory Config**: `<data dir>/folio.toml`.
//! 2. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! A missing or unreadable `folio.toml` is not an error; the defaults apply.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage_key` | `folio:v1` | Namespace of the snapshot blob |
//! | `content_debounce_ms` | `400` | Quiet period before a content edit is committed |
//! | `log_level` | `warn` | Default log filter when `FOLIO_LOG` is unset |

use confique::Config;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_STORAGE_KEY: &str = "folio:v1";

/// Configuration for folio, stored in `folio.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FolioConfig {
    /// Namespace the snapshot is stored under. Changing it starts from a fresh
    /// seed without touching the old snapshot.
    #[config(default = "folio:v1")]
    pub storage_key: String,

    /// Milliseconds of editor inactivity before content is committed.
    #[config(default = 400)]
    pub content_debounce_ms: u64,

    /// Log filter used when FOLIO_LOG is not set (e.g. "warn", "folioapp=debug").
    #[config(default = "warn")]
    pub log_level: String,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            content_debounce_ms: 400,
            log_level: "warn".to_string(),
        }
    }
}

impl FolioConfig {
    pub fn content_debounce(&self) -> Duration {
        Duration::from_millis(self.content_debounce_ms)
    }

    /// The storage key, falling back to the default when blank.
    pub fn storage_key(&self) -> &str {
        let key = self.storage_key.trim();
        if key.is_empty() {
            DEFAULT_STORAGE_KEY
        } else {
            key
        }
    }
}
