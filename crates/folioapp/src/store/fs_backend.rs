use super::SnapshotBackend;
use crate::error::{FolioError, Result};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// File that holds the blob for `key`. Characters that are awkward in file
    /// names are replaced, so `folio:v1` lives in `folio_v1.json`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let name = if name.is_empty() { "snapshot".to_string() } else { name };
        self.root.join(format!("{}.json", name))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FolioError::Io)?;
        }
        Ok(())
    }
}

impl SnapshotBackend for FsBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let blob = fs::read_to_string(path).map_err(FolioError::Io)?;
        Ok(Some(blob))
    }

    fn write(&self, key: &str, blob: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.path_for(key);

        // Atomic write
        let tmp = self.root.join(format!(".snapshot-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, blob).map_err(FolioError::Io)?;
        fs::rename(&tmp, target).map_err(FolioError::Io)?;
        Ok(())
    }
}
