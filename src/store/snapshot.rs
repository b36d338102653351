//! Snapshot file
//!
//! Whole-store JSON image. Writes go to a sibling temp file that is then
//! renamed over the target, so readers never see a half-written snapshot.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CatError, Result};
use crate::models::Cat;

/// On-disk contents of the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Id the next created cat receives
    pub next_id: u64,
    /// All cats in ascending id order
    pub cats: Vec<Cat>,
}

/// Location of a snapshot on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot, or `None` when the file does not exist yet.
    pub fn load(&self) -> Result<Option<Snapshot>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error("read", &self.path, e)),
        };

        let snapshot = serde_json::from_slice(&bytes)
            .map_err(|e| storage_error("parse", &self.path, e))?;
        Ok(Some(snapshot))
    }

    /// Replaces the file contents with `snapshot`.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| storage_error("create", parent, e))?;
        }

        let bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| storage_error("serialize", &self.path, e))?;

        let tmp = self.temp_path();
        fs::write(&tmp, bytes).map_err(|e| storage_error("write", &tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| storage_error("rename", &tmp, e))?;

        debug!(
            "Snapshot written to {} ({} cats)",
            self.path.display(),
            snapshot.cats.len()
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> CatError {
    CatError::Storage(format!("failed to {} {}: {}", action, path.display(), err))
}
