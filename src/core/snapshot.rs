//! Snapshot persistence for the content store.
//!
//! The persisted subset of the store (categories, channels, videos and
//! settings) is written as a single pretty-printed JSON blob. UI state is
//! never written. Loading a missing or unreadable snapshot falls back to the
//! seed dataset.
//!
//! # Storage Layout
//!
//! ```text
//! ~/.contenthub/
//! ├── contenthub-storage.json       # The snapshot
//! └── contenthub-storage.json.lock  # Held exclusively while saving
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::domain::{AppSettings, Category, Channel, Video};

use super::seed;
use super::store::ContentStore;

/// Name of the snapshot blob
pub const SNAPSHOT_KEY: &str = "contenthub-storage";

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur while reading or writing a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Failed to lock {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The persisted subset of the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    pub categories: Vec<Category>,
    pub channels: Vec<Channel>,
    pub videos: Vec<Video>,
    pub settings: AppSettings,
}

impl Snapshot {
    pub fn new(
        categories: Vec<Category>,
        channels: Vec<Channel>,
        videos: Vec<Video>,
        settings: AppSettings,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            categories,
            channels,
            videos,
            settings,
        }
    }

    /// Serialize to the on-disk byte form
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Parse the on-disk byte form
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_slice(bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }
}

/// File-backed snapshot storage
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    /// Path to the snapshot file
    path: PathBuf,
}

impl SnapshotStore {
    /// Store the snapshot as `<dir>/contenthub-storage.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", SNAPSHOT_KEY)),
        }
    }

    /// Store the snapshot at an explicit path
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Read the snapshot. `Ok(None)` when nothing has been saved yet.
    pub async fn read(&self) -> Result<Option<Snapshot>, SnapshotError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path).await.map_err(|source| SnapshotError::Io {
            path: self.path.clone(),
            source,
        })?;

        Snapshot::from_bytes(&bytes).map(Some)
    }

    /// Load the store, falling back to the seed dataset when the snapshot is
    /// absent or unreadable
    pub async fn load_or_seed(&self) -> ContentStore {
        match self.read().await {
            Ok(Some(snapshot)) => {
                debug!(path = %self.path.display(), "Loaded snapshot");
                ContentStore::from_snapshot(snapshot)
            }
            Ok(None) => {
                info!(path = %self.path.display(), "No snapshot found, starting from seed data");
                seed::default_store()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Snapshot unreadable, starting from seed data");
                seed::default_store()
            }
        }
    }

    /// Write the persisted subset of the store.
    ///
    /// Holds an exclusive lock on the sidecar lock file and replaces the
    /// snapshot via a temp file + rename, so readers never see a partial write.
    pub async fn save(&self, store: &ContentStore) -> Result<(), SnapshotError> {
        let bytes = store.snapshot().to_bytes()?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| SnapshotError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|source| SnapshotError::Io {
                path: lock_path.clone(),
                source,
            })?;
        lock_file
            .lock_exclusive()
            .map_err(|source| SnapshotError::Lock {
                path: lock_path.clone(),
                source,
            })?;

        let tmp_path = self.path.with_extension("json.tmp");
        let result = async {
            fs::write(&tmp_path, &bytes)
                .await
                .map_err(|source| SnapshotError::Io {
                    path: tmp_path.clone(),
                    source,
                })?;
            fs::rename(&tmp_path, &self.path)
                .await
                .map_err(|source| SnapshotError::Io {
                    path: self.path.clone(),
                    source,
                })
        }
        .await;

        // Unlock errors are harmless; the lock is released on drop anyway
        let _ = FileExt::unlock(&lock_file);

        if result.is_ok() {
            debug!(path = %self.path.display(), bytes = bytes.len(), "Saved snapshot");
        }
        result
    }
}
