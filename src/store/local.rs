//! Local key-value persistence for partitioned record lists.
//!
//! Each (namespace, partition) pair is stored as one JSON file:
//! ```text
//! <DATA_DIR>/
//!   exercises-anonymous.json
//!   workouts-anonymous.json
//!   exercises-<user>.json
//!   workouts-<user>.json
//! ```
//!
//! Writes replace the whole list atomically (temp file + rename). Reads
//! that fail for any reason fall back to the empty default; the local
//! partition must never be the thing that breaks the application.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

use super::partition::PartitionId;

/// Namespace for the exercise list.
pub const EXERCISES_NS: &str = "exercises";
/// Namespace for the workout entry list.
pub const WORKOUTS_NS: &str = "workouts";

/// Errors that can occur while writing to the local store.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error writing a file.
    IoError(PathBuf, io::Error),
    /// Error serializing a value.
    SerializeError(PathBuf, serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StoreError::SerializeError(path, e) => {
                write!(f, "Failed to serialize {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::IoError(_, e) => Some(e),
            StoreError::SerializeError(_, e) => Some(e),
        }
    }
}

/// File-backed key-value store for record lists.
#[derive(Debug, Clone)]
pub struct LocalStore {
    data_dir: PathBuf,
}

impl LocalStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, namespace: &str, partition: &PartitionId) -> PathBuf {
        self.data_dir
            .join(format!("{}.json", partition.storage_key(namespace)))
    }

    /// Reads the list stored for a namespace/partition pair.
    ///
    /// A missing, unreadable, or unparseable value yields the empty list;
    /// read failures are logged but never surfaced to the caller.
    pub fn load_list<T: DeserializeOwned>(
        &self,
        namespace: &str,
        partition: &PartitionId,
    ) -> Vec<T> {
        let path = self.path_for(namespace, partition);

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}, using defaults: {}", path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(
                    "Unparseable value in {}, using defaults: {}",
                    path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Replaces the list stored for a namespace/partition pair.
    pub fn save_list<T: Serialize>(
        &self,
        namespace: &str,
        partition: &PartitionId,
        items: &[T],
    ) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StoreError::IoError(self.data_dir.clone(), e))?;

        let path = self.path_for(namespace, partition);
        let json = serde_json::to_string(items)
            .map_err(|e| StoreError::SerializeError(path.clone(), e))?;

        // Write atomically using temp file + rename
        let temp_path = path.with_extension("json.tmp");

        let mut file =
            File::create(&temp_path).map_err(|e| StoreError::IoError(temp_path.clone(), e))?;

        file.write_all(json.as_bytes())
            .map_err(|e| StoreError::IoError(temp_path.clone(), e))?;

        file.sync_all()
            .map_err(|e| StoreError::IoError(temp_path.clone(), e))?;

        fs::rename(&temp_path, &path).map_err(|e| StoreError::IoError(path, e))?;

        Ok(())
    }
}
