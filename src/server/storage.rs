//! Server-side profile storage.
//!
//! Stores one JSON profile per user in the following structure:
//! ```text
//! <DATA_DIR>/
//!   <user_id>/
//!     profile.json
//! ```
//!
//! A push replaces the stored profile in full; the file is the unit of
//! consistency (last write wins).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::models::{Exercise, WorkoutEntry};

/// One user's cloud profile as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    pub exercises: Vec<Exercise>,
    pub workouts: Vec<WorkoutEntry>,
    pub last_sync_timestamp: Option<DateTime<Utc>>,
}

/// Errors that can occur during profile storage operations.
#[derive(Debug)]
pub enum ProfileStorageError {
    /// I/O error reading or writing a file.
    IoError(PathBuf, io::Error),
    /// Error parsing or serializing a stored profile.
    ParseError(PathBuf, serde_json::Error),
    /// Invalid user ID (e.g. contains path separators).
    InvalidUserId(String),
}

impl std::fmt::Display for ProfileStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileStorageError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            ProfileStorageError::ParseError(path, e) => {
                write!(f, "Failed to parse profile {}: {}", path.display(), e)
            }
            ProfileStorageError::InvalidUserId(id) => {
                write!(f, "Invalid user ID: {}", id)
            }
        }
    }
}

impl std::error::Error for ProfileStorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProfileStorageError::IoError(_, e) => Some(e),
            _ => None,
        }
    }
}

/// File-backed storage for per-user cloud profiles.
#[derive(Debug, Clone)]
pub struct ProfileStorage {
    data_dir: PathBuf,
}

impl ProfileStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Validates a user ID to prevent path traversal attacks.
    fn validate_user_id(user_id: &str) -> Result<(), ProfileStorageError> {
        if user_id.is_empty()
            || user_id.contains('/')
            || user_id.contains('\\')
            || user_id.contains("..")
            || user_id.starts_with('.')
        {
            return Err(ProfileStorageError::InvalidUserId(user_id.to_string()));
        }
        Ok(())
    }

    fn profile_path(&self, user_id: &str) -> PathBuf {
        self.data_dir.join(user_id).join("profile.json")
    }

    /// Loads a user's profile.
    ///
    /// Returns `Ok(None)` if the user has never pushed one.
    pub fn load(&self, user_id: &str) -> Result<Option<StoredProfile>, ProfileStorageError> {
        Self::validate_user_id(user_id)?;

        let path = self.profile_path(user_id);

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ProfileStorageError::IoError(path, e)),
        };

        let profile = serde_json::from_str(&contents)
            .map_err(|e| ProfileStorageError::ParseError(path, e))?;

        Ok(Some(profile))
    }

    /// Saves a user's profile, replacing any previous one.
    pub fn save(
        &self,
        user_id: &str,
        profile: &StoredProfile,
    ) -> Result<(), ProfileStorageError> {
        Self::validate_user_id(user_id)?;

        let user_dir = self.data_dir.join(user_id);
        let path = self.profile_path(user_id);

        fs::create_dir_all(&user_dir)
            .map_err(|e| ProfileStorageError::IoError(user_dir.clone(), e))?;

        let json = serde_json::to_string(profile)
            .map_err(|e| ProfileStorageError::ParseError(path.clone(), e))?;

        // Write atomically using temp file + rename
        let temp_path = path.with_extension("json.tmp");

        let mut file = File::create(&temp_path)
            .map_err(|e| ProfileStorageError::IoError(temp_path.clone(), e))?;

        file.write_all(json.as_bytes())
            .map_err(|e| ProfileStorageError::IoError(temp_path.clone(), e))?;

        file.sync_all()
            .map_err(|e| ProfileStorageError::IoError(temp_path.clone(), e))?;

        fs::rename(&temp_path, &path).map_err(|e| ProfileStorageError::IoError(path, e))?;

        Ok(())
    }

    /// Checks if a user has a stored profile.
    pub fn exists(&self, user_id: &str) -> Result<bool, ProfileStorageError> {
        Self::validate_user_id(user_id)?;
        Ok(self.profile_path(user_id).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (ProfileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = ProfileStorage::new(temp_dir.path());
        (storage, temp_dir)
    }

    fn profile_with(name: &str) -> StoredProfile {
        StoredProfile {
            exercises: vec![Exercise::new(name)],
            workouts: Vec::new(),
            last_sync_timestamp: Some(Utc::now()),
        }
    }

    #[test]
    fn test_validate_user_id() {
        // Valid
        assert!(ProfileStorage::validate_user_id("u_42").is_ok());
        assert!(ProfileStorage::validate_user_id("alice").is_ok());
        assert!(ProfileStorage::validate_user_id("user-123").is_ok());

        // Invalid
        assert!(ProfileStorage::validate_user_id("").is_err());
        assert!(ProfileStorage::validate_user_id("../evil").is_err());
        assert!(ProfileStorage::validate_user_id("foo/bar").is_err());
        assert!(ProfileStorage::validate_user_id("foo\\bar").is_err());
        assert!(ProfileStorage::validate_user_id(".hidden").is_err());
    }

    #[test]
    fn test_load_nonexistent_returns_none() {
        let (storage, _temp) = setup();
        assert!(storage.load("u_42").unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (storage, _temp) = setup();

        let profile = profile_with("Squat");
        storage.save("u_42", &profile).unwrap();

        let loaded = storage.load("u_42").unwrap().unwrap();
        assert_eq!(loaded.exercises.len(), 1);
        assert_eq!(loaded.exercises[0].id, profile.exercises[0].id);
        assert_eq!(loaded.exercises[0].name, "Squat");
        assert_eq!(loaded.last_sync_timestamp, profile.last_sync_timestamp);
    }

    #[test]
    fn test_users_are_isolated() {
        let (storage, _temp) = setup();

        storage.save("alice", &profile_with("Squat")).unwrap();
        storage.save("bob", &profile_with("Bench")).unwrap();

        let alice = storage.load("alice").unwrap().unwrap();
        let bob = storage.load("bob").unwrap().unwrap();

        assert_eq!(alice.exercises[0].name, "Squat");
        assert_eq!(bob.exercises[0].name, "Bench");
    }

    #[test]
    fn test_overwrite_existing() {
        let (storage, _temp) = setup();

        storage.save("u_42", &profile_with("Old")).unwrap();
        storage.save("u_42", &profile_with("New")).unwrap();

        let loaded = storage.load("u_42").unwrap().unwrap();
        assert_eq!(loaded.exercises.len(), 1);
        assert_eq!(loaded.exercises[0].name, "New");
    }

    #[test]
    fn test_exists() {
        let (storage, _temp) = setup();

        assert!(!storage.exists("u_42").unwrap());
        storage.save("u_42", &StoredProfile::default()).unwrap();
        assert!(storage.exists("u_42").unwrap());
    }

    #[test]
    fn test_directory_structure() {
        let (storage, temp) = setup();

        storage.save("u_42", &StoredProfile::default()).unwrap();

        assert!(temp.path().join("u_42").join("profile.json").exists());
    }

    #[test]
    fn test_stored_profile_json_field_names() {
        let profile = profile_with("Squat");
        let json = serde_json::to_string(&profile).unwrap();

        assert!(json.contains("\"lastSyncTimestamp\""));
        assert!(!json.contains("last_sync_timestamp"));
    }
}
