//! Wire types for the profile server endpoints.
//!
//! Field names use camelCase to match the server's JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Exercise, WorkoutEntry};

/// Body of `POST /sync`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    pub exercises: Vec<Exercise>,
    pub workouts: Vec<WorkoutEntry>,
    pub user_id: String,
}

/// Response to `POST /sync`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    pub success: bool,
}

/// Response to `GET /load`: the stored profile, or empty lists with a
/// null timestamp when nothing has been pushed yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResponse {
    pub exercises: Vec<Exercise>,
    pub workouts: Vec<WorkoutEntry>,
    pub last_sync_timestamp: Option<DateTime<Utc>>,
}

impl LoadResponse {
    /// A profile counts as empty only when both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty() && self.workouts.is_empty()
    }
}

/// Response from the `/me` identity endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_sync_request_field_names() {
        let request = SyncRequest {
            exercises: vec![Exercise::new("Squat")],
            workouts: Vec::new(),
            user_id: "u_42".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"userId\":\"u_42\""));
        assert!(json.contains("\"exercises\""));
        assert!(json.contains("\"workouts\""));
        assert!(!json.contains("user_id"));
    }

    #[test]
    fn test_load_response_field_names() {
        let response = LoadResponse {
            exercises: Vec::new(),
            workouts: Vec::new(),
            last_sync_timestamp: Some(Utc::now()),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"lastSyncTimestamp\""));
        assert!(!json.contains("last_sync_timestamp"));
    }

    #[test]
    fn test_load_response_null_timestamp_parses() {
        let json = r#"{"exercises":[],"workouts":[],"lastSyncTimestamp":null}"#;
        let response: LoadResponse = serde_json::from_str(json).unwrap();

        assert!(response.is_empty());
        assert!(response.last_sync_timestamp.is_none());
    }

    #[test]
    fn test_is_empty_requires_both_lists_empty() {
        let mut response = LoadResponse::default();
        assert!(response.is_empty());

        response.exercises.push(Exercise::new("Squat"));
        assert!(!response.is_empty());

        let exercise = response.exercises[0].clone();
        let workouts_only = LoadResponse {
            exercises: Vec::new(),
            workouts: vec![WorkoutEntry::new(
                exercise.id,
                100.0,
                5,
                3,
                3,
                Utc::now(),
            )],
            last_sync_timestamp: None,
        };
        assert!(!workouts_only.is_empty());
    }

    #[test]
    fn test_me_response_parses() {
        let json = r#"{"userId":"u_42"}"#;
        let me: MeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(me.user_id, "u_42");
    }
}
