use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A named movement the user trains (e.g. "Back Squat").
///
/// Field names are camelCase in JSON to match the persisted partition
/// format and the profile server's wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Exercise {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_unique_ids() {
        let a = Exercise::new("Back Squat");
        let b = Exercise::new("Back Squat");
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "Back Squat");
    }

    #[test]
    fn test_json_uses_camel_case_fields() {
        let exercise = Exercise::new("Deadlift");
        let json = serde_json::to_string(&exercise).unwrap();

        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"name\":\"Deadlift\""));
        assert!(!json.contains("created_at"));
    }

    #[test]
    fn test_json_roundtrip() {
        let exercise = Exercise::new("Bench Press");
        let json = serde_json::to_string(&exercise).unwrap();
        let parsed: Exercise = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, exercise.id);
        assert_eq!(parsed.name, exercise.name);
        assert_eq!(parsed.created_at, exercise.created_at);
    }
}
