use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::WorkoutEntry;

/// Aggregated statistics over a workout history.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    /// Number of logged entries.
    pub total_sessions: usize,
    /// Sum of weight x reps x sets across all entries.
    pub total_volume: f64,
    /// Number of distinct exercises with at least one entry.
    pub unique_exercises: usize,
    /// One personal-record slot per exercise with a tracked max weight.
    pub personal_records: usize,
    /// Whole days since the most recent entry; `None` with no entries.
    pub days_since_last_workout: Option<i64>,
}

impl DashboardStats {
    pub fn compute(entries: &[WorkoutEntry], now: DateTime<Utc>) -> Self {
        let records = personal_records(entries);
        Self {
            total_sessions: entries.len(),
            total_volume: entries.iter().map(WorkoutEntry::volume).sum(),
            unique_exercises: records.len(),
            personal_records: records.len(),
            days_since_last_workout: days_since_last_workout(entries, now),
        }
    }
}

/// Maximum logged weight per exercise.
pub fn personal_records(entries: &[WorkoutEntry]) -> HashMap<Uuid, f64> {
    let mut records: HashMap<Uuid, f64> = HashMap::new();
    for entry in entries {
        let max = records.entry(entry.exercise_id).or_insert(entry.weight);
        if entry.weight > *max {
            *max = entry.weight;
        }
    }
    records
}

/// Whole days elapsed since the most recent entry, or `None` when the
/// history is empty. A future-dated entry counts as zero days ago.
pub fn days_since_last_workout(entries: &[WorkoutEntry], now: DateTime<Utc>) -> Option<i64> {
    let latest = entries.iter().map(|e| e.date).max()?;
    Some(now.signed_duration_since(latest).num_days().max(0))
}

/// The `n` entries with the greatest date, newest first. Entries sharing
/// a date keep their original list order (stable sort).
pub fn recent_entries(entries: &[WorkoutEntry], n: usize) -> Vec<WorkoutEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}
