use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One logged set-group: weight x reps x sets at a given difficulty, for
/// one exercise, on one date.
///
/// `difficulty` is a 1-5 proxy for Rate of Perceived Exertion, shown to
/// the user as "RPE 6".."RPE 10".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    pub id: Uuid,
    pub exercise_id: Uuid,
    pub weight: f64,
    pub reps: u32,
    pub sets: u32,
    pub difficulty: u8,
    pub date: DateTime<Utc>,
}

impl WorkoutEntry {
    pub fn new(
        exercise_id: Uuid,
        weight: f64,
        reps: u32,
        sets: u32,
        difficulty: u8,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            exercise_id,
            weight,
            reps,
            sets,
            difficulty,
            date,
        }
    }

    /// Training volume for this entry: weight x reps x sets.
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps) * f64::from(self.sets)
    }

    /// Display label for the difficulty rating: 1-5 maps to "RPE 6".."RPE 10".
    pub fn rpe_label(&self) -> String {
        format!("RPE {}", u16::from(self.difficulty) + 5)
    }
}

impl fmt::Display for WorkoutEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x {} x {} @ {}",
            self.weight,
            self.reps,
            self.sets,
            self.rpe_label()
        )
    }
}
