use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

use crate::models::WorkoutEntry;

/// Direction of change between the two most recent entries for one
/// exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Neutral => "→",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Neutral => write!(f, "neutral"),
        }
    }
}

/// Compares the latest entry for `exercise_id` against the one before it.
///
/// Weight decides first; reps break a weight tie. Sets and difficulty are
/// never part of the comparison. Fewer than two entries is `Neutral`.
pub fn progression(entries: &[WorkoutEntry], exercise_id: Uuid) -> Trend {
    let mut history: Vec<&WorkoutEntry> = entries
        .iter()
        .filter(|e| e.exercise_id == exercise_id)
        .collect();

    if history.len() < 2 {
        return Trend::Neutral;
    }

    history.sort_by(|a, b| a.date.cmp(&b.date));
    let latest = history[history.len() - 1];
    let previous = history[history.len() - 2];

    match latest.weight.total_cmp(&previous.weight) {
        Ordering::Greater => Trend::Up,
        Ordering::Less => Trend::Down,
        Ordering::Equal => match latest.reps.cmp(&previous.reps) {
            Ordering::Greater => Trend::Up,
            Ordering::Less => Trend::Down,
            Ordering::Equal => Trend::Neutral,
        },
    }
}
