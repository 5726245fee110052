use chrono::{NaiveDate, NaiveTime, Utc};
use clap::Args;

use crate::models::WorkoutEntry;
use crate::store::RecordStore;

/// Log a workout entry for an exercise
#[derive(Args)]
pub struct LogCommand {
    /// Exercise ID (UUID) or name
    pub exercise: String,

    /// Weight lifted (0 for bodyweight work)
    #[arg(long, short)]
    pub weight: f64,

    /// Reps per set
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    pub reps: u32,

    /// Number of sets
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    pub sets: u32,

    /// Difficulty rating 1-5, shown as RPE 6-10
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rpe: u8,

    /// Session date (YYYY-MM-DD, defaults to now)
    #[arg(long)]
    pub date: Option<String>,
}

impl LogCommand {
    pub fn run(&self, store: &RecordStore) -> Result<(), Box<dyn std::error::Error>> {
        if self.weight < 0.0 || !self.weight.is_finite() {
            return Err("Weight must be a non-negative number".into());
        }

        let exercise = store
            .find_exercise(&self.exercise)
            .ok_or_else(|| format!("No exercise matching '{}'", self.exercise))?;

        let date = match &self.date {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| format!("Invalid date '{}': {}", raw, e))?
                .and_time(NaiveTime::MIN)
                .and_utc(),
            None => Utc::now(),
        };

        let entry = WorkoutEntry::new(exercise.id, self.weight, self.reps, self.sets, self.rpe, date);
        store.add_workout(entry.clone())?;

        println!(
            "Logged {}: {} on {}",
            exercise.name,
            entry,
            entry.date.format("%Y-%m-%d")
        );

        Ok(())
    }
}
