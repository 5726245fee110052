use chrono::Utc;
use clap::Args;
use std::collections::HashMap;

use crate::metrics::{recent_entries, DashboardStats};
use crate::store::RecordStore;

/// Show aggregated stats and recent activity
#[derive(Args)]
pub struct DashboardCommand {
    /// How many recent entries to show
    #[arg(long, default_value_t = 5)]
    pub recent: usize,
}

impl DashboardCommand {
    pub fn run(&self, store: &RecordStore) -> Result<(), Box<dyn std::error::Error>> {
        let (exercises, workouts) = store.load();
        let stats = DashboardStats::compute(&workouts, Utc::now());

        println!("Dashboard ({})", store.partition());
        println!("==========");
        println!("Sessions:         {}", stats.total_sessions);
        println!("Total volume:     {}", stats.total_volume);
        println!("Exercises trained: {}", stats.unique_exercises);
        println!("Personal records: {}", stats.personal_records);
        match stats.days_since_last_workout {
            Some(0) => println!("Last workout:     today"),
            Some(days) => println!("Last workout:     {} day(s) ago", days),
            None => println!("Last workout:     never"),
        }

        let recent = recent_entries(&workouts, self.recent);
        if !recent.is_empty() {
            let names: HashMap<_, _> = exercises
                .iter()
                .map(|e| (e.id, e.name.as_str()))
                .collect();

            println!();
            println!("Recent entries:");
            for entry in &recent {
                println!(
                    "  {}  {}  {}",
                    entry.date.format("%Y-%m-%d"),
                    names.get(&entry.exercise_id).unwrap_or(&"(unknown)"),
                    entry
                );
            }
        }

        Ok(())
    }
}
