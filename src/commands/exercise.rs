use clap::{Args, Subcommand, ValueEnum};

use crate::metrics::{personal_records, progression};
use crate::models::Exercise;
use crate::store::RecordStore;

use super::confirm;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ExerciseCommand {
    #[command(subcommand)]
    pub command: ExerciseSubcommand,
}

#[derive(Subcommand)]
pub enum ExerciseSubcommand {
    /// Add a new exercise
    Add {
        /// Name of the exercise
        name: String,
    },

    /// List exercises with their PR weight and trend
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete an exercise and all workout entries logged for it
    Delete {
        /// Exercise ID (UUID) or name
        identifier: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl ExerciseCommand {
    pub fn run(&self, store: &RecordStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ExerciseSubcommand::Add { name } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err("Exercise name cannot be empty".into());
                }
                if store.find_exercise(name).is_some() {
                    return Err(format!("An exercise named '{}' already exists", name).into());
                }

                let exercise = Exercise::new(name);
                store.add_exercise(exercise.clone())?;
                println!("Added exercise '{}' ({})", exercise.name, exercise.id);
            }

            ExerciseSubcommand::List { format } => {
                let (exercises, workouts) = store.load();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&exercises)?);
                    }
                    OutputFormat::Text => {
                        if exercises.is_empty() {
                            println!("No exercises yet. Add one with: liftlog exercise add <name>");
                            return Ok(());
                        }

                        let records = personal_records(&workouts);
                        for exercise in &exercises {
                            let trend = progression(&workouts, exercise.id);
                            let pr = match records.get(&exercise.id) {
                                Some(weight) => format!("PR {}", weight),
                                None => "no entries".to_string(),
                            };
                            println!(
                                "{} {}  ({}, {})",
                                trend.arrow(),
                                exercise.name,
                                pr,
                                exercise.id
                            );
                        }
                    }
                }
            }

            ExerciseSubcommand::Delete { identifier, force } => {
                let exercise = store
                    .find_exercise(identifier)
                    .ok_or_else(|| format!("No exercise matching '{}'", identifier))?;

                let entry_count = store
                    .workouts()
                    .iter()
                    .filter(|w| w.exercise_id == exercise.id)
                    .count();

                if !force {
                    let prompt = format!(
                        "Delete '{}' and its {} workout entr{}?",
                        exercise.name,
                        entry_count,
                        if entry_count == 1 { "y" } else { "ies" }
                    );
                    if !confirm(&prompt)? {
                        println!("Cancelled");
                        return Ok(());
                    }
                }

                let purged = store.delete_exercise(exercise.id)?;
                println!(
                    "Deleted '{}' and {} workout entr{}",
                    exercise.name,
                    purged,
                    if purged == 1 { "y" } else { "ies" }
                );
            }
        }

        Ok(())
    }
}
