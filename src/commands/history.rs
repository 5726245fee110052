use clap::{Args, Subcommand};
use std::collections::HashMap;
use uuid::Uuid;

use crate::metrics::recent_entries;
use crate::store::RecordStore;

use super::{confirm, OutputFormat};

#[derive(Args)]
pub struct HistoryCommand {
    #[command(subcommand)]
    pub command: Option<HistorySubcommand>,
}

#[derive(Subcommand)]
pub enum HistorySubcommand {
    /// List workout entries, newest first
    List {
        /// Show at most this many entries
        #[arg(long, short)]
        limit: Option<usize>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a single workout entry
    Delete {
        /// Workout entry ID (UUID)
        id: Uuid,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl HistoryCommand {
    pub fn run(&self, store: &RecordStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            None => self.list(store, None, &OutputFormat::Text),
            Some(HistorySubcommand::List { limit, format }) => self.list(store, *limit, format),
            Some(HistorySubcommand::Delete { id, force }) => self.delete(store, *id, *force),
        }
    }

    fn list(
        &self,
        store: &RecordStore,
        limit: Option<usize>,
        format: &OutputFormat,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (exercises, workouts) = store.load();
        let entries = recent_entries(&workouts, limit.unwrap_or(workouts.len()));

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
            OutputFormat::Text => {
                if entries.is_empty() {
                    println!("No workout entries yet. Log one with: liftlog log <exercise> ...");
                    return Ok(());
                }

                let names: HashMap<_, _> = exercises
                    .iter()
                    .map(|e| (e.id, e.name.as_str()))
                    .collect();

                for entry in &entries {
                    println!(
                        "{}  {}  {}  ({})",
                        entry.date.format("%Y-%m-%d"),
                        names.get(&entry.exercise_id).unwrap_or(&"(unknown)"),
                        entry,
                        entry.id
                    );
                }
            }
        }

        Ok(())
    }

    fn delete(
        &self,
        store: &RecordStore,
        id: Uuid,
        force: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !force && !confirm("Delete this workout entry?")? {
            println!("Cancelled");
            return Ok(());
        }

        store.delete_workout(id)?;
        println!("Deleted workout entry {}", id);
        Ok(())
    }
}
