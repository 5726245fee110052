mod auth;
mod config_cmd;
mod dashboard;
mod exercise;
mod history;
mod log;
mod sync_cmd;

pub use auth::AuthCommand;
pub use config_cmd::ConfigCommand;
pub use dashboard::DashboardCommand;
pub use exercise::{ExerciseCommand, OutputFormat};
pub use history::HistoryCommand;
pub use log::LogCommand;
pub use sync_cmd::SyncCommand;

use std::io::{self, Write};

/// Asks the user for a yes/no confirmation. Defaults to no.
pub(crate) fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N]: ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
