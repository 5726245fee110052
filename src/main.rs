use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use liftlog::commands::{
    AuthCommand, ConfigCommand, DashboardCommand, ExerciseCommand, HistoryCommand, LogCommand,
    SyncCommand,
};
use liftlog::config::Config;
use liftlog::store::{LocalStore, RecordStore};

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(version)]
#[command(about = "A workout logging CLI application", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show aggregated stats and recent activity
    Dashboard(DashboardCommand),

    /// Log a workout entry
    Log(LogCommand),

    /// Manage exercises (lifts)
    Exercise(ExerciseCommand),

    /// Browse and edit the workout history
    History(HistoryCommand),

    /// Sign in and out of a cloud profile
    Auth(AuthCommand),

    /// Push local data to the cloud profile
    Sync(SyncCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "liftlog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for commands that rewrite the config file
    let cli_config_path = cli.config.clone();

    // Load configuration and open the active partition
    let config = Config::load(cli.config)?;
    let store = RecordStore::new(
        LocalStore::new(config.data_dir.value.clone()),
        config.partition()?,
    );

    match cli.command {
        Some(Commands::Dashboard(cmd)) => cmd.run(&store)?,
        Some(Commands::Log(cmd)) => cmd.run(&store)?,
        Some(Commands::Exercise(cmd)) => cmd.run(&store)?,
        Some(Commands::History(cmd)) => cmd.run(&store)?,
        Some(Commands::Auth(cmd)) => cmd.run(&config, cli_config_path).await?,
        Some(Commands::Sync(cmd)) => cmd.run(&store, &config).await?,
        Some(Commands::Config(cmd)) => cmd.run(&config, cli_config_path)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
