//! On-demand sync with the profile server.

use clap::{Args, Subcommand};

use crate::config::Config;
use crate::store::RecordStore;
use crate::sync::SyncClient;

/// Push local data to the cloud profile
#[derive(Args)]
pub struct SyncCommand {
    #[command(subcommand)]
    command: Option<SyncSubcommand>,
}

#[derive(Subcommand)]
enum SyncSubcommand {
    /// Show sync configuration and server status
    Status,
}

impl SyncCommand {
    pub async fn run(
        &self,
        store: &RecordStore,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            None => self.push(store, config).await,
            Some(SyncSubcommand::Status) => self.status(config).await,
        }
    }

    async fn push(
        &self,
        store: &RecordStore,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let client = SyncClient::from_config(&config.sync)?;
        let user_id = config
            .user
            .value
            .clone()
            .ok_or("Not signed in. Run: liftlog auth login --key <key>")?;

        let (exercises, workouts) = store.load();

        // Sync failures never block local use; report and stay local-only
        match client.push(&user_id, &exercises, &workouts).await {
            Ok(true) => {
                println!(
                    "Pushed {} exercises and {} workout entries",
                    exercises.len(),
                    workouts.len()
                );
            }
            Ok(false) => {
                tracing::warn!("Server rejected sync push");
                println!("✗ Server rejected the push; local data unchanged");
            }
            Err(e) => {
                tracing::warn!("Sync push failed: {}", e);
                println!("✗ Sync failed ({}); local data unchanged", e);
            }
        }

        Ok(())
    }

    async fn status(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        println!("Sync Configuration");
        println!("==================");
        println!();

        if !config.sync.is_configured() {
            println!("Status: Not configured");
            println!();
            println!("To enable sync, add to your config file:");
            println!();
            println!("  sync:");
            println!("    server_url: \"http://localhost:8080\"");
            println!("    api_key: \"your-api-key\"");
            println!();
            println!("Or set environment variables:");
            println!("  LIFTLOG_SYNC_URL");
            println!("  LIFTLOG_SYNC_API_KEY");
            return Ok(());
        }

        let client = SyncClient::from_config(&config.sync)?;
        println!("Server:  {}", client.server_url());
        if let Some(key) = &config.sync.api_key {
            println!("API key: {}...", &key[..key.len().min(8)]);
        }
        match &config.user.value {
            Some(user) => println!("User:    {}", user),
            None => println!("User:    not signed in"),
        }
        println!();

        print!("Server status: ");
        match client.fetch_identity().await {
            Ok(user_id) => println!("✓ connected (key belongs to {})", user_id),
            Err(e) => println!("✗ {}", e),
        }

        Ok(())
    }
}
