//! Identity commands: sign in to a cloud profile, sign out, show status.
//!
//! Signing in resolves the API key to a user id via the server's `/me`
//! endpoint, switches the active partition to that user, and runs the
//! sign-in reconciliation against the cloud profile.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, ConfigSource, ConfigValue};
use crate::store::{LocalStore, PartitionId, RecordStore};
use crate::sync::{reconcile, ReconcileOutcome, SyncClient};

/// Sign in and out of a cloud profile
#[derive(Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand)]
enum AuthSubcommand {
    /// Sign in with an API key
    Login {
        /// API key for the profile server
        #[arg(long, short)]
        key: String,

        /// Profile server URL (defaults to the configured one)
        #[arg(long, short)]
        server: Option<String>,
    },
    /// Sign out and return to the anonymous partition
    Logout,
    /// Show the current identity state
    Status,
}

impl AuthCommand {
    pub async fn run(
        &self,
        config: &Config,
        cli_config_path: Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            AuthSubcommand::Login { key, server } => {
                login(config, cli_config_path, key, server.as_deref()).await
            }
            AuthSubcommand::Logout => logout(config, cli_config_path),
            AuthSubcommand::Status => status(config),
        }
    }
}

fn config_save_path(config: &Config, cli_config_path: Option<PathBuf>) -> PathBuf {
    cli_config_path
        .or_else(|| config.config_file.clone())
        .unwrap_or_else(Config::default_config_path)
}

async fn login(
    config: &Config,
    cli_config_path: Option<PathBuf>,
    key: &str,
    server: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let server_url = server
        .map(str::to_string)
        .or_else(|| config.sync.server_url.clone())
        .ok_or("No server URL. Pass --server or set sync.server_url in config.")?;

    let client = SyncClient::new(server_url.clone(), key.to_string());
    let user_id = client.fetch_identity().await?;
    let partition = PartitionId::user(user_id.clone())?;

    let mut updated = config.clone();
    updated.user = ConfigValue::new(Some(user_id.clone()), ConfigSource::File);
    updated.sync.server_url = Some(server_url);
    updated.sync.api_key = Some(key.to_string());
    updated.save(&config_save_path(config, cli_config_path))?;

    println!("Signed in as {}", user_id);

    // Identity changed: reconcile the user's partition with the cloud
    let store = RecordStore::new(LocalStore::new(updated.data_dir.value.clone()), partition);
    match reconcile(&client, &store, &user_id).await? {
        ReconcileOutcome::ReplacedLocal => {
            let (exercises, workouts) = store.load();
            println!(
                "Cloud profile restored ({} exercises, {} workout entries)",
                exercises.len(),
                workouts.len()
            );
        }
        ReconcileOutcome::PushedLocal => {
            println!("No cloud profile yet; uploaded local data");
        }
        ReconcileOutcome::Offline => {
            println!("Server unreachable; working offline");
        }
    }

    Ok(())
}

fn logout(
    config: &Config,
    cli_config_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.user.value.is_none() {
        println!("Not signed in");
        return Ok(());
    }

    let mut updated = config.clone();
    updated.user = ConfigValue::new(None, ConfigSource::File);
    updated.sync.api_key = None;
    updated.save(&config_save_path(config, cli_config_path))?;

    println!("Signed out; the anonymous partition is active");
    Ok(())
}

fn status(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match &config.user.value {
        Some(user) => println!("Signed in as {}", user),
        None => println!("Not signed in (anonymous partition)"),
    }

    match &config.sync.server_url {
        Some(url) => println!("Server:  {}", url),
        None => println!("Server:  not configured"),
    }

    if let Some(key) = &config.sync.api_key {
        println!("API key: {}...", &key[..key.len().min(8)]);
    }

    Ok(())
}
