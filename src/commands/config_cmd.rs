use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

/// Manage configuration
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Show the effective configuration and where each value came from
    Show,
    /// Print the config file path in use
    Path,
}

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        cli_config_path: Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show => {
                println!(
                    "data_dir: {} ({})",
                    config.data_dir.value.display(),
                    config.data_dir.source
                );
                match &config.user.value {
                    Some(user) => println!("user: {} ({})", user, config.user.source),
                    None => println!("user: (anonymous)"),
                }
                match &config.sync.server_url {
                    Some(url) => println!("sync.server_url: {}", url),
                    None => println!("sync.server_url: (unset)"),
                }
                match &config.sync.api_key {
                    Some(key) => println!("sync.api_key: {}...", &key[..key.len().min(8)]),
                    None => println!("sync.api_key: (unset)"),
                }
            }
            ConfigSubcommand::Path => {
                let path = cli_config_path
                    .or_else(|| config.config_file.clone())
                    .unwrap_or_else(Config::default_config_path);
                println!("{}", path.display());
            }
        }

        Ok(())
    }
}
