use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::store::{PartitionId, PartitionIdError};

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Sync configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SyncConfig {
    /// Profile server URL (e.g. "http://localhost:8080")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    /// API key identifying this user to the profile server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl SyncConfig {
    /// Returns true if sync is configured (has both server_url and api_key)
    pub fn is_configured(&self) -> bool {
        self.server_url.is_some() && self.api_key.is_some()
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the local partition files
    pub data_dir: ConfigValue<PathBuf>,
    /// Signed-in user id; absent means the anonymous partition is active
    pub user: ConfigValue<Option<String>>,
    /// Config file path used (if any)
    pub config_file: Option<PathBuf>,
    /// Sync configuration
    pub sync: SyncConfig,
}

/// Internal struct for the config file format
#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sync: Option<SyncConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut user = ConfigValue::new(None, ConfigSource::Default);
        let mut config_file = None;
        let mut sync = SyncConfig::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(id) = file_config.user {
                user = ConfigValue::new(Some(id), ConfigSource::File);
            }
            if let Some(sync_config) = file_config.sync {
                sync = sync_config;
            }
        }

        // Apply environment variable overrides
        if let Ok(dir) = std::env::var("LIFTLOG_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(id) = std::env::var("LIFTLOG_USER") {
            user = ConfigValue::new(Some(id), ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("LIFTLOG_SYNC_URL") {
            sync.server_url = Some(url);
        }
        if let Ok(key) = std::env::var("LIFTLOG_SYNC_API_KEY") {
            sync.api_key = Some(key);
        }

        Ok(Self {
            data_dir,
            user,
            config_file,
            sync,
        })
    }

    /// The active partition: the signed-in user's, or anonymous.
    pub fn partition(&self) -> Result<PartitionId, PartitionIdError> {
        match &self.user.value {
            Some(id) => PartitionId::user(id.clone()),
            None => Ok(PartitionId::Anonymous),
        }
    }

    /// Writes identity and sync settings back to the config file.
    ///
    /// `data_dir` is only written when it came from the file itself, so a
    /// default or env-provided path is not baked in.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let file = ConfigFile {
            data_dir: match self.data_dir.source {
                ConfigSource::File => Some(self.data_dir.value.clone()),
                _ => None,
            },
            user: self.user.value.clone(),
            sync: Some(self.sync.clone()),
        };

        let contents = serde_yaml::to_string(&file)
            .map_err(|e| ConfigError::SerializeError(path.to_path_buf(), e))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(parent.to_path_buf(), e))?;
        }
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::WriteError(path.to_path_buf(), e))?;

        Ok(())
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/liftlog/
    /// - macOS: ~/Library/Application Support/liftlog/
    /// - Windows: %APPDATA%/liftlog/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("liftlog")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/liftlog/
    /// - macOS: ~/Library/Application Support/liftlog/
    /// - Windows: %APPDATA%/liftlog/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("liftlog")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    SerializeError(PathBuf, serde_yaml::Error),
    WriteError(PathBuf, std::io::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::SerializeError(path, e) => {
                write!(
                    f,
                    "Failed to serialize config file '{}': {}",
                    path.display(),
                    e
                )
            }
            ConfigError::WriteError(path, e) => {
                write!(f, "Failed to write config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config.data_dir.value.to_string_lossy().contains("liftlog"));
        assert_eq!(config.data_dir.source, ConfigSource::Default);
        assert_eq!(config.user.value, None);
        assert_eq!(config.partition().unwrap(), PartitionId::Anonymous);
        assert!(!config.sync.is_configured());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: /custom/liftlog").unwrap();
        writeln!(file, "user: u_42").unwrap();
        writeln!(file, "sync:").unwrap();
        writeln!(file, "  server_url: http://localhost:8080").unwrap();
        writeln!(file, "  api_key: secret").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.data_dir.value, PathBuf::from("/custom/liftlog"));
        assert_eq!(config.data_dir.source, ConfigSource::File);
        assert_eq!(config.user.value.as_deref(), Some("u_42"));
        assert_eq!(
            config.partition().unwrap(),
            PartitionId::user("u_42").unwrap()
        );
        assert!(config.sync.is_configured());
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_relative_data_dir_resolved_against_config_dir() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: data").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_dir.value, temp_dir.path().join("data"));
    }

    #[test]
    fn test_save_and_reload_identity() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::load(Some(config_path.clone())).unwrap();
        config.user = ConfigValue::new(Some("u_42".to_string()), ConfigSource::File);
        config.sync.server_url = Some("http://localhost:8080".to_string());
        config.sync.api_key = Some("secret".to_string());
        config.save(&config_path).unwrap();

        let reloaded = Config::load(Some(config_path)).unwrap();
        assert_eq!(reloaded.user.value.as_deref(), Some("u_42"));
        assert!(reloaded.sync.is_configured());
        // Default data_dir must not have been baked into the file
        assert_eq!(reloaded.data_dir.source, ConfigSource::Default);
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
