// GenBrowser Configuration Store
// Loads and saves the browser configuration as a JSON file at the platform-specific config path.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::platform;
use crate::types::errors::ConfigError;
use crate::types::settings::BrowserConfig;

/// Trait defining the configuration store interface.
pub trait ConfigStoreTrait {
    fn load(&mut self) -> Result<BrowserConfig, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn config(&self) -> &BrowserConfig;
    fn set_config(&mut self, config: BrowserConfig);
    fn config_path(&self) -> &Path;
}

/// JSON-file backed configuration store.
pub struct ConfigStore {
    config_path: PathBuf,
    config: BrowserConfig,
}

impl ConfigStore {
    /// Creates a new ConfigStore.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `config.json`.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let config_path =
            path_override.unwrap_or_else(|| platform::get_config_dir().join("config.json"));

        Self {
            config_path,
            config: BrowserConfig::default(),
        }
    }
}

impl ConfigStoreTrait for ConfigStore {
    /// Loads the configuration from disk.
    ///
    /// If the file does not exist, returns the defaults.
    /// If the file exists but is malformed, returns a serialization error and
    /// keeps the previous in-memory configuration.
    fn load(&mut self) -> Result<BrowserConfig, ConfigError> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no config file, using defaults");
            self.config = BrowserConfig::default();
            return Ok(self.config.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file: {}", e)))?;

        let mut config: BrowserConfig = serde_json::from_str(&content).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        config.zoom = config.zoom.sanitized();

        self.config = config;
        Ok(self.config.clone())
    }

    /// Writes the current configuration, creating parent directories if needed.
    fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.config).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&self.config_path, json)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn config(&self) -> &BrowserConfig {
        &self.config
    }

    fn set_config(&mut self, config: BrowserConfig) {
        self.config = config;
    }

    fn config_path(&self) -> &Path {
        &self.config_path
    }
}
