use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub import: ImportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Overlay files that were found but could not be applied
    #[serde(skip)]
    pub skipped_overlays: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    #[serde(default = "default_dialect")]
    pub dialect: String,

    /// Property file used when no field values are given on the command line
    pub properties_file: Option<String>,

    /// Model name for single-database imports
    pub model_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_dialect() -> String {
    "postgres".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            dialect: default_dialect(),
            properties_file: None,
            model_name: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Overlay file contents: only the keys the file actually sets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigOverlay {
    #[serde(default)]
    pub import: ImportOverlay,

    #[serde(default)]
    pub logging: LoggingOverlay,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportOverlay {
    pub dialect: Option<String>,
    pub properties_file: Option<String>,
    pub model_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingOverlay {
    pub level: Option<String>,
}

impl ConfigOverlay {
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_string(), e.to_string()))
    }
}

impl Config {
    /// Load configuration from file with environment override support
    pub fn load(config_path: Option<&str>, environment: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = config_path {
            config = Self::load_from_file(path)?;
        } else {
            for standard_path in Self::standard_config_paths() {
                if standard_path.exists() {
                    debug!("Loading config from: {}", standard_path.display());
                    config = Self::load_from_file(&standard_path.to_string_lossy())?;
                    break;
                }
            }
        }

        if let Some(env) = environment {
            let env_path = format!("config/{}.toml", env);
            match ConfigOverlay::load_from_file(&env_path) {
                Ok(overlay) => {
                    debug!("Applying environment config for: {}", env);
                    config = config.merge(overlay);
                }
                Err(ConfigError::FileRead(..)) => {
                    config
                        .skipped_overlays
                        .push(format!("No environment config found at {}", env_path));
                }
                Err(e) => config.skipped_overlays.push(e.to_string()),
            }
        }

        // Local overrides always apply last
        match ConfigOverlay::load_from_file("config/local.toml") {
            Ok(overlay) => {
                debug!("Applying local config overrides");
                config = config.merge(overlay);
            }
            Err(ConfigError::FileRead(..)) => {}
            Err(e) => config.skipped_overlays.push(e.to_string()),
        }

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_string(), e.to_string()))
    }

    /// Standard configuration file paths in order of precedence
    fn standard_config_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from("dbimport.toml"),
            PathBuf::from("config/default.toml"),
        ]
    }

    /// Apply an overlay. Keys the overlay leaves out keep their current values.
    pub fn merge(mut self, overlay: ConfigOverlay) -> Self {
        if let Some(dialect) = overlay.import.dialect {
            self.import.dialect = dialect;
        }
        if overlay.import.properties_file.is_some() {
            self.import.properties_file = overlay.import.properties_file;
        }
        if overlay.import.model_name.is_some() {
            self.import.model_name = overlay.import.model_name;
        }
        if let Some(level) = overlay.logging.level {
            self.logging.level = level;
        }

        self
    }

    /// Generate a default configuration file
    pub fn generate_default_config(path: &str) -> Result<(), ConfigError> {
        let config = Config::default();
        let toml_content =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, toml_content)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse config file '{0}': {1}")]
    Parse(String, String),

    #[error("Failed to write config file '{0}': {1}")]
    FileWrite(String, String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),
}
