//! Application Configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file name looked up in the standard locations
pub const CONFIG_FILE_NAME: &str = "intercom-history.toml";

/// Application configuration loaded from intercom-history.toml
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// History storage section
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging section
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where call history is stored
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory; the platform data dir is used when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// History file name inside the data directory
    #[serde(default = "default_history_file_name")]
    pub history_file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            history_file_name: default_history_file_name(),
        }
    }
}

fn default_history_file_name() -> String {
    "history_events.toml".to_string()
}

/// Logging preferences
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Let debug and trace messages of the telephony engine through
    #[serde(default)]
    pub debug: bool,

    /// Domain prefixed to application log lines
    #[serde(default = "default_domain")]
    pub domain: String,

    /// `tracing` filter directive; overridden by RUST_LOG
    #[serde(default)]
    pub filter: Option<String>,

    /// Write logs to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            domain: default_domain(),
            filter: None,
            log_file: None,
        }
    }
}

fn default_domain() -> String {
    "intercom-history".to_string()
}

impl LoggingConfig {
    /// Filter directive used when RUST_LOG is not set
    pub fn default_filter(&self) -> String {
        match &self.filter {
            Some(filter) => filter.clone(),
            None if self.debug => "debug".to_string(),
            None => "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Find the config file in standard locations
    pub fn find_config_path() -> Option<PathBuf> {
        // Check in order: user config dir, exe dir, cwd
        let candidates = [
            dirs::config_dir().map(|p| p.join("intercom-history").join(CONFIG_FILE_NAME)),
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join(CONFIG_FILE_NAME))),
            Some(PathBuf::from(CONFIG_FILE_NAME)),
        ];

        candidates.into_iter().flatten().find(|candidate| candidate.exists())
    }

    /// Load configuration from file, returning defaults if not found or invalid
    pub fn load() -> Self {
        match Self::find_config_path() {
            Some(path) => Self::load_from_path(&path).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Data directory, falling back to `default_dir`
    pub fn data_dir(&self, default_dir: &Path) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(|| default_dir.to_path_buf())
    }

    /// Full path of the history file
    pub fn history_path(&self, default_dir: &Path) -> PathBuf {
        self.data_dir(default_dir).join(&self.storage.history_file_name)
    }
}

/// Configuration error
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::ParseError(e)
    }
}
